//! Parser, timeline compiler and note density analyzer for BMS/PMS charts.
//!
//! The pipeline runs in three steps:
//!
//! 1. [`bms`] reads the chart text, resolving `#RANDOM`/`#IF`/`#SWITCH` blocks, into a
//!    [`ParsedChart`](bms::model::ParsedChart) of metadata, a measure grid and symbol tables.
//! 2. [`chart_process`] walks the measures with the BPM changes and stops into notes on the
//!    absolute timeline.
//! 3. [`density`] buckets the notes into 1-second bins and derives the density and difficulty
//!    scores, including the terminal segment decided by the clear gauge.
//!
//! [`summary`] has helpers for results grouped by difficulty label.
//!
//! # Example
//!
//! ```
//! use pms_density::{
//!     bms::{default_config, parse_chart},
//!     density::analyze,
//! };
//!
//! let source = "\
//! #TITLE example
//! #BPM 120
//! #TOTAL 300
//! #00011:01010101
//! #00115:0101
//! ";
//! let output = parse_chart(source, default_config());
//! assert!(output.warnings.is_empty());
//!
//! let chart = output.chart.compile();
//! assert_eq!(chart.metadata.title, "example");
//! assert_eq!(chart.notes.len(), 6);
//!
//! let result = analyze(&chart.notes, chart.metadata.total);
//! assert_eq!(result.per_second_total, vec![2, 2, 2]);
//! assert!(result.terminal_window.is_some());
//! ```
//!
//! # Features
//!
//! - `serde`: serialization of the models and results, including the cache snapshot.
//! - `rand`: `RandRng` resolving `#RANDOM` with a `rand` generator.
//! - `diagnostics`: rendering parse warnings with `ariadne`.

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod bms;
pub mod chart_process;
pub mod density;
#[cfg(feature = "diagnostics")]
pub mod diagnostics;
pub mod summary;

mod util;
