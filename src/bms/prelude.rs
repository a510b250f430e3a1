//! Prelude module for the chart parser.
//!
//! This module re-exports all public types from the [`bms`](super) module for convenient access.
//! You can use `use pms_density::bms::prelude::*;` to import all of them at once.

#[cfg(feature = "diagnostics")]
pub use crate::diagnostics::{SimpleSource, ToAriadne, emit_chart_warnings};

pub use super::{
    ChartOutput, DEFAULT_BPM, LoadError, ParseConfig,
    command::{
        ObjId,
        channel::{Channel, LANE_COUNT, Lane, read_channel},
        mixin::{SourceRangeMixin, SourceRangeMixinExt},
        time::Track,
    },
    control_flow::ControlFlow,
    decode::{DecodedSource, decode_bytes, read_chart_source},
    default_config, default_config_with_rng,
    lex::{
        LexOutput, parse_lex_tokens,
        token::{ControlCommand, Token, TokenWithRange},
    },
    load_chart,
    model::{
        BpmStats, ChannelMessage, Chart, ChartMetadata, MeasureGrid, Note, ParsedChart,
        SymbolTables,
    },
    parse::{ParseWarning, ParseWarningWithRange},
    parse_chart,
    rng::{FirstBranch, Rng, RngMock},
};

// Re-export related members when `rand` feature is enabled
#[cfg(feature = "rand")]
pub use super::rng::RandRng;
