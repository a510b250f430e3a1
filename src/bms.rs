//! The parser module of BMS/PMS (.bms/.bme/.bml/.pms) chart files.
//!
//! This module consists of two phases: lexical analyzing and token parsing.
//!
//! `lex` module classifies each line into a token: a control command (`#RANDOM`, `#IF`,
//! `#SWITCH`, ...), a header, a channel message or not a command.
//!
//! `parse` module resolves conditional compilation with [`control_flow`] and accumulates the
//! metadata, the measure grid and the symbol tables into [`ParsedChart`]. Compiling it into notes
//! on the absolute timeline is done by [`crate::chart_process`].
//!
//! In detail, our policies are:
//!
//! - Never fail on the content. Malformed values are dropped with a warning, keeping the previous
//!   or default value.
//! - The only failure is an unreadable file, see [`load_chart`].
//! - Files may be UTF-8, Shift-JIS or EUC-JP, see [`decode`].
//! - `#RANDOM` takes the first branch unless another [`Rng`] is configured.

pub mod command;
pub mod control_flow;
pub mod decode;
pub mod lex;
pub mod model;
pub mod parse;
pub mod prelude;
pub mod rng;

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use self::{
    lex::LexOutput,
    model::ParsedChart,
    parse::ParseWarningWithRange,
    rng::{FirstBranch, Rng},
};

/// The base BPM of a chart without a valid `#BPM`.
pub const DEFAULT_BPM: f64 = 130.0;

/// Configuration of parsing a chart.
///
/// ```
/// use pms_density::bms::{default_config, rng::RngMock};
///
/// let config = default_config().default_bpm(150.0).rng(RngMock([2]));
/// # let _ = config;
/// ```
#[derive(Debug, Clone)]
pub struct ParseConfig<R> {
    pub(crate) default_bpm: f64,
    pub(crate) rng: R,
}

/// Creates the default configuration: base BPM 130 and the [`FirstBranch`] resolver.
#[must_use]
pub const fn default_config() -> ParseConfig<FirstBranch> {
    default_config_with_rng(FirstBranch)
}

/// Creates the default configuration with the random number generator.
#[must_use]
pub const fn default_config_with_rng<R>(rng: R) -> ParseConfig<R> {
    ParseConfig {
        default_bpm: DEFAULT_BPM,
        rng,
    }
}

impl<R> ParseConfig<R> {
    /// Sets the base BPM used when `#BPM` is missing or invalid.
    #[must_use]
    pub fn default_bpm(mut self, bpm: f64) -> Self {
        self.default_bpm = bpm;
        self
    }

    /// Replaces the random number generator resolving `#RANDOM`.
    #[must_use]
    pub fn rng<R2: Rng>(self, rng: R2) -> ParseConfig<R2> {
        ParseConfig {
            default_bpm: self.default_bpm,
            rng,
        }
    }
}

/// The only failure of loading a chart.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The chart file could not be read.
    #[error("failed to read chart {}: {source}", path.display())]
    Io {
        /// The path of the chart.
        path: PathBuf,
        /// The cause.
        #[source]
        source: std::io::Error,
    },
}

/// Output of parsing a chart.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ChartOutput {
    /// The parsed chart.
    pub chart: ParsedChart,
    /// Warnings that occurred during parsing.
    pub warnings: Vec<ParseWarningWithRange>,
}

/// Parses a chart from source text.
///
/// # Example
///
/// ```
/// use pms_density::bms::{ChartOutput, default_config, parse_chart};
///
/// let source = "#TITLE Test Song\n#BPM 120\n#00111:0101";
/// let ChartOutput { chart, warnings } = parse_chart(source, default_config());
/// assert_eq!(chart.metadata.title, "Test Song");
/// assert!(warnings.is_empty());
/// ```
pub fn parse_chart<R: Rng>(source: &str, config: ParseConfig<R>) -> ChartOutput {
    let LexOutput { tokens } = lex::parse_lex_tokens(source);
    ParsedChart::from_token_stream(&tokens, config)
}

/// Reads, decodes and parses a chart file. The title defaults to the file stem.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file could not be read.
pub fn load_chart<R: Rng>(
    path: impl AsRef<Path>,
    config: ParseConfig<R>,
) -> Result<ChartOutput, LoadError> {
    let path = path.as_ref();
    let source = decode::read_chart_source(path)?;
    debug!(
        path = %path.display(),
        encoding = source.encoding.name(),
        lossy = source.lossy,
        "loaded chart"
    );
    let mut output = parse_chart(&source.text, config);
    if output.chart.metadata.title.is_empty() {
        output.chart.metadata.title = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
    }
    Ok(output)
}
