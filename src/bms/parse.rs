//! Parsing [`ParsedChart`] from tokens.
//!
//! Raw [str] == [lex] ==> [`TokenWithRange`]s (in [`LexOutput`]) == [parse] ==> [`ParsedChart`]
//! (in [`ChartOutput`])
//!
//! Control commands are fed to [`ControlFlow`] and every other token is read only while the
//! control flow is active. Malformed values never abort parsing: the value is dropped and a
//! [`ParseWarning`] is recorded with the range of its line.
//!
//! [lex]: crate::bms::lex
//! [parse]: self
//! [`LexOutput`]: crate::bms::lex::LexOutput

pub mod header;

use thiserror::Error;
use tracing::{debug, trace};

use crate::bms::{
    ChartOutput, ParseConfig,
    command::{
        channel::Channel,
        mixin::{SourceRangeMixin, SourceRangeMixinExt},
        time::Track,
    },
    control_flow::ControlFlow,
    lex::token::{Token, TokenWithRange},
    model::{BpmStats, ParsedChart},
    rng::Rng,
};

/// A non-fatal problem found when parsing a chart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ParseWarning {
    /// A value of the command was invalid and dropped.
    #[error("syntax error: {0}")]
    SyntaxError(String),
    /// A control command did not fit the current nesting and was ignored.
    #[error("unexpected control flow: {0}")]
    UnexpectedControlFlow(&'static str),
    /// A message of a timed channel has an odd number of characters, so it will be ignored.
    #[error("message of {channel} in measure {track} has odd length {len}")]
    OddLengthMessage {
        /// The track of the message.
        track: Track,
        /// The channel of the message.
        channel: Channel,
        /// The number of characters.
        len: usize,
    },
}

/// Type alias of `core::result::Result<T, ParseWarning>`
pub(crate) type Result<T> = core::result::Result<T, ParseWarning>;

/// A parse warning with position information.
pub type ParseWarningWithRange = SourceRangeMixin<ParseWarning>;

impl ParsedChart {
    /// Parses a token stream into [`ParsedChart`].
    pub fn from_token_stream<'a, R: Rng>(
        token_iter: impl IntoIterator<Item = &'a TokenWithRange<'a>>,
        config: ParseConfig<R>,
    ) -> ChartOutput {
        let ParseConfig { default_bpm, rng } = config;
        let mut control_flow = ControlFlow::new(rng);
        let mut chart = Self::default();
        chart.metadata.bpm = BpmStats::constant(default_bpm);

        let mut warnings = vec![];
        let mut skipped = 0usize;
        for token in token_iter {
            let result = match token.content() {
                Token::Control(command) => control_flow.apply(*command),
                _ if !control_flow.is_active() => {
                    skipped += 1;
                    Ok(())
                }
                Token::Header { name, args } => header::apply_header(&mut chart, name, args),
                Token::Message {
                    track,
                    channel,
                    message,
                    ..
                } => chart.apply_message(*track, *channel, message),
                Token::NotACommand(line) => {
                    trace!(%line, "ignored line");
                    Ok(())
                }
            };
            if let Err(warning) = result {
                debug!(%warning, range = ?token.range(), "dropped chart line");
                warnings.push(warning.into_wrapper(token));
            }
        }

        debug!(
            measures = chart.grid.len(),
            skipped,
            warnings = warnings.len(),
            unclosed_blocks = control_flow.depth(),
            "parsed chart"
        );
        ChartOutput { chart, warnings }
    }

    fn apply_message(&mut self, track: Track, channel: Channel, message: &str) -> Result<()> {
        if channel == Channel::SectionLen {
            let length = header::parse_float("SECTION_LEN", message)?;
            self.symbols.measure_lengths.insert(track, length);
            return Ok(());
        }
        self.grid.push(track, channel, message);
        let len = message.chars().count();
        if channel.is_timed() && len % 2 != 0 {
            return Err(ParseWarning::OddLengthMessage {
                track,
                channel,
                len,
            });
        }
        Ok(())
    }
}
