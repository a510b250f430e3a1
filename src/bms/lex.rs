//! Lexical analyzer of chart format.
//!
//! Raw [str] == [parse_lex_tokens] ==> [`TokenWithRange`]s (in [`LexOutput`]) == [parse] ==>
//! [`ParsedChart`]
//!
//! Every trimmed line becomes exactly one token, so lexing never fails. Blank lines and `//`
//! comments produce no token.
//!
//! [parse]: crate::bms::parse
//! [`ParsedChart`]: crate::bms::model::ParsedChart

pub mod cursor;
pub mod token;

use crate::bms::command::mixin::SourceRangeMixinExt;

use self::{
    cursor::Cursor,
    token::{Token, TokenWithRange},
};

/// Lex parsing results.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LexOutput<'a> {
    /// Tokens with the byte range of their line.
    pub tokens: Vec<TokenWithRange<'a>>,
}

impl<'a> LexOutput<'a> {
    /// Returns an iterator over the token contents, without positions.
    pub fn token_contents(&self) -> impl Iterator<Item = &Token<'a>> {
        self.tokens.iter().map(|token| token.content())
    }
}

/// Analyzes and converts the chart format text into tokens.
#[must_use]
pub fn parse_lex_tokens(source: &str) -> LexOutput<'_> {
    let tokens = Cursor::new(source)
        .filter(|(_, line)| !line.is_empty() && !line.starts_with("//"))
        .map(|(range, line)| Token::parse(line).into_wrapper_range(range))
        .collect();
    LexOutput { tokens }
}
