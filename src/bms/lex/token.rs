//! Definitions of the token in chart format.

use std::borrow::Cow;

use crate::{
    bms::command::{
        channel::{Channel, read_channel},
        mixin::SourceRangeMixin,
        time::Track,
    },
    util::{StrExtension, is_word_char},
};

/// A conditional compilation command. The argument is the first word parsed as an integer, or
/// `None` if it is missing or not an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ControlCommand {
    /// `#RANDOM [i64]`. Pushes a new random value generated from `1..=n`.
    Random(Option<i64>),
    /// `#SETRANDOM [i64]`. Overwrites the current random value.
    SetRandom(Option<i64>),
    /// `#ENDRANDOM`. Pops the current random value.
    EndRandom,
    /// `#IF [i64]`. Starts an if scope which is active when the integer equals to the random value.
    If(Option<i64>),
    /// `#ELSEIF [i64]`. Starts an alternative branch of the if scope.
    ElseIf(Option<i64>),
    /// `#ELSE`. Starts the fallback branch of the if scope.
    Else,
    /// `#ENDIF`. Closes the if scope.
    EndIf,
    /// `#SWITCH [i64]`. Starts a switch scope over the integer, or the current random value.
    Switch(Option<i64>),
    /// `#CASE [i64]`. Starts a case branch when the integer equals to the switch value.
    Case(Option<i64>),
    /// `#DEFAULT`. Starts the fallback branch of the switch scope.
    Default,
    /// `#ENDSWITCH`. Closes the switch scope.
    EndSwitch,
}

impl ControlCommand {
    /// Keywords in match order. `ELSEIF` must come before `ELSE`.
    const KEYWORDS: [&'static str; 11] = [
        "SETRANDOM",
        "ENDRANDOM",
        "RANDOM",
        "ELSEIF",
        "ELSE",
        "ENDIF",
        "IF",
        "ENDSWITCH",
        "SWITCH",
        "CASE",
        "DEFAULT",
    ];

    /// Recognizes a control command line such as `#IF 1` or `# endif`. The keyword is case
    /// insensitive and must end at a word boundary.
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let body = line.strip_prefix('#')?.trim_start();
        let (keyword, args) = Self::KEYWORDS.iter().find_map(|keyword| {
            let rest = body
                .starts_with_ignore_case(keyword)
                .then(|| &body[keyword.len()..])?;
            (!rest.starts_with(is_word_char)).then_some((*keyword, rest))
        })?;
        let arg = args.first_int_arg();
        Some(match keyword {
            "RANDOM" => Self::Random(arg),
            "SETRANDOM" => Self::SetRandom(arg),
            "ENDRANDOM" => Self::EndRandom,
            "IF" => Self::If(arg),
            "ELSEIF" => Self::ElseIf(arg),
            "ELSE" => Self::Else,
            "ENDIF" => Self::EndIf,
            "SWITCH" => Self::Switch(arg),
            "CASE" => Self::Case(arg),
            "DEFAULT" => Self::Default,
            _ => Self::EndSwitch,
        })
    }

    /// The keyword of the command, without `#`.
    #[must_use]
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::Random(_) => "RANDOM",
            Self::SetRandom(_) => "SETRANDOM",
            Self::EndRandom => "ENDRANDOM",
            Self::If(_) => "IF",
            Self::ElseIf(_) => "ELSEIF",
            Self::Else => "ELSE",
            Self::EndIf => "ENDIF",
            Self::Switch(_) => "SWITCH",
            Self::Case(_) => "CASE",
            Self::Default => "DEFAULT",
            Self::EndSwitch => "ENDSWITCH",
        }
    }
}

impl std::fmt::Display for ControlCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Random(Some(value))
            | Self::SetRandom(Some(value))
            | Self::If(Some(value))
            | Self::ElseIf(Some(value))
            | Self::Switch(Some(value))
            | Self::Case(Some(value)) => write!(f, "#{} {value}", self.keyword()),
            _ => write!(f, "#{}", self.keyword()),
        }
    }
}

/// A token content of chart format.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Token<'a> {
    /// A conditional compilation command. See [`ControlCommand`].
    Control(ControlCommand),
    /// `#[name] [args]`, `#[name]:[args]`. Other command line starts from `#`.
    Header {
        /// Word characters after `#`. It is always uppercase.
        name: Cow<'a, str>,
        /// String after the name and its separator, with one optional leading `:` stripped.
        args: &'a str,
    },
    /// `#XXXYY:ZZ...`. Defines the message which places the object onto the score. `XXX` is the
    /// track, `YY` is the channel, and `ZZ...` is the object id sequence.
    Message {
        /// The track, or measure.
        track: Track,
        /// The channel commonly expresses what the lane be arranged the note to.
        channel: Channel,
        /// Number of the channel as written.
        channel_number: u8,
        /// The message to the channel.
        message: &'a str,
    },
    /// Non-empty lines that are not any command.
    NotACommand(&'a str),
}

/// A token with position information.
pub type TokenWithRange<'a> = SourceRangeMixin<Token<'a>>;

impl<'a> Token<'a> {
    /// Classifies a trimmed, non-empty line. Control commands win over messages, and messages
    /// win over headers.
    #[must_use]
    pub fn parse(line: &'a str) -> Self {
        if let Some(command) = ControlCommand::parse(line) {
            return Self::Control(command);
        }
        if let Some(message) = Self::parse_message(line) {
            return message;
        }
        Self::parse_header(line).unwrap_or(Self::NotACommand(line))
    }

    fn parse_message(line: &'a str) -> Option<Self> {
        let body = line.strip_prefix('#')?;
        let digits = body.get(..5)?;
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let message = body[5..].strip_prefix(':')?;
        if message.is_empty() {
            return None;
        }
        let track = digits[..3].parse().ok()?;
        let channel_number = digits[3..].parse().ok()?;
        Some(Self::Message {
            track: Track(track),
            channel: read_channel(channel_number),
            channel_number,
            message,
        })
    }

    fn parse_header(line: &'a str) -> Option<Self> {
        let body = line.strip_prefix('#')?;
        let name_end = body
            .find(|c: char| !is_word_char(c))
            .unwrap_or(body.len());
        if name_end == 0 {
            return None;
        }
        let (name, rest) = body.split_at(name_end);
        let rest = rest.strip_prefix(':').unwrap_or(rest).trim_start();
        let args = rest.strip_prefix(':').map_or(rest, str::trim_start);
        let name = if name.chars().any(char::is_lowercase) {
            Cow::Owned(name.to_uppercase())
        } else {
            Cow::Borrowed(name)
        };
        Some(Self::Header { name, args })
    }
}

impl std::fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Control(command) => write!(f, "{command}"),
            Token::Header { name, args } => {
                if args.is_empty() {
                    write!(f, "#{name}")
                } else {
                    write!(f, "#{name} {args}")
                }
            }
            Token::Message {
                track,
                channel_number,
                message,
                ..
            } => write!(f, "#{:03}{:02}:{}", track.0, channel_number, message),
            Token::NotACommand(line) => write!(f, "{line}"),
        }
    }
}
