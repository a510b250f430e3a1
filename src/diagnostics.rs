//! Fancy diagnostics support using `ariadne`.
//!
//! Parse warnings carry the byte range of the offending line in their
//! [`SourceRangeMixin`](crate::bms::command::mixin::SourceRangeMixin), so ariadne can work out the
//! row and column by itself.
//!
//! # Usage Example
//!
//! ```rust
//! use pms_density::{
//!     bms::{default_config, parse_chart},
//!     diagnostics::emit_chart_warnings,
//! };
//!
//! let source = "#TITLE Test\n#RANK x\n#ENDIF\n";
//! let output = parse_chart(source, default_config());
//!
//! emit_chart_warnings("test.pms", source, &output.warnings);
//! ```

use std::ops::Range;

use ariadne::{Color, Label, Report, ReportKind, Source};

use crate::bms::parse::{ParseWarning, ParseWarningWithRange};

/// Source text with the name to show in reports.
///
/// ```rust
/// use pms_density::diagnostics::SimpleSource;
///
/// let source = SimpleSource::new("test.pms", "#TITLE test\n");
/// assert_eq!(source.name(), "test.pms");
/// assert_eq!(source.text(), "#TITLE test\n");
/// ```
pub struct SimpleSource<'a> {
    name: &'a str,
    text: &'a str,
}

impl<'a> SimpleSource<'a> {
    /// Creates a new source container.
    #[must_use]
    pub const fn new(name: &'a str, text: &'a str) -> Self {
        Self { name, text }
    }

    /// Source text content.
    #[must_use]
    pub const fn text(&self) -> &'a str {
        self.text
    }

    /// Source file name.
    #[must_use]
    pub const fn name(&self) -> &'a str {
        self.name
    }
}

/// Conversion of positioned warnings into an `ariadne::Report`.
pub trait ToAriadne {
    /// Builds the report, labelling the byte range of the warning in `src`.
    fn to_report<'a>(&self, src: &SimpleSource<'a>) -> Report<'a, (String, Range<usize>)>;
}

impl ToAriadne for ParseWarningWithRange {
    fn to_report<'a>(&self, src: &SimpleSource<'a>) -> Report<'a, (String, Range<usize>)> {
        let range = self.range();
        let filename = src.name().to_string();
        let color = match self.content() {
            ParseWarning::SyntaxError(_) => Color::Yellow,
            ParseWarning::UnexpectedControlFlow(_) => Color::Red,
            ParseWarning::OddLengthMessage { .. } => Color::Blue,
        };
        Report::build(ReportKind::Warning, (filename.clone(), range.clone()))
            .with_message(format!("parse: {}", self.content()))
            .with_label(
                Label::new((filename, range))
                    .with_message(self.content().to_string())
                    .with_color(color),
            )
            .finish()
    }
}

/// Prints a report for each warning to stderr.
pub fn emit_chart_warnings<'a>(
    name: &'a str,
    source: &'a str,
    warnings: impl IntoIterator<Item = &'a ParseWarningWithRange>,
) {
    let simple = SimpleSource::new(name, source);
    let ariadne_source = Source::from(source);
    for warning in warnings {
        let report = warning.to_report(&simple);
        let _ = report.eprint((name.to_string(), ariadne_source.clone()));
    }
}

/// Collects a report for each warning without printing.
#[must_use]
pub fn collect_chart_reports<'a>(
    name: &'a str,
    source: &'a str,
    warnings: impl IntoIterator<Item = &'a ParseWarningWithRange>,
) -> Vec<Report<'a, (String, Range<usize>)>> {
    let simple = SimpleSource::new(name, source);
    warnings
        .into_iter()
        .map(|warning| warning.to_report(&simple))
        .collect()
}
