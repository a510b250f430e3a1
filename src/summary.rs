//! Helpers for results grouped by difficulty label.
//!
//! Difficulty tables label charts with free text such as `12`, `☆7` or `★★`. [`difficulty_sort_key`]
//! orders such labels by the number they contain, and [`aggregate_by_difficulty`] averages the
//! density of each group.
//!
//! ```
//! use pms_density::summary::difficulty_sort_key;
//!
//! let mut labels = vec!["10", "2", "A", "☆3"];
//! labels.sort_by_key(|label| difficulty_sort_key(label));
//! assert_eq!(labels, vec!["2", "☆3", "10", "A"]);
//! ```

use std::{cmp::Ordering, collections::BTreeMap};

use crate::density::DensityResult;

/// Sort key of a difficulty label.
///
/// Labels with a number come first, by that number. Ties and labels without any number are ordered
/// by their text.
#[derive(Debug, Clone)]
pub enum DifficultySortKey {
    /// The label contains a number.
    Numeric {
        /// The first number in the label.
        value: f64,
        /// The whole label.
        label: String,
    },
    /// The label has no number.
    Text(String),
}

impl PartialEq for DifficultySortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for DifficultySortKey {}

impl PartialOrd for DifficultySortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DifficultySortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (
                Self::Numeric { value, label },
                Self::Numeric {
                    value: other_value,
                    label: other_label,
                },
            ) => value
                .total_cmp(other_value)
                .then_with(|| label.cmp(other_label)),
            (Self::Numeric { .. }, Self::Text(_)) => Ordering::Less,
            (Self::Text(_), Self::Numeric { .. }) => Ordering::Greater,
            (Self::Text(label), Self::Text(other_label)) => label.cmp(other_label),
        }
    }
}

/// Makes the sort key of a difficulty label.
#[must_use]
pub fn difficulty_sort_key(label: &str) -> DifficultySortKey {
    match first_number(label) {
        Some(value) => DifficultySortKey::Numeric {
            value,
            label: label.to_string(),
        },
        None => DifficultySortKey::Text(label.to_string()),
    }
}

/// Finds the first decimal number, like `12` or `3.5`, in the text.
fn first_number(text: &str) -> Option<f64> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let (_, rest) = text.split_at(start);
    let integer_len = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let (integer, tail) = rest.split_at(integer_len);
    let fraction = tail
        .strip_prefix('.')
        .map(|after_dot| {
            let len = after_dot
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(after_dot.len());
            after_dot.split_at(len).0
        })
        .filter(|digits| !digits.is_empty());
    match fraction {
        Some(digits) => format!("{integer}.{digits}").parse().ok(),
        None => integer.parse().ok(),
    }
}

/// Averages of the headline densities over some results.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DensitySummary {
    /// Mean of [`DensityResult::max_density`].
    pub max_density: f64,
    /// Mean of [`DensityResult::average_density`].
    pub average_density: f64,
    /// Mean of [`DensityResult::terminal_density`].
    pub terminal_density: f64,
    /// Mean of [`DensityResult::rms_density`].
    pub rms_density: f64,
}

/// Averages the headline densities. All zero for no results.
#[must_use]
pub fn summarize<'a>(results: impl IntoIterator<Item = &'a DensityResult>) -> DensitySummary {
    let (count, sum) = results.into_iter().fold(
        (0usize, DensitySummary::default()),
        |(count, sum), result| {
            (
                count + 1,
                DensitySummary {
                    max_density: sum.max_density + result.max_density,
                    average_density: sum.average_density + result.average_density,
                    terminal_density: sum.terminal_density + result.terminal_density,
                    rms_density: sum.rms_density + result.rms_density,
                },
            )
        },
    );
    if count == 0 {
        return sum;
    }
    let n = count as f64;
    DensitySummary {
        max_density: sum.max_density / n,
        average_density: sum.average_density / n,
        terminal_density: sum.terminal_density / n,
        rms_density: sum.rms_density / n,
    }
}

/// Summarizes each group of results.
#[must_use]
pub fn aggregate_by_difficulty<'a, L, R>(
    grouped: impl IntoIterator<Item = (L, R)>,
) -> BTreeMap<L, DensitySummary>
where
    L: Ord,
    R: IntoIterator<Item = &'a DensityResult>,
{
    grouped
        .into_iter()
        .map(|(label, results)| (label, summarize(results)))
        .collect()
}
