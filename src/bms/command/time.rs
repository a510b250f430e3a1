//! Definitions of time in the chart.

/// A track, or measure, or bar, in the score. Index `000` is allowed and is the first measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Track(pub u64);

impl std::fmt::Display for Track {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:03}", self.0)
    }
}

impl From<u64> for Track {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl Track {
    /// Returns the tracks strictly between `previous` and `next`. With no previous track, the
    /// gap starts from track `000`.
    pub fn missing_between(previous: Option<Self>, next: Self) -> impl Iterator<Item = Self> {
        let start = previous.map_or(0, |prev| prev.0 + 1);
        (start..next.0).map(Self)
    }
}

#[test]
fn test_missing_between() {
    let first: Vec<_> = Track::missing_between(None, Track(2)).collect();
    assert_eq!(first, vec![Track(0), Track(1)]);
    let gap: Vec<_> = Track::missing_between(Some(Track(3)), Track(6)).collect();
    assert_eq!(gap, vec![Track(4), Track(5)]);
    assert_eq!(Track::missing_between(Some(Track(3)), Track(4)).count(), 0);
}
