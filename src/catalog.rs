//! The fixed list of selectable countdown durations.

use crate::error::CoreError;

pub const CATALOG_LEN: usize = 13;
const STEP_SECS: u32 = 5;

/// A whole number of seconds taken from the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CountdownDuration(u32);

impl CountdownDuration {
    pub fn secs(self) -> u32 {
        self.0
    }

    pub fn as_millis(self) -> u64 {
        u64::from(self.0) * 1000
    }
}

/// Ordered `[1, 5, 10, ..., 60]`.
#[derive(Debug, Clone)]
pub struct DurationCatalog {
    entries: [CountdownDuration; CATALOG_LEN],
}

impl Default for DurationCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl DurationCatalog {
    pub fn new() -> Self {
        let mut entries = [CountdownDuration(1); CATALOG_LEN];
        for (i, entry) in entries.iter_mut().enumerate().skip(1) {
            *entry = CountdownDuration(i as u32 * STEP_SECS);
        }
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = CountdownDuration> + '_ {
        self.entries.iter().copied()
    }

    pub fn first(&self) -> CountdownDuration {
        self.entries[0]
    }

    pub fn last(&self) -> CountdownDuration {
        self.entries[CATALOG_LEN - 1]
    }

    pub fn duration_at(&self, index: usize) -> Result<CountdownDuration, CoreError> {
        self.entries
            .get(index)
            .copied()
            .ok_or(CoreError::IndexOutOfRange { index: index as i64, len: self.len() })
    }

    pub fn index_of(&self, duration: CountdownDuration) -> Option<usize> {
        self.entries.iter().position(|&d| d == duration)
    }

    /// Any integer, including negatives from overscroll, maps onto a valid index.
    pub fn clamp_index(&self, index: i64) -> usize {
        index.clamp(0, self.len() as i64 - 1) as usize
    }

    /// Closest entry to an arbitrary number of seconds; ties go to the shorter one.
    pub fn nearest(&self, secs: u32) -> usize {
        let mut best = 0;
        for (i, d) in self.entries.iter().enumerate() {
            if d.0.abs_diff(secs) < self.entries[best].0.abs_diff(secs) {
                best = i;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_contents() {
        let catalog = DurationCatalog::new();
        let secs: Vec<u32> = catalog.iter().map(|d| d.secs()).collect();
        assert_eq!(secs, vec![1, 5, 10, 15, 20, 25, 30, 35, 40, 45, 50, 55, 60]);
        assert!(secs.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(catalog.first().secs(), 1);
        assert_eq!(catalog.last().secs(), 60);
    }

    #[test]
    fn test_duration_at_out_of_range() {
        let catalog = DurationCatalog::new();
        assert_eq!(catalog.duration_at(12).unwrap().secs(), 60);
        assert_eq!(
            catalog.duration_at(13),
            Err(CoreError::IndexOutOfRange { index: 13, len: 13 })
        );
    }

    #[test]
    fn test_clamp_index() {
        let catalog = DurationCatalog::new();
        for i in -20i64..40 {
            let d = catalog.duration_at(catalog.clamp_index(i)).unwrap();
            if i < 0 {
                assert_eq!(d, catalog.first());
            } else if i > 12 {
                assert_eq!(d, catalog.last());
            }
        }
    }

    #[test]
    fn test_index_round_trip() {
        let catalog = DurationCatalog::new();
        for i in 0..catalog.len() {
            assert_eq!(catalog.index_of(catalog.duration_at(i).unwrap()), Some(i));
        }
        assert_eq!(catalog.index_of(CountdownDuration(7)), None);
    }

    #[test]
    fn test_nearest() {
        let catalog = DurationCatalog::new();
        assert_eq!(catalog.nearest(0), 0);
        assert_eq!(catalog.nearest(3), 0);
        assert_eq!(catalog.nearest(4), 1);
        assert_eq!(catalog.nearest(22), 4);
        assert_eq!(catalog.nearest(999), 12);
    }
}
