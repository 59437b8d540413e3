//! Display range over the derived sequence.
//!
//! Holds an optional inclusive `[lo, hi]` index window. Unset means the
//! whole sequence is visible. Used for zooming a chart onto the
//! neighborhood of a clicked point.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeSelector {
    range: Option<(usize, usize)>,
}

impl RangeSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the window. `None` shows everything again.
    /// Bounds are not checked here, `visible` tolerates any pair.
    pub fn set_range(&mut self, range: Option<(usize, usize)>) {
        self.range = range;
    }

    pub fn range(&self) -> Option<(usize, usize)> {
        self.range
    }

    pub fn clear(&mut self) {
        self.range = None;
    }

    /// Zoom onto `index` and its direct neighbors, clamped to `[0, len - 1]`.
    pub fn focus_on(&mut self, index: usize, len: usize) {
        if len == 0 {
            self.range = None;
            return;
        }
        let lo = index.saturating_sub(1);
        let hi = index.saturating_add(1).min(len - 1);
        tracing::debug!(index, lo, hi, "Focusing display range");
        self.range = Some((lo, hi));
    }

    /// The visible part of `full`: all of it when unset, otherwise the
    /// inclusive slice. An end past the sequence is cut at its length and
    /// an inverted window is empty.
    pub fn visible<'a, T>(&self, full: &'a [T]) -> &'a [T] {
        match self.range {
            None => full,
            Some((lo, hi)) => {
                let end = hi.saturating_add(1).min(full.len());
                let start = lo.min(end);
                &full[start..end]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_shows_everything() {
        let full = [0, 1, 2, 3, 4];
        let selector = RangeSelector::new();
        assert_eq!(selector.visible(&full), &full[..]);
        assert!(std::ptr::eq(selector.visible(&full), &full[..]));
    }

    #[test]
    fn test_inclusive_window() {
        let full = [0, 1, 2, 3, 4];
        let mut selector = RangeSelector::new();
        selector.set_range(Some((1, 3)));
        assert_eq!(selector.visible(&full), &[1, 2, 3]);

        selector.set_range(Some((2, 2)));
        assert_eq!(selector.visible(&full), &[2]);
    }

    #[test]
    fn test_clearing_restores_full_view() {
        let full = [0, 1, 2];
        let mut selector = RangeSelector::new();
        selector.set_range(Some((0, 1)));
        selector.set_range(None);
        assert_eq!(selector.range(), None);
        assert_eq!(selector.visible(&full), &full[..]);
    }

    #[test]
    fn test_out_of_bounds_window_does_not_panic() {
        let full = [0, 1, 2];
        let mut selector = RangeSelector::new();

        selector.set_range(Some((1, 10)));
        assert_eq!(selector.visible(&full), &[1, 2]);

        selector.set_range(Some((5, 8)));
        assert!(selector.visible(&full).is_empty());

        selector.set_range(Some((2, 1)));
        assert!(selector.visible(&full).is_empty());

        selector.set_range(Some((0, usize::MAX)));
        assert_eq!(selector.visible(&full), &full[..]);
    }

    #[test]
    fn test_focus_clamps_to_bounds() {
        let mut selector = RangeSelector::new();

        selector.focus_on(0, 5);
        assert_eq!(selector.range(), Some((0, 1)));

        selector.focus_on(2, 5);
        assert_eq!(selector.range(), Some((1, 3)));

        selector.focus_on(4, 5);
        assert_eq!(selector.range(), Some((3, 4)));

        selector.focus_on(0, 1);
        assert_eq!(selector.range(), Some((0, 0)));

        selector.focus_on(3, 0);
        assert_eq!(selector.range(), None);
    }
}
