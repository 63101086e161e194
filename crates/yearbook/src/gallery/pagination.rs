//! Batch reveal cursor for the all-years view.

use std::ops::Range;

/// Tracks how many photos of a list are visible.
///
/// Starts at one batch and grows by one batch per [`advance`](Self::advance),
/// never past the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchCursor {
    visible: usize,
    total: usize,
    batch: usize,
}

impl BatchCursor {
    /// A cursor over `total` items showing the first batch.
    ///
    /// A zero batch size is treated as one.
    #[must_use]
    pub fn new(total: usize, batch: usize) -> Self {
        let batch = batch.max(1);
        Self {
            visible: batch.min(total),
            total,
            batch,
        }
    }

    /// Number of visible items.
    #[must_use]
    pub fn visible(&self) -> usize {
        self.visible
    }

    /// Number of items overall.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Items revealed per step.
    #[must_use]
    pub fn batch(&self) -> usize {
        self.batch
    }

    /// Whether some items are still hidden.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.visible < self.total
    }

    /// Reveal the next batch and return the newly visible range.
    ///
    /// The range is empty once everything is visible.
    pub fn advance(&mut self) -> Range<usize> {
        let start = self.visible;
        self.visible = self.visible.saturating_add(self.batch).min(self.total);
        start..self.visible
    }

    /// Advance until at least `shown` items are visible or none remain.
    pub fn reveal(&mut self, shown: usize) {
        while self.visible < shown && self.has_more() {
            self.advance();
        }
    }
}
