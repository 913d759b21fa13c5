// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A strip of fixed-height rows.

use core::ops::Range;

/// Alignment mode when scrolling a specific row into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAlign {
    /// Align the top of the row with the top of the viewport.
    Start,
    /// Align the bottom of the row with the bottom of the viewport.
    End,
    /// Move just enough to make the row fully visible.
    Nearest,
}

/// Rows `0..len`, each `row_height` tall, scrolled by an external offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowStrip {
    row_height: f64,
    len: usize,
}

impl RowStrip {
    /// Create a strip of `len` rows. Negative heights are clamped to zero.
    #[must_use]
    pub fn new(row_height: f64, len: usize) -> Self {
        Self {
            row_height: row_height.max(0.0),
            len,
        }
    }

    /// Number of rows.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if there are no rows.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Set the number of rows.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
    }

    /// Height of a single row.
    #[must_use]
    pub const fn row_height(&self) -> f64 {
        self.row_height
    }

    /// Set the height of every row.
    pub fn set_row_height(&mut self, row_height: f64) {
        self.row_height = row_height.max(0.0);
    }

    /// Total height of all rows.
    #[must_use]
    pub fn content_extent(&self) -> f64 {
        self.row_height * row_count_f64(self.len)
    }

    /// Row under viewport-relative `y` when the strip is scrolled by `scroll`.
    ///
    /// Returns `None` above the first row, past the last row, or when rows have no height.
    #[must_use]
    pub fn row_at(&self, y: f64, scroll: f64) -> Option<usize> {
        if self.row_height <= 0.0 {
            return None;
        }
        let content_y = y + scroll;
        if content_y < 0.0 {
            return None;
        }
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Non-negative and truncation toward zero is the intended floor."
        )]
        let index = (content_y / self.row_height) as usize;
        (index < self.len).then_some(index)
    }

    /// Viewport-relative top of `index` when scrolled by `scroll`.
    #[must_use]
    pub fn row_top(&self, index: usize, scroll: f64) -> f64 {
        self.row_height * row_count_f64(index) - scroll
    }

    /// Rows that overlap the viewport `[scroll, scroll + viewport)`.
    #[must_use]
    pub fn visible_range(&self, scroll: f64, viewport: f64) -> Range<usize> {
        if self.row_height <= 0.0 || self.len == 0 || viewport <= 0.0 {
            return 0..0;
        }
        let start = self.row_at(0.0, scroll.max(0.0)).unwrap_or(self.len);
        let bottom = (scroll.max(0.0) + viewport) / self.row_height;
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Non-negative and truncation toward zero is the intended floor."
        )]
        let mut end = bottom as usize;
        if row_count_f64(end) < bottom {
            end += 1;
        }
        start..end.min(self.len)
    }

    /// Scroll offset that brings `index` into a viewport of height `viewport`.
    ///
    /// Out-of-range indices are clamped to the last row. An empty strip scrolls to zero.
    #[must_use]
    pub fn reveal(&self, index: usize, scroll: f64, viewport: f64, align: ScrollAlign) -> f64 {
        if self.len == 0 {
            return 0.0;
        }
        let index = index.min(self.len - 1);
        let top = self.row_height * row_count_f64(index);
        let bottom = top + self.row_height;
        match align {
            ScrollAlign::Start => top,
            ScrollAlign::End => (bottom - viewport).max(0.0),
            ScrollAlign::Nearest => {
                if top >= scroll && bottom <= scroll + viewport {
                    scroll
                } else if top < scroll {
                    top
                } else {
                    (bottom - viewport).max(0.0)
                }
            }
        }
    }
}

#[allow(
    clippy::cast_precision_loss,
    reason = "Row counts stay far below 2^52."
)]
fn row_count_f64(n: usize) -> f64 {
    n as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_at_accounts_for_partial_rows() {
        let rows = RowStrip::new(20.0, 5);
        assert_eq!(rows.row_at(0.0, 0.0), Some(0));
        assert_eq!(rows.row_at(19.9, 0.0), Some(0));
        assert_eq!(rows.row_at(20.0, 0.0), Some(1));
        // Scrolled by half a row: the top 10px belong to row 0.
        assert_eq!(rows.row_at(9.0, 10.0), Some(0));
        assert_eq!(rows.row_at(11.0, 10.0), Some(1));
    }

    #[test]
    fn row_at_out_of_range_is_none() {
        let rows = RowStrip::new(20.0, 3);
        assert_eq!(rows.row_at(60.0, 0.0), None, "past the last row");
        assert_eq!(rows.row_at(-1.0, 0.0), None, "above the first row");
        assert_eq!(RowStrip::new(0.0, 3).row_at(5.0, 0.0), None);
    }

    #[test]
    fn visible_range_covers_partial_rows() {
        let rows = RowStrip::new(10.0, 100);
        assert_eq!(rows.visible_range(0.0, 30.0), 0..3);
        assert_eq!(rows.visible_range(5.0, 30.0), 0..4);
        assert_eq!(rows.visible_range(995.0, 30.0), 99..100);
        assert_eq!(RowStrip::new(10.0, 0).visible_range(0.0, 30.0), 0..0);
    }

    #[test]
    fn reveal_nearest_moves_minimally() {
        let rows = RowStrip::new(10.0, 10);
        assert_eq!(rows.reveal(1, 0.0, 30.0, ScrollAlign::Nearest), 0.0);
        assert_eq!(rows.reveal(5, 0.0, 30.0, ScrollAlign::Nearest), 30.0);
        assert_eq!(rows.reveal(2, 40.0, 30.0, ScrollAlign::Nearest), 20.0);
        assert_eq!(rows.reveal(3, 0.0, 30.0, ScrollAlign::Start), 30.0);
        assert_eq!(rows.reveal(3, 0.0, 30.0, ScrollAlign::End), 10.0);
        assert_eq!(rows.reveal(50, 0.0, 30.0, ScrollAlign::Start), 90.0);
    }
}
