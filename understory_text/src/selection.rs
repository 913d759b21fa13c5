// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Caret and selection state over a character buffer.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::ops::Range;

use crate::word::{word_end_after, word_start_before};

/// A text buffer with a selection anchor (`sel_start`) and caret (`sel_end`).
///
/// All positions are character indices in `0..=len`.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SelectionModel {
    text: Vec<char>,
    sel_start: usize,
    sel_end: usize,
}

impl fmt::Debug for SelectionModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionModel")
            .field("len", &self.text.len())
            .field("sel_start", &self.sel_start)
            .field("sel_end", &self.sel_end)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for SelectionModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ch in &self.text {
            fmt::Write::write_char(f, *ch)?;
        }
        Ok(())
    }
}

impl SelectionModel {
    /// Create an empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a model holding `text` with the caret at the end.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let mut model = Self::new();
        model.set_text(text);
        model
    }

    /// Replace the whole buffer and move the caret to the end.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.chars().collect();
        self.set_caret(self.text.len());
    }

    /// Characters of the buffer.
    #[must_use]
    pub fn text(&self) -> &[char] {
        &self.text
    }

    /// Number of characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns `true` if the buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Caret position. Same as [`SelectionModel::sel_end`].
    #[must_use]
    pub const fn caret(&self) -> usize {
        self.sel_end
    }

    /// Selection anchor.
    #[must_use]
    pub const fn sel_start(&self) -> usize {
        self.sel_start
    }

    /// Moving end of the selection.
    #[must_use]
    pub const fn sel_end(&self) -> usize {
        self.sel_end
    }

    /// Selected half-open range, ordered.
    #[must_use]
    pub fn selection_range(&self) -> Range<usize> {
        self.sel_start.min(self.sel_end)..self.sel_start.max(self.sel_end)
    }

    /// Number of selected characters.
    #[must_use]
    pub const fn selection_len(&self) -> usize {
        self.sel_start.abs_diff(self.sel_end)
    }

    /// Returns `true` if at least one character is selected.
    #[must_use]
    pub const fn has_selection(&self) -> bool {
        self.sel_start != self.sel_end
    }

    /// Selected characters as a string.
    #[must_use]
    pub fn selected_text(&self) -> String {
        self.text[self.selection_range()].iter().collect()
    }

    /// Place the caret at `pos` (clamped) and clear the selection.
    pub fn set_caret(&mut self, pos: usize) {
        let pos = pos.min(self.text.len());
        self.sel_start = pos;
        self.sel_end = pos;
    }

    /// Move the caret to `pos` (clamped), keeping the anchor when `extend` is set.
    pub fn move_caret(&mut self, pos: usize, extend: bool) {
        self.sel_end = pos.min(self.text.len());
        if !extend {
            self.sel_start = self.sel_end;
        }
    }

    /// Select the whole buffer.
    pub fn select_all(&mut self) {
        self.sel_start = 0;
        self.sel_end = self.text.len();
    }

    /// Select `len` characters from `start`, or to the end when `len` is `None`.
    ///
    /// Both ends are clamped to the buffer.
    pub fn select_range(&mut self, start: usize, len: Option<usize>) {
        let start = start.min(self.text.len());
        let end = match len {
            Some(len) => start.saturating_add(len).min(self.text.len()),
            None => self.text.len(),
        };
        self.sel_start = start;
        self.sel_end = end;
    }

    /// Delete the selected characters and collapse the caret to the deletion point.
    ///
    /// Returns `false` if nothing was selected.
    pub fn delete_selected(&mut self) -> bool {
        if !self.has_selection() {
            return false;
        }
        let range = self.selection_range();
        let start = range.start;
        self.text.drain(range);
        self.set_caret(start);
        true
    }

    /// Delete up to `count` characters starting at `start` and place the caret at `start`.
    ///
    /// Returns `false` if no character was removed.
    pub fn delete_range(&mut self, start: usize, count: usize) -> bool {
        let start = start.min(self.text.len());
        let end = start.saturating_add(count).min(self.text.len());
        if start == end {
            return false;
        }
        self.text.drain(start..end);
        self.set_caret(start);
        true
    }

    /// Backspace: delete the selection, or the character before the caret.
    pub fn delete_backward(&mut self) -> bool {
        if self.has_selection() {
            return self.delete_selected();
        }
        if self.sel_end == 0 {
            return false;
        }
        self.delete_range(self.sel_end - 1, 1)
    }

    /// Delete: delete the selection, or the character after the caret.
    pub fn delete_forward(&mut self) -> bool {
        if self.has_selection() {
            return self.delete_selected();
        }
        self.delete_range(self.sel_end, 1)
    }

    /// Drop characters past `max` and clamp the selection. Returns `true` if anything was removed.
    pub fn truncate(&mut self, max: usize) -> bool {
        if self.text.len() <= max {
            return false;
        }
        self.text.truncate(max);
        self.sel_start = self.sel_start.min(max);
        self.sel_end = self.sel_end.min(max);
        true
    }

    /// Insert `s` at the caret, replacing any selection.
    ///
    /// `accept` sees the full prospective buffer; returning `false` refuses the edit and
    /// leaves the model untouched.
    pub fn insert(&mut self, s: &str, accept: impl FnOnce(&[char]) -> bool) -> bool {
        self.insert_at(self.sel_end, s, accept)
    }

    /// Insert `s` at `pos`, replacing any selection first.
    ///
    /// When a selection exists, `pos` is interpreted against the buffer before deletion and
    /// shifted so it keeps pointing at the same character afterwards; a position inside the
    /// selection lands at the deletion point. On success the caret sits after the inserted
    /// text.
    pub fn insert_at(
        &mut self,
        pos: usize,
        s: &str,
        accept: impl FnOnce(&[char]) -> bool,
    ) -> bool {
        let range = self.selection_range();
        let pos = pos.min(self.text.len());
        let pos = if pos >= range.end {
            pos - range.len()
        } else if pos > range.start {
            range.start
        } else {
            pos
        };

        let mut remaining = Vec::with_capacity(self.text.len() - range.len());
        remaining.extend_from_slice(&self.text[..range.start]);
        remaining.extend_from_slice(&self.text[range.end..]);

        let inserted = s.chars().count();
        let mut prospective = Vec::with_capacity(remaining.len() + inserted);
        prospective.extend_from_slice(&remaining[..pos]);
        prospective.extend(s.chars());
        prospective.extend_from_slice(&remaining[pos..]);
        if !accept(&prospective) {
            return false;
        }
        self.text = prospective;
        self.set_caret(pos + inserted);
        true
    }

    /// Move the caret to the start of the previous word.
    pub fn move_word_start(&mut self, extend: bool) {
        self.move_caret(word_start_before(&self.text, self.sel_end), extend);
    }

    /// Move the caret to the end of the next word.
    pub fn move_word_end(&mut self, extend: bool) {
        self.move_caret(word_end_after(&self.text, self.sel_end), extend);
    }
}
