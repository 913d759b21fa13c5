// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The edit box state, its configuration, and its editing operations.

use kurbo::{Point, Rect, Size};
use understory_event_state::blink::CaretBlink;
use understory_event_state::click::DoubleClickState;
use understory_scroll::{CropWindow, OverflowPolicy};
use understory_text::{SelectionModel, TextMetrics, TextStyle, caret_offset, text_width};
use understory_widget::{Clipboard, Signal, Theme};

use crate::validator::{Validator, ValidatorError};

/// Horizontal placement of text narrower than the box.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Alignment {
    /// Flush left.
    #[default]
    Left,
    /// Centered.
    Center,
    /// Flush right.
    Right,
}

/// A positioned piece of displayed text, in widget-local coordinates.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextRun {
    /// Displayed characters, masked when a password character is set.
    pub text: String,
    /// Top-left corner.
    pub origin: Point,
}

/// The displayed text split around the selection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextRuns {
    /// Text before the selection, or all of it without a selection.
    pub before: TextRun,
    /// Selected text.
    pub selection: TextRun,
    /// Text after the selection.
    pub after: TextRun,
    /// Highlight behind the selected text.
    pub selection_background: Option<Rect>,
}

/// Single-line text field.
///
/// Indices (caret, selection) are logical character counts and never depend on the password
/// mask or on pixels. Pixels only enter when resolving a click and when drawing.
pub struct EditBox {
    pub(crate) theme: Theme,
    pub(crate) size: Size,
    pub(crate) model: SelectionModel,
    pub(crate) crop: CropWindow,
    pub(crate) validator: Validator,
    pub(crate) max_chars: usize,
    pub(crate) password_char: Option<char>,
    pub(crate) alignment: Alignment,
    pub(crate) default_text: String,
    pub(crate) suffix: String,
    pub(crate) read_only: bool,
    pub(crate) focused: bool,
    pub(crate) hovered: bool,
    pub(crate) mouse_down: bool,
    pub(crate) blink: CaretBlink,
    pub(crate) double_click: DoubleClickState<usize>,
    pub(crate) on_text_change: Signal<String>,
    pub(crate) on_return_key_press: Signal<String>,
    pub(crate) on_return_or_unfocus: Signal<String>,
}

impl core::fmt::Debug for EditBox {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EditBox")
            .field("text", &self.text())
            .field("sel_start", &self.model.sel_start())
            .field("sel_end", &self.model.sel_end())
            .field("crop", &self.crop.offset())
            .field("validator", &self.validator.pattern())
            .field("focused", &self.focused)
            .finish_non_exhaustive()
    }
}

// Acceptance test for a prospective buffer. Built from disjoint fields so the selection model
// can be mutated while it is borrowed.
struct Gate<'a> {
    validator: &'a Validator,
    max_chars: usize,
    width_limit: Option<f64>,
    metrics: &'a dyn TextMetrics,
    style: TextStyle,
    mask: Option<char>,
}

impl Gate<'_> {
    fn accepts(&self, candidate: &[char]) -> bool {
        if self.max_chars > 0 && candidate.len() > self.max_chars {
            return false;
        }
        if let Some(limit) = self.width_limit
            && displayed_width(self.metrics, candidate, self.mask, self.style) > limit
        {
            return false;
        }
        self.validator.matches(candidate)
    }
}

// Width of `text` as displayed, including the horizontal text padding on both sides.
fn displayed_width(
    metrics: &dyn TextMetrics,
    text: &[char],
    mask: Option<char>,
    style: TextStyle,
) -> f64 {
    let pad = 2.0 * metrics.line_height(style) / 10.0;
    match mask {
        Some(mask) => {
            let masked: Vec<char> = core::iter::repeat_n(mask, text.len()).collect();
            text_width(metrics, &masked, style) + pad
        }
        None => text_width(metrics, text, style) + pad,
    }
}

impl EditBox {
    /// Create an empty edit box styled by `theme`.
    #[must_use]
    pub fn new(theme: &Theme) -> Self {
        let mut edit_box = Self {
            theme: theme.clone(),
            size: Size::new(160.0, 24.0),
            model: SelectionModel::new(),
            crop: CropWindow::new(0.0),
            validator: Validator::default(),
            max_chars: 0,
            password_char: None,
            alignment: Alignment::Left,
            default_text: String::new(),
            suffix: String::new(),
            read_only: false,
            focused: false,
            hovered: false,
            mouse_down: false,
            blink: CaretBlink::with_interval(theme.caret_blink),
            double_click: DoubleClickState::with_window(theme.double_click_time),
            on_text_change: Signal::new(),
            on_return_key_press: Signal::new(),
            on_return_or_unfocus: Signal::new(),
        };
        edit_box.sync_viewport();
        edit_box
    }

    // --- signals ---

    /// Emitted with the new text after every accepted change.
    pub fn on_text_change(&mut self) -> &mut Signal<String> {
        &mut self.on_text_change
    }

    /// Emitted with the text when Enter is pressed.
    pub fn on_return_key_press(&mut self) -> &mut Signal<String> {
        &mut self.on_return_key_press
    }

    /// Emitted with the text when Enter is pressed or focus is lost.
    pub fn on_return_or_unfocus(&mut self) -> &mut Signal<String> {
        &mut self.on_return_or_unfocus
    }

    // --- text ---

    /// Current text, unmasked.
    #[must_use]
    pub fn text(&self) -> String {
        self.model.text().iter().collect()
    }

    /// Replace the text.
    ///
    /// Text rejected by the validator clears the box. The result is cut to the maximum
    /// length and, when the width is limited, trimmed from the end until it fits. The caret
    /// moves to the end and [`EditBox::on_text_change`] fires.
    pub fn set_text(&mut self, text: &str) {
        let mut chars: Vec<char> = text.chars().collect();
        if !self.validator.matches(&chars) {
            chars.clear();
        }
        if self.max_chars > 0 {
            chars.truncate(self.max_chars);
        }
        if self.is_text_width_limited() {
            let limit = self.visible_width();
            while !chars.is_empty() && self.displayed_width_of(&chars) > limit {
                chars.pop();
            }
        }
        let text: String = chars.iter().collect();
        self.model.set_text(&text);
        self.crop.set_offset(0.0, 0.0);
        self.update_selection();
        self.on_text_change.emit(&text);
    }

    /// Placeholder shown while the box is empty.
    #[must_use]
    pub fn default_text(&self) -> &str {
        &self.default_text
    }

    /// Set the placeholder.
    pub fn set_default_text(&mut self, text: &str) {
        self.default_text = text.into();
    }

    /// Text drawn at the right edge, outside the editable area.
    #[must_use]
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Set the suffix. A suffix narrows the editable area.
    pub fn set_suffix(&mut self, suffix: &str) {
        self.suffix = suffix.into();
        self.sync_viewport();
    }

    // --- configuration ---

    /// Widget size.
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
        self.sync_viewport();
    }

    /// Character size.
    #[must_use]
    pub fn text_size(&self) -> u32 {
        self.theme.text_size
    }

    /// Change the character size.
    pub fn set_text_size(&mut self, size: u32) {
        self.theme.text_size = size;
        self.sync_viewport();
    }

    /// Mask character, if any.
    #[must_use]
    pub const fn password_character(&self) -> Option<char> {
        self.password_char
    }

    /// Display every character as `mask`, or clear the mask with `None` or `'\0'`.
    pub fn set_password_character(&mut self, mask: Option<char>) {
        self.password_char = mask.filter(|c| *c != '\0');
        self.sync_viewport();
    }

    /// Maximum number of characters, 0 for unlimited.
    #[must_use]
    pub const fn maximum_characters(&self) -> usize {
        self.max_chars
    }

    /// Limit the length. Excess characters are removed and the caret moves to the end.
    pub fn set_maximum_characters(&mut self, max: usize) {
        self.max_chars = max;
        if max > 0 && self.model.truncate(max) {
            self.model.set_caret(max);
            self.sync_viewport();
        }
    }

    /// Horizontal alignment.
    #[must_use]
    pub const fn alignment(&self) -> Alignment {
        self.alignment
    }

    /// Change the alignment. The text is re-applied.
    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.alignment = alignment;
        let text = self.text();
        self.set_text(&text);
    }

    /// Returns `true` if the text must fit the box instead of scrolling.
    #[must_use]
    pub fn is_text_width_limited(&self) -> bool {
        self.crop.policy() == OverflowPolicy::LimitToViewport
    }

    /// Switch between scrolling and width-limited mode.
    ///
    /// Entering width-limited mode removes characters from the end until the text fits.
    pub fn set_text_width_limited(&mut self, limited: bool) {
        let policy = if limited {
            OverflowPolicy::LimitToViewport
        } else {
            OverflowPolicy::Scroll
        };
        self.crop.set_policy(policy);
        if limited {
            let limit = self.visible_width();
            let caret = self.model.caret();
            let mut len = self.model.len();
            while len > 0 && self.displayed_width_of(&self.model.text()[..len]) > limit {
                len -= 1;
            }
            if self.model.truncate(len) {
                self.model.set_caret(caret);
            }
        }
        self.update_selection();
    }

    /// Returns `true` if edits from the user are refused.
    #[must_use]
    pub const fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Refuse user edits. Selection and copying still work.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Active validator pattern.
    #[must_use]
    pub fn input_validator(&self) -> &str {
        self.validator.pattern()
    }

    /// Replace the validator and re-apply the current text through it.
    ///
    /// An invalid pattern is reported and the previous validator stays in place.
    pub fn set_input_validator(&mut self, pattern: &str) -> Result<(), ValidatorError> {
        let validator = match Validator::new(pattern) {
            Ok(v) => v,
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(pattern, %err, "rejected input validator");
                return Err(err);
            }
        };
        self.validator = validator;
        let text = self.text();
        self.set_text(&text);
        Ok(())
    }

    // --- caret and selection ---

    /// Caret position in characters.
    #[must_use]
    pub const fn caret_position(&self) -> usize {
        self.model.caret()
    }

    /// Place the caret and clear the selection.
    pub fn set_caret_position(&mut self, pos: usize) {
        self.model.set_caret(pos);
        self.update_selection();
    }

    /// Select `len` characters from `start`, or to the end with `None`.
    pub fn select_text(&mut self, start: usize, len: Option<usize>) {
        self.model.select_range(start, len);
        self.update_selection();
    }

    /// Selected text, unmasked.
    #[must_use]
    pub fn selected_text(&self) -> String {
        self.model.selected_text()
    }

    /// Selection model, read-only.
    #[must_use]
    pub const fn selection(&self) -> &SelectionModel {
        &self.model
    }

    /// Current crop offset in pixels.
    #[must_use]
    pub const fn crop_offset(&self) -> f64 {
        self.crop.offset()
    }

    // --- editing ---

    /// Type `ch` at the caret, replacing the selection.
    ///
    /// Refused without a change or notification when read-only, when the validator rejects
    /// the resulting text, when the maximum length would be exceeded, or when the width is
    /// limited and the result would not fit.
    pub fn insert_char(&mut self, ch: char) -> bool {
        if self.read_only || ch.is_control() {
            return false;
        }
        let mut buf = [0; 4];
        self.insert_str(ch.encode_utf8(&mut buf))
    }

    fn insert_str(&mut self, s: &str) -> bool {
        let width_limit = self.is_text_width_limited().then(|| self.visible_width());
        let gate = Gate {
            validator: &self.validator,
            max_chars: self.max_chars,
            width_limit,
            metrics: &*self.theme.metrics,
            style: self.theme.style(),
            mask: self.password_char,
        };
        if !self.model.insert(s, |candidate| gate.accepts(candidate)) {
            return false;
        }
        self.blink.reset();
        self.update_selection();
        self.emit_text_change();
        true
    }

    /// Backspace. Deletes the selection or the character before the caret.
    pub fn backspace(&mut self) -> bool {
        if self.read_only || !self.model.delete_backward() {
            return false;
        }
        self.after_delete();
        true
    }

    /// Forward delete. Deletes the selection or the character after the caret.
    pub fn delete(&mut self) -> bool {
        if self.read_only || !self.model.delete_forward() {
            return false;
        }
        self.after_delete();
        true
    }

    /// Copy the selection, as displayed, to `clipboard`. A masked box copies the mask.
    pub fn copy(&self, clipboard: &mut dyn Clipboard) {
        let range = self.model.selection_range();
        let shown: String = self.displayed()[range].iter().collect();
        clipboard.set_text(&shown);
    }

    /// Copy the selection, then delete it unless read-only.
    pub fn cut(&mut self, clipboard: &mut dyn Clipboard) -> bool {
        self.copy(clipboard);
        if self.read_only || !self.model.delete_selected() {
            return false;
        }
        self.after_delete();
        true
    }

    /// Replace the selection with the clipboard text.
    ///
    /// The pasted text is cut to the room left under the maximum length and, in
    /// width-limited mode, to what still fits. The selection is removed first, so it is gone
    /// even when the validator then rejects the pasted text. Control characters in the
    /// clipboard are dropped.
    ///
    /// Returns `true` if the text changed.
    pub fn paste(&mut self, clipboard: &dyn Clipboard) -> bool {
        if self.read_only {
            return false;
        }
        let pasted: Vec<char> = clipboard
            .get_text()
            .chars()
            .filter(|c| !c.is_control())
            .collect();
        if pasted.is_empty() && !self.model.has_selection() {
            return false;
        }
        let deleted = self.model.delete_selected();
        if deleted {
            self.after_delete();
        }
        let room = if self.max_chars == 0 {
            pasted.len()
        } else {
            self.max_chars.saturating_sub(self.model.len())
        };
        let mut take = pasted.len().min(room);
        loop {
            if take == 0 {
                return deleted;
            }
            let s: String = pasted[..take].iter().collect();
            if self.insert_str(&s) {
                return true;
            }
            if !self.is_text_width_limited() {
                return deleted;
            }
            take -= 1;
        }
    }

    pub(crate) fn after_delete(&mut self) {
        self.crop.clamp_to_content(self.content_width());
        self.update_selection();
        self.emit_text_change();
    }

    pub(crate) fn emit_text_change(&mut self) {
        let text = self.text();
        self.on_text_change.emit(&text);
    }

    // Keep the caret inside the visible area after it moved.
    pub(crate) fn update_selection(&mut self) {
        if self.is_text_width_limited() {
            return;
        }
        let caret_x = self.caret_x_in_text(self.model.caret());
        self.crop.ensure_visible(caret_x);
    }

    // --- geometry ---

    pub(crate) fn style(&self) -> TextStyle {
        self.theme.style()
    }

    // Horizontal padding inside the text run, a tenth of the line height on either side.
    pub(crate) fn text_offset(&self) -> f64 {
        self.theme.metrics.line_height(self.style()) / 10.0
    }

    pub(crate) fn displayed(&self) -> Vec<char> {
        match self.password_char {
            Some(mask) => vec![mask; self.model.len()],
            None => self.model.text().to_vec(),
        }
    }

    fn displayed_width_of(&self, text: &[char]) -> f64 {
        displayed_width(&*self.theme.metrics, text, self.password_char, self.style())
    }

    // Width of the displayed text without padding.
    pub(crate) fn content_width(&self) -> f64 {
        text_width(&*self.theme.metrics, &self.displayed(), self.style())
    }

    // Width of the displayed text including padding.
    pub(crate) fn full_text_width(&self) -> f64 {
        self.content_width() + 2.0 * self.text_offset()
    }

    fn suffix_space(&self) -> f64 {
        if self.suffix.is_empty() {
            return 0.0;
        }
        let suffix: Vec<char> = self.suffix.chars().collect();
        text_width(&*self.theme.metrics, &suffix, self.style()) + self.text_offset()
    }

    /// Width available to the editable text.
    #[must_use]
    pub fn visible_width(&self) -> f64 {
        (self.size.width - 2.0 * self.theme.padding - self.suffix_space()).max(0.0)
    }

    pub(crate) fn sync_viewport(&mut self) {
        let viewport = self.visible_width() - 2.0 * self.text_offset();
        self.crop.set_viewport(viewport);
        self.crop.clamp_to_content(self.content_width());
        self.update_selection();
    }

    pub(crate) fn caret_x_in_text(&self, index: usize) -> f64 {
        caret_offset(&*self.theme.metrics, &self.displayed(), index, self.style())
    }

    // Shift applied to text narrower than the box when not left-aligned.
    fn alignment_shift(&self, width: f64) -> f64 {
        let visible = self.visible_width();
        if width >= visible {
            return 0.0;
        }
        match self.alignment {
            Alignment::Left => 0.0,
            Alignment::Center => (visible - width) / 2.0,
            Alignment::Right => visible - width,
        }
    }

    /// Local x of the first character.
    #[must_use]
    pub fn text_x(&self) -> f64 {
        let width = if self.model.is_empty() {
            let default: Vec<char> = self.default_text.chars().collect();
            text_width(&*self.theme.metrics, &default, self.style()) + 2.0 * self.text_offset()
        } else {
            self.full_text_width()
        };
        self.theme.padding - self.crop.offset() + self.text_offset() + self.alignment_shift(width)
    }

    pub(crate) fn text_y(&self) -> f64 {
        let inner = self.size.height - 2.0 * self.theme.padding;
        self.theme.padding + (inner - self.theme.metrics.line_height(self.style())) / 2.0
    }

    /// Caret index for a click at local `x`.
    #[must_use]
    pub fn index_at(&self, x: f64) -> usize {
        let pos = x - self.text_x();
        understory_text::index_at_offset(&*self.theme.metrics, &self.displayed(), pos, self.style())
    }

    /// Caret rectangle in local coordinates.
    #[must_use]
    pub fn caret_rect(&self) -> Rect {
        let width = self.theme.caret_width;
        let x = self.text_x() + self.caret_x_in_text(self.model.caret()) - width / 2.0;
        Rect::new(
            x,
            self.theme.padding,
            x + width,
            self.size.height - self.theme.padding,
        )
    }

    /// Displayed text split around the selection, positioned for drawing.
    #[must_use]
    pub fn text_runs(&self) -> TextRuns {
        let shown = self.displayed();
        let range = self.model.selection_range();
        let x0 = self.text_x();
        let y = self.text_y();
        let run = |from: usize, to: usize| TextRun {
            text: shown[from..to].iter().collect(),
            origin: Point::new(x0 + self.caret_x_in_text(from), y),
        };
        if range.is_empty() {
            return TextRuns {
                before: run(0, shown.len()),
                selection: run(shown.len(), shown.len()),
                after: run(shown.len(), shown.len()),
                selection_background: None,
            };
        }
        let start_x = x0 + self.caret_x_in_text(range.start);
        let end_x = x0 + self.caret_x_in_text(range.end);
        TextRuns {
            before: run(0, range.start),
            selection: run(range.start, range.end),
            after: run(range.end, shown.len()),
            selection_background: Some(Rect::new(
                start_x,
                self.theme.padding,
                end_x,
                self.size.height - self.theme.padding,
            )),
        }
    }
}
