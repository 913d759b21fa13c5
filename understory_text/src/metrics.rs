// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph measurement.

/// Font size and weight used when measuring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextStyle {
    /// Character size in pixels.
    pub size: u32,
    /// Bold weight.
    pub bold: bool,
}

impl TextStyle {
    /// Regular style of the given size.
    #[must_use]
    pub const fn regular(size: u32) -> Self {
        Self { size, bold: false }
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::regular(13)
    }
}

/// Read-only glyph metrics provided by the font backend.
pub trait TextMetrics {
    /// Horizontal advance of `ch`.
    fn advance(&self, ch: char, style: TextStyle) -> f64;

    /// Kerning adjustment between `prev` and `cur`.
    fn kerning(&self, prev: char, cur: char, style: TextStyle) -> f64 {
        let _ = (prev, cur, style);
        0.0
    }

    /// Distance between two baselines.
    fn line_height(&self, style: TextStyle) -> f64;
}

/// Fixed-pitch metrics: every glyph advances by `size * advance_ratio`.
///
/// Useful for headless hosts and tests where exact pixel positions matter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMetrics {
    /// Advance as a fraction of the character size.
    pub advance_ratio: f64,
    /// Line height as a fraction of the character size.
    pub line_ratio: f64,
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self {
            advance_ratio: 0.5,
            line_ratio: 1.25,
        }
    }
}

impl TextMetrics for MonospaceMetrics {
    fn advance(&self, _ch: char, style: TextStyle) -> f64 {
        f64::from(style.size) * self.advance_ratio
    }

    fn line_height(&self, style: TextStyle) -> f64 {
        f64::from(style.size) * self.line_ratio
    }
}

// A tab occupies four spaces.
fn glyph_advance(metrics: &dyn TextMetrics, ch: char, style: TextStyle) -> f64 {
    if ch == '\t' {
        metrics.advance(' ', style) * 4.0
    } else {
        metrics.advance(ch, style)
    }
}

/// Width of `text` including kerning.
#[must_use]
pub fn text_width(metrics: &dyn TextMetrics, text: &[char], style: TextStyle) -> f64 {
    caret_offset(metrics, text, text.len(), style)
}

/// Pixel offset of the caret placed before `text[index]`.
///
/// Indices past the end measure the whole run.
#[must_use]
pub fn caret_offset(
    metrics: &dyn TextMetrics,
    text: &[char],
    index: usize,
    style: TextStyle,
) -> f64 {
    let mut width = 0.0;
    let mut prev = None;
    for &ch in &text[..index.min(text.len())] {
        if let Some(p) = prev {
            width += metrics.kerning(p, ch, style);
        }
        width += glyph_advance(metrics, ch, style);
        prev = Some(ch);
    }
    width
}

/// Caret index closest to pixel offset `x`.
///
/// A position inside a glyph resolves to the index before it, unless it lies in the second
/// half of the glyph, in which case the index after it is returned.
#[must_use]
pub fn index_at_offset(
    metrics: &dyn TextMetrics,
    text: &[char],
    x: f64,
    style: TextStyle,
) -> usize {
    let mut width = 0.0;
    let mut prev = None;
    for (i, &ch) in text.iter().enumerate() {
        let kern = prev.map_or(0.0, |p| metrics.kerning(p, ch, style));
        let char_width = glyph_advance(metrics, ch, style);
        if width + kern + char_width < x {
            width += kern + char_width;
            prev = Some(ch);
            continue;
        }
        if width + kern + char_width - x < char_width / 2.0 {
            return i + 1;
        }
        return i;
    }
    text.len()
}
