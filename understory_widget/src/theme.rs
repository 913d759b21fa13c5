// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Explicit style and timing configuration handed to every widget constructor.

use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use core::time::Duration;

use understory_persist::{LoadError, Section};
use understory_text::{MonospaceMetrics, TextMetrics, TextStyle};

/// 8-bit RGBA colour.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Fully transparent.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    /// Opaque colour.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Colour with alpha.
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let hex = s.trim().strip_prefix('#')?;
        if !matches!(hex.len(), 6 | 8) || !hex.is_ascii() {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        let a = if hex.len() == 8 { byte(6)? } else { 255 };
        Some(Self::rgba(byte(0)?, byte(2)?, byte(4)?, a))
    }

    /// `#RRGGBB`, or `#RRGGBBAA` when not opaque.
    #[must_use]
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

/// Colour palette shared by the widgets.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Colors {
    /// Widget background.
    pub background: Color,
    /// Background of a hovered row or menu.
    pub background_hover: Color,
    /// Background of a selected row or open menu.
    pub selected_background: Color,
    /// Regular text.
    pub text: Color,
    /// Text of disabled menus and items.
    pub text_disabled: Color,
    /// Text inside a selection.
    pub selected_text: Color,
    /// Background behind selected text.
    pub selected_text_background: Color,
    /// Placeholder text.
    pub default_text: Color,
    /// Caret.
    pub caret: Color,
    /// Border.
    pub border: Color,
    /// Menu separators.
    pub separator: Color,
    /// Scrollbar track.
    pub scrollbar_track: Color,
    /// Scrollbar thumb.
    pub scrollbar_thumb: Color,
}

impl Default for Colors {
    fn default() -> Self {
        Self {
            background: Color::rgb(245, 245, 245),
            background_hover: Color::WHITE,
            selected_background: Color::rgb(0, 110, 255),
            text: Color::rgb(60, 60, 60),
            text_disabled: Color::rgb(125, 125, 125),
            selected_text: Color::WHITE,
            selected_text_background: Color::rgb(0, 110, 255),
            default_text: Color::rgb(160, 160, 160),
            caret: Color::BLACK,
            border: Color::rgb(60, 60, 60),
            separator: Color::BLACK,
            scrollbar_track: Color::rgb(245, 245, 245),
            scrollbar_thumb: Color::rgb(220, 220, 220),
        }
    }
}

/// Style and timing configuration.
///
/// Widgets copy the theme they are created with; there is no ambient global style.
#[derive(Clone)]
pub struct Theme {
    /// Glyph measurement.
    pub metrics: Rc<dyn TextMetrics>,
    /// Character size in pixels.
    pub text_size: u32,
    /// Caret visibility toggle interval.
    pub caret_blink: Duration,
    /// Maximum time between the clicks of a double click.
    pub double_click_time: Duration,
    /// How long a scrollable widget must be stuck at an end before wheel events bubble.
    pub edge_scroll_tolerance: Duration,
    /// Tree row height.
    pub item_height: f64,
    /// Menu bar height, also the height of a menu item.
    pub menu_bar_height: f64,
    /// Horizontal text padding inside menus.
    pub distance_to_side: f64,
    /// Menu separator line thickness.
    pub separator_thickness: f64,
    /// Space above and below a menu separator.
    pub separator_vertical_padding: f64,
    /// Narrowest allowed menu popup.
    pub minimum_sub_menu_width: f64,
    /// Scrollbar thickness.
    pub scrollbar_width: f64,
    /// Inner padding of text fields.
    pub padding: f64,
    /// Caret width.
    pub caret_width: f64,
    /// Palette.
    pub colors: Colors,
}

impl core::fmt::Debug for Theme {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Theme")
            .field("text_size", &self.text_size)
            .field("caret_blink", &self.caret_blink)
            .field("double_click_time", &self.double_click_time)
            .field("edge_scroll_tolerance", &self.edge_scroll_tolerance)
            .field("item_height", &self.item_height)
            .field("menu_bar_height", &self.menu_bar_height)
            .finish_non_exhaustive()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            metrics: Rc::new(MonospaceMetrics::default()),
            text_size: 13,
            caret_blink: Duration::from_millis(500),
            double_click_time: Duration::from_millis(500),
            edge_scroll_tolerance: Duration::from_secs(1),
            item_height: 20.0,
            menu_bar_height: 22.0,
            distance_to_side: 3.0,
            separator_thickness: 1.0,
            separator_vertical_padding: 1.0,
            minimum_sub_menu_width: 125.0,
            scrollbar_width: 16.0,
            padding: 2.0,
            caret_width: 1.0,
            colors: Colors::default(),
        }
    }
}

macro_rules! theme_keys {
    ($m:ident) => {
        $m!(f64 "ItemHeight" item_height);
        $m!(f64 "MenuBarHeight" menu_bar_height);
        $m!(f64 "DistanceToSide" distance_to_side);
        $m!(f64 "SeparatorThickness" separator_thickness);
        $m!(f64 "SeparatorVerticalPadding" separator_vertical_padding);
        $m!(f64 "MinimumSubMenuWidth" minimum_sub_menu_width);
        $m!(f64 "ScrollbarWidth" scrollbar_width);
        $m!(f64 "Padding" padding);
        $m!(f64 "CaretWidth" caret_width);
        $m!(ms "CaretBlinkRate" caret_blink);
        $m!(ms "DoubleClickTime" double_click_time);
        $m!(ms "EdgeScrollTolerance" edge_scroll_tolerance);
        $m!(color "BackgroundColor" colors.background);
        $m!(color "BackgroundColorHover" colors.background_hover);
        $m!(color "SelectedBackgroundColor" colors.selected_background);
        $m!(color "TextColor" colors.text);
        $m!(color "TextColorDisabled" colors.text_disabled);
        $m!(color "SelectedTextColor" colors.selected_text);
        $m!(color "SelectedTextBackgroundColor" colors.selected_text_background);
        $m!(color "DefaultTextColor" colors.default_text);
        $m!(color "CaretColor" colors.caret);
        $m!(color "BorderColor" colors.border);
        $m!(color "SeparatorColor" colors.separator);
        $m!(color "ScrollbarTrackColor" colors.scrollbar_track);
        $m!(color "ScrollbarThumbColor" colors.scrollbar_thumb);
    };
}

impl Theme {
    /// Style for regular text.
    #[must_use]
    pub fn style(&self) -> TextStyle {
        TextStyle::regular(self.text_size)
    }

    /// Replace the metrics used to measure text.
    #[must_use]
    pub fn with_metrics(mut self, metrics: impl TextMetrics + 'static) -> Self {
        self.metrics = Rc::new(metrics);
        self
    }

    /// Apply the overrides in `section`. Keys that are absent keep their current value.
    ///
    /// On error the theme is left unchanged.
    pub fn load(&mut self, section: &Section) -> Result<(), LoadError> {
        let mut next = self.clone();
        if let Err(err) = next.apply(section) {
            #[cfg(feature = "tracing")]
            tracing::warn!(%err, "rejected theme section");
            return Err(err);
        }
        *self = next;
        Ok(())
    }

    fn apply(&mut self, section: &Section) -> Result<(), LoadError> {
        if let Some(size) = section.u32("TextSize")? {
            self.text_size = size;
        }
        macro_rules! read {
            (f64 $key:literal $($field:ident).+) => {
                if let Some(v) = section.f64($key)? {
                    self.$($field).+ = v;
                }
            };
            (ms $key:literal $($field:ident).+) => {
                if let Some(v) = section.u32($key)? {
                    self.$($field).+ = Duration::from_millis(u64::from(v));
                }
            };
            (color $key:literal $($field:ident).+) => {
                if let Some(raw) = section.string($key) {
                    self.$($field).+ =
                        Color::parse(&raw).ok_or_else(|| LoadError::invalid($key, &raw))?;
                }
            };
        }
        theme_keys!(read);
        Ok(())
    }

    /// Properties that differ from [`Theme::default`], as a `Theme` section.
    #[must_use]
    pub fn save(&self) -> Section {
        let defaults = Self::default();
        let mut section = Section::new("Theme");
        if self.text_size != defaults.text_size {
            section.set_u32("TextSize", self.text_size);
        }
        macro_rules! write {
            (f64 $key:literal $($field:ident).+) => {
                if self.$($field).+ != defaults.$($field).+ {
                    section.set_f64($key, self.$($field).+);
                }
            };
            (ms $key:literal $($field:ident).+) => {
                if self.$($field).+ != defaults.$($field).+ {
                    section.set_u32($key, duration_ms(self.$($field).+));
                }
            };
            (color $key:literal $($field:ident).+) => {
                if self.$($field).+ != defaults.$($field).+ {
                    section.set_string($key, &self.$($field).+.to_hex());
                }
            };
        }
        theme_keys!(write);
        section
    }
}

fn duration_ms(d: Duration) -> u32 {
    u32::try_from(d.as_millis()).unwrap_or(u32::MAX)
}
