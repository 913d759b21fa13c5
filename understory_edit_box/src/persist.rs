// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Saving and loading [`EditBox`] configuration.

use understory_persist::{LoadError, Section, Value};

use crate::edit_box::{Alignment, EditBox};
use crate::validator::{ALL, FLOAT, INT, UINT, Validator};

const NAMED_VALIDATORS: [(&str, &str); 3] = [("Int", INT), ("UInt", UINT), ("Float", FLOAT)];

fn alignment_name(alignment: Alignment) -> &'static str {
    match alignment {
        Alignment::Left => "Left",
        Alignment::Center => "Center",
        Alignment::Right => "Right",
    }
}

fn parse_alignment(raw: &str) -> Option<Alignment> {
    match raw {
        "Left" => Some(Alignment::Left),
        "Center" => Some(Alignment::Center),
        "Right" => Some(Alignment::Right),
        _ => None,
    }
}

impl EditBox {
    /// Configuration as an `EditBox` section. Only values that differ from a fresh box are
    /// written, except `TextSize`.
    #[must_use]
    pub fn save(&self) -> Section {
        let mut section = Section::new("EditBox");
        if self.alignment != Alignment::Left {
            section.set("Alignment", Value::raw(alignment_name(self.alignment)));
        }
        if !self.validator.accepts_all() {
            let pattern = self.validator.pattern();
            match NAMED_VALIDATORS.iter().find(|(_, p)| *p == pattern) {
                Some((name, _)) => section.set("InputValidator", Value::raw(*name)),
                None => section.set_string("InputValidator", pattern),
            }
        }
        if !self.model.is_empty() {
            section.set_string("Text", &self.text());
        }
        if !self.default_text.is_empty() {
            section.set_string("DefaultText", &self.default_text);
        }
        if let Some(mask) = self.password_char {
            let mut buf = [0; 4];
            section.set_string("PasswordCharacter", mask.encode_utf8(&mut buf));
        }
        if self.max_chars > 0 {
            section.set_u32(
                "MaximumCharacters",
                u32::try_from(self.max_chars).unwrap_or(u32::MAX),
            );
        }
        if self.is_text_width_limited() {
            section.set_bool("TextWidthLimited", true);
        }
        if self.read_only {
            section.set_bool("ReadOnly", true);
        }
        if !self.suffix.is_empty() {
            section.set_string("Suffix", &self.suffix);
        }
        section.set_u32("TextSize", self.text_size());
        section
    }

    /// Apply the properties in `section`. Absent properties keep their current value.
    ///
    /// Every property is read and checked before anything is applied, so on error the box
    /// is unchanged.
    pub fn load(&mut self, section: &Section) -> Result<(), LoadError> {
        let loaded = match Loaded::read(section) {
            Ok(loaded) => loaded,
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(%err, "rejected edit box section");
                return Err(err);
            }
        };

        if let Some(text) = loaded.text {
            self.set_text(&text);
        }
        if let Some(text) = loaded.default_text {
            self.set_default_text(&text);
        }
        if let Some(size) = loaded.text_size {
            self.set_text_size(size);
        }
        if let Some(max) = loaded.max_chars {
            self.set_maximum_characters(max);
        }
        if let Some(limited) = loaded.width_limited {
            self.set_text_width_limited(limited);
        }
        if let Some(read_only) = loaded.read_only {
            self.set_read_only(read_only);
        }
        if let Some(suffix) = loaded.suffix {
            self.set_suffix(&suffix);
        }
        if let Some(mask) = loaded.password {
            self.set_password_character(Some(mask));
        }
        if let Some(alignment) = loaded.alignment {
            self.set_alignment(alignment);
        }
        if let Some(validator) = loaded.validator {
            self.validator = validator;
            let text = self.text();
            self.set_text(&text);
        }
        Ok(())
    }
}

struct Loaded {
    text: Option<String>,
    default_text: Option<String>,
    text_size: Option<u32>,
    max_chars: Option<usize>,
    width_limited: Option<bool>,
    read_only: Option<bool>,
    suffix: Option<String>,
    password: Option<char>,
    alignment: Option<Alignment>,
    validator: Option<Validator>,
}

impl Loaded {
    fn read(section: &Section) -> Result<Self, LoadError> {
        let alignment = match section.string("Alignment") {
            Some(raw) => Some(parse_alignment(&raw).ok_or(LoadError::UnknownVariant {
                key: "Alignment".into(),
                value: raw,
            })?),
            None => None,
        };
        let validator = match section.string("InputValidator") {
            Some(raw) => {
                let pattern = NAMED_VALIDATORS
                    .iter()
                    .find(|(name, _)| *name == raw)
                    .map_or(raw.as_str(), |(_, pattern)| *pattern);
                if pattern == ALL {
                    Some(Validator::default())
                } else {
                    Some(
                        Validator::new(pattern)
                            .map_err(|_| LoadError::invalid("InputValidator", &raw))?,
                    )
                }
            }
            None => None,
        };
        let max_chars = section
            .u32("MaximumCharacters")?
            .map(|v| usize::try_from(v).unwrap_or(usize::MAX));
        Ok(Self {
            text: section.string("Text"),
            default_text: section.string("DefaultText"),
            text_size: section.u32("TextSize")?,
            max_chars,
            width_limited: section.bool("TextWidthLimited")?,
            read_only: section.bool("ReadOnly")?,
            suffix: section.string("Suffix"),
            password: section.char("PasswordCharacter")?,
            alignment,
            validator,
        })
    }
}
