// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clipboard collaborator.

use alloc::string::String;

/// System clipboard access provided by the host.
pub trait Clipboard {
    /// Current clipboard text.
    fn get_text(&self) -> String;
    /// Replace the clipboard text.
    fn set_text(&mut self, text: &str);
}

/// In-process clipboard.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryClipboard {
    text: String,
}

impl MemoryClipboard {
    /// Empty clipboard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for MemoryClipboard {
    fn get_text(&self) -> String {
        self.text.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.into();
    }
}
