// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Word boundaries for caret navigation.
//!
//! Scanning skips whitespace adjacent to the caret, then one run of non-whitespace. When no
//! boundary is found the scan ends at the buffer edge.

/// Start of the word before `pos`.
#[must_use]
pub fn word_start_before(text: &[char], pos: usize) -> usize {
    let pos = pos.min(text.len());
    let mut in_word = false;
    for i in (1..=pos).rev() {
        let ws = text[i - 1].is_whitespace();
        if in_word {
            if ws {
                return i;
            }
        } else if !ws {
            in_word = true;
        }
    }
    0
}

/// End of the word after `pos`.
#[must_use]
pub fn word_end_after(text: &[char], pos: usize) -> usize {
    let mut in_word = false;
    for (i, ch) in text.iter().enumerate().skip(pos) {
        let ws = ch.is_whitespace();
        if in_word {
            if ws {
                return i;
            }
        } else if !ws {
            in_word = true;
        }
    }
    text.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn start_before_skips_trailing_whitespace() {
        let t = chars("foo bar   ");
        assert_eq!(word_start_before(&t, 10), 4);
        assert_eq!(word_start_before(&t, 4), 0);
        assert_eq!(word_start_before(&t, 0), 0);
        assert_eq!(word_start_before(&chars("   "), 3), 0, "only whitespace");
    }

    #[test]
    fn end_after_skips_leading_whitespace() {
        let t = chars("  foo bar");
        assert_eq!(word_end_after(&t, 0), 5);
        assert_eq!(word_end_after(&t, 5), 9);
        assert_eq!(word_end_after(&t, 9), 9);
        assert_eq!(word_end_after(&t, 42), 9, "past the end");
    }

    #[test]
    fn start_inside_word_goes_to_its_start() {
        let t = chars("hello world");
        assert_eq!(word_start_before(&t, 9), 6);
        assert_eq!(word_end_after(&t, 7), 11);
    }
}
