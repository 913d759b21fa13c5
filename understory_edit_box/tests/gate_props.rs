// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for the edit box acceptance gate.

use proptest::prelude::*;
use understory_edit_box::{EditBox, INT};
use understory_widget::{Clipboard, MemoryClipboard, Theme};

#[derive(Clone, Debug)]
enum Op {
    Type(char),
    Backspace,
    Delete,
    Caret(usize),
    Select(usize, Option<usize>),
    Paste(String),
    Cut,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        prop::sample::select(vec!['0', '7', '-', '+', 'a', ' ']).prop_map(Op::Type),
        Just(Op::Backspace),
        Just(Op::Delete),
        (0_usize..12).prop_map(Op::Caret),
        (0_usize..12, proptest::option::of(0_usize..12)).prop_map(|(s, l)| Op::Select(s, l)),
        "[0-9a+-]{0,6}".prop_map(Op::Paste),
        Just(Op::Cut),
    ]
}

proptest! {
    #[test]
    fn text_always_passes_the_gate(max in 0_usize..8, ops in prop::collection::vec(op(), 0..40)) {
        let mut eb = EditBox::new(&Theme::default());
        eb.set_input_validator(INT).unwrap();
        eb.set_maximum_characters(max);
        let mut clip = MemoryClipboard::new();
        let int = regex::Regex::new(r"^[+-]?[0-9]*$").unwrap();

        for op in ops {
            match op {
                Op::Type(ch) => { eb.insert_char(ch); }
                Op::Backspace => { eb.backspace(); }
                Op::Delete => { eb.delete(); }
                Op::Caret(p) => eb.set_caret_position(p),
                Op::Select(s, l) => eb.select_text(s, l),
                Op::Paste(s) => {
                    clip.set_text(&s);
                    eb.paste(&clip);
                }
                Op::Cut => { eb.cut(&mut clip); }
            }
            let text = eb.text();
            prop_assert!(int.is_match(&text), "{text:?} escaped the validator");
            if max > 0 {
                prop_assert!(text.chars().count() <= max);
            }
            let sel = eb.selection();
            prop_assert!(sel.sel_start() <= sel.len() && sel.sel_end() <= sel.len());
        }
    }
}
