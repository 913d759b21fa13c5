// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Emit followed by parse reproduces arbitrary section trees.

use proptest::prelude::*;
use understory_persist::{Section, emit, parse};

fn leaf() -> impl Strategy<Value = Section> {
    (
        "[A-Z][a-zA-Z]{0,6}",
        proptest::collection::btree_map("[A-Z][a-z]{0,5}", "[ -~]{0,12}", 0..4),
        proptest::collection::vec("[ -~]{0,8}", 0..4),
    )
        .prop_map(|(name, strings, list)| {
            let mut s = Section::new(name);
            for (k, v) in strings {
                s.set_string(k, &v);
            }
            s.set_list("List", list);
            s
        })
}

fn tree() -> impl Strategy<Value = Section> {
    leaf().prop_recursive(3, 24, 4, |inner| {
        (leaf(), proptest::collection::vec(inner, 0..4)).prop_map(|(mut s, children)| {
            for c in children {
                s.push_child(c);
            }
            s
        })
    })
}

proptest! {
    #[test]
    fn emit_then_parse_is_identity(children in proptest::collection::vec(tree(), 0..4)) {
        let mut root = Section::new("");
        for c in children {
            root.push_child(c);
        }
        let text = emit(&root);
        let back = parse(&text).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(back, root);
    }
}
