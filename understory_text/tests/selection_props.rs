// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for the selection engine.

use proptest::prelude::*;
use understory_text::SelectionModel;

#[derive(Clone, Debug)]
enum Op {
    SetCaret(usize),
    MoveCaret(usize, bool),
    SelectAll,
    SelectRange(usize, Option<usize>),
    DeleteSelected,
    DeleteBackward,
    DeleteForward,
    Insert(String),
    InsertAt(usize, String),
    Truncate(usize),
    WordStart(bool),
    WordEnd(bool),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0_usize..40).prop_map(Op::SetCaret),
        (0_usize..40, any::<bool>()).prop_map(|(p, e)| Op::MoveCaret(p, e)),
        Just(Op::SelectAll),
        (0_usize..40, proptest::option::of(0_usize..40))
            .prop_map(|(s, l)| Op::SelectRange(s, l)),
        Just(Op::DeleteSelected),
        Just(Op::DeleteBackward),
        Just(Op::DeleteForward),
        "[a-z ]{0,5}".prop_map(Op::Insert),
        (0_usize..40, "[a-z ]{0,5}").prop_map(|(p, s)| Op::InsertAt(p, s)),
        (0_usize..40).prop_map(Op::Truncate),
        any::<bool>().prop_map(Op::WordStart),
        any::<bool>().prop_map(Op::WordEnd),
    ]
}

fn apply(m: &mut SelectionModel, op: Op) {
    match op {
        Op::SetCaret(p) => m.set_caret(p),
        Op::MoveCaret(p, e) => m.move_caret(p, e),
        Op::SelectAll => m.select_all(),
        Op::SelectRange(s, l) => m.select_range(s, l),
        Op::DeleteSelected => {
            m.delete_selected();
        }
        Op::DeleteBackward => {
            m.delete_backward();
        }
        Op::DeleteForward => {
            m.delete_forward();
        }
        Op::Insert(s) => {
            m.insert(&s, |t| t.len() <= 30);
        }
        Op::InsertAt(p, s) => {
            m.insert_at(p, &s, |_| true);
        }
        Op::Truncate(n) => {
            m.truncate(n);
        }
        Op::WordStart(e) => m.move_word_start(e),
        Op::WordEnd(e) => m.move_word_end(e),
    }
}

proptest! {
    #[test]
    fn selection_indices_stay_in_bounds(
        initial in "[a-z ]{0,20}",
        ops in proptest::collection::vec(op(), 0..64),
    ) {
        let mut m = SelectionModel::from_text(&initial);
        for op in ops {
            apply(&mut m, op);
            prop_assert!(m.sel_start() <= m.len(), "sel_start out of bounds");
            prop_assert!(m.sel_end() <= m.len(), "sel_end out of bounds");
            let range = m.selection_range();
            prop_assert!(range.start <= range.end, "range is ordered");
        }
    }

    #[test]
    fn insert_then_delete_restores_buffer(
        initial in "[a-z ]{0,20}",
        caret in 0_usize..25,
        inserted in "[a-z0-9 ]{0,10}",
    ) {
        let mut m = SelectionModel::from_text(&initial);
        m.set_caret(caret);
        let p = m.caret();
        let before = m.to_string();

        prop_assert!(m.insert(&inserted, |_| true), "unrestricted insert succeeds");
        m.delete_range(p, inserted.chars().count());

        prop_assert_eq!(m.to_string(), before);
        prop_assert_eq!(m.caret(), p);
    }

    #[test]
    fn refused_insert_is_a_no_op(
        initial in "[a-z]{0,10}",
        start in 0_usize..12,
        len in 0_usize..12,
        inserted in "[a-z]{1,5}",
    ) {
        let mut m = SelectionModel::from_text(&initial);
        m.select_range(start, Some(len));
        let snapshot = m.clone();
        prop_assert!(!m.insert(&inserted, |_| false), "predicate refuses");
        prop_assert_eq!(m, snapshot);
    }
}
