// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Saved trees reload with the same shape and expansion state.

use proptest::prelude::*;
use understory_persist::{Section, emit, parse};
use understory_tree_view::TreeView;
use understory_widget::Theme;

fn paths() -> impl Strategy<Value = Vec<Vec<String>>> {
    prop::collection::vec(prop::collection::vec("[a-c][a-c ]{0,2}", 1..4), 0..12)
}

proptest! {
    #[test]
    fn reload_preserves_items(paths in paths(), folds in prop::collection::vec(any::<prop::sample::Index>(), 0..6)) {
        let theme = Theme::default();
        let mut tree = TreeView::new(&theme);
        for path in &paths {
            tree.add_item(path, true);
        }
        for fold in folds {
            let visible = tree.visible_paths();
            if visible.is_empty() {
                break;
            }
            let path = fold.get(&visible).clone();
            tree.collapse(&path);
        }

        let mut root = Section::new("");
        root.push_child(tree.save());
        let text = emit(&root);
        let parsed = parse(&text).unwrap();

        let mut back = TreeView::new(&theme);
        back.load(&parsed.children()[0]).unwrap();
        prop_assert_eq!(back.nodes(), tree.nodes(), "{}", text);
        prop_assert_eq!(back.visible_paths(), tree.visible_paths());
    }
}
