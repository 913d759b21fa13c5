// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Saved menu bars reload with the same menus, separators, and enabled flags.

use proptest::prelude::*;
use understory_menu_bar::{MenuBar, SEPARATOR};
use understory_persist::{Section, emit, parse};
use understory_widget::Theme;

fn items() -> impl Strategy<Value = Vec<(Vec<String>, bool)>> {
    prop::collection::vec(
        (prop::collection::vec("[a-c]{1,2}", 2..4), any::<bool>()),
        0..12,
    )
}

proptest! {
    #[test]
    fn reload_preserves_menus(items in items(), disabled in prop::collection::vec(any::<prop::sample::Index>(), 0..4)) {
        let theme = Theme::default();
        let mut bar = MenuBar::new(&theme);
        let mut added = Vec::new();
        for (mut path, separator) in items {
            bar.add_menu_item(&path, true);
            added.push(path.clone());
            if separator {
                path.pop();
                path.push(SEPARATOR.to_string());
                bar.add_menu_item(&path, false);
            }
        }
        for index in disabled {
            if added.is_empty() {
                break;
            }
            let path = index.get(&added);
            bar.set_menu_item_enabled(path, false);
        }

        let mut root = Section::new("");
        root.push_child(bar.save());
        let text = emit(&root);
        let parsed = parse(&text).unwrap();

        let mut back = MenuBar::new(&theme);
        back.load(&parsed.children()[0]).unwrap();
        prop_assert_eq!(back.menus(), bar.menus(), "{}", text);
    }
}
