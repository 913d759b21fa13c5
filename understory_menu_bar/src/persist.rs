// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Saving and loading [`MenuBar`] menus and settings.

use understory_hierarchy::{Hierarchy, NodeId};
use understory_persist::{LoadError, Section};

use crate::menu_bar::{Entry, Menu, MenuBar, SEPARATOR};

impl MenuBar {
    /// Menus and settings as a `MenuBar` section.
    ///
    /// Each menu is a nested `Menu` section. Items that are all enabled and have no items of
    /// their own are written as a single `Items` list instead.
    #[must_use]
    pub fn save(&self) -> Section {
        let mut section = Section::new("MenuBar");
        section.set_u32("TextSize", self.text_size());
        section.set_f64("MinimumSubMenuWidth", self.minimum_sub_menu_width);
        if self.inverted {
            section.set_bool("InvertedMenuDirection", true);
        }
        for menu in self.menus() {
            section.push_child(write_menu(&menu));
        }
        section
    }

    /// Replace the menus and settings with those in `section`.
    ///
    /// Nothing changes unless the whole section is valid. Any open menu is closed.
    pub fn load(&mut self, section: &Section) -> Result<(), LoadError> {
        let loaded = read_section(section);
        #[cfg(feature = "tracing")]
        if let Err(err) = &loaded {
            tracing::warn!(%err, "rejected menu bar section");
        }
        let loaded = loaded?;

        self.close_state();
        self.menus = loaded.menus;
        if let Some(size) = loaded.text_size {
            self.set_text_size(size);
        }
        if let Some(width) = loaded.minimum_sub_menu_width {
            self.set_minimum_sub_menu_width(width);
        }
        if let Some(inverted) = loaded.inverted {
            self.inverted = inverted;
        }
        Ok(())
    }
}

fn write_menu(menu: &Menu) -> Section {
    let mut section = Section::new("Menu");
    section.set_string("Text", &menu.text);
    if !menu.enabled {
        section.set_bool("Enabled", false);
    }
    if menu.items.is_empty() {
        return section;
    }
    if menu.items.iter().all(|i| i.enabled && i.items.is_empty()) {
        section.set_list("Items", menu.items.iter().map(|i| i.text.as_str()));
    } else {
        for item in &menu.items {
            section.push_child(write_menu(item));
        }
    }
    section
}

struct Loaded {
    menus: Hierarchy<Entry>,
    text_size: Option<u32>,
    minimum_sub_menu_width: Option<f64>,
    inverted: Option<bool>,
}

fn read_section(section: &Section) -> Result<Loaded, LoadError> {
    let mut loaded = Loaded {
        menus: Hierarchy::new(),
        text_size: section.u32("TextSize")?,
        minimum_sub_menu_width: section.f64("MinimumSubMenuWidth")?,
        inverted: section.bool("InvertedMenuDirection")?,
    };
    read_menus(section, None, &mut loaded.menus)?;
    Ok(loaded)
}

fn add(menus: &mut Hierarchy<Entry>, parent: Option<NodeId>, text: &str) -> Option<NodeId> {
    if parent.is_some() && text == SEPARATOR {
        menus.append(parent, text, Entry::default())
    } else {
        menus.insert(parent, text, Entry::default())
    }
}

fn read_menus(
    section: &Section,
    parent: Option<NodeId>,
    menus: &mut Hierarchy<Entry>,
) -> Result<(), LoadError> {
    if parent.is_some()
        && let Some(labels) = section.list("Items")?
    {
        for label in labels {
            add(menus, parent, &label);
        }
    }
    for child in section.children_named("Menu") {
        let text = child.required_string("Text")?;
        let enabled = child.bool("Enabled")?.unwrap_or(true);
        let Some(id) = add(menus, parent, &text) else {
            #[cfg(feature = "tracing")]
            tracing::debug!(label = %text, "skipped duplicate menu");
            continue;
        };
        read_menus(child, Some(id), menus)?;
        if let Some(entry) = menus.data_mut(id) {
            entry.enabled = enabled;
        }
    }
    Ok(())
}
