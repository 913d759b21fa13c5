// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Saving and loading [`TreeView`] items and row settings.

use understory_hierarchy::{Hierarchy, Item, NodeId};
use understory_persist::{LoadError, Section};

use crate::tree_view::TreeView;

impl TreeView {
    /// Items and row settings as a `TreeView` section.
    ///
    /// Children are nested `Item` sections. A level whose items are all expanded leaves is
    /// written as a single `Items` list instead.
    #[must_use]
    pub fn save(&self) -> Section {
        let mut section = Section::new("TreeView");
        section.set_f64("ItemHeight", self.item_height());
        section.set_u32("TextSize", self.text_size());
        write_items(&mut section, &self.nodes());
        section
    }

    /// Replace the items and row settings with those in `section`.
    ///
    /// The new items are built aside and swapped in only if the whole section is valid. A
    /// duplicate sibling label is skipped together with its children. The selection is
    /// cleared.
    pub fn load(&mut self, section: &Section) -> Result<(), LoadError> {
        let loaded = read_section(section);
        #[cfg(feature = "tracing")]
        if let Err(err) = &loaded {
            tracing::warn!(%err, "rejected tree view section");
        }
        let (items, item_height, text_size) = loaded?;

        self.items = items;
        self.selected = None;
        self.hovered = None;
        self.double_click.cancel();
        if let Some(size) = text_size {
            self.theme.text_size = size;
        }
        match item_height {
            Some(height) => self.set_item_height(height),
            None => self.refresh(),
        }
        Ok(())
    }
}

fn write_items(section: &mut Section, items: &[Item]) {
    if items.is_empty() {
        return;
    }
    if items.iter().all(|i| i.children.is_empty() && i.expanded) {
        section.set_list("Items", items.iter().map(|i| i.label.as_str()));
        return;
    }
    for item in items {
        let mut child = Section::new("Item");
        child.set_string("Text", &item.label);
        if !item.expanded {
            child.set_bool("Expanded", false);
        }
        write_items(&mut child, &item.children);
        section.push_child(child);
    }
}

type Loaded = (Hierarchy, Option<f64>, Option<u32>);

fn read_section(section: &Section) -> Result<Loaded, LoadError> {
    let item_height = section.f64("ItemHeight")?;
    let text_size = section.u32("TextSize")?;
    let mut items = Hierarchy::new();
    read_items(section, None, &mut items)?;
    Ok((items, item_height, text_size))
}

fn read_items(
    section: &Section,
    parent: Option<NodeId>,
    items: &mut Hierarchy,
) -> Result<(), LoadError> {
    if let Some(labels) = section.list("Items")? {
        for label in labels {
            items.insert(parent, &label, ());
        }
    }
    for child in section.children_named("Item") {
        let text = child.required_string("Text")?;
        let expanded = child.bool("Expanded")?.unwrap_or(true);
        let Some(id) = items.insert(parent, &text, ()) else {
            #[cfg(feature = "tracing")]
            tracing::debug!(label = %text, "skipped duplicate tree item");
            continue;
        };
        read_items(child, Some(id), items)?;
        items.set_expanded(id, expanded);
    }
    Ok(())
}
