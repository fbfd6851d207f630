use serde::{Deserialize, Serialize};

use crate::world::ItemKind;

/// One stack of identically named items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub name: String,
    pub count: u32,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    #[serde(default)]
    pub icon: String,
}

/// Ordered stacks; a stack disappears when its count reaches zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    items: Vec<InventoryItem>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adds `count` of `name`, stacking onto an existing entry with the same name.
    pub fn add(&mut self, name: &str, kind: ItemKind, count: u32) {
        if count == 0 {
            return;
        }
        match self.items.iter_mut().find(|i| i.name == name) {
            Some(stack) => stack.count += count,
            None => self.items.push(InventoryItem {
                name: name.to_string(),
                count,
                kind,
                icon: kind.icon().to_string(),
            }),
        }
    }

    /// Removes one unit of `name`; returns false if there was none.
    pub fn remove_one(&mut self, name: &str) -> bool {
        let Some(idx) = self.items.iter().position(|i| i.name == name) else {
            return false;
        };
        let stack = &mut self.items[idx];
        stack.count = stack.count.saturating_sub(1);
        if stack.count == 0 {
            self.items.remove(idx);
        }
        true
    }

    pub fn count_of(&self, name: &str) -> u32 {
        self.items
            .iter()
            .find(|i| i.name == name)
            .map_or(0, |i| i.count)
    }

    /// First stack whose name contains `query`, ignoring case.
    pub fn find(&self, query: &str) -> Option<&InventoryItem> {
        let query = query.to_lowercase();
        self.items
            .iter()
            .find(|i| i.name.to_lowercase().contains(&query))
    }

    /// Drops empty stacks and fills missing icons after loading a save.
    pub(crate) fn normalize(&mut self) {
        self.items.retain(|i| i.count > 0);
        for item in &mut self.items {
            if item.icon.is_empty() {
                item.icon = item.kind.icon().to_string();
            }
        }
    }
}
