//! Item values carried by characters, UI slots, and the world.
use std::fmt;

use bevy::prelude::*;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// Plain item; tiles match it by prefab name.
    Generic,
    Weapon,
    Tool,
    Seed,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Item {
    /// Prefab name, e.g. `"flask"` or `"sword"`.
    pub name: String,
    pub kind: ItemKind,
}

impl Item {
    pub fn new(name: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn generic(name: impl Into<String>) -> Self {
        Self::new(name, ItemKind::Generic)
    }

    pub fn weapon(name: impl Into<String>) -> Self {
        Self::new(name, ItemKind::Weapon)
    }

    /// Sprite used for this item in the world and in UI slots.
    pub fn sprite_path(&self) -> String {
        format!("sprites/items/{}.png", self.name)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// An item lying in the world.
#[derive(Component, Debug, Clone)]
pub struct DroppedItem(pub Item);

/// An item left the inventory and should appear in the world.
#[derive(Message, Debug, Clone, PartialEq)]
pub struct ItemDropped {
    pub item: Item,
    pub position: Vec2,
}
