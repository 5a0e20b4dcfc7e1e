// src/ui/components.rs
//
// Components, resources, and messages shared by the gameplay UI.

use bevy::{prelude::*, ui::FocusPolicy};

use crate::world::items::Item;

/// Full-screen root of the UI. Clicking it with an item selected drops the
/// item back into the world.
#[derive(Component, Debug)]
pub struct UiCanvas;

/// An inventory or crafting slot. Holds at most one `UiItem` child.
#[derive(Component, Debug)]
pub struct UiSlot;

/// An item icon living inside a slot (or on the canvas while selected).
#[derive(Component, Debug, Clone)]
pub struct UiItem(pub Item);

/// Marker for the tooltip's text node.
#[derive(Component, Debug)]
pub struct TooltipText;

/// The item currently picked up by the pointer.
///
/// Owned by the UI plugin and passed to the systems that need it instead of
/// living in a global.
#[derive(Resource, Debug, Default)]
pub struct SelectionState {
    selected: Option<Entity>,
}

impl SelectionState {
    pub fn selected(&self) -> Option<Entity> {
        self.selected
    }

    pub fn select(&mut self, item: Entity) {
        self.selected = Some(item);
    }

    pub fn clear(&mut self) -> Option<Entity> {
        self.selected.take()
    }
}

/// Which menu currently owns the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Menu {
    Inventory,
    Main,
}

/// Published whenever an item is picked up (`from == None`) or placed.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemSelected {
    pub from: Option<Entity>,
    pub to: Entity,
}

/// The inventory panel group was opened or closed.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct InventoryToggled {
    pub open: bool,
}

/// Ask the crafting panel to hand its items back to the world.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct DiscardCraftingItems;

/// Resource containing layout settings for the gameplay UI.
#[derive(Resource, Debug)]
pub struct UiLayoutSettings {
    /// Number of slots in the always-visible hotbar.
    pub hotbar_slots: usize,

    /// Number of slots in the extras panel.
    pub extra_slots: usize,

    /// Number of crafting slots.
    pub crafting_slots: usize,

    /// Slot edge length (pixels).
    pub slot_size: f32,

    /// Status icon edge length (pixels).
    pub icon_size: f32,

    pub font_size: f32,
}

impl Default for UiLayoutSettings {
    fn default() -> Self {
        Self {
            hotbar_slots: 5,
            extra_slots: 10,
            crafting_slots: 4,
            slot_size: 40.0,
            icon_size: 24.0,
            font_size: 16.0,
        }
    }
}

/// Enables or disables pointer hit-testing for a UI node.
pub fn set_hit_testing(focus: &mut FocusPolicy, enabled: bool) {
    *focus = if enabled {
        FocusPolicy::Block
    } else {
        FocusPolicy::Pass
    };
}

pub fn is_hit_testable(focus: &FocusPolicy) -> bool {
    *focus == FocusPolicy::Block
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_clear_returns_previous() {
        let mut world = World::new();
        let item = world.spawn_empty().id();
        let mut selection = SelectionState::default();

        selection.select(item);
        assert_eq!(selection.selected(), Some(item));
        assert_eq!(selection.clear(), Some(item));
        assert_eq!(selection.clear(), None);
    }

    #[test]
    fn hit_testing_toggles_focus_policy() {
        let mut focus = FocusPolicy::Block;
        set_hit_testing(&mut focus, false);
        assert!(!is_hit_testable(&focus));
        set_hit_testing(&mut focus, true);
        assert!(is_hit_testable(&focus));
    }
}
