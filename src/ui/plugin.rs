// src/ui/plugin.rs
//
// UiPlugin coordinates the gameplay HUD, menus, and item drag-and-drop.

use bevy::prelude::*;

use crate::core::config::GameSettings;

use super::components::{
    DiscardCraftingItems, InventoryToggled, ItemSelected, SelectionState, UiLayoutSettings,
};
use super::layout::spawn_ui_layout;
use super::menus::{apply_inventory_toggle, discard_crafting_items, handle_menu_input, MenuState};
use super::selection::{follow_cursor, handle_pointer_click};
use super::status::{
    mirror_health, mirror_timeline, show_ui_on_area_merged, tick_timeline_timer,
    toggle_loading_screen, TimelineTicker,
};
use super::tooltip::update_tooltip;
use super::widgets::resolve_ui_widgets;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        info!("UiPlugin registered");

        let tick_secs = app
            .world()
            .get_resource::<GameSettings>()
            .map(|settings| settings.timeline_tick_secs)
            .unwrap_or_else(|| GameSettings::default().timeline_tick_secs);

        app.insert_resource(UiLayoutSettings::default())
            .insert_resource(TimelineTicker::new(tick_secs))
            .init_resource::<SelectionState>()
            .init_resource::<MenuState>()
            .add_message::<ItemSelected>()
            .add_message::<InventoryToggled>()
            .add_message::<DiscardCraftingItems>()
            .add_systems(Startup, spawn_ui_layout)
            .add_systems(PostStartup, resolve_ui_widgets)
            .add_systems(
                Update,
                (
                    handle_menu_input,
                    apply_inventory_toggle.after(handle_menu_input),
                    discard_crafting_items.after(apply_inventory_toggle),
                    handle_pointer_click.after(apply_inventory_toggle),
                    follow_cursor.after(handle_pointer_click),
                    update_tooltip.after(apply_inventory_toggle),
                    mirror_health,
                    mirror_timeline,
                    tick_timeline_timer,
                    toggle_loading_screen,
                    show_ui_on_area_merged,
                ),
            );
    }
}
