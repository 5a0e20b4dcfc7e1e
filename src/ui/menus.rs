// src/ui/menus.rs
//
// Inventory and main-menu toggling, and the input mode that follows them.

use bevy::{prelude::*, ui::FocusPolicy};

use crate::{
    core::config::GameSettings,
    input::actions::{InputAction, InputActions, InputMode},
    player::components::ActiveCharacter,
    world::items::ItemDropped,
};

use super::{
    components::{
        is_hit_testable, set_hit_testing, DiscardCraftingItems, InventoryToggled, Menu,
        SelectionState, UiItem,
    },
    selection::{active_drop_position, drop_into_world},
    widgets::UiWidgets,
};

/// What a menu key press asks the UI to do.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MenuEffects {
    pub toggle_inventory: bool,
    pub main_menu_visible: Option<bool>,
}

#[derive(Resource, Debug, Default)]
pub struct MenuState {
    active: Option<Menu>,
    main_menu_open: bool,
}

impl MenuState {
    pub fn active(&self) -> Option<Menu> {
        self.active
    }

    /// Applies one frame of input.
    ///
    /// The inventory key only works when no other menu is open. The main-menu
    /// key closes an open non-main menu first, otherwise it toggles the main
    /// menu.
    pub fn handle(&mut self, inputs: &InputActions) -> MenuEffects {
        let mut effects = MenuEffects::default();

        if inputs.was_pressed(InputAction::Inventory) {
            if matches!(self.active, None | Some(Menu::Inventory)) {
                effects.toggle_inventory = true;
                self.active = match self.active {
                    Some(_) => None,
                    None => Some(Menu::Inventory),
                };
            }
        } else if inputs.was_pressed(InputAction::MainMenu) {
            if matches!(self.active, Some(menu) if menu != Menu::Main) {
                effects.toggle_inventory = true;
            } else {
                self.main_menu_open = !self.main_menu_open;
                effects.main_menu_visible = Some(self.main_menu_open);
            }
            self.active = self.main_menu_open.then_some(Menu::Main);
        }

        effects
    }

    pub fn input_mode(&self) -> InputMode {
        if self.active.is_some() {
            InputMode::Ui
        } else {
            InputMode::Free
        }
    }
}

fn set_shown(visibility: &mut Visibility, shown: bool) {
    *visibility = if shown {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
}

fn flip(visibility: &mut Visibility) {
    let shown = *visibility == Visibility::Hidden;
    set_shown(visibility, shown);
}

pub fn handle_menu_input(
    mut inputs: MessageReader<InputActions>,
    mut menus: ResMut<MenuState>,
    mut mode: ResMut<InputMode>,
    widgets: Option<Res<UiWidgets>>,
    mut visibility: Query<&mut Visibility>,
    mut toggled: MessageWriter<InventoryToggled>,
) {
    let Some(widgets) = widgets else {
        return;
    };

    for input in inputs.read() {
        if *mode > InputMode::Ui {
            continue;
        }

        let effects = menus.handle(input);
        if effects.toggle_inventory {
            toggled.write(InventoryToggled {
                open: menus.active() == Some(Menu::Inventory),
            });
        }
        if let Some(shown) = effects.main_menu_visible {
            if let Ok(mut main_menu) = visibility.get_mut(widgets.main_menu) {
                set_shown(&mut main_menu, shown);
            }
        }
        *mode = menus.input_mode();
    }
}

/// Opens or closes the inventory panel group.
///
/// Hotbar items flip hit-testing, extras and crafting flip visibility, the
/// selected item drops into the world, and crafting hands back its items.
#[allow(clippy::too_many_arguments)]
pub fn apply_inventory_toggle(
    mut commands: Commands,
    mut toggles: MessageReader<InventoryToggled>,
    widgets: Option<Res<UiWidgets>>,
    settings: Res<GameSettings>,
    mut selection: ResMut<SelectionState>,
    children: Query<&Children>,
    mut visibility: Query<&mut Visibility>,
    mut items: Query<(&UiItem, &mut FocusPolicy)>,
    active: Query<&Transform, With<ActiveCharacter>>,
    mut discard: MessageWriter<DiscardCraftingItems>,
    mut dropped: MessageWriter<ItemDropped>,
) {
    let Some(widgets) = widgets else {
        return;
    };

    for toggle in toggles.read() {
        debug!("Inventory {}", if toggle.open { "opened" } else { "closed" });

        for entity in children.iter_descendants(widgets.hotbar) {
            if let Ok((_, mut focus)) = items.get_mut(entity) {
                let enabled = !is_hit_testable(&focus);
                set_hit_testing(&mut focus, enabled);
            }
        }

        for panel in [widgets.extras, widgets.crafting] {
            if let Ok(mut panel) = visibility.get_mut(panel) {
                flip(&mut panel);
            }
        }

        if let Some(selected) = selection.selected() {
            match active_drop_position(&active, &settings) {
                Some(position) => {
                    if let Ok((ui_item, _)) = items.get(selected) {
                        let item = &ui_item.0;
                        drop_into_world(&mut commands, selected, item, position, &mut dropped);
                    }
                    selection.clear();
                }
                None => warn!("No active character to drop the selected item at"),
            }
        }

        discard.write(DiscardCraftingItems);

        if let Ok(mut tooltip) = visibility.get_mut(widgets.tooltip) {
            *tooltip = Visibility::Hidden;
        }
    }
}

/// Returns every item sitting in a crafting slot to the world.
#[allow(clippy::too_many_arguments)]
pub fn discard_crafting_items(
    mut commands: Commands,
    mut requests: MessageReader<DiscardCraftingItems>,
    widgets: Option<Res<UiWidgets>>,
    settings: Res<GameSettings>,
    children: Query<&Children>,
    items: Query<&UiItem>,
    active: Query<&Transform, With<ActiveCharacter>>,
    mut dropped: MessageWriter<ItemDropped>,
) {
    if requests.read().last().is_none() {
        return;
    }
    let Some(widgets) = widgets else {
        return;
    };
    let Some(position) = active_drop_position(&active, &settings) else {
        return;
    };

    for entity in children.iter_descendants(widgets.crafting) {
        if let Ok(ui_item) = items.get(entity) {
            drop_into_world(&mut commands, entity, &ui_item.0, position, &mut dropped);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::items::Item;
    use bevy::ecs::message::Messages;

    fn press(action: InputAction) -> InputActions {
        InputActions::pressed(action)
    }

    #[test]
    fn inventory_key_toggles_inventory() {
        let mut menus = MenuState::default();

        let effects = menus.handle(&press(InputAction::Inventory));
        assert!(effects.toggle_inventory);
        assert_eq!(menus.active(), Some(Menu::Inventory));
        assert_eq!(menus.input_mode(), InputMode::Ui);

        let effects = menus.handle(&press(InputAction::Inventory));
        assert!(effects.toggle_inventory);
        assert_eq!(menus.active(), None);
        assert_eq!(menus.input_mode(), InputMode::Free);
    }

    #[test]
    fn main_menu_key_closes_inventory_before_opening() {
        let mut menus = MenuState::default();
        menus.handle(&press(InputAction::Inventory));

        let effects = menus.handle(&press(InputAction::MainMenu));
        assert_eq!(
            effects,
            MenuEffects {
                toggle_inventory: true,
                main_menu_visible: None
            }
        );
        assert_eq!(menus.active(), None);

        let effects = menus.handle(&press(InputAction::MainMenu));
        assert_eq!(effects.main_menu_visible, Some(true));
        assert_eq!(menus.active(), Some(Menu::Main));
    }

    #[test]
    fn inventory_key_is_ignored_while_main_menu_is_open() {
        let mut menus = MenuState::default();
        menus.handle(&press(InputAction::MainMenu));

        let effects = menus.handle(&press(InputAction::Inventory));
        assert_eq!(effects, MenuEffects::default());
        assert_eq!(menus.active(), Some(Menu::Main));

        let effects = menus.handle(&press(InputAction::MainMenu));
        assert_eq!(effects.main_menu_visible, Some(false));
        assert_eq!(menus.input_mode(), InputMode::Free);
    }

    #[test]
    fn cutscene_mode_blocks_menu_keys() {
        let mut app = App::new();
        app.init_resource::<MenuState>()
            .insert_resource(InputMode::Cutscene)
            .add_message::<InputActions>()
            .add_message::<InventoryToggled>()
            .add_systems(Update, handle_menu_input);
        let panel = app.world_mut().spawn(Visibility::Hidden).id();
        app.world_mut().insert_resource(UiWidgets {
            canvas: panel,
            root: panel,
            inventory: panel,
            hotbar: panel,
            extras: panel,
            main_menu: panel,
            crafting: panel,
            player_status: panel,
            cam_fader: panel,
            timeline_age: panel,
            timeline_time: panel,
            tooltip: panel,
        });

        app.world_mut()
            .write_message(press(InputAction::Inventory));
        app.update();

        assert_eq!(app.world().resource::<MenuState>().active(), None);
        assert_eq!(*app.world().resource::<InputMode>(), InputMode::Cutscene);
    }

    #[test]
    fn toggling_the_inventory_flips_the_panel_group() {
        let mut app = App::new();
        app.init_resource::<SelectionState>()
            .insert_resource(GameSettings::default())
            .add_message::<InventoryToggled>()
            .add_message::<DiscardCraftingItems>()
            .add_message::<ItemDropped>()
            .add_systems(Update, apply_inventory_toggle);

        let world = app.world_mut();
        world.spawn((Transform::default(), ActiveCharacter));
        let canvas = world.spawn(Visibility::Inherited).id();
        let hotbar = world.spawn(Visibility::Inherited).id();
        let slot = world.spawn(ChildOf(hotbar)).id();
        let sword = world
            .spawn((UiItem(Item::weapon("sword")), FocusPolicy::Pass, ChildOf(slot)))
            .id();
        let extras = world.spawn(Visibility::Hidden).id();
        let crafting = world.spawn(Visibility::Hidden).id();
        let tooltip = world.spawn(Visibility::Inherited).id();
        let flask = world
            .spawn((UiItem(Item::generic("flask")), FocusPolicy::Pass, ChildOf(canvas)))
            .id();
        world.resource_mut::<SelectionState>().select(flask);
        world.insert_resource(UiWidgets {
            canvas,
            root: canvas,
            inventory: canvas,
            hotbar,
            extras,
            main_menu: canvas,
            crafting,
            player_status: canvas,
            cam_fader: canvas,
            timeline_age: canvas,
            timeline_time: canvas,
            tooltip,
        });

        world.write_message(InventoryToggled { open: true });
        app.update();

        let world = app.world();
        assert_eq!(world.get::<FocusPolicy>(sword), Some(&FocusPolicy::Block));
        assert_eq!(world.get::<Visibility>(extras), Some(&Visibility::Inherited));
        assert_eq!(world.get::<Visibility>(crafting), Some(&Visibility::Inherited));
        assert_eq!(world.get::<Visibility>(tooltip), Some(&Visibility::Hidden));
        assert!(world.get_entity(flask).is_err());
        assert_eq!(world.resource::<SelectionState>().selected(), None);

        let discards = world.resource::<Messages<DiscardCraftingItems>>();
        assert_eq!(discards.get_cursor().read(discards).count(), 1);
    }
}
