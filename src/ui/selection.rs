// src/ui/selection.rs
//
// Pointer-driven item selection and drag-and-drop between slots.

use bevy::{prelude::*, ui::FocusPolicy, window::PrimaryWindow};

use crate::{
    core::config::GameSettings,
    player::{components::ActiveCharacter, systems::interact_position},
    world::items::{Item, ItemDropped},
};

use super::{
    components::{
        is_hit_testable, set_hit_testing, ItemSelected, SelectionState, UiCanvas, UiItem, UiSlot,
    },
    widgets::UiWidgets,
};

/// What the pointer landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Canvas,
    Slot { slot: Entity, occupied: bool },
    Item { item: Entity },
}

impl ClickTarget {
    /// Topmost wins when one click presses several nodes.
    fn priority(&self) -> u8 {
        match self {
            ClickTarget::Canvas => 0,
            ClickTarget::Slot { .. } => 1,
            ClickTarget::Item { .. } => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickPlan {
    Ignore,
    Select(Entity),
    Place { item: Entity, slot: Entity },
    DropIntoWorld(Entity),
    /// The target slot is occupied, or the target is another item (which
    /// always sits in an occupied slot); the selection stays where it is.
    Reject,
}

/// Decides what a click does given the current selection.
///
/// With nothing selected only items can be picked up. With an item selected,
/// the canvas drops it into the world and an empty slot takes it. An item
/// target counts as its (occupied) slot, so there is no swapping.
pub fn plan_click(selected: Option<Entity>, target: ClickTarget) -> ClickPlan {
    match (selected, target) {
        (None, ClickTarget::Item { item }) => ClickPlan::Select(item),
        (None, _) => ClickPlan::Ignore,
        (Some(item), ClickTarget::Canvas) => ClickPlan::DropIntoWorld(item),
        (Some(item), ClickTarget::Slot { slot, occupied: false }) => {
            ClickPlan::Place { item, slot }
        }
        (Some(_), ClickTarget::Slot { occupied: true, .. } | ClickTarget::Item { .. }) => {
            ClickPlan::Reject
        }
    }
}

/// Where dropped items land: in front of the active character.
pub fn active_drop_position(
    active: &Query<&Transform, With<ActiveCharacter>>,
    settings: &GameSettings,
) -> Option<Vec2> {
    active
        .single()
        .ok()
        .map(|transform| interact_position(transform.translation, settings.interact_offset))
}

/// Turns a UI item back into a world item and removes its icon.
pub fn drop_into_world(
    commands: &mut Commands,
    entity: Entity,
    item: &Item,
    position: Vec2,
    dropped: &mut MessageWriter<ItemDropped>,
) {
    info!("Dropping {} into the world", item);
    dropped.write(ItemDropped {
        item: item.clone(),
        position,
    });
    commands.entity(entity).despawn();
}

#[allow(clippy::too_many_arguments, clippy::type_complexity)]
pub fn handle_pointer_click(
    mut commands: Commands,
    mut selection: ResMut<SelectionState>,
    widgets: Option<Res<UiWidgets>>,
    settings: Res<GameSettings>,
    pressed: Query<
        (Entity, &Interaction, Has<UiCanvas>, Has<UiSlot>, Has<UiItem>),
        Changed<Interaction>,
    >,
    children: Query<&Children>,
    mut items: Query<(&UiItem, &mut Node, &mut FocusPolicy)>,
    active: Query<&Transform, With<ActiveCharacter>>,
    mut selected_writer: MessageWriter<ItemSelected>,
    mut dropped: MessageWriter<ItemDropped>,
) {
    let Some(widgets) = widgets else {
        return;
    };

    let mut target: Option<ClickTarget> = None;
    for (entity, interaction, is_canvas, is_slot, is_item) in pressed.iter() {
        if *interaction != Interaction::Pressed {
            continue;
        }
        let candidate = if is_item {
            match items.get(entity) {
                Ok((_, _, focus)) if is_hit_testable(focus) => ClickTarget::Item { item: entity },
                _ => continue,
            }
        } else if is_slot {
            let occupied = children
                .get(entity)
                .is_ok_and(|kids| !kids.is_empty());
            ClickTarget::Slot {
                slot: entity,
                occupied,
            }
        } else if is_canvas {
            ClickTarget::Canvas
        } else {
            continue;
        };
        if target.is_none_or(|current| candidate.priority() > current.priority()) {
            target = Some(candidate);
        }
    }
    let Some(target) = target else {
        return;
    };

    match plan_click(selection.selected(), target) {
        ClickPlan::Ignore => {}
        ClickPlan::Select(item) => {
            let Ok((ui_item, mut node, mut focus)) = items.get_mut(item) else {
                return;
            };
            debug!("Selected {}", ui_item.0);
            node.position_type = PositionType::Absolute;
            set_hit_testing(&mut focus, false);
            commands
                .entity(item)
                .insert((ChildOf(widgets.canvas), GlobalZIndex(10)));
            selection.select(item);
            selected_writer.write(ItemSelected {
                from: None,
                to: item,
            });
        }
        ClickPlan::Place { item, slot } => {
            let Ok((_, mut node, mut focus)) = items.get_mut(item) else {
                selection.clear();
                return;
            };
            node.position_type = PositionType::Relative;
            node.left = Val::Auto;
            node.top = Val::Auto;
            set_hit_testing(&mut focus, true);
            commands
                .entity(item)
                .insert(ChildOf(slot))
                .remove::<GlobalZIndex>();
            selection.clear();
            selected_writer.write(ItemSelected {
                from: Some(item),
                to: slot,
            });
        }
        ClickPlan::DropIntoWorld(item) => {
            let Some(position) = active_drop_position(&active, &settings) else {
                warn!("No active character to drop the selected item at");
                return;
            };
            if let Ok((ui_item, _, _)) = items.get(item) {
                drop_into_world(&mut commands, item, &ui_item.0, position, &mut dropped);
            }
            selection.clear();
        }
        ClickPlan::Reject => debug!("Drop rejected: slot is occupied"),
    }
}

/// Keeps the selected item under the pointer.
pub fn follow_cursor(
    selection: Res<SelectionState>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut nodes: Query<(&mut Node, &ComputedNode), With<UiItem>>,
) {
    let Some(selected) = selection.selected() else {
        return;
    };
    let Some(cursor) = windows.single().ok().and_then(Window::cursor_position) else {
        return;
    };
    let Ok((mut node, computed)) = nodes.get_mut(selected) else {
        return;
    };

    let half = computed.size() * computed.inverse_scale_factor() * 0.5;
    node.left = Val::Px(cursor.x - half.x);
    node.top = Val::Px(cursor.y - half.y);
}
