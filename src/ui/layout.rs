// src/ui/layout.rs
//
// Spawns the gameplay UI hierarchy. Panels are named so `UiWidgets` can bind
// them after spawn.

use bevy::{prelude::*, ui::FocusPolicy};

use crate::{
    core::config::GameSettings,
    world::items::{Item, ItemKind},
};

use super::{
    components::{TooltipText, UiCanvas, UiItem, UiLayoutSettings, UiSlot},
    widgets,
};

// Visual constants
const PANEL_COLOR: Color = Color::srgba(0.1, 0.1, 0.1, 0.85);
const SLOT_COLOR: Color = Color::srgba(0.25, 0.25, 0.25, 0.9);
const BORDER_COLOR: Color = Color::srgb(0.4, 0.4, 0.4);
const TEXT_COLOR: Color = Color::WHITE;
const HEALTH_COLOR: Color = Color::srgb(0.85, 0.15, 0.2);
const FADER_COLOR: Color = Color::srgba(0.0, 0.0, 0.0, 0.0);

/// Items the hotbar starts with, slot by slot.
const STARTING_ITEMS: [(&str, ItemKind); 2] =
    [("sword", ItemKind::Weapon), ("flask", ItemKind::Generic)];

pub fn spawn_ui_layout(
    mut commands: Commands,
    game: Res<GameSettings>,
    layout: Res<UiLayoutSettings>,
    asset_server: Res<AssetServer>,
) {
    let slot_node = || {
        (
            Node {
                width: Val::Px(layout.slot_size),
                height: Val::Px(layout.slot_size),
                margin: UiRect::all(Val::Px(2.0)),
                border: UiRect::all(Val::Px(1.0)),
                ..default()
            },
            BackgroundColor(SLOT_COLOR),
            BorderColor::from(BORDER_COLOR),
            Interaction::default(),
            FocusPolicy::Block,
            UiSlot,
        )
    };
    let text = |value: &str| {
        (
            Text::new(value),
            TextFont {
                font_size: layout.font_size,
                ..default()
            },
            TextColor(TEXT_COLOR),
        )
    };

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                ..default()
            },
            Interaction::default(),
            FocusPolicy::Block,
            UiCanvas,
            Name::new("Canvas"),
        ))
        .with_children(|canvas| {
            canvas
                .spawn((
                    Node {
                        width: Val::Percent(100.0),
                        height: Val::Percent(100.0),
                        ..default()
                    },
                    Visibility::Hidden,
                    Name::new(widgets::ROOT),
                ))
                .with_children(|ui| {
                    // Inventory: hotbar along the bottom, extras above it
                    ui.spawn((
                        Node {
                            position_type: PositionType::Absolute,
                            bottom: Val::Px(8.0),
                            left: Val::Px(8.0),
                            flex_direction: FlexDirection::ColumnReverse,
                            ..default()
                        },
                        Name::new(widgets::INVENTORY),
                    ))
                    .with_children(|inventory| {
                        inventory
                            .spawn((
                                Node {
                                    flex_direction: FlexDirection::Row,
                                    padding: UiRect::all(Val::Px(4.0)),
                                    ..default()
                                },
                                BackgroundColor(PANEL_COLOR),
                                Name::new(widgets::HOTBAR),
                            ))
                            .with_children(|hotbar| {
                                for index in 0..layout.hotbar_slots {
                                    let mut slot = hotbar.spawn(slot_node());
                                    if let Some((name, kind)) = STARTING_ITEMS.get(index) {
                                        let item = Item::new(*name, *kind);
                                        slot.with_children(|slot| {
                                            slot.spawn(item_node(item, &layout, &asset_server));
                                        });
                                    }
                                }
                            });

                        inventory
                            .spawn((
                                Node {
                                    flex_direction: FlexDirection::Row,
                                    flex_wrap: FlexWrap::Wrap,
                                    max_width: Val::Px((layout.slot_size + 4.0) * 5.0 + 8.0),
                                    padding: UiRect::all(Val::Px(4.0)),
                                    ..default()
                                },
                                BackgroundColor(PANEL_COLOR),
                                Visibility::Hidden,
                                Name::new(widgets::EXTRAS),
                            ))
                            .with_children(|extras| {
                                for _ in 0..layout.extra_slots {
                                    extras.spawn(slot_node());
                                }
                            });
                    });

                    ui.spawn((
                        Node {
                            position_type: PositionType::Absolute,
                            top: Val::Percent(30.0),
                            left: Val::Percent(40.0),
                            padding: UiRect::all(Val::Px(16.0)),
                            flex_direction: FlexDirection::Column,
                            ..default()
                        },
                        BackgroundColor(PANEL_COLOR),
                        Visibility::Hidden,
                        Name::new(widgets::MAIN_MENU),
                    ))
                    .with_children(|menu| {
                        menu.spawn(text("Paused"));
                    });

                    ui.spawn((
                        Node {
                            position_type: PositionType::Absolute,
                            bottom: Val::Px(8.0),
                            right: Val::Px(8.0),
                            flex_direction: FlexDirection::Row,
                            padding: UiRect::all(Val::Px(4.0)),
                            ..default()
                        },
                        BackgroundColor(PANEL_COLOR),
                        Visibility::Hidden,
                        Name::new(widgets::CRAFTING),
                    ))
                    .with_children(|crafting| {
                        for _ in 0..layout.crafting_slots {
                            crafting.spawn(slot_node());
                        }
                    });

                    ui.spawn((
                        Node {
                            position_type: PositionType::Absolute,
                            top: Val::Px(8.0),
                            left: Val::Px(8.0),
                            flex_direction: FlexDirection::Row,
                            ..default()
                        },
                        Name::new(widgets::PLAYER_STATUS),
                    ))
                    .with_children(|status| {
                        for index in 0..game.status_icons {
                            status.spawn((
                                Node {
                                    width: Val::Px(layout.icon_size),
                                    height: Val::Px(layout.icon_size),
                                    margin: UiRect::right(Val::Px(4.0)),
                                    ..default()
                                },
                                BackgroundColor(HEALTH_COLOR),
                                Name::new(format!("Health {}", index)),
                            ));
                        }
                    });

                    ui.spawn((
                        Node {
                            position_type: PositionType::Absolute,
                            top: Val::Px(8.0),
                            right: Val::Px(8.0),
                            flex_direction: FlexDirection::Column,
                            align_items: AlignItems::FlexEnd,
                            ..default()
                        },
                        Name::new(widgets::TIMELINE_INFO),
                    ))
                    .with_children(|info| {
                        info.spawn((text("past"), Name::new(widgets::TIMELINE_AGE)));
                        info.spawn((text("Year 1000"), Name::new(widgets::TIMELINE_TIME)));
                    });

                    ui.spawn((
                        Node {
                            position_type: PositionType::Absolute,
                            padding: UiRect::all(Val::Px(6.0)),
                            ..default()
                        },
                        BackgroundColor(PANEL_COLOR),
                        GlobalZIndex(20),
                        Visibility::Hidden,
                        Name::new(widgets::TOOLTIP),
                    ))
                    .with_children(|tooltip| {
                        tooltip.spawn((text(""), TooltipText));
                    });

                    // Drawn last so it covers everything while loading
                    ui.spawn((
                        Node {
                            position_type: PositionType::Absolute,
                            width: Val::Percent(100.0),
                            height: Val::Percent(100.0),
                            ..default()
                        },
                        BackgroundColor(FADER_COLOR),
                        GlobalZIndex(30),
                        Visibility::Hidden,
                        Name::new(widgets::CAM_FADER),
                    ));
                });
        });

    info!(
        "UI layout spawned ({} hotbar, {} extra, {} crafting slots)",
        layout.hotbar_slots, layout.extra_slots, layout.crafting_slots
    );
}

/// Bundle for an item icon. Hotbar items start without hit-testing; opening
/// the inventory turns it on.
pub fn item_node(
    item: Item,
    layout: &UiLayoutSettings,
    asset_server: &AssetServer,
) -> impl Bundle {
    (
        Node {
            width: Val::Px(layout.slot_size - 4.0),
            height: Val::Px(layout.slot_size - 4.0),
            ..default()
        },
        ImageNode::new(asset_server.load(item.sprite_path())),
        Interaction::default(),
        FocusPolicy::Pass,
        Name::new(item.name.clone()),
        UiItem(item),
    )
}
