// src/ui/widgets.rs
//
// Named widget lookup. Every panel the UI systems touch is bound once, right
// after the layout is spawned; a missing name aborts the app.

use bevy::prelude::*;

use crate::core::errors::ConfigError;

use super::components::UiCanvas;

pub const ROOT: &str = "UI";
pub const INVENTORY: &str = "Inventory";
pub const HOTBAR: &str = "Hotbar";
pub const EXTRAS: &str = "Extras";
pub const MAIN_MENU: &str = "MainMenu";
pub const CRAFTING: &str = "Crafting";
pub const PLAYER_STATUS: &str = "PlayerStatus";
pub const CAM_FADER: &str = "CamFader";
pub const TIMELINE_INFO: &str = "TimelineInfo";
pub const TIMELINE_AGE: &str = "Age";
pub const TIMELINE_TIME: &str = "Time";
pub const TOOLTIP: &str = "Tooltip";

/// Handles to every panel of the gameplay UI.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiWidgets {
    pub canvas: Entity,
    pub root: Entity,
    pub inventory: Entity,
    pub hotbar: Entity,
    pub extras: Entity,
    pub main_menu: Entity,
    pub crafting: Entity,
    pub player_status: Entity,
    pub cam_fader: Entity,
    pub timeline_age: Entity,
    pub timeline_time: Entity,
    pub tooltip: Entity,
}

impl UiWidgets {
    /// Binds every widget by name, starting from the canvas.
    ///
    /// `children_of` lists an entity's immediate children with their names.
    pub fn resolve<F>(canvas: Entity, children_of: F) -> Result<Self, ConfigError>
    where
        F: Fn(Entity) -> Vec<(Entity, String)>,
    {
        let find = |parent: Entity, name: &'static str| {
            children_of(parent)
                .into_iter()
                .find(|(_, child_name)| child_name == name)
                .map(|(entity, _)| entity)
                .ok_or(ConfigError::MissingWidget { name })
        };

        let root = find(canvas, ROOT)?;
        let inventory = find(root, INVENTORY)?;
        let timeline_info = find(root, TIMELINE_INFO)?;

        Ok(Self {
            canvas,
            root,
            inventory,
            hotbar: find(inventory, HOTBAR)?,
            extras: find(inventory, EXTRAS)?,
            main_menu: find(root, MAIN_MENU)?,
            crafting: find(root, CRAFTING)?,
            player_status: find(root, PLAYER_STATUS)?,
            cam_fader: find(root, CAM_FADER)?,
            timeline_age: find(timeline_info, TIMELINE_AGE)?,
            timeline_time: find(timeline_info, TIMELINE_TIME)?,
            tooltip: find(root, TOOLTIP)?,
        })
    }
}

/// Resolves the spawned layout into `UiWidgets`; exits on the first missing name.
pub fn resolve_ui_widgets(
    mut commands: Commands,
    canvases: Query<Entity, With<UiCanvas>>,
    children: Query<&Children>,
    names: Query<&Name>,
    mut exit: MessageWriter<AppExit>,
) {
    let Ok(canvas) = canvases.single() else {
        error!("UI canvas was not spawned");
        exit.write(AppExit::error());
        return;
    };

    let children_of = |parent: Entity| -> Vec<(Entity, String)> {
        children
            .get(parent)
            .map(|kids| {
                let kids: &[Entity] = kids;
                kids.iter()
                    .copied()
                    .filter_map(|child| {
                        names
                            .get(child)
                            .ok()
                            .map(|name| (child, name.as_str().to_string()))
                    })
                    .collect()
            })
            .unwrap_or_default()
    };

    match UiWidgets::resolve(canvas, children_of) {
        Ok(widgets) => {
            debug!("UI widgets resolved: {:?}", widgets);
            commands.insert_resource(widgets);
        }
        Err(err) => {
            error!("UI layout is incomplete: {}", err);
            exit.write(AppExit::error());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct Tree {
        world: World,
        children: HashMap<Entity, Vec<(Entity, String)>>,
    }

    impl Tree {
        fn new() -> Self {
            Self {
                world: World::new(),
                children: HashMap::new(),
            }
        }

        fn add(&mut self, parent: Entity, name: &str) -> Entity {
            let child = self.world.spawn_empty().id();
            self.children
                .entry(parent)
                .or_default()
                .push((child, name.to_string()));
            child
        }

        fn complete() -> (Self, Entity) {
            let mut tree = Self::new();
            let canvas = tree.world.spawn_empty().id();
            let root = tree.add(canvas, ROOT);
            let inventory = tree.add(root, INVENTORY);
            tree.add(inventory, HOTBAR);
            tree.add(inventory, EXTRAS);
            for name in [MAIN_MENU, CRAFTING, PLAYER_STATUS, CAM_FADER, TOOLTIP] {
                tree.add(root, name);
            }
            let info = tree.add(root, TIMELINE_INFO);
            tree.add(info, TIMELINE_AGE);
            tree.add(info, TIMELINE_TIME);
            (tree, canvas)
        }

        fn lookup(&self) -> impl Fn(Entity) -> Vec<(Entity, String)> + '_ {
            |parent| self.children.get(&parent).cloned().unwrap_or_default()
        }
    }

    #[test]
    fn complete_layout_resolves() {
        let (tree, canvas) = Tree::complete();
        let widgets = UiWidgets::resolve(canvas, tree.lookup()).expect("resolves");
        assert_eq!(widgets.canvas, canvas);
        assert_ne!(widgets.hotbar, widgets.extras);
    }

    #[test]
    fn missing_widget_is_reported_by_name() {
        let (mut tree, canvas) = Tree::complete();
        let root = tree.children[&canvas][0].0;
        tree.children
            .get_mut(&root)
            .expect("root has children")
            .retain(|(_, name)| name != CRAFTING);

        let err = UiWidgets::resolve(canvas, tree.lookup()).expect_err("must fail");
        assert_eq!(err, ConfigError::MissingWidget { name: CRAFTING });
    }

    #[test]
    fn nested_names_are_not_found_at_the_wrong_level() {
        let mut tree = Tree::new();
        let canvas = tree.world.spawn_empty().id();
        let root = tree.add(canvas, ROOT);
        tree.add(root, HOTBAR);

        let err = UiWidgets::resolve(canvas, tree.lookup()).expect_err("must fail");
        assert_eq!(err, ConfigError::MissingWidget { name: INVENTORY });
    }
}
