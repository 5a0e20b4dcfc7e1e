//! Level files: authored JSON describing characters, prompt triggers, tiles,
//! scene unloaders, and loose items.
use std::{collections::HashMap, fs, path::Path};

use bevy::prelude::*;
use serde::Deserialize;

use crate::{
    content::prompt_strings::PromptStrings,
    core::errors::ConfigError,
    input::actions::InputAction,
    player::components::{ActiveCharacter, Character, HeldItem, PlayerStats},
    prompt::source::{ContinueHook, PromptLineKey, PromptSource},
};

use super::{
    items::{DroppedItem, Item, ItemKind},
    tiles::{Blocker, InteractiveTile, TileSprites},
    triggers::{SceneUnloadTrigger, TriggerVolume},
};

const CHARACTER_SPRITE: &str = "sprites/characters/aneroe.png";

#[derive(Debug, Clone, Deserialize)]
pub struct LevelDefinition {
    pub name: String,
    #[serde(default)]
    pub characters: Vec<CharacterDef>,
    #[serde(default)]
    pub prompts: Vec<PromptTriggerDef>,
    #[serde(default)]
    pub tiles: Vec<TileDef>,
    #[serde(default)]
    pub unloaders: Vec<UnloaderDef>,
    #[serde(default)]
    pub items: Vec<ItemSpawnDef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CharacterDef {
    pub name: String,
    pub position: [f32; 2],
    #[serde(default = "default_health")]
    pub health: u32,
    #[serde(default)]
    pub held: Option<Item>,
}

fn default_health() -> u32 {
    5
}

#[derive(Debug, Clone, Deserialize)]
pub struct PromptLineDef {
    pub key: String,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PromptTriggerDef {
    pub name: String,
    pub position: [f32; 2],
    pub half_extents: [f32; 2],
    pub lines: Vec<PromptLineDef>,
    #[serde(default)]
    pub override_duration: Option<f32>,
    #[serde(default)]
    pub no_timer: bool,
    /// Action name that continues the prompt early, e.g. `"inventory"`.
    #[serde(default)]
    pub continue_on: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TileDef {
    pub id: String,
    pub position: [f32; 2],
    pub size: [f32; 2],
    #[serde(default)]
    pub is_past: bool,
    #[serde(default)]
    pub counterpart: Option<String>,
    #[serde(default)]
    pub usable_prefab_names: Vec<String>,
    #[serde(default)]
    pub usable_kinds: Vec<ItemKind>,
    pub intact_sprite: String,
    pub broken_sprite: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UnloaderDef {
    pub position: [f32; 2],
    pub half_extents: [f32; 2],
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemSpawnDef {
    pub item: Item,
    pub position: [f32; 2],
}

/// Tags every entity spawned from a level so it can be unloaded.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct LevelMember(pub String);

impl LevelDefinition {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let data = fs::read_to_string(path).map_err(|err| ConfigError::read(&display, err))?;
        Self::parse(&display, &data)
    }

    pub fn parse(path: &str, json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|err| ConfigError::parse(path, err))
    }

    /// Resolves every prompt trigger against the content table.
    pub fn build_prompt_sources(
        &self,
        strings: &PromptStrings,
    ) -> Result<Vec<PromptSource>, ConfigError> {
        self.prompts
            .iter()
            .map(|def| {
                let keys: Vec<PromptLineKey> = def
                    .lines
                    .iter()
                    .map(|line| PromptLineKey {
                        key: line.key.clone(),
                        image: line.image.clone(),
                    })
                    .collect();
                let hook = match &def.continue_on {
                    Some(name) => ContinueHook::OnAction(
                        InputAction::from_config_name(name)
                            .ok_or_else(|| ConfigError::UnknownAction { name: name.clone() })?,
                    ),
                    None => ContinueHook::None,
                };
                Ok(PromptSource::from_keys(&def.name, &keys, strings)?
                    .with_override_duration(def.override_duration)
                    .with_no_timer(def.no_timer)
                    .with_hook(hook))
            })
            .collect()
    }

    /// Checks tile ids are unique and counterparts exist; returns the
    /// index of each tile by id.
    pub fn tile_index(&self) -> Result<HashMap<&str, usize>, ConfigError> {
        let mut index = HashMap::new();
        for (position, tile) in self.tiles.iter().enumerate() {
            if index.insert(tile.id.as_str(), position).is_some() {
                return Err(ConfigError::DuplicateTile {
                    id: tile.id.clone(),
                });
            }
        }
        for tile in &self.tiles {
            if let Some(other) = &tile.counterpart {
                if !index.contains_key(other.as_str()) {
                    return Err(ConfigError::UnknownTile { id: other.clone() });
                }
            }
        }
        Ok(index)
    }
}

/// Spawns a validated level. Returns an error without spawning anything if
/// validation fails.
pub fn spawn_level(
    commands: &mut Commands,
    asset_server: &AssetServer,
    level: &LevelDefinition,
    strings: &PromptStrings,
) -> Result<(), ConfigError> {
    let sources = level.build_prompt_sources(strings)?;
    let tile_index = level.tile_index()?;
    let member = LevelMember(level.name.clone());

    for (index, def) in level.characters.iter().enumerate() {
        let mut entity = commands.spawn((
            Sprite::from_image(asset_server.load(CHARACTER_SPRITE)),
            Transform::from_xyz(def.position[0], def.position[1], 10.0),
            Character::new(def.name.clone()),
            PlayerStats { health: def.health },
            HeldItem(def.held.clone()),
            Name::new(def.name.clone()),
        ));
        if index == 0 {
            entity.insert(ActiveCharacter);
        }
    }

    for (def, source) in level.prompts.iter().zip(sources) {
        commands.spawn((
            Transform::from_xyz(def.position[0], def.position[1], 0.0),
            TriggerVolume::new(Vec2::from(def.half_extents)),
            source,
            member.clone(),
            Name::new(format!("Prompt {}", def.name)),
        ));
    }

    let tile_entities: Vec<Entity> = level
        .tiles
        .iter()
        .map(|def| {
            let size = Vec2::from(def.size);
            let intact = asset_server.load(def.intact_sprite.clone());
            commands
                .spawn((
                    Sprite {
                        image: intact.clone(),
                        custom_size: Some(size),
                        ..default()
                    },
                    Transform::from_xyz(def.position[0], def.position[1], 1.0),
                    TileSprites {
                        intact,
                        broken: asset_server.load(def.broken_sprite.clone()),
                    },
                    Blocker::new(size / 2.0),
                    member.clone(),
                    Name::new(format!("Tile {}", def.id)),
                ))
                .id()
        })
        .collect();

    for (def, entity) in level.tiles.iter().zip(&tile_entities) {
        let mut tile = InteractiveTile::new(def.is_past)
            .with_prefab_names(def.usable_prefab_names.iter().cloned())
            .with_kinds(def.usable_kinds.iter().copied());
        tile.counterpart = def
            .counterpart
            .as_deref()
            .and_then(|id| tile_index.get(id))
            .map(|index| tile_entities[*index]);
        commands.entity(*entity).insert(tile);
    }

    for def in &level.unloaders {
        commands.spawn((
            Transform::from_xyz(def.position[0], def.position[1], 0.0),
            TriggerVolume::new(Vec2::from(def.half_extents)),
            SceneUnloadTrigger {
                level: def.level.clone(),
            },
            member.clone(),
        ));
    }

    for def in &level.items {
        commands.spawn((
            Sprite::from_image(asset_server.load(def.item.sprite_path())),
            Transform::from_xyz(def.position[0], def.position[1], 2.0),
            DroppedItem(def.item.clone()),
            member.clone(),
        ));
    }

    info!(
        "Spawned level {}: {} prompts, {} tiles, {} unloaders",
        level.name,
        level.prompts.len(),
        level.tiles.len(),
        level.unloaders.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEVEL: &str = r#"{
        "name": "test",
        "prompts": [
            { "name": "intro", "position": [0, 0], "half_extents": [16, 16],
              "lines": [{ "key": "introWasd" }, { "key": "introSwap", "image": "swap" }],
              "continue_on": "inventory" }
        ],
        "tiles": [
            { "id": "oak_past", "position": [0, 0], "size": [16, 16], "is_past": true,
              "counterpart": "oak_present", "usable_kinds": ["weapon"],
              "intact_sprite": "a.png", "broken_sprite": "b.png" },
            { "id": "oak_present", "position": [500, 0], "size": [16, 16],
              "intact_sprite": "a.png", "broken_sprite": "b.png" }
        ]
    }"#;

    #[test]
    fn parses_and_validates_a_level() {
        let level = LevelDefinition::parse("test.json", LEVEL).expect("valid level");
        assert_eq!(level.name, "test");
        assert!(level.characters.is_empty());

        let sources = level
            .build_prompt_sources(&PromptStrings::default())
            .expect("keys exist");
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].len(), 2);

        let index = level.tile_index().expect("tiles link");
        assert_eq!(index["oak_present"], 1);
        assert_eq!(level.tiles[0].usable_kinds, vec![ItemKind::Weapon]);
    }

    #[test]
    fn unknown_prompt_key_fails_fast() {
        let json = LEVEL.replace("introSwap", "introTeleport");
        let level = LevelDefinition::parse("test.json", &json).expect("valid json");
        assert_eq!(
            level.build_prompt_sources(&PromptStrings::default()).err(),
            Some(ConfigError::MissingPromptKey {
                key: "introTeleport".into()
            })
        );
    }

    #[test]
    fn unknown_continue_action_fails_fast() {
        let json = LEVEL.replace("\"inventory\"", "\"dance\"");
        let level = LevelDefinition::parse("test.json", &json).expect("valid json");
        assert!(matches!(
            level.build_prompt_sources(&PromptStrings::default()),
            Err(ConfigError::UnknownAction { .. })
        ));
    }

    #[test]
    fn dangling_counterpart_is_rejected() {
        let json = LEVEL.replace("\"counterpart\": \"oak_present\"", "\"counterpart\": \"elm\"");
        let level = LevelDefinition::parse("test.json", &json).expect("valid json");
        assert_eq!(
            level.tile_index().err(),
            Some(ConfigError::UnknownTile { id: "elm".into() })
        );
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            LevelDefinition::parse("broken.json", "{ \"name\": "),
            Err(ConfigError::Parse { .. })
        ));
    }
}
