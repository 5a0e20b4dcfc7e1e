//! Game settings loaded from `config/game.toml`, plus config path resolution.
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use bevy::prelude::*;
use serde::Deserialize;

const CONFIG_DIR_VAR: &str = "ANEROE_CONFIG_DIR";
const DEFAULT_CONFIG_DIR: &str = "config";
const GAME_CONFIG_FILE: &str = "game.toml";

/// Returns the directory holding the TOML config files.
pub fn config_dir() -> PathBuf {
    env::var(CONFIG_DIR_VAR)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR))
}

/// Reads a config file from the config directory, returning `None` (with a
/// warning) when it is missing or unreadable.
pub fn read_config_file(file_name: &str) -> Option<(PathBuf, String)> {
    let path = config_dir().join(file_name);
    match fs::read_to_string(&path) {
        Ok(data) => Some((path, data)),
        Err(err) => {
            warn!(
                "Failed to read {} ({}). Falling back to defaults.",
                path.display(),
                err
            );
            None
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
struct RawGameConfig {
    #[serde(default)]
    clock: RawClockSection,
    #[serde(default)]
    prompt: RawPromptSection,
    #[serde(default)]
    timeline: RawTimelineSection,
    #[serde(default)]
    player: RawPlayerSection,
    #[serde(default)]
    level: RawLevelSection,
    #[serde(default)]
    ui: RawUiSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawClockSection {
    time_scale: f32,
}

impl Default for RawClockSection {
    fn default() -> Self {
        Self { time_scale: 1.0 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawPromptSection {
    duration_seconds: f32,
}

impl Default for RawPromptSection {
    fn default() -> Self {
        Self {
            duration_seconds: 3.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawTimelineSection {
    tick_seconds: f32,
}

impl Default for RawTimelineSection {
    fn default() -> Self {
        Self { tick_seconds: 1.0 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawPlayerSection {
    move_speed: f32,
    interact_offset: f32,
    reach: f32,
}

impl Default for RawPlayerSection {
    fn default() -> Self {
        Self {
            move_speed: 120.0,
            interact_offset: 16.0,
            reach: 40.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawLevelSection {
    start: String,
}

impl Default for RawLevelSection {
    fn default() -> Self {
        Self {
            start: "levels/prologue.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawUiSection {
    status_icons: usize,
}

impl Default for RawUiSection {
    fn default() -> Self {
        Self { status_icons: 5 }
    }
}

/// Tunable gameplay parameters shared across plugins.
#[derive(Resource, Debug, Clone)]
pub struct GameSettings {
    pub time_scale: f32,
    pub prompt_duration_secs: f32,
    pub timeline_tick_secs: f32,
    pub move_speed: f32,
    pub interact_offset: f32,
    pub reach: f32,
    /// Level file relative to the `assets/` directory.
    pub start_level: String,
    pub status_icons: usize,
}

impl GameSettings {
    pub fn load_or_default() -> Self {
        let Some((path, data)) = read_config_file(GAME_CONFIG_FILE) else {
            return RawGameConfig::default().into();
        };
        Self::from_toml(&path, &data)
    }

    fn from_toml(path: &Path, data: &str) -> Self {
        match toml::from_str::<RawGameConfig>(data) {
            Ok(raw) => raw.into(),
            Err(err) => {
                warn!(
                    "Failed to parse {} ({}). Falling back to defaults.",
                    path.display(),
                    err
                );
                RawGameConfig::default().into()
            }
        }
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        RawGameConfig::default().into()
    }
}

impl From<RawGameConfig> for GameSettings {
    fn from(value: RawGameConfig) -> Self {
        let start_level = if value.level.start.trim().is_empty() {
            RawLevelSection::default().start
        } else {
            value.level.start.trim().to_string()
        };

        Self {
            time_scale: value.clock.time_scale.max(0.001),
            prompt_duration_secs: value.prompt.duration_seconds.max(0.0),
            timeline_tick_secs: value.timeline.tick_seconds.max(0.05),
            move_speed: value.player.move_speed.max(0.0),
            interact_offset: value.player.interact_offset.max(0.0),
            reach: value.player.reach.max(0.0),
            start_level,
            status_icons: value.ui.status_icons,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_fall_back_to_defaults() {
        let settings = GameSettings::default();
        assert_eq!(settings.prompt_duration_secs, 3.0);
        assert_eq!(settings.status_icons, 5);
        assert_eq!(settings.start_level, "levels/prologue.json");
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let settings = GameSettings::from_toml(
            Path::new("game.toml"),
            "[prompt]\nduration_seconds = 4.5\n[player]\nmove_speed = -2.0\n",
        );
        assert_eq!(settings.prompt_duration_secs, 4.5);
        assert_eq!(settings.move_speed, 0.0);
        assert_eq!(settings.timeline_tick_secs, 1.0);
    }

    #[test]
    fn malformed_toml_falls_back() {
        let settings = GameSettings::from_toml(Path::new("game.toml"), "[prompt\n");
        assert_eq!(settings.prompt_duration_secs, 3.0);
    }
}
