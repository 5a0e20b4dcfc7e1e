//! Keyboard/mouse bindings for each input action, loaded from `config/input.toml`.
use std::collections::HashMap;

use bevy::prelude::*;
use serde::Deserialize;

use crate::core::config::read_config_file;

use super::actions::InputAction;

const INPUT_CONFIG_FILE: &str = "input.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    Key(KeyCode),
    Mouse(MouseButton),
}

#[derive(Debug, Clone, Deserialize, Default)]
struct RawInputConfig {
    #[serde(default)]
    bindings: HashMap<String, String>,
}

#[derive(Resource, Debug, Clone)]
pub struct InputBindings {
    bindings: HashMap<InputAction, Binding>,
}

impl Default for InputBindings {
    fn default() -> Self {
        let bindings = [
            (InputAction::Confirm, Binding::Key(KeyCode::Enter)),
            (InputAction::Inventory, Binding::Key(KeyCode::KeyE)),
            (InputAction::MainMenu, Binding::Key(KeyCode::Escape)),
            (InputAction::SwapTimeline, Binding::Key(KeyCode::Space)),
            (InputAction::UseItem, Binding::Mouse(MouseButton::Left)),
            (InputAction::MoveUp, Binding::Key(KeyCode::KeyW)),
            (InputAction::MoveDown, Binding::Key(KeyCode::KeyS)),
            (InputAction::MoveLeft, Binding::Key(KeyCode::KeyA)),
            (InputAction::MoveRight, Binding::Key(KeyCode::KeyD)),
        ];
        Self {
            bindings: bindings.into_iter().collect(),
        }
    }
}

impl InputBindings {
    pub fn load_or_default() -> Self {
        let Some((path, data)) = read_config_file(INPUT_CONFIG_FILE) else {
            return Self::default();
        };
        match toml::from_str::<RawInputConfig>(&data) {
            Ok(raw) => Self::from_raw(raw),
            Err(err) => {
                warn!(
                    "Failed to parse {} ({}). Falling back to default bindings.",
                    path.display(),
                    err
                );
                Self::default()
            }
        }
    }

    fn from_raw(raw: RawInputConfig) -> Self {
        let mut bindings = Self::default();
        for (action_name, binding_name) in raw.bindings {
            let Some(action) = InputAction::from_config_name(&action_name) else {
                warn!("Ignoring binding for unknown action '{}'", action_name);
                continue;
            };
            match parse_binding(&binding_name) {
                Some(binding) => {
                    bindings.bindings.insert(action, binding);
                }
                None => warn!(
                    "Unknown key '{}' for action {}; keeping default",
                    binding_name, action
                ),
            }
        }
        bindings
    }

    pub fn get(&self, action: InputAction) -> Option<Binding> {
        self.bindings.get(&action).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (InputAction, Binding)> + '_ {
        self.bindings
            .iter()
            .map(|(action, binding)| (*action, *binding))
    }
}

/// Parses key names such as `"E"`, `"Enter"`, `"Space"`, `"Digit1"` or
/// `"MouseLeft"`.
pub fn parse_binding(name: &str) -> Option<Binding> {
    let trimmed = name.trim();
    let lower = trimmed.to_ascii_lowercase();

    let mouse = match lower.as_str() {
        "mouseleft" => Some(MouseButton::Left),
        "mouseright" => Some(MouseButton::Right),
        "mousemiddle" => Some(MouseButton::Middle),
        _ => None,
    };
    if let Some(button) = mouse {
        return Some(Binding::Mouse(button));
    }

    let key = match lower.as_str() {
        "enter" | "return" => KeyCode::Enter,
        "escape" | "esc" => KeyCode::Escape,
        "space" => KeyCode::Space,
        "tab" => KeyCode::Tab,
        "shift" | "leftshift" => KeyCode::ShiftLeft,
        "ctrl" | "leftctrl" => KeyCode::ControlLeft,
        "up" => KeyCode::ArrowUp,
        "down" => KeyCode::ArrowDown,
        "left" => KeyCode::ArrowLeft,
        "right" => KeyCode::ArrowRight,
        _ => return parse_character_key(&lower).map(Binding::Key),
    };
    Some(Binding::Key(key))
}

fn parse_character_key(lower: &str) -> Option<KeyCode> {
    let lower = lower.strip_prefix("digit").unwrap_or(lower);
    let mut chars = lower.chars();
    let ch = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    let key = match ch {
        'a' => KeyCode::KeyA,
        'b' => KeyCode::KeyB,
        'c' => KeyCode::KeyC,
        'd' => KeyCode::KeyD,
        'e' => KeyCode::KeyE,
        'f' => KeyCode::KeyF,
        'g' => KeyCode::KeyG,
        'h' => KeyCode::KeyH,
        'i' => KeyCode::KeyI,
        'j' => KeyCode::KeyJ,
        'k' => KeyCode::KeyK,
        'l' => KeyCode::KeyL,
        'm' => KeyCode::KeyM,
        'n' => KeyCode::KeyN,
        'o' => KeyCode::KeyO,
        'p' => KeyCode::KeyP,
        'q' => KeyCode::KeyQ,
        'r' => KeyCode::KeyR,
        's' => KeyCode::KeyS,
        't' => KeyCode::KeyT,
        'u' => KeyCode::KeyU,
        'v' => KeyCode::KeyV,
        'w' => KeyCode::KeyW,
        'x' => KeyCode::KeyX,
        'y' => KeyCode::KeyY,
        'z' => KeyCode::KeyZ,
        '0' => KeyCode::Digit0,
        '1' => KeyCode::Digit1,
        '2' => KeyCode::Digit2,
        '3' => KeyCode::Digit3,
        '4' => KeyCode::Digit4,
        '5' => KeyCode::Digit5,
        '6' => KeyCode::Digit6,
        '7' => KeyCode::Digit7,
        '8' => KeyCode::Digit8,
        '9' => KeyCode::Digit9,
        _ => return None,
    };
    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_named_and_character_keys() {
        assert_eq!(parse_binding("Return"), Some(Binding::Key(KeyCode::Enter)));
        assert_eq!(parse_binding("i"), Some(Binding::Key(KeyCode::KeyI)));
        assert_eq!(parse_binding("Digit7"), Some(Binding::Key(KeyCode::Digit7)));
        assert_eq!(
            parse_binding("MouseRight"),
            Some(Binding::Mouse(MouseButton::Right))
        );
        assert_eq!(parse_binding("F13"), None);
    }

    #[test]
    fn overrides_merge_over_defaults() {
        let raw: RawInputConfig =
            toml::from_str("[bindings]\ninventory = \"I\"\nconfirm = \"nonsense\"\nfly = \"F\"\n")
                .expect("valid toml");
        let bindings = InputBindings::from_raw(raw);

        assert_eq!(
            bindings.get(InputAction::Inventory),
            Some(Binding::Key(KeyCode::KeyI))
        );
        assert_eq!(
            bindings.get(InputAction::Confirm),
            Some(Binding::Key(KeyCode::Enter))
        );
        assert_eq!(bindings.iter().count(), InputAction::ALL.len());
    }
}
