//! Read-only table mapping prompt keys to display strings.
use std::collections::HashMap;

use bevy::prelude::*;
use serde::Deserialize;

use crate::core::{config::read_config_file, errors::ConfigError};

const PROMPTS_CONFIG_FILE: &str = "prompts.toml";

const BUILTIN_PROMPTS: [(&str, &str); 19] = [
    ("almostThere", "It can't be much farther."),
    (
        "curseTheDisease",
        "Curse this poison. If only I had a little more time.",
    ),
    ("introWasd", "Press W, A, S, and D to move."),
    (
        "introMouse",
        "Press Left Click to use an item and Right Click for secondary use.",
    ),
    (
        "introSword",
        "You have a sword equiped. The primary use of the sword attacks and the secondary use is Block.",
    ),
    ("introRunCrawl", "Hold Left Shift to sprint and Ctrl to sneak."),
    ("introInventoryUsage", "Press E to open the inventory."),
    (
        "introInventoryControls",
        "Mouse over an item to learn more information about it.  Press Left Click to pick up an item and Left Click once more to drop it.",
    ),
    (
        "closeInventory",
        "Notice the crafting menu below. Press E to exit the inventory.",
    ),
    (
        "introEquippedItem",
        "The yellow outline in the hotbar indicates which slot is equipped.  Press 1-7 to select a slot to equip.",
    ),
    (
        "introSwap",
        "Aged oaks block the way. Press Space to swap timelines!",
    ),
    ("introSaplings", "Fragile young saplings obstruct the path."),
    (
        "introItemMounds",
        "Patches of dirt are safe places to bury items. Use an item on the dirt to bury it.",
    ),
    ("introBuryItem", "Bury the flask for your future self."),
    (
        "introPickupItem",
        "Swap to the present timeline to retrieve the item.",
    ),
    (
        "introScroll",
        "Perhaps there is valuable information contained within the scroll...",
    ),
    (
        "introReset",
        "If you ever get stuck, press the escape button to reset to the last checkpoint.",
    ),
    (
        "crossWater",
        "There looks to be some valuables across the water. I wonder if there's a way to cross...",
    ),
    (
        "introItemPickup",
        "Left Click when on top of a buried item to pick it up.",
    ),
];

#[derive(Debug, Clone, Deserialize, Default)]
struct RawPromptTable {
    #[serde(default)]
    prompts: HashMap<String, String>,
}

#[derive(Resource, Debug, Clone)]
pub struct PromptStrings {
    entries: HashMap<String, String>,
}

impl Default for PromptStrings {
    fn default() -> Self {
        Self {
            entries: BUILTIN_PROMPTS
                .iter()
                .map(|(key, text)| (key.to_string(), text.to_string()))
                .collect(),
        }
    }
}

impl PromptStrings {
    /// Built-in table with `config/prompts.toml` entries layered on top.
    pub fn load_or_default() -> Self {
        let mut strings = Self::default();
        let Some((path, data)) = read_config_file(PROMPTS_CONFIG_FILE) else {
            return strings;
        };
        match toml::from_str::<RawPromptTable>(&data) {
            Ok(raw) => strings.merge(raw.prompts),
            Err(err) => warn!(
                "Failed to parse {} ({}). Using built-in prompt strings.",
                path.display(),
                err
            ),
        }
        strings
    }

    fn merge(&mut self, overrides: HashMap<String, String>) {
        self.entries.extend(overrides);
    }

    pub fn resolve(&self, key: &str) -> Result<&str, ConfigError> {
        self.entries
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| ConfigError::MissingPromptKey {
                key: key.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_resolves_known_keys() {
        let strings = PromptStrings::default();
        assert_eq!(strings.len(), BUILTIN_PROMPTS.len());
        assert!(!strings.is_empty());
        assert_eq!(
            strings.resolve("introWasd"),
            Ok("Press W, A, S, and D to move.")
        );
    }

    #[test]
    fn unknown_key_is_a_config_error() {
        let strings = PromptStrings::default();
        assert_eq!(
            strings.resolve("introFly"),
            Err(ConfigError::MissingPromptKey {
                key: "introFly".into()
            })
        );
    }

    #[test]
    fn overrides_replace_and_extend_entries() {
        let raw: RawPromptTable = toml::from_str(
            "[prompts]\nintroWasd = \"Use the arrow keys.\"\nintroBoat = \"Row, row.\"\n",
        )
        .expect("valid toml");
        let mut strings = PromptStrings::default();
        strings.merge(raw.prompts);

        assert_eq!(strings.resolve("introWasd"), Ok("Use the arrow keys."));
        assert_eq!(strings.resolve("introBoat"), Ok("Row, row."));
        assert_eq!(strings.len(), BUILTIN_PROMPTS.len() + 1);
    }
}
