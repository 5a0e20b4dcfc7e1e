//! Static content tables loaded once at startup.
use bevy::prelude::*;

pub mod prompt_strings;

use prompt_strings::PromptStrings;

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        let strings = PromptStrings::load_or_default();
        info!("ContentPlugin loaded {} prompt strings", strings.len());
        app.insert_resource(strings);
    }
}
