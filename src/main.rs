use std::path::Path;

use bevy::prelude::*;

mod content;
mod core;
mod input;
mod player;
mod prompt;
mod ui;
mod world;

use crate::{
    content::ContentPlugin, core::CorePlugin, input::InputPlugin, player::PlayerPlugin,
    prompt::PromptPlugin, ui::UiPlugin, world::WorldPlugin,
};

fn main() {
    load_local_env();

    App::new()
        .add_plugins((
            DefaultPlugins.set(ImagePlugin::default_nearest()),
            CorePlugin,
            InputPlugin,
            ContentPlugin, // Before World/Prompt: level loading resolves prompt keys
            PromptPlugin,
            WorldPlugin,
            PlayerPlugin,
            UiPlugin,
        ))
        .run();
}

/// Optional overrides such as `ANEROE_CONFIG_DIR` or `RUST_LOG`.
fn load_local_env() {
    const ENV_FILE: &str = "aneroe.env";

    let path = Path::new(ENV_FILE);
    if !path.exists() {
        return;
    }

    if let Err(err) = dotenvy::from_filename(path) {
        eprintln!("Failed to load {}: {}", ENV_FILE, err);
    }
}
