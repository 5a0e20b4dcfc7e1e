//! Prompt plugin wiring the controller resource, messages, and systems.
use bevy::prelude::*;

use crate::core::config::GameSettings;

use super::{
    components::PromptBoxSettings,
    controller::PromptController,
    events::{CutscenePromptEnded, CutscenePromptRequest, PromptDisplayChanged},
    systems::{
        apply_cutscene_requests, begin_prompts_on_trigger, handle_prompt_confirm,
        spawn_prompt_box, sync_prompt_box, tick_prompt_controller,
    },
};

pub struct PromptPlugin;

impl Plugin for PromptPlugin {
    fn build(&self, app: &mut App) {
        let duration = app
            .world()
            .get_resource::<GameSettings>()
            .map(|settings| settings.prompt_duration_secs)
            .unwrap_or_else(|| GameSettings::default().prompt_duration_secs);

        app.insert_resource(PromptController::<Entity>::new(duration))
            .init_resource::<PromptBoxSettings>()
            .add_message::<PromptDisplayChanged>()
            .add_message::<CutscenePromptRequest>()
            .add_message::<CutscenePromptEnded>()
            .add_systems(Startup, (spawn_prompt_box, log_prompt_settings))
            .add_systems(
                Update,
                (
                    apply_cutscene_requests,
                    begin_prompts_on_trigger,
                    handle_prompt_confirm,
                    tick_prompt_controller,
                    sync_prompt_box,
                )
                    .chain(),
            );
    }
}

fn log_prompt_settings(controller: Res<PromptController>) {
    info!(
        "PromptPlugin initialised with display duration {:.2}s",
        controller.duration()
    );
}
