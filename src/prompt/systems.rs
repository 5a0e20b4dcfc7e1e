//! Systems wiring prompt sources, the controller, and the prompt box.
use bevy::prelude::*;

use crate::{
    core::plugin::GameClock,
    input::actions::{InputAction, InputActions, InputMode, LastInputs},
    player::components::ActiveCharacter,
    world::triggers::TriggerEntered,
};

use super::{
    components::{PromptBox, PromptBoxImage, PromptBoxSettings, PromptBoxText},
    controller::{ConfirmOutcome, DisplayChange, PromptController, PromptSources},
    events::{CutscenePromptEnded, CutscenePromptRequest, PromptDisplayChanged},
    source::{PromptSignal, PromptSource},
};

const PROMPT_IMAGE_DIR: &str = "sprites/text_prompts";
const BACKGROUND_COLOR: Color = Color::srgba(0.05, 0.05, 0.08, 0.9);
const BORDER_COLOR: Color = Color::srgb(0.45, 0.4, 0.3);
const TEXT_COLOR: Color = Color::WHITE;

/// Prompt sources as seen through an ECS query. Despawned sources count as
/// finished.
struct QuerySources<'a, 'w, 's, 'q> {
    query: &'a mut Query<'w, 's, &'q mut PromptSource>,
    inputs: &'a InputActions,
}

impl PromptSources<Entity> for QuerySources<'_, '_, '_, '_> {
    fn continue_prompt(&mut self, source: Entity) -> PromptSignal {
        self.query
            .get_mut(source)
            .map(|mut prompt| prompt.continue_prompt())
            .unwrap_or(PromptSignal::Finished)
    }

    fn suppresses_timer(&self, source: Entity) -> bool {
        self.query
            .get(source)
            .map(|prompt| prompt.suppresses_timer())
            .unwrap_or(false)
    }

    fn check_to_continue(&self, source: Entity) -> bool {
        self.query
            .get(source)
            .map(|prompt| prompt.check_to_continue(self.inputs))
            .unwrap_or(false)
    }

    fn contains(&self, source: Entity) -> bool {
        self.query.contains(source)
    }
}

fn publish(changes: Vec<DisplayChange<Entity>>, writer: &mut MessageWriter<PromptDisplayChanged>) {
    for change in changes {
        match change {
            DisplayChange::Shown { source, message } => {
                debug!(target: "prompt", "Prompt from {:?}: \"{}\"", source, message.text);
                writer.write(PromptDisplayChanged::Shown(message));
            }
            DisplayChange::Cleared => {
                writer.write(PromptDisplayChanged::Cleared);
            }
        }
    }
}

/// Starts a prompt source when the active character walks into its trigger.
pub fn begin_prompts_on_trigger(
    mut entered: MessageReader<TriggerEntered>,
    active: Query<(), With<ActiveCharacter>>,
    mut sources: Query<&mut PromptSource>,
    mut controller: ResMut<PromptController>,
    mut display: MessageWriter<PromptDisplayChanged>,
) {
    for event in entered.read() {
        if active.get(event.entity).is_err() {
            continue;
        }
        let Ok(mut source) = sources.get_mut(event.trigger) else {
            continue;
        };
        let Some(signal) = source.begin() else {
            continue;
        };
        info!(
            target: "prompt",
            "Prompt trigger {:?} started ({} lines)",
            event.trigger,
            source.len()
        );
        let changes = controller.request_advance(event.trigger, signal);
        publish(changes, &mut display);
    }
}

/// Routes confirm presses to the cutscene channel or the active prompt.
pub fn handle_prompt_confirm(
    mut inputs: MessageReader<InputActions>,
    mut sources: Query<&mut PromptSource>,
    mut controller: ResMut<PromptController>,
    mut display: MessageWriter<PromptDisplayChanged>,
    mut ended: MessageWriter<CutscenePromptEnded>,
    mut mode: ResMut<InputMode>,
) {
    for input in inputs.read() {
        if !input.was_pressed(InputAction::Confirm) {
            continue;
        }
        let mut access = QuerySources {
            query: &mut sources,
            inputs: input,
        };
        match controller.on_confirm(&mut access) {
            ConfirmOutcome::CutsceneEnded => {
                *mode = InputMode::Free;
                ended.write(CutscenePromptEnded);
            }
            ConfirmOutcome::Changes(changes) => publish(changes, &mut display),
        }
    }
}

/// Advances the active prompt's display timer.
pub fn tick_prompt_controller(
    clock: Res<GameClock>,
    last_inputs: Res<LastInputs>,
    mut sources: Query<&mut PromptSource>,
    mut controller: ResMut<PromptController>,
    mut display: MessageWriter<PromptDisplayChanged>,
) {
    if controller.active_source().is_none() {
        return;
    }
    let mut access = QuerySources {
        query: &mut sources,
        inputs: &last_inputs.0,
    };
    let changes = controller.tick(clock.delta_secs(), &mut access);
    publish(changes, &mut display);
}

pub fn apply_cutscene_requests(
    mut requests: MessageReader<CutscenePromptRequest>,
    mut controller: ResMut<PromptController>,
    mut mode: ResMut<InputMode>,
) {
    for request in requests.read() {
        controller.show_cutscene(request.0.clone());
        *mode = if request.0.is_some() {
            InputMode::Cutscene
        } else {
            InputMode::Free
        };
    }
}

/// Spawns the (hidden) prompt box at the bottom of the screen.
pub fn spawn_prompt_box(mut commands: Commands, settings: Res<PromptBoxSettings>) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(settings.bottom_offset),
                left: Val::Percent(50.0),
                margin: UiRect::left(Val::Px(-settings.width / 2.0)),
                width: Val::Px(settings.width),
                padding: UiRect::all(Val::Px(settings.padding)),
                border: UiRect::all(Val::Px(2.0)),
                column_gap: Val::Px(settings.padding),
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(BACKGROUND_COLOR),
            BorderColor::from(BORDER_COLOR),
            GlobalZIndex(50),
            Visibility::Hidden,
            PromptBox,
            Name::new("PromptBox"),
        ))
        .with_children(|parent| {
            parent.spawn((
                Node {
                    width: Val::Px(settings.image_size),
                    height: Val::Px(settings.image_size),
                    ..default()
                },
                ImageNode::default(),
                Visibility::Hidden,
                PromptBoxImage,
            ));
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: settings.font_size,
                    ..default()
                },
                TextColor(TEXT_COLOR),
                PromptBoxText,
            ));
        });
}

/// Mirrors the controller into the prompt box. A cutscene line takes
/// precedence over the standard prompt.
#[allow(clippy::type_complexity)]
pub fn sync_prompt_box(
    controller: Res<PromptController>,
    asset_server: Res<AssetServer>,
    mut boxes: Query<&mut Visibility, (With<PromptBox>, Without<PromptBoxImage>)>,
    mut texts: Query<&mut Text, With<PromptBoxText>>,
    mut images: Query<(&mut ImageNode, &mut Visibility), (With<PromptBoxImage>, Without<PromptBox>)>,
) {
    if !controller.is_changed() {
        return;
    }

    let message = controller
        .cutscene_message()
        .or_else(|| controller.active_message());

    for mut visibility in boxes.iter_mut() {
        *visibility = if message.is_some() {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }

    let Some(message) = message else {
        return;
    };

    for mut text in texts.iter_mut() {
        text.0 = message.text.clone();
    }

    for (mut image, mut visibility) in images.iter_mut() {
        match &message.image {
            Some(name) => {
                image.image = asset_server.load(format!("{}/{}.png", PROMPT_IMAGE_DIR, name));
                *visibility = Visibility::Inherited;
            }
            None => *visibility = Visibility::Hidden,
        }
    }
}
