// src/ui/status.rs
//
// Mirrors player and scene state into the HUD: health icons, the timeline
// labels, the loading fader, and whole-UI visibility.

use bevy::prelude::*;

use crate::{
    core::plugin::GameClock,
    player::events::{PlayerHealthChanged, PlayerSwitched, TimelineSwapped},
    world::events::{AreaMerged, LoadingScreenToggled},
};

use super::widgets::UiWidgets;

/// Icon `i` is shown iff `i < health`.
pub fn status_icon_states(count: usize, health: u32) -> Vec<bool> {
    (0..count)
        .map(|index| (index as u64) < u64::from(health))
        .collect()
}

/// "past" or "present" by lowercase substring of the character name.
/// `None` leaves the label unchanged.
pub fn timeline_label(character_name: &str) -> Option<&'static str> {
    let name = character_name.to_lowercase();
    if name.contains("past") {
        Some("past")
    } else if name.contains("present") {
        Some("present")
    } else {
        None
    }
}

/// Bumps the last digit of the timer text, wrapping 9 to 0.
pub fn advance_timer_text(text: &str) -> Option<String> {
    let last = text.chars().last()?;
    let digit = last.to_digit(10)?;
    let next = char::from_digit((digit + 1) % 10, 10)?;
    let mut advanced = text[..text.len() - last.len_utf8()].to_string();
    advanced.push(next);
    Some(advanced)
}

/// Drives the timeline timer label.
#[derive(Resource, Debug)]
pub struct TimelineTicker(pub Timer);

impl TimelineTicker {
    pub fn new(tick_secs: f32) -> Self {
        Self(Timer::from_seconds(tick_secs, TimerMode::Repeating))
    }
}

pub fn mirror_health(
    mut health: MessageReader<PlayerHealthChanged>,
    mut switched: MessageReader<PlayerSwitched>,
    widgets: Option<Res<UiWidgets>>,
    children: Query<&Children>,
    mut visibility: Query<&mut Visibility>,
) {
    // A switch lands after a stat change from the same frame.
    let latest = health
        .read()
        .map(|changed| changed.new_health)
        .chain(switched.read().map(|switch| switch.health))
        .last();
    let (Some(health), Some(widgets)) = (latest, widgets) else {
        return;
    };
    let Ok(icons) = children.get(widgets.player_status) else {
        return;
    };
    let icons: &[Entity] = icons;

    let states = status_icon_states(icons.len(), health);
    for (icon, shown) in icons.iter().zip(states) {
        if let Ok(mut icon) = visibility.get_mut(*icon) {
            *icon = if shown {
                Visibility::Inherited
            } else {
                Visibility::Hidden
            };
        }
    }
}

pub fn mirror_timeline(
    mut swaps: MessageReader<TimelineSwapped>,
    widgets: Option<Res<UiWidgets>>,
    mut texts: Query<&mut Text>,
) {
    let Some(swap) = swaps.read().last() else {
        return;
    };
    let Some(widgets) = widgets else {
        return;
    };
    let Some(label) = timeline_label(&swap.active_character_name) else {
        debug!(
            "No timeline label for character {}",
            swap.active_character_name
        );
        return;
    };
    if let Ok(mut age) = texts.get_mut(widgets.timeline_age) {
        age.0 = label.to_string();
    }
}

pub fn tick_timeline_timer(
    clock: Res<GameClock>,
    mut ticker: ResMut<TimelineTicker>,
    widgets: Option<Res<UiWidgets>>,
    mut texts: Query<&mut Text>,
) {
    ticker.0.tick(clock.delta());
    let ticks = ticker.0.times_finished_this_tick();
    if ticks == 0 {
        return;
    }
    let Some(widgets) = widgets else {
        return;
    };
    let Ok(mut timer) = texts.get_mut(widgets.timeline_time) else {
        return;
    };

    for _ in 0..ticks {
        match advance_timer_text(&timer.0) {
            Some(next) => timer.0 = next,
            None => {
                warn!("Timeline timer text {:?} does not end in a digit", timer.0);
                return;
            }
        }
    }
}

pub fn toggle_loading_screen(
    mut toggles: MessageReader<LoadingScreenToggled>,
    widgets: Option<Res<UiWidgets>>,
    mut faders: Query<(&mut BackgroundColor, &mut Visibility)>,
) {
    let Some(LoadingScreenToggled(active)) = toggles.read().last().copied() else {
        return;
    };
    let Some(widgets) = widgets else {
        return;
    };
    if let Ok((mut color, mut visibility)) = faders.get_mut(widgets.cam_fader) {
        color.0 = color.0.with_alpha(if active { 1.0 } else { 0.0 });
        *visibility = if active {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }
}

/// A merged area means gameplay is running; show the HUD.
pub fn show_ui_on_area_merged(
    mut merged: MessageReader<AreaMerged>,
    widgets: Option<Res<UiWidgets>>,
    mut visibility: Query<&mut Visibility>,
) {
    let Some(area) = merged.read().last() else {
        return;
    };
    let Some(widgets) = widgets else {
        return;
    };
    info!("Area {} merged, showing UI", area.level);
    if let Ok(mut root) = visibility.get_mut(widgets.root) {
        *root = Visibility::Inherited;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn health_three_of_five_icons() {
        assert_eq!(
            status_icon_states(5, 3),
            vec![true, true, true, false, false]
        );
        assert_eq!(status_icon_states(3, 10), vec![true, true, true]);
        assert!(status_icon_states(4, 0).iter().all(|shown| !shown));
    }

    #[test]
    fn timeline_label_matches_substrings() {
        assert_eq!(timeline_label("Past Aneroe"), Some("past"));
        assert_eq!(timeline_label("PRESENT Aneroe"), Some("present"));
        assert_eq!(timeline_label("Aneroe"), None);
    }

    #[test]
    fn timer_text_wraps_last_digit() {
        assert_eq!(advance_timer_text("Year 1000").as_deref(), Some("Year 1001"));
        assert_eq!(advance_timer_text("Year 1009").as_deref(), Some("Year 1000"));
        assert_eq!(advance_timer_text("Year"), None);
        assert_eq!(advance_timer_text(""), None);
    }

    fn widgets_with(status: Entity, age: Entity, other: Entity) -> UiWidgets {
        UiWidgets {
            canvas: other,
            root: other,
            inventory: other,
            hotbar: other,
            extras: other,
            main_menu: other,
            crafting: other,
            player_status: status,
            cam_fader: other,
            timeline_age: age,
            timeline_time: age,
            tooltip: other,
        }
    }

    #[test]
    fn health_and_switch_messages_update_icons() {
        let mut app = App::new();
        app.add_message::<PlayerHealthChanged>()
            .add_message::<PlayerSwitched>()
            .add_systems(Update, mirror_health);

        let world = app.world_mut();
        let status = world.spawn_empty().id();
        let icons: Vec<Entity> = (0..5)
            .map(|_| world.spawn((Visibility::Inherited, ChildOf(status))).id())
            .collect();
        let other = world.spawn_empty().id();
        world.insert_resource(widgets_with(status, other, other));

        world.write_message(PlayerHealthChanged { new_health: 3 });
        app.update();

        let shown: Vec<bool> = icons
            .iter()
            .map(|icon| app.world().get::<Visibility>(*icon) == Some(&Visibility::Inherited))
            .collect();
        assert_eq!(shown, vec![true, true, true, false, false]);

        let character = app.world_mut().spawn_empty().id();
        app.world_mut().write_message(PlayerSwitched {
            character,
            health: 5,
        });
        app.update();

        assert!(icons
            .iter()
            .all(|icon| app.world().get::<Visibility>(*icon) == Some(&Visibility::Inherited)));
    }

    #[test]
    fn timeline_swap_sets_age_label() {
        let mut app = App::new();
        app.add_message::<TimelineSwapped>()
            .add_systems(Update, mirror_timeline);

        let world = app.world_mut();
        let age = world.spawn(Text::new("past")).id();
        let other = world.spawn_empty().id();
        world.insert_resource(widgets_with(other, age, other));

        world.write_message(TimelineSwapped {
            active_character_name: "Present Aneroe".into(),
        });
        app.update();
        assert_eq!(
            app.world().get::<Text>(age).map(|text| text.0.as_str()),
            Some("present")
        );

        app.world_mut().write_message(TimelineSwapped {
            active_character_name: "Stranger".into(),
        });
        app.update();
        assert_eq!(
            app.world().get::<Text>(age).map(|text| text.0.as_str()),
            Some("present")
        );
    }

    #[test]
    fn ticker_advances_the_timer_label() {
        let mut app = App::new();
        let mut clock = GameClock::default();
        clock.tick(Duration::from_millis(2500));
        app.insert_resource(clock)
            .insert_resource(TimelineTicker::new(1.0))
            .add_systems(Update, tick_timeline_timer);

        let world = app.world_mut();
        let time = world.spawn(Text::new("Year 1008")).id();
        let other = world.spawn_empty().id();
        world.insert_resource(widgets_with(other, time, other));

        app.update();
        assert_eq!(
            app.world().get::<Text>(time).map(|text| text.0.as_str()),
            Some("Year 1000")
        );
    }
}
