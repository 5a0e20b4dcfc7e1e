//! CorePlugin owns the scaled game clock and the shared settings resource.
use std::time::Duration;

use bevy::prelude::*;

use super::config::GameSettings;

/// Smallest accepted time scale; zero or negative values clamp to this.
const MIN_TIME_SCALE: f32 = 0.001;

#[cfg(feature = "core_debug")]
const DEBUG_LOG_INTERVAL: Duration = Duration::from_secs(1);

/// Scaled gameplay clock. Prompt and timeline timers read `delta_secs`.
#[derive(Resource, Debug)]
pub struct GameClock {
    time_scale: f32,
    real_delta: Duration,
    scaled_delta: Duration,
    elapsed: Duration,
    frames: u64,
}

impl GameClock {
    pub fn new(time_scale: f32) -> Self {
        Self {
            time_scale: time_scale.max(MIN_TIME_SCALE),
            real_delta: Duration::ZERO,
            scaled_delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frames: 0,
        }
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Unscaled delta of the most recent frame.
    #[cfg_attr(not(feature = "core_debug"), allow(dead_code))]
    pub fn real_delta(&self) -> Duration {
        self.real_delta
    }

    /// Scaled delta of the most recent frame.
    pub fn delta(&self) -> Duration {
        self.scaled_delta
    }

    pub fn delta_secs(&self) -> f32 {
        self.scaled_delta.as_secs_f32()
    }

    #[cfg_attr(not(any(test, feature = "core_debug")), allow(dead_code))]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    #[cfg_attr(not(any(test, feature = "core_debug")), allow(dead_code))]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Advances by one engine frame.
    pub fn tick(&mut self, real_delta: Duration) {
        let scaled = real_delta.mul_f32(self.time_scale);
        self.real_delta = real_delta;
        self.scaled_delta = scaled;
        self.elapsed += scaled;
        self.frames += 1;
    }
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// Registers the game clock and the shared settings resource.
#[derive(Debug, Clone, Copy, Default)]
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        let settings = GameSettings::load_or_default();
        let clock = GameClock::new(settings.time_scale);

        app.insert_resource(clock)
            .insert_resource(settings)
            .add_systems(Startup, log_startup_settings)
            .add_systems(PreUpdate, update_game_clock);

        #[cfg(feature = "core_debug")]
        app.add_systems(Update, log_clock_ticks);
    }
}

fn update_game_clock(mut clock: ResMut<GameClock>, time: Res<Time>) {
    clock.tick(time.delta());
}

fn log_startup_settings(clock: Res<GameClock>, settings: Res<GameSettings>) {
    info!(
        "CorePlugin initialised: time scale {:.3}, prompt duration {:.2}s, start level {}",
        clock.time_scale(),
        settings.prompt_duration_secs,
        settings.start_level
    );
}

#[cfg(feature = "core_debug")]
fn log_clock_ticks(mut since_log: Local<Duration>, clock: Res<GameClock>) {
    *since_log += clock.real_delta();
    if *since_log < DEBUG_LOG_INTERVAL {
        return;
    }
    *since_log = Duration::ZERO;
    info!(
        target: "core_debug",
        "Game time {:.2}s after {} frames (real dt {:.4}s, scaled dt {:.4}s)",
        clock.elapsed().as_secs_f32(),
        clock.frames(),
        clock.real_delta().as_secs_f32(),
        clock.delta_secs(),
    );
}
