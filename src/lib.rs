//! Ring Drill - a boss-mechanic trainer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (markers, rings, history, phase machine)
//! - `scene`: Draw-list construction for the frontend
//! - `config`: Tuning persistence

pub mod config;
pub mod scene;
pub mod sim;

pub use config::TrainerConfig;
pub use sim::{Phase, SimParams, TickInput, TrainerState};

use glam::Vec2;

/// Trainer configuration constants
pub mod consts {
    use glam::Vec2;

    /// Target frame cadence; rotation advances by speed / TICK_RATE per tick
    pub const TICK_RATE: f32 = 60.0;

    /// Window dimensions
    pub const WINDOW_WIDTH: i32 = 1194;
    pub const WINDOW_HEIGHT: i32 = 671;

    /// Arena sits left of window center to leave room for the control panel
    pub const ARENA_CENTER: Vec2 = Vec2::new(400.0, 335.0);
    pub const ARENA_RADIUS: f32 = 300.0;

    /// Marker placement quota: first 3 clockwise, rest counter-clockwise
    pub const MARKER_COUNT: usize = 6;
    pub const CLOCKWISE_COUNT: usize = 3;

    /// Ring timing (seconds)
    pub const EXPANSION_INTERVAL: f64 = 3.0;
    pub const WARNING_DURATION: f64 = 2.0;
    pub const DAMAGE_DURATION: f64 = 0.5;

    /// Rewind buffer: 10 seconds at 60 Hz
    pub const HISTORY_CAPACITY: usize = 600;
    pub const DEFAULT_REWIND_STEP: usize = 10;
    pub const REWIND_STEP_MIN: usize = 1;
    pub const REWIND_STEP_MAX: usize = 60;
    pub const REWIND_STEP_DELTA: usize = 5;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: Vec2) -> (f32, f32) {
    (pos.length(), pos.y.atan2(pos.x))
}
