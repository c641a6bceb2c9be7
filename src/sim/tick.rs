//! Per-tick driver
//!
//! The frontend gathers one-shot commands into a `TickInput` and calls
//! `tick` once per frame with the current wall-clock time. Commands apply
//! first, then a running board records a snapshot and advances. Snapshot
//! before advance, so history entry zero holds the board exactly as
//! started.

use glam::Vec2;

use crate::sim::params::ParamKey;
use crate::sim::state::TrainerState;

/// One-shot commands for a single tick, all off by default
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Place a marker at this screen position during setup
    pub place_marker: Option<Vec2>,
    /// Fill the remaining setup slots from this seed
    pub scatter: Option<u64>,
    /// Begin the run, valid only with a full board
    pub start: bool,
    pub toggle_pause: bool,
    pub reset: bool,
    /// Nudge one parameter up or down by its step
    pub adjust_param: Option<(ParamKey, i8)>,
    pub toggle_rewind: bool,
    /// -1 back, +1 forward through history while rewinding
    pub scrub: i8,
    /// -1/+1 on the scrub step size
    pub adjust_step: i8,
}

/// Advance the trainer by one tick at wall-clock time `now`
pub fn tick(state: &mut TrainerState, input: &TickInput, now: f64) {
    if input.reset {
        state.reset();
    }
    if let Some(pos) = input.place_marker {
        state.try_place_marker(pos);
    }
    if let Some(seed) = input.scatter {
        state.scatter_markers(seed);
    }
    if let Some((key, direction)) = input.adjust_param {
        state.params.adjust(key, direction);
    }
    if input.adjust_step != 0 {
        state.adjust_rewind_step(input.adjust_step);
    }
    if input.toggle_rewind {
        state.toggle_rewind();
    }
    if input.scrub != 0 {
        state.scrub(input.scrub);
    }
    if input.toggle_pause {
        state.toggle_pause(now);
    }
    if input.start {
        state.try_start(now);
    }

    if state.phase.is_running() {
        let snapshot = state.capture_snapshot(now);
        state.history.append(snapshot);
        state.advance_markers(now);
    }
}
