//! Trainer state and phase machine
//!
//! The phase enum nests the rewind sub-mode inside Paused, so rewinding
//! while in setup or while running cannot be expressed. Elapsed simulation
//! time is always `now - anchor`; pausing does not move the anchor, so the
//! expansion clock keeps counting across a pause and rings catch up on
//! resume. Resuming out of rewind is the only transition that rewrites the
//! anchor.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::{
    ARENA_CENTER, ARENA_RADIUS, CLOCKWISE_COUNT, DEFAULT_REWIND_STEP, MARKER_COUNT,
    REWIND_STEP_DELTA, REWIND_STEP_MAX, REWIND_STEP_MIN,
};
use crate::polar_to_cartesian;
use crate::sim::history::{HistoryBuffer, Snapshot};
use crate::sim::marker::{Marker, Spin};
use crate::sim::params::SimParams;

/// Position in the history buffer while rewinding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewindCursor {
    pub index: usize,
}

/// Top-level phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Placing markers, simulation clock not anchored yet
    Setup,
    /// Markers advance and snapshots record every tick
    Running,
    /// Frozen; with a cursor set, scrubbing through history
    Paused { rewind: Option<RewindCursor> },
}

impl Phase {
    pub fn is_running(&self) -> bool {
        matches!(self, Phase::Running)
    }

    pub fn is_rewinding(&self) -> bool {
        matches!(self, Phase::Paused { rewind: Some(_) })
    }

    pub fn label(&self) -> &'static str {
        match self {
            Phase::Setup => "SETUP",
            Phase::Running => "RUNNING",
            Phase::Paused { rewind: Some(_) } => "REWIND",
            Phase::Paused { rewind: None } => "PAUSED",
        }
    }
}

/// Rewind status for the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewindView {
    pub cursor: usize,
    pub history_len: usize,
    pub step: usize,
}

/// Complete trainer state
#[derive(Debug, Clone, PartialEq)]
pub struct TrainerState {
    pub phase: Phase,
    pub params: SimParams,
    /// Creation order: first CLOCKWISE_COUNT spin clockwise, rest counter
    pub markers: Vec<Marker>,
    pub history: HistoryBuffer,
    /// Wall-clock origin of elapsed simulation time
    pub anchor: f64,
    /// Frames moved per scrub command
    pub rewind_step: usize,
}

impl Default for TrainerState {
    fn default() -> Self {
        Self::new()
    }
}

impl TrainerState {
    pub fn new() -> Self {
        Self::with_params(SimParams::default())
    }

    /// Start from previously saved tuning. Out-of-range values are
    /// clamped so the placement gate stays satisfiable.
    pub fn with_params(mut params: SimParams) -> Self {
        params.sanitize();
        Self {
            phase: Phase::Setup,
            params,
            markers: Vec::with_capacity(MARKER_COUNT),
            history: HistoryBuffer::default(),
            anchor: 0.0,
            rewind_step: DEFAULT_REWIND_STEP,
        }
    }

    /// Place a marker during setup. Rejected outside setup, past the
    /// marker quota, or when the disc would poke out of the arena.
    pub fn try_place_marker(&mut self, pos: Vec2) -> bool {
        if self.phase != Phase::Setup {
            log::debug!("placement ignored outside setup");
            return false;
        }
        if self.markers.len() >= MARKER_COUNT {
            log::debug!("placement ignored, all {MARKER_COUNT} markers placed");
            return false;
        }
        let dist = (pos - ARENA_CENTER).length();
        if dist >= ARENA_RADIUS - self.params.marker_radius() {
            log::debug!("placement rejected at distance {dist:.1}");
            return false;
        }
        let spin = if self.markers.len() < CLOCKWISE_COUNT {
            Spin::Clockwise
        } else {
            Spin::CounterClockwise
        };
        self.markers.push(Marker::place_at(pos, spin, &self.params));
        log::info!(
            "marker {}/{MARKER_COUNT} placed at ({:.0}, {:.0}), {spin:?}",
            self.markers.len(),
            pos.x,
            pos.y
        );
        true
    }

    /// Fill the remaining setup slots with seeded random placements
    pub fn scatter_markers(&mut self, seed: u64) {
        if self.phase != Phase::Setup {
            log::debug!("scatter ignored outside setup");
            return;
        }
        let mut rng = Pcg32::seed_from_u64(seed);
        let limit = ARENA_RADIUS - self.params.marker_radius();
        // rejection sampling; a sample can round just past the limit
        for _ in 0..256 {
            if self.markers.len() >= MARKER_COUNT {
                break;
            }
            let theta = rng.random_range(0.0..TAU);
            let dist = rng.random_range(0.0..limit);
            self.try_place_marker(ARENA_CENTER + polar_to_cartesian(dist, theta));
        }
    }

    /// Setup -> Running, only with a full board; anchors the clock at now
    pub fn try_start(&mut self, now: f64) -> bool {
        if self.phase != Phase::Setup || self.markers.len() != MARKER_COUNT {
            log::debug!(
                "start rejected: phase {:?}, {} markers",
                self.phase,
                self.markers.len()
            );
            return false;
        }
        self.anchor = now;
        self.phase = Phase::Running;
        log::info!("simulation started, anchor {now:.3}");
        true
    }

    /// Pause/resume. Resuming from plain pause leaves the anchor alone;
    /// resuming out of rewind reanchors so elapsed continues from the
    /// scrubbed point.
    pub fn toggle_pause(&mut self, now: f64) {
        match self.phase {
            Phase::Running => {
                self.phase = Phase::Paused { rewind: None };
                log::info!("paused");
            }
            Phase::Paused { rewind: None } => {
                self.phase = Phase::Running;
                log::info!("resumed");
            }
            Phase::Paused {
                rewind: Some(cursor),
            } => {
                if let Some(snap) = self.history.at(cursor.index) {
                    self.anchor = now - snap.elapsed;
                    log::info!(
                        "resumed from rewind frame {} (elapsed {:.3})",
                        cursor.index,
                        snap.elapsed
                    );
                }
                self.phase = Phase::Running;
            }
            Phase::Setup => {
                log::debug!("pause ignored during setup");
            }
        }
    }

    /// Enter or leave the rewind sub-mode. Entering requires recorded
    /// history and lands on the newest snapshot; leaving stays paused at
    /// whatever was last restored.
    pub fn toggle_rewind(&mut self) {
        match self.phase {
            Phase::Running | Phase::Paused { rewind: None } => {
                let Some(last) = self.history.last_index() else {
                    log::debug!("rewind ignored, history empty");
                    return;
                };
                self.apply_snapshot_at(last);
                self.phase = Phase::Paused {
                    rewind: Some(RewindCursor { index: last }),
                };
                log::info!("rewind entered at frame {last}");
            }
            Phase::Paused { rewind: Some(_) } => {
                self.phase = Phase::Paused { rewind: None };
                log::info!("rewind exited, still paused");
            }
            Phase::Setup => {
                log::debug!("rewind ignored during setup");
            }
        }
    }

    /// Move the rewind cursor by the step size and restore that snapshot
    pub fn scrub(&mut self, direction: i8) {
        let Phase::Paused {
            rewind: Some(cursor),
        } = self.phase
        else {
            log::debug!("scrub ignored outside rewind");
            return;
        };
        let Some(last) = self.history.last_index() else {
            return;
        };
        let index = match direction.signum() {
            1 => (cursor.index + self.rewind_step).min(last),
            -1 => cursor.index.saturating_sub(self.rewind_step),
            _ => return,
        };
        self.apply_snapshot_at(index);
        self.phase = Phase::Paused {
            rewind: Some(RewindCursor { index }),
        };
    }

    /// Adjust the scrub step size, clamped to [REWIND_STEP_MIN, REWIND_STEP_MAX]
    pub fn adjust_rewind_step(&mut self, direction: i8) {
        self.rewind_step = match direction.signum() {
            1 => (self.rewind_step + REWIND_STEP_DELTA).min(REWIND_STEP_MAX),
            -1 => self
                .rewind_step
                .saturating_sub(REWIND_STEP_DELTA)
                .max(REWIND_STEP_MIN),
            _ => self.rewind_step,
        };
    }

    /// Back to an empty board. Keeps tuned parameters, restores the
    /// default rewind step.
    pub fn reset(&mut self) {
        self.markers.clear();
        self.history.clear();
        self.anchor = 0.0;
        self.rewind_step = DEFAULT_REWIND_STEP;
        self.phase = Phase::Setup;
        log::info!("reset to setup");
    }

    /// Capture all markers plus the elapsed time at now
    pub fn capture_snapshot(&self, now: f64) -> Snapshot {
        Snapshot {
            elapsed: now - self.anchor,
            markers: self.markers.iter().map(Marker::capture).collect(),
        }
    }

    /// One advancing tick for every marker
    pub fn advance_markers(&mut self, now: f64) {
        let anchor = self.anchor;
        for marker in &mut self.markers {
            marker.advance(now, anchor, &self.params);
        }
    }

    fn apply_snapshot_at(&mut self, index: usize) {
        let Some(snap) = self.history.at(index) else {
            log::debug!("history index {index} out of range");
            return;
        };
        if snap.markers.len() != self.markers.len() {
            log::warn!(
                "snapshot holds {} markers, board has {}",
                snap.markers.len(),
                self.markers.len()
            );
        }
        for (marker, captured) in self.markers.iter_mut().zip(snap.markers.iter()) {
            marker.apply(captured);
        }
    }

    /// Elapsed time driving ring visuals: frozen at the cursor's snapshot
    /// while rewinding, live otherwise
    pub fn display_elapsed(&self, now: f64) -> f64 {
        match self.phase {
            Phase::Paused {
                rewind: Some(cursor),
            } => self
                .history
                .at(cursor.index)
                .map(|snap| snap.elapsed)
                .unwrap_or(0.0),
            _ => now - self.anchor,
        }
    }

    /// Rewind HUD data, present only while rewinding
    pub fn rewind_view(&self) -> Option<RewindView> {
        match self.phase {
            Phase::Paused {
                rewind: Some(cursor),
            } => Some(RewindView {
                cursor: cursor.index,
                history_len: self.history.len(),
                step: self.rewind_step,
            }),
            _ => None,
        }
    }
}
