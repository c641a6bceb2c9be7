//! Orbiting star markers
//!
//! A marker's orbit is fixed at placement: the click position relative to
//! the arena center gives an angle and a distance that never change. Only
//! the current angle (and the position derived from it) moves while the
//! simulation runs.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{ARENA_CENTER, TICK_RATE};
use crate::sim::history::MarkerSnapshot;
use crate::sim::params::SimParams;
use crate::sim::ring::RingState;
use crate::{cartesian_to_polar, polar_to_cartesian};

/// Orbit direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Spin {
    Clockwise,
    CounterClockwise,
}

impl Spin {
    /// Angle delta sign; screen y grows downward so clockwise is positive
    pub fn sign(&self) -> f32 {
        match self {
            Spin::Clockwise => 1.0,
            Spin::CounterClockwise => -1.0,
        }
    }
}

/// One orbiting marker and its danger ring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    /// Angle at placement, radians from arena center
    pub placement_angle: f32,
    /// Orbit radius, immutable after placement
    pub distance: f32,
    pub spin: Spin,
    /// Current angle, radians; grows without normalization
    pub angle: f32,
    pub position: Vec2,
    pub ring: RingState,
}

impl Marker {
    /// Derive the orbit from a placement position and cast the ring's base
    /// radius from the current parameters.
    pub fn place_at(pos: Vec2, spin: Spin, params: &SimParams) -> Self {
        let (distance, angle) = cartesian_to_polar(pos - ARENA_CENTER);
        Self {
            placement_angle: angle,
            distance,
            spin,
            angle,
            position: pos,
            ring: RingState::new(params.marker_radius(), params.ring_start_offset_factor),
        }
    }

    /// One tick of orbit rotation plus ring expansion. Only called while
    /// running and not rewinding.
    pub fn advance(&mut self, now: f64, anchor: f64, params: &SimParams) {
        self.angle += self.spin.sign() * params.rotation_speed / TICK_RATE;
        self.position = ARENA_CENTER + polar_to_cartesian(self.distance, self.angle);
        self.ring.advance(now - anchor);
    }

    pub fn capture(&self) -> MarkerSnapshot {
        MarkerSnapshot {
            position: self.position,
            angle: self.angle,
            expansion_level: self.ring.expansion_level(),
        }
    }

    /// Overwrite the transient state from a snapshot
    pub fn apply(&mut self, snap: &MarkerSnapshot) {
        self.position = snap.position;
        self.angle = snap.angle;
        self.ring.restore_expansion_level(snap.expansion_level);
    }
}
