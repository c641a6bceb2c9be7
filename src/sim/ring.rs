//! Danger ring expansion and pulse phase
//!
//! Each marker trails one ring that jumps outward every expansion interval
//! and pulses through a warning/damage cycle. Expansion is a monotonic
//! ratchet while the simulation runs; history restore writes the level
//! directly and is the only way it goes back down.

use serde::{Deserialize, Serialize};

use crate::consts::{DAMAGE_DURATION, EXPANSION_INTERVAL, WARNING_DURATION};

/// Visual phase of a danger ring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RingPhase {
    /// Telegraph before the hit lands
    Warning,
    /// The hit itself
    Damage,
}

impl RingPhase {
    /// Overlay alpha (0-255)
    pub fn alpha(&self) -> u8 {
        match self {
            RingPhase::Warning => 120,
            RingPhase::Damage => 200,
        }
    }
}

/// Expansion state of one danger ring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RingState {
    /// Frozen at creation; later start-offset edits affect only new rings
    base_radius: f32,
    expansion_level: u32,
}

impl RingState {
    pub fn new(marker_radius: f32, start_offset_factor: f32) -> Self {
        Self {
            base_radius: marker_radius * start_offset_factor,
            expansion_level: 0,
        }
    }

    pub fn base_radius(&self) -> f32 {
        self.base_radius
    }

    pub fn expansion_level(&self) -> u32 {
        self.expansion_level
    }

    /// Ratchet the expansion level up to match elapsed simulation time.
    /// Never decreases, even if called with a smaller elapsed.
    pub fn advance(&mut self, elapsed: f64) {
        let expected = (elapsed / EXPANSION_INTERVAL).floor() as i64;
        if expected > self.expansion_level as i64 {
            self.expansion_level = expected as u32;
        }
    }

    /// Ring radius at the current expansion level
    pub fn current_radius(&self, marker_radius: f32, spacing_factor: f32) -> f32 {
        self.base_radius + self.expansion_level as f32 * marker_radius * spacing_factor
    }

    /// Pulse phase at a given elapsed time. Pure: depends only on elapsed
    /// and the current expansion level.
    pub fn phase_at(&self, elapsed: f64) -> RingPhase {
        let time_at_position = elapsed - self.expansion_level as f64 * EXPANSION_INTERVAL;
        // rem_euclid keeps the cycle time non-negative even when a restored
        // expansion level puts time_at_position below zero
        let cycle_time = time_at_position.rem_euclid(WARNING_DURATION + DAMAGE_DURATION);
        if cycle_time < WARNING_DURATION {
            RingPhase::Warning
        } else {
            RingPhase::Damage
        }
    }

    /// Overwrite the expansion level from a snapshot. No monotonic check;
    /// rewinding legitimately lowers it.
    pub fn restore_expansion_level(&mut self, level: u32) {
        self.expansion_level = level;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn test_ring() -> RingState {
        // default parameters: marker radius 19.5, start offset 1.5
        RingState::new(19.5, 1.5)
    }

    #[test]
    fn test_expansion_follows_elapsed() {
        let mut ring = test_ring();
        ring.advance(0.0);
        assert_eq!(ring.expansion_level(), 0);
        ring.advance(3.5);
        assert_eq!(ring.expansion_level(), 1);
        ring.advance(6.1);
        assert_eq!(ring.expansion_level(), 2);
    }

    #[test]
    fn test_expansion_never_regresses() {
        let mut ring = test_ring();
        ring.advance(6.1);
        assert_eq!(ring.expansion_level(), 2);
        ring.advance(1.0);
        assert_eq!(ring.expansion_level(), 2);
        ring.advance(-5.0);
        assert_eq!(ring.expansion_level(), 2);
        ring.advance(6.1);
        assert_eq!(ring.expansion_level(), 2);
    }

    #[test]
    fn test_current_radius_grows_per_level() {
        let mut ring = test_ring();
        assert!((ring.current_radius(19.5, 2.0) - 29.25).abs() < 0.001);
        ring.advance(3.5);
        assert!((ring.current_radius(19.5, 2.0) - 68.25).abs() < 0.001);
    }

    #[test]
    fn test_phase_cycle_at_level_zero() {
        let ring = test_ring();
        assert_eq!(ring.phase_at(1.0), RingPhase::Warning);
        assert_eq!(ring.phase_at(2.3), RingPhase::Damage);
        // wraps past the 2.5 s cycle
        assert_eq!(ring.phase_at(2.6), RingPhase::Warning);
    }

    #[test]
    fn test_phase_measured_from_last_expansion() {
        let mut ring = test_ring();
        ring.advance(3.5);
        assert_eq!(ring.phase_at(3.5), RingPhase::Warning);
        assert_eq!(ring.phase_at(5.4), RingPhase::Damage);
    }

    #[test]
    fn test_phase_with_negative_time_at_position() {
        let mut ring = test_ring();
        ring.restore_expansion_level(2);
        // elapsed 5.9 sits 0.1 s before this level's expansion; the cycle
        // wraps to 2.4 which is inside the damage window
        assert_eq!(ring.phase_at(5.9), RingPhase::Damage);
    }

    #[test]
    fn test_restore_overwrites_level() {
        let mut ring = test_ring();
        ring.advance(9.5);
        assert_eq!(ring.expansion_level(), 3);
        ring.restore_expansion_level(1);
        assert_eq!(ring.expansion_level(), 1);
        ring.restore_expansion_level(0);
        assert_eq!(ring.expansion_level(), 0);
    }

    #[test]
    fn test_alpha_per_phase() {
        assert_eq!(RingPhase::Warning.alpha(), 120);
        assert_eq!(RingPhase::Damage.alpha(), 200);
    }

    proptest! {
        #[test]
        fn prop_advance_is_monotone(elapsed_seq in proptest::collection::vec(-10.0f64..120.0, 1..100)) {
            let mut ring = test_ring();
            let mut last = ring.expansion_level();
            for elapsed in elapsed_seq {
                ring.advance(elapsed);
                prop_assert!(ring.expansion_level() >= last);
                last = ring.expansion_level();
            }
        }

        #[test]
        fn prop_phase_is_pure(elapsed in -100.0f64..100.0, level in 0u32..50) {
            let mut ring = test_ring();
            ring.restore_expansion_level(level);
            let before = ring.clone();
            let first = ring.phase_at(elapsed);
            let second = ring.phase_at(elapsed);
            prop_assert_eq!(first, second);
            prop_assert_eq!(ring, before);
        }
    }
}
