//! Live-tunable simulation parameters
//!
//! One instance owned by the trainer state; markers and rings never hold a
//! copy, so an edit is visible everywhere on the next tick. All values are
//! factors of the arena radius (marker size) or of the marker radius (the
//! rest), except rotation speed which is radians per second.

use serde::{Deserialize, Serialize};

use crate::consts::ARENA_RADIUS;

/// Identifies one tunable parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKey {
    MarkerSize,
    RingWidth,
    RotationSpeed,
    RingStartOffset,
    RingSpacing,
}

impl ParamKey {
    /// Panel order, top to bottom
    pub const ALL: [ParamKey; 5] = [
        ParamKey::MarkerSize,
        ParamKey::RingWidth,
        ParamKey::RotationSpeed,
        ParamKey::RingStartOffset,
        ParamKey::RingSpacing,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ParamKey::MarkerSize => "Star Size",
            ParamKey::RingWidth => "Ring Width",
            ParamKey::RotationSpeed => "Rotation Speed",
            ParamKey::RingStartOffset => "Ring Start Offset",
            ParamKey::RingSpacing => "Ring Spacing",
        }
    }

    /// Inclusive [min, max] bounds
    pub fn range(&self) -> (f32, f32) {
        match self {
            ParamKey::MarkerSize => (0.01, 0.2),
            ParamKey::RingWidth => (0.5, 3.0),
            ParamKey::RotationSpeed => (0.01, 0.2),
            ParamKey::RingStartOffset => (0.5, 3.0),
            ParamKey::RingSpacing => (1.0, 5.0),
        }
    }

    /// Adjustment granularity per command
    pub fn step(&self) -> f32 {
        match self {
            ParamKey::MarkerSize => 0.005,
            ParamKey::RingWidth => 0.1,
            ParamKey::RotationSpeed => 0.01,
            ParamKey::RingStartOffset => 0.1,
            ParamKey::RingSpacing => 0.2,
        }
    }
}

/// Tunable simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimParams {
    /// Marker radius as a factor of the arena radius
    pub marker_size_factor: f32,
    /// Ring stroke width as a factor of the marker radius
    pub ring_width_factor: f32,
    /// Orbit speed in radians per second
    pub rotation_speed: f32,
    /// First ring radius as a factor of the marker radius
    pub ring_start_offset_factor: f32,
    /// Radius gained per expansion as a factor of the marker radius
    pub ring_spacing_factor: f32,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            marker_size_factor: 0.065,
            ring_width_factor: 1.2,
            rotation_speed: 0.05,
            ring_start_offset_factor: 1.5,
            ring_spacing_factor: 2.0,
        }
    }
}

impl SimParams {
    pub fn get(&self, key: ParamKey) -> f32 {
        match key {
            ParamKey::MarkerSize => self.marker_size_factor,
            ParamKey::RingWidth => self.ring_width_factor,
            ParamKey::RotationSpeed => self.rotation_speed,
            ParamKey::RingStartOffset => self.ring_start_offset_factor,
            ParamKey::RingSpacing => self.ring_spacing_factor,
        }
    }

    fn set(&mut self, key: ParamKey, value: f32) {
        match key {
            ParamKey::MarkerSize => self.marker_size_factor = value,
            ParamKey::RingWidth => self.ring_width_factor = value,
            ParamKey::RotationSpeed => self.rotation_speed = value,
            ParamKey::RingStartOffset => self.ring_start_offset_factor = value,
            ParamKey::RingSpacing => self.ring_spacing_factor = value,
        }
    }

    /// Move a parameter by `direction` steps and clamp into its range.
    /// Clamping is silent; out-of-range requests are not an error.
    pub fn adjust(&mut self, key: ParamKey, direction: i8) {
        let (min, max) = key.range();
        let value = (self.get(key) + key.step() * direction as f32).clamp(min, max);
        self.set(key, value);
    }

    /// Clamp every factor into its range. `adjust` cannot leave the range,
    /// but values arriving from a config file can hold anything.
    pub fn sanitize(&mut self) {
        for key in ParamKey::ALL {
            let (min, max) = key.range();
            self.set(key, self.get(key).clamp(min, max));
        }
    }

    /// Marker radius in pixels
    pub fn marker_radius(&self) -> f32 {
        ARENA_RADIUS * self.marker_size_factor
    }

    /// Ring stroke width in pixels
    pub fn ring_stroke_width(&self) -> f32 {
        self.marker_radius() * self.ring_width_factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_defaults_in_range() {
        let params = SimParams::default();
        for key in ParamKey::ALL {
            let (min, max) = key.range();
            let v = params.get(key);
            assert!(v >= min && v <= max, "{} out of range", key.label());
        }
    }

    #[test]
    fn test_adjust_moves_by_step() {
        let mut params = SimParams::default();
        params.adjust(ParamKey::RotationSpeed, 1);
        assert!((params.rotation_speed - 0.06).abs() < 1e-6);
        params.adjust(ParamKey::RotationSpeed, -2);
        assert!((params.rotation_speed - 0.04).abs() < 1e-6);
    }

    #[test]
    fn test_adjust_clamps_at_bounds() {
        let mut params = SimParams::default();
        for _ in 0..100 {
            params.adjust(ParamKey::MarkerSize, 1);
        }
        assert!((params.marker_size_factor - 0.2).abs() < 1e-6);
        for _ in 0..100 {
            params.adjust(ParamKey::MarkerSize, -1);
        }
        assert!((params.marker_size_factor - 0.01).abs() < 1e-6);
    }

    #[test]
    fn test_derived_radii() {
        let params = SimParams::default();
        assert!((params.marker_radius() - 19.5).abs() < 0.001);
        assert!((params.ring_stroke_width() - 23.4).abs() < 0.001);
    }

    #[test]
    fn test_sanitize_clamps_every_factor() {
        let mut params = SimParams {
            marker_size_factor: 10.0,
            ring_width_factor: 0.0,
            rotation_speed: -5.0,
            ring_start_offset_factor: 99.0,
            ring_spacing_factor: 0.5,
        };
        params.sanitize();
        assert!((params.marker_size_factor - 0.2).abs() < 1e-6);
        assert!((params.ring_width_factor - 0.5).abs() < 1e-6);
        assert!((params.rotation_speed - 0.01).abs() < 1e-6);
        assert!((params.ring_start_offset_factor - 3.0).abs() < 1e-6);
        assert!((params.ring_spacing_factor - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_sanitize_keeps_in_range_values() {
        let mut params = SimParams::default();
        let before = params.clone();
        params.sanitize();
        assert_eq!(params, before);
    }

    proptest! {
        #[test]
        fn prop_adjust_stays_in_range(
            steps in proptest::collection::vec((0usize..5, -3i8..=3), 0..200)
        ) {
            let mut params = SimParams::default();
            for (idx, dir) in steps {
                params.adjust(ParamKey::ALL[idx], dir);
            }
            for key in ParamKey::ALL {
                let (min, max) = key.range();
                let v = params.get(key);
                prop_assert!(v >= min && v <= max);
            }
        }
    }
}
