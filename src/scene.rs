//! Render model
//!
//! Builds plain sprite and text lists from the trainer state, with no
//! drawing backend involved. The frontend walks the lists in field order:
//! rings under discs under stars, HUD text on top.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec2;

use crate::consts::MARKER_COUNT;
use crate::polar_to_cartesian;
use crate::sim::{ParamKey, Phase, RingPhase, Spin, TrainerState};

/// Disc drawn under each star, relative to the star's outer radius
const DISC_SCALE: f32 = 1.3;
const STAR_POINTS: u32 = 5;
const STAR_INNER_RATIO: f32 = 0.4;
/// First star vertex points straight up
const STAR_START_ANGLE: f32 = -FRAC_PI_2;

const STAR_COLOR: Rgba = Rgba::new(255, 255, 0, 255);
const DISC_CLOCKWISE: Rgba = Rgba::new(0, 150, 255, 255);
const DISC_COUNTER: Rgba = Rgba::new(128, 0, 128, 255);
const RING_WARNING: Rgba = Rgba::new(128, 0, 128, 0);
const RING_DAMAGE: Rgba = Rgba::new(255, 0, 0, 0);

/// 8-bit straight-alpha color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

/// Hollow circle outline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingSprite {
    pub center: Vec2,
    pub radius: f32,
    pub stroke: f32,
    pub color: Rgba,
}

/// Filled circle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscSprite {
    pub center: Vec2,
    pub radius: f32,
    pub color: Rgba,
}

/// Star outline, fan-filled from the center by the frontend
#[derive(Debug, Clone, PartialEq)]
pub struct StarSprite {
    pub center: Vec2,
    pub points: Vec<Vec2>,
    pub color: Rgba,
}

/// One line of the tuning panel
#[derive(Debug, Clone, PartialEq)]
pub struct ParamRow {
    pub label: String,
    pub value: String,
    /// Position inside the parameter's range, 0 at min and 1 at max
    pub fraction: f32,
    pub selected: bool,
}

/// Everything one frame draws
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub rings: Vec<RingSprite>,
    pub discs: Vec<DiscSprite>,
    pub stars: Vec<StarSprite>,
    pub status: String,
    pub params: Vec<ParamRow>,
    pub rewind: Option<String>,
    pub hint: String,
}

/// Ten-vertex star outline, alternating outer and inner radius
fn star_points(center: Vec2, outer: f32) -> Vec<Vec2> {
    let inner = outer * STAR_INNER_RATIO;
    (0..STAR_POINTS * 2)
        .map(|i| {
            let radius = if i % 2 == 0 { outer } else { inner };
            let theta = STAR_START_ANGLE + i as f32 * PI / STAR_POINTS as f32;
            center + polar_to_cartesian(radius, theta)
        })
        .collect()
}

fn status_line(state: &TrainerState, elapsed: f64) -> String {
    match state.phase {
        Phase::Setup => format!(
            "SETUP  markers {}/{}",
            state.markers.len(),
            MARKER_COUNT
        ),
        _ => format!("{}  t = {elapsed:.1}s", state.phase.label()),
    }
}

fn hint_line(state: &TrainerState) -> &'static str {
    match state.phase {
        Phase::Setup => "click: place marker   P: scatter   space: start   arrows: tune   esc: quit",
        Phase::Running => "space: pause   B: rewind   R: reset   arrows: tune",
        Phase::Paused { rewind: Some(_) } => "left/right: scrub   up/down: step size   space: resume   B: back to pause",
        Phase::Paused { rewind: None } => "space: resume   B: rewind   R: reset   arrows: tune",
    }
}

/// Build the frame for wall-clock time `now` with one parameter highlighted
pub fn build(state: &TrainerState, now: f64, selected: ParamKey) -> Scene {
    let elapsed = state.display_elapsed(now);
    let marker_radius = state.params.marker_radius();
    let stroke = state.params.ring_stroke_width();

    let mut rings = Vec::with_capacity(state.markers.len());
    let mut discs = Vec::with_capacity(state.markers.len());
    let mut stars = Vec::with_capacity(state.markers.len());

    for marker in &state.markers {
        let color = match marker.ring.phase_at(elapsed) {
            RingPhase::Warning => RING_WARNING.with_alpha(RingPhase::Warning.alpha()),
            RingPhase::Damage => RING_DAMAGE.with_alpha(RingPhase::Damage.alpha()),
        };
        rings.push(RingSprite {
            center: marker.position,
            radius: marker
                .ring
                .current_radius(marker_radius, state.params.ring_spacing_factor),
            stroke,
            color,
        });
        discs.push(DiscSprite {
            center: marker.position,
            radius: marker_radius * DISC_SCALE,
            color: match marker.spin {
                Spin::Clockwise => DISC_CLOCKWISE,
                Spin::CounterClockwise => DISC_COUNTER,
            },
        });
        stars.push(StarSprite {
            center: marker.position,
            points: star_points(marker.position, marker_radius),
            color: STAR_COLOR,
        });
    }

    let params = ParamKey::ALL
        .iter()
        .map(|&key| {
            let value = state.params.get(key);
            let (min, max) = key.range();
            ParamRow {
                label: key.label().to_string(),
                value: format!("{value:.3}"),
                fraction: (value - min) / (max - min),
                selected: key == selected,
            }
        })
        .collect();

    let rewind = state
        .rewind_view()
        .map(|v| format!("frame {}/{}  step {}", v.cursor + 1, v.history_len, v.step));

    Scene {
        rings,
        discs,
        stars,
        status: status_line(state, elapsed),
        params,
        rewind,
        hint: hint_line(state).to_string(),
    }
}
