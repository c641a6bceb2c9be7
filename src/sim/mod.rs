//! Deterministic trainer simulation
//!
//! All mechanic logic lives here. This module must stay pure:
//! - Time arrives as an argument, never read from a clock
//! - No rendering or platform dependencies
//! - Identical inputs reproduce identical states

pub mod history;
pub mod marker;
pub mod params;
pub mod ring;
pub mod state;
pub mod tick;

pub use history::{HistoryBuffer, MarkerSnapshot, Snapshot};
pub use marker::{Marker, Spin};
pub use params::{ParamKey, SimParams};
pub use ring::{RingPhase, RingState};
pub use state::{Phase, RewindCursor, RewindView, TrainerState};
pub use tick::{TickInput, tick};
