//! matsuri-core — Face-anchored firework effects.
//!
//! Maps normalized face-box observations into a mirrored, Y-up scene space
//! and animates timed particle bursts around them. Detection and rendering
//! stay outside this crate; callers feed observations in and draw the
//! per-frame point-cloud snapshot out.

pub mod burst;
pub mod engine;
pub mod logo;
pub mod scene;
pub mod types;

pub use engine::{EngineConfig, FireworkEngine, Snapshot};
pub use logo::{place_logo, LogoAnchor, LogoPlacement, LogoSettings};
pub use types::{FaceObservation, Rgb, DEFAULT_PALETTE};
