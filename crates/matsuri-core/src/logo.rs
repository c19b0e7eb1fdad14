//! Event-logo placement over the first detected face.
//!
//! The logo itself (texture, text, gradient) is the renderer's business;
//! this module only computes where it goes and how big it is for the
//! current frame.

use crate::scene::scene_anchor;
use crate::types::FaceObservation;
use glam::Vec3;
use serde::{Deserialize, Serialize};

// Vertical offsets as a fraction of the scene-space face height.
const TOP_OFFSET: f32 = 0.8;
const CROWN_OFFSET: f32 = 0.6;
const FOREHEAD_OFFSET: f32 = 0.3;

// Wobble: a gentle roll, 0.05 rad peak at 2 rad/s.
const WOBBLE_RATE: f32 = 2.0;
const WOBBLE_AMPLITUDE: f32 = 0.05;

/// Where the logo sits relative to the face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogoAnchor {
    Top,
    Crown,
    Forehead,
}

impl LogoAnchor {
    fn offset_factor(self) -> f32 {
        match self {
            LogoAnchor::Top => TOP_OFFSET,
            LogoAnchor::Crown => CROWN_OFFSET,
            LogoAnchor::Forehead => FOREHEAD_OFFSET,
        }
    }
}

/// User-facing logo settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LogoSettings {
    pub anchor: LogoAnchor,
    pub size: f32,
    pub visible: bool,
}

impl Default for LogoSettings {
    fn default() -> Self {
        Self {
            anchor: LogoAnchor::Top,
            size: 1.0,
            visible: true,
        }
    }
}

/// Per-frame logo transform handed to the renderer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LogoPlacement {
    pub position: Vec3,
    pub scale: f32,
    pub rotation_z: f32,
    pub visible: bool,
}

impl LogoPlacement {
    fn hidden() -> Self {
        Self {
            position: Vec3::ZERO,
            scale: 0.0,
            rotation_z: 0.0,
            visible: false,
        }
    }
}

/// Place the logo above the first observation.
///
/// Hidden when nothing is detected or the user toggled it off. The face box
/// spans `height * 2` scene units vertically, so anchor offsets scale with
/// the detected face size; the overall scale tracks `width + height` so the
/// logo grows as the face approaches the camera.
pub fn place_logo(
    observations: &[FaceObservation],
    settings: &LogoSettings,
    now_ms: u64,
) -> LogoPlacement {
    let Some(face) = observations.first() else {
        return LogoPlacement::hidden();
    };
    if !settings.visible {
        return LogoPlacement::hidden();
    }

    let mut position = scene_anchor(face);
    let face_height = face.height * 2.0;
    position.y += face_height * settings.anchor.offset_factor();

    let t = now_ms as f32 / 1000.0;

    LogoPlacement {
        position,
        scale: settings.size * (face.width + face.height),
        rotation_z: (t * WOBBLE_RATE).sin() * WOBBLE_AMPLITUDE,
        visible: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn face() -> FaceObservation {
        FaceObservation::new(0.5, 0.5, 0.2, 0.3)
    }

    #[test]
    fn test_hidden_without_faces() {
        let p = place_logo(&[], &LogoSettings::default(), 0);
        assert!(!p.visible);
        assert_eq!(p.scale, 0.0);
    }

    #[test]
    fn test_hidden_when_toggled_off() {
        let settings = LogoSettings {
            visible: false,
            ..LogoSettings::default()
        };
        let p = place_logo(&[face()], &settings, 0);
        assert!(!p.visible);
    }

    #[test]
    fn test_top_anchor_offset() {
        let p = place_logo(&[face()], &LogoSettings::default(), 0);
        assert!(p.visible);
        // face_height = 0.3 * 2, top offset 0.8 → y = 0 + 0.48.
        assert!((p.position.y - 0.48).abs() < 1e-6);
        assert!(p.position.x.abs() < 1e-6);
    }

    #[test]
    fn test_forehead_sits_lower_than_crown() {
        let crown = place_logo(
            &[face()],
            &LogoSettings {
                anchor: LogoAnchor::Crown,
                ..LogoSettings::default()
            },
            0,
        );
        let forehead = place_logo(
            &[face()],
            &LogoSettings {
                anchor: LogoAnchor::Forehead,
                ..LogoSettings::default()
            },
            0,
        );
        assert!(forehead.position.y < crown.position.y);
    }

    #[test]
    fn test_scale_tracks_face_size() {
        let p = place_logo(&[face()], &LogoSettings::default(), 0);
        assert!((p.scale - 0.5).abs() < 1e-6); // 1.0 * (0.2 + 0.3)

        let doubled = LogoSettings {
            size: 2.0,
            ..LogoSettings::default()
        };
        let p2 = place_logo(&[face()], &doubled, 0);
        assert!((p2.scale - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_uses_first_face_only() {
        let far = FaceObservation::new(0.9, 0.9, 0.1, 0.1);
        let a = place_logo(&[face(), far], &LogoSettings::default(), 0);
        let b = place_logo(&[face()], &LogoSettings::default(), 0);
        assert_eq!(a.position, b.position);
        assert_eq!(a.scale, b.scale);
    }

    #[test]
    fn test_wobble_bounded() {
        for ms in (0..5000).step_by(37) {
            let p = place_logo(&[face()], &LogoSettings::default(), ms);
            assert!(p.rotation_z.abs() <= WOBBLE_AMPLITUDE + 1e-6);
        }
    }

    #[test]
    fn test_wobble_varies_with_time() {
        let a = place_logo(&[face()], &LogoSettings::default(), 0);
        let b = place_logo(&[face()], &LogoSettings::default(), 400);
        assert_ne!(a.rotation_z, b.rotation_z);
    }
}
