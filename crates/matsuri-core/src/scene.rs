//! Mapping from normalized image coordinates to scene space.
//!
//! The camera feed is shown mirrored (selfie view), so the scene X axis is
//! the horizontal mirror of the image X axis. Image Y grows downward while
//! scene Y grows upward. Both axes map [0,1] onto [-1,1] around the image
//! center; Z is the camera plane at 0.

use crate::types::FaceObservation;
use glam::Vec3;

/// Scene-space anchor point for an observation's face center.
///
/// `(0.5, 0.5)` maps to the origin; a face on the image's left edge lands
/// on the scene's right (+X) side because of the mirror.
pub fn scene_anchor(obs: &FaceObservation) -> Vec3 {
    Vec3::new(
        -(2.0 * obs.center_x - 1.0),
        -(2.0 * obs.center_y - 1.0),
        0.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_maps_to_origin() {
        let obs = FaceObservation::new(0.5, 0.5, 0.2, 0.2);
        let p = scene_anchor(&obs);
        assert!(p.x.abs() < 1e-6);
        assert!(p.y.abs() < 1e-6);
        assert!(p.z.abs() < 1e-6);
    }

    #[test]
    fn test_x_is_mirrored() {
        // Face near the image's left edge appears on the scene's right.
        let left = FaceObservation::new(0.0, 0.5, 0.2, 0.2);
        assert!((scene_anchor(&left).x - 1.0).abs() < 1e-6);

        let right = FaceObservation::new(1.0, 0.5, 0.2, 0.2);
        assert!((scene_anchor(&right).x + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_y_is_flipped() {
        // Image top (y=0) is scene up (+1).
        let top = FaceObservation::new(0.5, 0.0, 0.2, 0.2);
        assert!((scene_anchor(&top).y - 1.0).abs() < 1e-6);

        let bottom = FaceObservation::new(0.5, 1.0, 0.2, 0.2);
        assert!((scene_anchor(&bottom).y + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_quarter_point() {
        let obs = FaceObservation::new(0.25, 0.75, 0.1, 0.1);
        let p = scene_anchor(&obs);
        assert!((p.x - 0.5).abs() < 1e-6);
        assert!((p.y + 0.5).abs() < 1e-6);
    }
}
