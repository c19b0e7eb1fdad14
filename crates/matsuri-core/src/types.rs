use serde::{Deserialize, Serialize};

/// Normalized bounding box for one detected face.
///
/// All fields are in [0,1] image coordinates with the origin at the
/// top-left and Y pointing down, as delivered by the detector.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FaceObservation {
    pub center_x: f32,
    pub center_y: f32,
    pub width: f32,
    pub height: f32,
}

impl FaceObservation {
    pub fn new(center_x: f32, center_y: f32, width: f32, height: f32) -> Self {
        Self {
            center_x,
            center_y,
            width,
            height,
        }
    }
}

/// An RGB color with [0,1] channels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build a color from a packed `0xRRGGBB` value.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
        }
    }

    /// Scale every channel by `life`, fading toward black as life decays.
    pub fn faded(self, life: f32) -> Self {
        Self {
            r: self.r * life,
            g: self.g * life,
            b: self.b * life,
        }
    }
}

/// The stock firework palette. Bursts cycle through it in observation order.
pub const DEFAULT_PALETTE: [Rgb; 8] = [
    Rgb::from_hex(0xFF6B6B), // coral red
    Rgb::from_hex(0x4ECDC4), // teal
    Rgb::from_hex(0xFFD93D), // gold
    Rgb::from_hex(0x6BCF7F), // mint green
    Rgb::from_hex(0xFF8C42), // orange
    Rgb::from_hex(0x845EC2), // violet
    Rgb::from_hex(0xF9F871), // pale yellow
    Rgb::from_hex(0xFF69B4), // pink
];
