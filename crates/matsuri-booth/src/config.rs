use matsuri_core::LogoAnchor;

/// Booth configuration, loaded from environment variables.
pub struct Config {
    /// Fixed snapshot buffer size, in particles.
    pub particle_capacity: usize,
    /// Simulated clock step per frame, in milliseconds (~60 Hz default).
    pub frame_ms: u64,
    /// Burst intensity (particles per burst = 30 * intensity).
    pub intensity: u32,
    /// Frames between automatic burst triggers (0 disables auto-spawn).
    pub spawn_interval_frames: u64,
    /// Logo size multiplier.
    pub logo_size: f32,
    /// Where the logo sits relative to the face.
    pub logo_anchor: LogoAnchor,
    /// Key of the logo template to show.
    pub logo_template: String,
}

impl Config {
    /// Load configuration from `MATSURI_*` environment variables with defaults.
    pub fn from_env() -> Self {
        Self {
            particle_capacity: env_usize("MATSURI_PARTICLE_CAPACITY", 200),
            frame_ms: env_u64("MATSURI_FRAME_MS", 16),
            intensity: env_u32("MATSURI_INTENSITY", 3),
            spawn_interval_frames: env_u64("MATSURI_SPAWN_INTERVAL_FRAMES", 90),
            logo_size: env_f32("MATSURI_LOGO_SIZE", 1.0),
            logo_anchor: env_anchor("MATSURI_LOGO_ANCHOR", LogoAnchor::Top),
            logo_template: std::env::var("MATSURI_LOGO_TEMPLATE")
                .unwrap_or_else(|_| "festival".to_string()),
        }
    }
}

fn env_f32(key: &str, default: f32) -> f32 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_u32(key: &str, default: u32) -> u32 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_usize(key: &str, default: usize) -> usize {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_anchor(key: &str, default: LogoAnchor) -> LogoAnchor {
    match std::env::var(key).ok().as_deref() {
        Some("top") => LogoAnchor::Top,
        Some("crown") => LogoAnchor::Crown,
        Some("forehead") => LogoAnchor::Forehead,
        Some(other) => {
            eprintln!("matsuri-booth: unknown MATSURI_LOGO_ANCHOR {other:?}, using default");
            default
        }
        None => default,
    }
}
