//! Particle bursts — the unit of one firework.
//!
//! A burst is created atomically for one face observation: a ring of
//! particles around the anchor, one shared color, one fixed lifetime.
//! Physics uses fixed per-tick constants (tuned for a ~60 Hz frame loop)
//! rather than real frame deltas; scaling them by wall-clock time would
//! change the visual speed.

use crate::types::Rgb;
use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

/// How long a burst stays alive, in milliseconds.
pub const BURST_DURATION_MS: u64 = 3000;

/// Particles spawned per unit of burst intensity.
pub const PARTICLES_PER_INTENSITY: u32 = 30;

// Per-tick physics constants (fixed 60 Hz step assumption).
const GRAVITY_PER_TICK: f32 = 0.008;
const VELOCITY_DAMPING: f32 = 0.996;
const POSITION_STEP: f32 = 0.016;

// Spawn-ring geometry and launch speeds.
const SPAWN_RADIUS_MIN: f32 = 0.1;
const SPAWN_RADIUS_SPREAD: f32 = 0.2;
const RADIAL_SPEED: f32 = 0.01;
const UPWARD_BIAS: f32 = 0.005;

/// Life decays linearly to zero over this many seconds of burst age.
const LIFE_DECAY_SECS: f32 = 3.0;

/// One point of a firework.
#[derive(Debug, Clone)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Remaining life in [0,1]; scales the particle's color toward black.
    pub life: f32,
    pub initial_life: f32,
}

/// One firework: a fixed set of particles sharing a color and a lifetime.
#[derive(Debug, Clone)]
pub struct Burst {
    pub particles: Vec<Particle>,
    pub start_ms: u64,
    pub duration_ms: u64,
    pub color: Rgb,
}

impl Burst {
    /// Spawn `count` particles in a ring around `anchor`.
    ///
    /// The radius is randomized twice: once for the ring band and once more
    /// inside the position term. The double roll biases particles toward the
    /// anchor instead of a uniform ring; it defines the current look and is
    /// kept deliberately.
    pub fn spawn(anchor: Vec3, count: u32, color: Rgb, now_ms: u64, rng: &mut impl Rng) -> Self {
        let mut particles = Vec::with_capacity(count as usize);

        for j in 0..count {
            let angle = TAU * j as f32 / count as f32;
            let radius = SPAWN_RADIUS_MIN + rng.gen::<f32>() * SPAWN_RADIUS_SPREAD;

            let position = anchor
                + Vec3::new(
                    angle.cos() * radius * rng.gen::<f32>(),
                    angle.sin() * radius * rng.gen::<f32>(),
                    0.0,
                );
            let velocity = Vec3::new(
                angle.cos() * RADIAL_SPEED * rng.gen::<f32>(),
                angle.sin() * RADIAL_SPEED * rng.gen::<f32>() + UPWARD_BIAS,
                0.0,
            );

            particles.push(Particle {
                position,
                velocity,
                life: 1.0,
                initial_life: 1.0,
            });
        }

        Self {
            particles,
            start_ms: now_ms,
            duration_ms: BURST_DURATION_MS,
            color,
        }
    }

    /// Whether this burst has outlived its fixed duration.
    pub fn expired(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.start_ms) >= self.duration_ms
    }

    /// Advance every particle by one fixed physics step.
    pub fn integrate(&mut self) {
        for p in &mut self.particles {
            p.velocity.y -= GRAVITY_PER_TICK;
            p.velocity *= VELOCITY_DAMPING;
            p.position += p.velocity * POSITION_STEP;
        }
    }

    /// Recompute particle life from burst age. Pure in `now_ms`: life is
    /// never decremented, only derived, so repeated calls agree.
    pub fn refresh_life(&mut self, now_ms: u64) {
        let elapsed_secs = now_ms.saturating_sub(self.start_ms) as f32 / 1000.0;
        let life = (1.0 - elapsed_secs / LIFE_DECAY_SECS).max(0.0);
        for p in &mut self.particles {
            p.life = life.min(p.initial_life);
        }
    }
}
