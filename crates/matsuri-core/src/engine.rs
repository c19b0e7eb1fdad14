//! The firework engine — burst lifecycle and per-frame snapshots.
//!
//! The engine owns every piece of mutable state: the active burst list and a
//! pair of flat buffers (positions, colors) allocated once at capacity.
//! Callers only ever see borrowed read-only [`Snapshot`] views, so the frame
//! loop and the UI spawn path can share one engine handle without any
//! synchronization beyond single-threaded call ordering.

use crate::burst::{Burst, PARTICLES_PER_INTENSITY};
use crate::scene::scene_anchor;
use crate::types::{FaceObservation, Rgb, DEFAULT_PALETTE};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Default particle capacity of the render buffers.
pub const DEFAULT_PARTICLE_CAPACITY: usize = 200;

/// Engine construction parameters.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Fixed size of the snapshot buffers, in particles. Logical particles
    /// beyond this are silently truncated per frame, never an error.
    pub particle_capacity: usize,
    /// Burst colors, cycled by observation index.
    pub palette: Vec<Rgb>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            particle_capacity: DEFAULT_PARTICLE_CAPACITY,
            palette: DEFAULT_PALETTE.to_vec(),
        }
    }
}

/// Read-only view of the current render payload.
///
/// `positions` and `colors` are flat `[x0, y0, z0, x1, ...]` / `[r0, g0, b0,
/// r1, ...]` buffers of `3 * capacity` floats; only the first `active`
/// entries of each carry live particles, the rest are zeroed.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub positions: &'a [f32],
    pub colors: &'a [f32],
    pub active: usize,
}

/// Fixed-capacity particle effect engine.
pub struct FireworkEngine {
    bursts: Vec<Burst>,
    palette: Vec<Rgb>,
    capacity: usize,
    positions: Vec<f32>,
    colors: Vec<f32>,
    active: usize,
    rng: StdRng,
    /// Timestamp of the last integrated physics step. Repeat ticks with the
    /// same timestamp skip integration so equal clocks yield equal snapshots.
    last_step_ms: Option<u64>,
}

impl FireworkEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Deterministic construction for tests and replayable sessions.
    pub fn with_seed(config: EngineConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: EngineConfig, rng: StdRng) -> Self {
        let capacity = config.particle_capacity;
        Self {
            bursts: Vec::new(),
            palette: config.palette,
            capacity,
            positions: vec![0.0; capacity * 3],
            colors: vec![0.0; capacity * 3],
            active: 0,
            rng,
            last_step_ms: None,
        }
    }

    /// Spawn one burst per observation, anchored at the mirrored face center.
    ///
    /// Burst `i` gets `30 * intensity` particles and the `i`-th palette color
    /// (wrapping). Empty observations or zero intensity are a silent no-op:
    /// no detected face is an expected condition, not a failure. The snapshot
    /// is recomputed immediately so fresh particles show up without waiting
    /// for the next tick.
    pub fn spawn_bursts(
        &mut self,
        observations: &[FaceObservation],
        intensity: u32,
        now_ms: u64,
    ) {
        if observations.is_empty() || intensity == 0 {
            return;
        }

        for (i, obs) in observations.iter().enumerate() {
            let anchor = scene_anchor(obs);
            let count = PARTICLES_PER_INTENSITY * intensity;
            let color = self.palette[i % self.palette.len()];
            self.bursts
                .push(Burst::spawn(anchor, count, color, now_ms, &mut self.rng));
        }

        tracing::debug!(
            bursts = observations.len(),
            intensity,
            total_active = self.bursts.len(),
            "fireworks spawned"
        );

        self.rebuild_snapshot();
    }

    /// Advance the effect by one frame and return the render payload.
    ///
    /// Expired bursts are dropped first, then physics integrates one fixed
    /// step (only once per distinct `now_ms`), then particle life is derived
    /// from burst age and the buffers are rebuilt.
    pub fn tick(&mut self, now_ms: u64) -> Snapshot<'_> {
        let before = self.bursts.len();
        self.bursts.retain(|b| !b.expired(now_ms));
        if self.bursts.len() != before {
            tracing::trace!(
                expired = before - self.bursts.len(),
                remaining = self.bursts.len(),
                "bursts expired"
            );
        }

        if self.last_step_ms != Some(now_ms) {
            for b in &mut self.bursts {
                b.integrate();
            }
            self.last_step_ms = Some(now_ms);
        }

        for b in &mut self.bursts {
            b.refresh_life(now_ms);
        }

        self.rebuild_snapshot();
        self.snapshot()
    }

    /// The current render payload, untouched since the last tick or spawn.
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            positions: &self.positions,
            colors: &self.colors,
            active: self.active,
        }
    }

    /// Number of bursts currently alive.
    pub fn active_bursts(&self) -> usize {
        self.bursts.len()
    }

    pub fn particle_capacity(&self) -> usize {
        self.capacity
    }

    /// Walk bursts in insertion order, particles in index order, writing
    /// every live particle until the buffers are full. Truncation order is
    /// therefore deterministic: earlier bursts win whole slots.
    fn rebuild_snapshot(&mut self) {
        self.positions.fill(0.0);
        self.colors.fill(0.0);

        let mut cursor = 0;
        'outer: for b in &self.bursts {
            for p in &b.particles {
                if cursor >= self.capacity {
                    break 'outer;
                }
                if p.life <= 0.0 {
                    continue;
                }
                let i = cursor * 3;
                self.positions[i] = p.position.x;
                self.positions[i + 1] = p.position.y;
                self.positions[i + 2] = p.position.z;

                let c = b.color.faded(p.life);
                self.colors[i] = c.r;
                self.colors[i + 1] = c.g;
                self.colors[i + 2] = c.b;

                cursor += 1;
            }
        }
        self.active = cursor;
    }
}
