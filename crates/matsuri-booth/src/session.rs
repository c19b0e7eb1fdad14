//! Booth session — the frame loop tying source, engine, and sink together.
//!
//! Observations come from an [`ObservationSource`] (a camera/detector stack
//! in production, the synthetic source here), the engine advances one fixed
//! step per frame, and the resulting snapshot plus logo placement go to a
//! [`RenderSink`]. The engine never sees wall-clock time directly; the
//! session owns the millisecond clock and hands timestamps down.

use anyhow::Result;
use matsuri_core::{place_logo, FaceObservation, FireworkEngine, LogoPlacement, LogoSettings, Snapshot};
use serde::Serialize;
use std::io::Write;
use std::time::Duration;

/// Supplies zero or more normalized face boxes per frame.
pub trait ObservationSource {
    fn observations(&mut self) -> Result<Vec<FaceObservation>>;
}

/// Receives the per-frame render payload.
pub trait RenderSink {
    fn present(&mut self, now_ms: u64, snapshot: Snapshot<'_>, logo: &LogoPlacement) -> Result<()>;
}

impl<T: RenderSink + ?Sized> RenderSink for Box<T> {
    fn present(&mut self, now_ms: u64, snapshot: Snapshot<'_>, logo: &LogoPlacement) -> Result<()> {
        (**self).present(now_ms, snapshot, logo)
    }
}

/// One photo-booth run: frame loop, auto-spawn cadence, status reporting.
pub struct Session<S, K> {
    engine: FireworkEngine,
    logo_settings: LogoSettings,
    intensity: u32,
    /// Frames between automatic burst triggers; 0 disables auto-spawn.
    spawn_interval_frames: u64,
    frame_ms: u64,
    source: S,
    sink: K,
    last_face_count: Option<usize>,
}

impl<S: ObservationSource, K: RenderSink> Session<S, K> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        engine: FireworkEngine,
        logo_settings: LogoSettings,
        intensity: u32,
        spawn_interval_frames: u64,
        frame_ms: u64,
        source: S,
        sink: K,
    ) -> Self {
        Self {
            engine,
            logo_settings,
            intensity,
            spawn_interval_frames,
            frame_ms,
            source,
            sink,
            last_face_count: None,
        }
    }

    /// Run `frames` frames. With `realtime` the loop paces itself at
    /// `frame_ms` per frame; otherwise it runs as fast as it can while the
    /// simulated clock still advances exactly `frame_ms` per frame.
    pub async fn run(&mut self, frames: u64, realtime: bool) -> Result<()> {
        let mut pacer = if realtime {
            let mut i = tokio::time::interval(Duration::from_millis(self.frame_ms));
            i.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            Some(i)
        } else {
            None
        };

        tracing::info!(
            frames,
            frame_ms = self.frame_ms,
            capacity = self.engine.particle_capacity(),
            realtime,
            "session starting"
        );

        for frame in 0..frames {
            if let Some(p) = pacer.as_mut() {
                p.tick().await;
            }
            let now_ms = frame * self.frame_ms;

            let observations = self.source.observations()?;
            self.note_face_status(observations.len());

            if self.spawn_interval_frames > 0
                && frame % self.spawn_interval_frames == 0
                && !observations.is_empty()
            {
                self.engine
                    .spawn_bursts(&observations, self.intensity, now_ms);
            }

            let snapshot = self.engine.tick(now_ms);
            let logo = place_logo(&observations, &self.logo_settings, now_ms);
            self.sink.present(now_ms, snapshot, &logo)?;
        }

        tracing::info!(
            remaining_bursts = self.engine.active_bursts(),
            "session finished"
        );
        Ok(())
    }

    fn note_face_status(&mut self, count: usize) {
        if self.last_face_count == Some(count) {
            return;
        }
        if count > 0 {
            tracing::info!(faces = count, "faces in view");
        } else {
            tracing::info!("searching for faces");
        }
        self.last_face_count = Some(count);
    }
}

/// Scripted observation source for headless runs.
///
/// One face drifts on a slow sinusoidal path; a second face joins for a
/// stretch of every cycle so multi-burst palette cycling gets exercised.
pub struct SyntheticSource {
    frame: u64,
    frame_ms: u64,
}

impl SyntheticSource {
    pub fn new(frame_ms: u64) -> Self {
        Self { frame: 0, frame_ms }
    }
}

impl ObservationSource for SyntheticSource {
    fn observations(&mut self) -> Result<Vec<FaceObservation>> {
        let t = (self.frame * self.frame_ms) as f32 / 1000.0;
        self.frame += 1;

        let primary = FaceObservation::new(
            0.5 + 0.15 * (t * 0.5).sin(),
            0.45 + 0.05 * (t * 0.9).sin(),
            0.2,
            0.25,
        );

        // Second guest walks in for the middle 3 seconds of every 10.
        let cycle = t % 10.0;
        if (3.0..6.0).contains(&cycle) {
            let guest = FaceObservation::new(0.75, 0.5 + 0.03 * (t * 1.3).sin(), 0.15, 0.2);
            Ok(vec![primary, guest])
        } else {
            Ok(vec![primary])
        }
    }
}

/// Logs periodic effect statistics instead of drawing anything.
pub struct StatsSink {
    every_frames: u64,
    presented: u64,
}

impl StatsSink {
    pub fn new(every_frames: u64) -> Self {
        Self {
            every_frames: every_frames.max(1),
            presented: 0,
        }
    }
}

impl RenderSink for StatsSink {
    fn present(&mut self, now_ms: u64, snapshot: Snapshot<'_>, logo: &LogoPlacement) -> Result<()> {
        if self.presented % self.every_frames == 0 {
            tracing::info!(
                t_ms = now_ms,
                particles = snapshot.active,
                logo_visible = logo.visible,
                "frame"
            );
        }
        self.presented += 1;
        Ok(())
    }
}

#[derive(Serialize)]
struct FrameRecord<'a> {
    t_ms: u64,
    active: usize,
    logo: &'a LogoPlacement,
}

/// Writes one JSON object per frame, for offline inspection or plotting.
pub struct JsonlSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonlSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> RenderSink for JsonlSink<W> {
    fn present(&mut self, now_ms: u64, snapshot: Snapshot<'_>, logo: &LogoPlacement) -> Result<()> {
        let record = FrameRecord {
            t_ms: now_ms,
            active: snapshot.active,
            logo,
        };
        serde_json::to_writer(&mut self.writer, &record)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matsuri_core::EngineConfig;

    /// Sink that records per-frame active counts.
    struct ProbeSink {
        active: Vec<usize>,
        logo_visible: Vec<bool>,
    }

    impl RenderSink for ProbeSink {
        fn present(
            &mut self,
            _now_ms: u64,
            snapshot: Snapshot<'_>,
            logo: &LogoPlacement,
        ) -> Result<()> {
            self.active.push(snapshot.active);
            self.logo_visible.push(logo.visible);
            Ok(())
        }
    }

    fn test_session(
        source: impl ObservationSource,
        capacity: usize,
        spawn_interval: u64,
    ) -> Session<impl ObservationSource, ProbeSink> {
        let engine = FireworkEngine::with_seed(
            EngineConfig {
                particle_capacity: capacity,
                ..EngineConfig::default()
            },
            7,
        );
        Session::new(
            engine,
            LogoSettings::default(),
            2,
            spawn_interval,
            16,
            source,
            ProbeSink {
                active: Vec::new(),
                logo_visible: Vec::new(),
            },
        )
    }

    #[tokio::test]
    async fn test_session_presents_every_frame() {
        let mut s = test_session(SyntheticSource::new(16), 200, 30);
        s.run(120, false).await.unwrap();
        assert_eq!(s.sink.active.len(), 120);
    }

    #[tokio::test]
    async fn test_active_bounded_by_capacity() {
        // Aggressive spawn cadence against a small buffer.
        let mut s = test_session(SyntheticSource::new(16), 40, 5);
        s.run(300, false).await.unwrap();
        assert!(s.sink.active.iter().all(|&a| a <= 40));
        // Something actually rendered at some point.
        assert!(s.sink.active.iter().any(|&a| a > 0));
    }

    #[tokio::test]
    async fn test_logo_follows_detection() {
        struct EmptySource;
        impl ObservationSource for EmptySource {
            fn observations(&mut self) -> Result<Vec<FaceObservation>> {
                Ok(Vec::new())
            }
        }

        let mut s = test_session(EmptySource, 100, 30);
        s.run(10, false).await.unwrap();
        assert!(s.sink.logo_visible.iter().all(|&v| !v));
        assert!(s.sink.active.iter().all(|&a| a == 0));

        let mut s = test_session(SyntheticSource::new(16), 100, 30);
        s.run(10, false).await.unwrap();
        assert!(s.sink.logo_visible.iter().all(|&v| v));
    }

    #[tokio::test]
    async fn test_zero_interval_disables_autospawn() {
        let mut s = test_session(SyntheticSource::new(16), 100, 0);
        s.run(60, false).await.unwrap();
        assert!(s.sink.active.iter().all(|&a| a == 0));
    }

    #[tokio::test]
    async fn test_jsonl_sink_writes_one_line_per_frame() {
        let engine = FireworkEngine::with_seed(EngineConfig::default(), 7);
        let mut session = Session::new(
            engine,
            LogoSettings::default(),
            1,
            30,
            16,
            SyntheticSource::new(16),
            JsonlSink::new(Vec::new()),
        );
        session.run(50, false).await.unwrap();

        let out = String::from_utf8(session.sink.writer).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 50);
        for line in lines {
            let v: serde_json::Value = serde_json::from_str(line).unwrap();
            assert!(v["t_ms"].is_u64());
            assert!(v["active"].as_u64().unwrap() <= 200);
        }
    }
}
