use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use matsuri_core::{EngineConfig, FireworkEngine, LogoSettings, DEFAULT_PALETTE};
use tracing_subscriber::EnvFilter;

mod config;
mod session;
mod templates;

use config::Config;
use session::{JsonlSink, RenderSink, Session, StatsSink, SyntheticSource};

#[derive(Parser)]
#[command(name = "matsuri", about = "Matsuri festival photo-booth runner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a headless booth session with the synthetic observation source
    Simulate {
        /// Number of frames to run
        #[arg(long, default_value_t = 600)]
        frames: u64,
        /// Burst intensity (particles per burst = 30 * intensity)
        #[arg(long)]
        intensity: Option<u32>,
        /// Particle buffer capacity
        #[arg(long)]
        capacity: Option<usize>,
        /// RNG seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
        /// Pace the loop at the configured frame interval
        #[arg(long)]
        realtime: bool,
        /// Write one JSON object per frame to this file
        #[arg(long)]
        jsonl: Option<std::path::PathBuf>,
    },
    /// List the logo templates (built-in, or from a custom file)
    Logos {
        /// Read templates from this TOML file instead of the built-ins
        #[arg(long)]
        file: Option<std::path::PathBuf>,
    },
    /// List the firework color palette
    Palette,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            frames,
            intensity,
            capacity,
            seed,
            realtime,
            jsonl,
        } => {
            let cfg = Config::from_env();

            let engine_config = EngineConfig {
                particle_capacity: capacity.unwrap_or(cfg.particle_capacity),
                palette: DEFAULT_PALETTE.to_vec(),
            };
            let engine = match seed {
                Some(s) => FireworkEngine::with_seed(engine_config, s),
                None => FireworkEngine::new(engine_config),
            };

            let logo_settings = LogoSettings {
                anchor: cfg.logo_anchor,
                size: cfg.logo_size,
                visible: true,
            };

            if let Some(t) = templates::lookup_template(&cfg.logo_template) {
                tracing::info!(key = %t.key, caption = %t.text.lines().next().unwrap_or(""), "logo template selected");
            } else {
                tracing::warn!(key = %cfg.logo_template, "unknown logo template, renderer will show none");
            }

            let sink: Box<dyn RenderSink> = match jsonl {
                Some(path) => {
                    let file = std::fs::File::create(&path)
                        .with_context(|| format!("creating {}", path.display()))?;
                    Box::new(JsonlSink::new(std::io::BufWriter::new(file)))
                }
                None => Box::new(StatsSink::new(60)),
            };

            let mut session = Session::new(
                engine,
                logo_settings,
                intensity.unwrap_or(cfg.intensity),
                cfg.spawn_interval_frames,
                cfg.frame_ms,
                SyntheticSource::new(cfg.frame_ms),
                sink,
            );
            session.run(frames, realtime).await?;
        }
        Commands::Logos { file } => {
            let custom;
            let list: &[templates::LogoTemplate] = match file {
                Some(path) => {
                    custom = templates::load_template_file(&path)?;
                    &custom
                }
                None => templates::list_templates(),
            };
            for t in list {
                let caption = t.text.replace('\n', " / ");
                println!("{:<10} {} ({} → {})", t.key, caption, t.colors[0], t.colors[1]);
            }
        }
        Commands::Palette => {
            for (i, c) in DEFAULT_PALETTE.iter().enumerate() {
                println!(
                    "{i}: #{:02X}{:02X}{:02X}",
                    (c.r * 255.0).round() as u8,
                    (c.g * 255.0).round() as u8,
                    (c.b * 255.0).round() as u8
                );
            }
        }
    }

    Ok(())
}
