//! Autopilot simulator CLI.
//!
//! Plays seeded sessions headlessly and reports scores, crash causes and
//! any invariant violations.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                     # 100 runs, normal speed
//!   cargo run --bin simulate -- -n 20 --slow     # reduced speed profile
//!   cargo run --bin simulate -- --seed 42 --json # reproducible, save JSON

use anyhow::{bail, Context, Result};
use clap::Parser;
use dino_runner::simulator::{run_simulation, SimConfig};
use dino_runner::skins::SkinId;
use dino_runner::utils::logging;

#[derive(Parser, Debug)]
#[command(name = "simulate", about = "Headless autopilot simulator")]
struct Args {
    /// Number of simulated sessions
    #[arg(short = 'n', long)]
    runs: Option<u32>,
    /// Games per session
    #[arg(short, long)]
    games: Option<u32>,
    /// Seed for reproducibility
    #[arg(short, long)]
    seed: Option<u64>,
    /// Frame budget per session
    #[arg(short, long)]
    frames: Option<u64>,
    /// Reduced speed profile with audio cues
    #[arg(long)]
    slow: bool,
    /// Enable the alternate skin so collectables spawn (prairie, inverted)
    #[arg(long, value_name = "NAME")]
    skin: Option<String>,
    /// Chance the autopilot ignores an obstacle
    #[arg(long)]
    miss: Option<f64>,
    /// Quick smoke test (10 short sessions)
    #[arg(long)]
    quick: bool,
    /// Per-run output
    #[arg(short, long)]
    verbose: bool,
    /// Save a JSON report
    #[arg(long)]
    json: bool,
}

impl Args {
    fn config(&self) -> Result<SimConfig> {
        let mut config = if self.quick {
            SimConfig::quick()
        } else if self.slow {
            SimConfig::accessibility()
        } else {
            SimConfig::default()
        };

        if let Some(name) = &self.skin {
            match SkinId::from_name(name) {
                Some(SkinId::Classic) | None => bail!("unknown alternate skin '{}'", name),
                Some(id) => config.alt_skin = Some(id),
            }
        }
        if let Some(runs) = self.runs {
            config.num_runs = runs;
        }
        if let Some(games) = self.games {
            config.games_per_run = games.max(1);
        }
        if let Some(frames) = self.frames {
            config.max_frames_per_run = frames;
        }
        if let Some(miss) = self.miss {
            config.miss_chance = miss;
        }
        config.seed = self.seed;
        if self.verbose {
            config.verbosity = 2;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    logging::init_stderr_logging();
    let args = Args::parse();
    let config = args.config()?;

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              DINO RUNNER SIMULATOR                            ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs:           {}", config.num_runs);
    println!("  Games/Run:      {}", config.games_per_run);
    println!("  Max Frames:     {}", config.max_frames_per_run);
    println!("  Speed:          {}", config.speed_mode.name());
    if config.audio_cues {
        println!("  Audio Cues:     on");
    }
    if let Some(skin) = config.alt_skin {
        println!("  Alt Skin:       {}", skin.name());
    }
    println!("  Miss Chance:    {:.1}%", config.miss_chance * 100.0);
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&config);

    println!("{}", report.to_text());

    if args.json {
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        std::fs::write(&filename, report.to_json())
            .with_context(|| format!("writing {}", filename))?;
        println!("JSON report saved to: {}", filename);
    }

    if report.total_violations > 0 {
        bail!("{} invariant violations", report.total_violations);
    }
    Ok(())
}
