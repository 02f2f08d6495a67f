use anyhow::{Context, Result};
use posefit::config::ConfigManager;
use posefit::engines::tracking::{OverlayFitter, WristCorrector};
use posefit::types::Pose;
use std::env;
use std::fs::File;
use std::io::{BufRead, BufReader};

const USAGE: &str = "usage: posefit <recording.jsonl> [config.toml] [seed]";

/// A seed that is given but not a `u64` is an error, not a request for entropy.
fn parse_seed(arg: Option<&str>) -> Result<Option<u64>> {
    arg.map(|s| s.parse::<u64>())
        .transpose()
        .with_context(|| format!("Invalid seed. {}", USAGE))
}

/// The wrist optimizer gets its own stream, one past the overlay's.
fn wrist_seed(seed: Option<u64>) -> Option<u64> {
    seed.map(|s| s.wrapping_add(1))
}

/// Replays a pose recording (one JSON pose or `null` per line) through both
/// optimizers and prints what a renderer would draw.
fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let recording = args.get(1).context(USAGE)?;
    let config_path = args.get(2).map(|s| s.as_str()).unwrap_or("posefit.toml");
    let seed = parse_seed(args.get(3).map(|s| s.as_str()))?;

    let manager = ConfigManager::new();
    manager
        .load_layered(config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path))?;
    let config = manager.get()?;

    log::info!(
        "Overlay: population {}, {} generations; wrist: population {}",
        config.affine.population_size,
        config.affine.generations,
        config.correction.population_size
    );

    let mut overlay = OverlayFitter::from_config(&config.affine, seed)?;
    let mut wrist = WristCorrector::from_config(&config.correction, wrist_seed(seed))?;

    let file = File::open(recording).with_context(|| format!("Failed to open {}", recording))?;

    for (index, line) in BufReader::new(file).lines().enumerate() {
        let frame = index + 1;
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let pose: Option<Pose> = serde_json::from_str(&line)
            .with_context(|| format!("Frame {}: invalid pose record", frame))?;

        match overlay.fit(pose.as_ref())? {
            Some(p) => println!(
                "frame {:>5}  overlay  tx={:.2} ty={:.2} width={:.2} height={:.2}",
                frame, p.tx, p.ty, p.width, p.height
            ),
            None => println!("frame {:>5}  overlay  -", frame),
        }

        if let Some(readout) = wrist.update(pose.as_ref())? {
            println!("frame {:>5}  wrist    {}", frame, readout);
        }
    }

    Ok(())
}
