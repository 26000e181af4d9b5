use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use framefit_core::{
    builtin_dataset, extract_features, FaceShape, LandmarkSet, ReferenceDataset, ShapeClassifier,
};
use std::path::{Path, PathBuf};

mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "framefit", about = "Framefit face-shape classification CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a face from a landmark file and recommend frames
    Classify {
        /// JSON file containing 68 [x, y] landmark pairs from the detector
        landmarks: PathBuf,
        /// Number of neighbors to consult (overrides FRAMEFIT_K)
        #[arg(short, long)]
        k: Option<usize>,
        /// Dataset bundle replacing the built-in reference set
        #[arg(long)]
        dataset: Option<PathBuf>,
        /// Emit machine-readable JSON instead of a report
        #[arg(long)]
        json: bool,
    },
    /// Print the measurements extracted from a landmark file
    Features {
        /// JSON file containing 68 [x, y] landmark pairs from the detector
        landmarks: PathBuf,
        /// Emit machine-readable JSON
        #[arg(long)]
        json: bool,
    },
    /// List the five face shapes and their frame recommendations
    Shapes,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();

    match cli.command {
        Commands::Classify {
            landmarks,
            k,
            dataset,
            json,
        } => {
            let set = read_landmarks(&landmarks)?;
            let dataset = load_dataset(dataset.as_deref(), &config)?;
            let k = k.unwrap_or(config.k);
            let classifier = ShapeClassifier::new(dataset, k)?;

            let features = extract_features(&set);
            let prediction = classifier.classify_features(&features);

            if json {
                let rec = prediction.shape.recommendation();
                let report = serde_json::json!({
                    "prediction": prediction,
                    "features": features,
                    "recommendation": rec,
                });
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                let rec = prediction.shape.recommendation();
                println!(
                    "Face shape: {} (confidence {:.0}%)",
                    prediction.shape,
                    prediction.confidence * 100.0
                );
                println!("Nearest neighbors:");
                for (i, n) in prediction.neighbors.iter().enumerate() {
                    println!("  {}. {:<7} distance {:.4}", i + 1, n.shape.name(), n.distance);
                }
                println!();
                println!("Recommended frames: {}", rec.frames);
                println!("  {}", rec.description);
                println!("  Style reference: {}", rec.style);
            }
        }
        Commands::Features { landmarks, json } => {
            let set = read_landmarks(&landmarks)?;
            let features = extract_features(&set);

            if json {
                println!("{}", serde_json::to_string_pretty(&features)?);
            } else {
                println!("Face width:     {:.1}px", features.face_width);
                println!("Face height:    {:.1}px (estimated)", features.face_height);
                println!("Jaw width:      {:.1}px", features.jaw_width);
                println!("Chin width:     {:.1}px", features.chin_width);
                println!();
                println!("Height/width:   {:.3}", features.height_width_ratio);
                println!("Jaw/cheek:      {:.3}", features.jaw_cheek_ratio);
                println!("Chin/jaw:       {:.3}", features.chin_jaw_ratio);
                println!("Vertical split: {:.3}", features.vertical_ratio);
            }
        }
        Commands::Shapes => {
            for &shape in FaceShape::all() {
                let rec = shape.recommendation();
                println!("{:<7} {}", shape.name(), rec.frames);
                println!("        {}", rec.description);
            }
        }
    }

    Ok(())
}

/// Read and validate a landmark file: a JSON array of 68 `[x, y]` pairs.
fn read_landmarks(path: &Path) -> Result<LandmarkSet> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read landmark file {}", path.display()))?;
    parse_landmarks(&raw)
}

fn parse_landmarks(raw: &str) -> Result<LandmarkSet> {
    let pairs: Vec<(f32, f32)> =
        serde_json::from_str(raw).context("landmark file must be a JSON array of [x, y] pairs")?;
    LandmarkSet::from_pairs(&pairs).context("invalid landmark set")
}

/// Resolve the reference dataset: `--dataset` flag, then `FRAMEFIT_DATASET`,
/// then the built-in set.
fn load_dataset(flag: Option<&Path>, config: &Config) -> Result<ReferenceDataset> {
    let path = flag.or(config.dataset.as_deref());
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read dataset bundle {}", path.display()))?;
            let dataset = ReferenceDataset::from_json(&raw)
                .with_context(|| format!("invalid dataset bundle {}", path.display()))?;
            tracing::info!(
                path = %path.display(),
                points = dataset.len(),
                "loaded dataset bundle"
            );
            Ok(dataset)
        }
        None => Ok(builtin_dataset()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_landmarks_accepts_68_pairs() {
        let pairs: Vec<[f32; 2]> = (0..68).map(|i| [i as f32, i as f32 * 2.0]).collect();
        let raw = serde_json::to_string(&pairs).unwrap();
        let set = parse_landmarks(&raw).unwrap();
        assert_eq!(set.points().len(), 68);
        assert_eq!(set.point(8).y, 16.0);
    }

    #[test]
    fn test_parse_landmarks_rejects_wrong_count() {
        let pairs: Vec<[f32; 2]> = (0..10).map(|i| [i as f32, 0.0]).collect();
        let raw = serde_json::to_string(&pairs).unwrap();
        assert!(parse_landmarks(&raw).is_err());
    }

    #[test]
    fn test_parse_landmarks_rejects_non_json() {
        assert!(parse_landmarks("0,0 1,1").is_err());
    }
}
