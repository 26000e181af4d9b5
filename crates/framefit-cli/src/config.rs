use framefit_core::DEFAULT_K;
use std::path::PathBuf;

/// CLI configuration, loaded from environment variables.
///
/// Command-line flags override these values.
pub struct Config {
    /// Number of neighbors consulted per classification (default: 3).
    pub k: usize,
    /// Optional dataset bundle path replacing the built-in reference set.
    pub dataset: Option<PathBuf>,
}

impl Config {
    /// Load configuration from `FRAMEFIT_*` environment variables with defaults.
    pub fn from_env() -> Self {
        Self {
            k: env_usize("FRAMEFIT_K", DEFAULT_K),
            dataset: std::env::var("FRAMEFIT_DATASET").ok().map(PathBuf::from),
        }
    }
}

fn env_usize(key: &str, default: usize) -> usize {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
