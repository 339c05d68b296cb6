use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::warn;

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Config {
    #[serde(default)]
    pub matcher: MatcherConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct MatcherConfig {
    /// Minimum spacing between accepted frames (ms)
    #[serde(default = "default_throttle_ms")]
    pub throttle_ms: u64,
    /// Live buffer capacity; oldest frames are evicted beyond this
    #[serde(default = "default_max_buffer_frames")]
    pub max_buffer_frames: usize,
    /// Fewer drained frames than this cannot be scored
    #[serde(default = "default_min_frames_for_rep")]
    pub min_frames_for_rep: usize,
    /// Key-frame count both sequences are resampled to
    #[serde(default = "default_key_frames")]
    pub key_frames: usize,
    /// Accept when the aggregate distance is at or below this
    #[serde(default = "default_match_threshold")]
    pub match_threshold: f64,
    /// Landmarks below this confidence are flagged and left out of distances
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f64,
    /// Torso lengths shorter than this mark the frame degenerate
    #[serde(default = "default_degenerate_epsilon")]
    pub degenerate_epsilon: f64,
    /// Minimum cost of a slot with no comparable landmarks
    #[serde(default = "default_missing_slot_distance")]
    pub missing_slot_distance: f64,
    /// Include the detector's z coordinate in normalization and distances
    #[serde(default)]
    pub use_depth: bool,
}

fn default_throttle_ms() -> u64 { 100 }
fn default_max_buffer_frames() -> usize { 120 }
fn default_min_frames_for_rep() -> usize { 5 }
fn default_key_frames() -> usize { 10 }
fn default_match_threshold() -> f64 { 0.15 }
fn default_min_confidence() -> f64 { 0.3 }
fn default_degenerate_epsilon() -> f64 { 1e-6 }
fn default_missing_slot_distance() -> f64 { 1.0 }

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            throttle_ms: default_throttle_ms(),
            max_buffer_frames: default_max_buffer_frames(),
            min_frames_for_rep: default_min_frames_for_rep(),
            key_frames: default_key_frames(),
            match_threshold: default_match_threshold(),
            min_confidence: default_min_confidence(),
            degenerate_epsilon: default_degenerate_epsilon(),
            missing_slot_distance: default_missing_slot_distance(),
            use_depth: false,
        }
    }
}

impl MatcherConfig {
    pub fn validate(&self) -> Result<()> {
        if self.key_frames == 0 {
            bail!("key_frames must be at least 1");
        }
        if self.max_buffer_frames == 0 {
            bail!("max_buffer_frames must be at least 1");
        }
        for (name, value) in [
            ("match_threshold", self.match_threshold),
            ("min_confidence", self.min_confidence),
            ("degenerate_epsilon", self.degenerate_epsilon),
            ("missing_slot_distance", self.missing_slot_distance),
        ] {
            if !value.is_finite() || value < 0.0 {
                bail!("{} must be a finite non-negative number, got {}", name, value);
            }
        }
        Ok(())
    }
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Failed to parse config")?;
        config.matcher.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml(&content)
    }

    /// Falls back to defaults if the file is missing or invalid
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!("using default config ({}): {:#}", path.as_ref().display(), e);
                Self::default()
            }
        }
    }
}
