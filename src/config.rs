//! Harvester configuration.
//!
//! Every field has a default, so an empty RON file (or no file at all) yields
//! the stock PokeAPI crawl. CLI flags are applied on top by the binary.

use crate::errors::{ConfigError, ConfigResult};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://pokeapi.co/api/v2";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HarvestConfig {
    pub api_base_url: String,
    pub output_dir: PathBuf,
    /// Total per-request timeout. `None` leaves the HTTP client's default,
    /// which never times out a request that is still making progress.
    pub request_timeout_secs: Option<u64>,
    pub user_agent: String,
    /// Language code whose flavor text becomes the description.
    pub description_language: String,
    pub chain_batch: BatchPolicy,
    pub species_batch: BatchPolicy,
    pub pseudo_legendary: PseudoLegendaryPolicy,
    /// Capitalized API egg-group name -> catalog name.
    pub egg_group_renames: BTreeMap<String, String>,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        HarvestConfig {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            output_dir: PathBuf::from("data"),
            request_timeout_secs: None,
            user_agent: concat!("dex-harvest/", env!("CARGO_PKG_VERSION")).to_string(),
            description_language: "en".to_string(),
            chain_batch: BatchPolicy {
                size: 50,
                pause_ms: 300,
            },
            species_batch: BatchPolicy {
                size: 50,
                pause_ms: 500,
            },
            pseudo_legendary: PseudoLegendaryPolicy::default(),
            egg_group_renames: default_egg_group_renames(),
        }
    }
}

fn default_egg_group_renames() -> BTreeMap<String, String> {
    [
        ("Water1", "Water 1"),
        ("Water2", "Water 2"),
        ("Water3", "Water 3"),
        ("No-eggs", "No Eggs"),
        ("Ground", "Field"),
        ("Humanshape", "Human-Like"),
        ("Plant", "Grass"),
    ]
    .into_iter()
    .map(|(from, to)| (from.to_string(), to.to_string()))
    .collect()
}

impl HarvestConfig {
    /// Load from a RON file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config: HarvestConfig = ron::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "api_base_url",
                reason: "must not be empty".to_string(),
            });
        }
        if self.chain_batch.size == 0 {
            return Err(ConfigError::Invalid {
                field: "chain_batch.size",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.species_batch.size == 0 {
            return Err(ConfigError::Invalid {
                field: "species_batch.size",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Absolute endpoint URL for a path below the API root.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn rename_egg_group(&self, capitalized: String) -> String {
        match self.egg_group_renames.get(&capitalized) {
            Some(renamed) => renamed.clone(),
            None => capitalized,
        }
    }
}

/// Concurrency and rate-limit knobs for one fan-out phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct BatchPolicy {
    /// Requests in flight at once.
    pub size: usize,
    /// Sleep between consecutive batches.
    pub pause_ms: u64,
}

impl BatchPolicy {
    pub fn pause(&self) -> Duration {
        Duration::from_millis(self.pause_ms)
    }
}

/// Best-effort pseudo-legendary heuristic. This is not game data: it flags
/// any strong non-legendary, non-mythical form except the listed ones.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PseudoLegendaryPolicy {
    pub min_bst: u32,
    /// Default-form names that reach `min_bst` without being pseudo-legendary.
    pub excluded_forms: Vec<String>,
}

impl Default for PseudoLegendaryPolicy {
    fn default() -> Self {
        PseudoLegendaryPolicy {
            min_bst: 600,
            excluded_forms: vec!["slaking".to_string()],
        }
    }
}

impl PseudoLegendaryPolicy {
    pub fn classify(&self, bst: u32, is_legendary: bool, is_mythical: bool, form: &str) -> bool {
        bst >= self.min_bst
            && !is_legendary
            && !is_mythical
            && !self.excluded_forms.iter().any(|excluded| excluded == form)
    }
}
