//! Enrichment configuration

use anyhow::Context;
use serde::{Deserialize, Serialize};

// ============================================================================
// Enrichment Configuration Constants
// ============================================================================

/// Default strategy: only fill values the target lacks.
pub const DEFAULT_STRATEGY: UpdateStrategy = UpdateStrategy::Addition;

/// Default for removing target elements the source does not carry.
pub const DEFAULT_REMOVE_UNMATCHED: bool = false;

/// Default for recomputing interaction RIGIDs after participant merges.
pub const DEFAULT_RECOMPUTE_RIGID: bool = true;

/// How scalar fields of the target are updated from the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UpdateStrategy {
    /// Adopt source values only where the target has none
    #[default]
    Addition,
    /// Replace target values and report old and new
    Overwrite,
    /// Report discrepancies without mutating the target
    Mismatch,
}

impl std::str::FromStr for UpdateStrategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "addition" | "add" => Ok(UpdateStrategy::Addition),
            "overwrite" | "update" => Ok(UpdateStrategy::Overwrite),
            "mismatch" | "report" => Ok(UpdateStrategy::Mismatch),
            other => Err(anyhow::anyhow!("Invalid enrichment strategy: {}", other)),
        }
    }
}

impl std::fmt::Display for UpdateStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            UpdateStrategy::Addition => "addition",
            UpdateStrategy::Overwrite => "overwrite",
            UpdateStrategy::Mismatch => "mismatch",
        };
        f.write_str(name)
    }
}

/// Enrichment configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentConfig {
    pub strategy: UpdateStrategy,
    /// Drop target elements with no counterpart in the source
    pub remove_unmatched: bool,
    pub recompute_rigid: bool,
}

impl EnrichmentConfig {
    /// Load configuration from `.env` and the environment
    ///
    /// - `PSIMI_ENRICHMENT_STRATEGY`: addition, overwrite, mismatch
    /// - `PSIMI_REMOVE_UNMATCHED`: true/false
    /// - `PSIMI_RECOMPUTE_RIGID`: true/false
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup, then validate it.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let flag = |key: &str, default: bool| -> anyhow::Result<bool> {
            match lookup(key) {
                Some(value) => value
                    .trim()
                    .parse()
                    .with_context(|| format!("{key} must be true or false, got {value}")),
                None => Ok(default),
            }
        };

        let config = EnrichmentConfig {
            strategy: match lookup("PSIMI_ENRICHMENT_STRATEGY") {
                Some(strategy) => strategy.parse()?,
                None => DEFAULT_STRATEGY,
            },
            remove_unmatched: flag("PSIMI_REMOVE_UNMATCHED", DEFAULT_REMOVE_UNMATCHED)?,
            recompute_rigid: flag("PSIMI_RECOMPUTE_RIGID", DEFAULT_RECOMPUTE_RIGID)?,
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.remove_unmatched && self.strategy == UpdateStrategy::Mismatch {
            anyhow::bail!("Remove mode mutates the target and cannot be combined with the mismatch strategy");
        }

        Ok(())
    }

    pub fn with_strategy(mut self, strategy: UpdateStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_remove_unmatched(mut self, remove: bool) -> Self {
        self.remove_unmatched = remove;
        self
    }

    pub fn with_recompute_rigid(mut self, recompute: bool) -> Self {
        self.recompute_rigid = recompute;
        self
    }
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            strategy: DEFAULT_STRATEGY,
            remove_unmatched: DEFAULT_REMOVE_UNMATCHED,
            recompute_rigid: DEFAULT_RECOMPUTE_RIGID,
        }
    }
}
