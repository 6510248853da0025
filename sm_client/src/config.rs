//! Client configuration management.
//!
//! Merges command-line overrides with `SLOTS_*` environment variables.

use slot_machine::{Money, RandomReels};

use crate::commands::parse_deposit;

/// Complete client configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientConfig {
    /// Seed for the reel generator; a fresh one is drawn when unset
    pub seed: Option<u64>,
    /// Opening deposit that skips the deposit prompt
    pub deposit: Option<Money>,
}

impl ClientConfig {
    /// Load configuration from environment variables with optional CLI
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns error if a value is present but invalid
    pub fn from_env(
        seed_override: Option<u64>,
        deposit_override: Option<String>,
    ) -> Result<Self, ConfigError> {
        Self::from_lookup(seed_override, deposit_override, |key| {
            std::env::var(key).ok()
        })
    }

    /// Same as [`ClientConfig::from_env`] with variables read through
    /// `lookup`.
    pub fn from_lookup(
        seed_override: Option<u64>,
        deposit_override: Option<String>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let seed = match seed_override {
            Some(seed) => Some(seed),
            None => lookup("SLOTS_SEED")
                .map(|v| {
                    v.trim().parse().map_err(|_| ConfigError::Invalid {
                        var: "SLOTS_SEED".to_string(),
                        reason: format!("'{v}' is not an unsigned 64-bit integer"),
                    })
                })
                .transpose()?,
        };

        let (var, raw_deposit) = match deposit_override {
            Some(raw) => ("--deposit", Some(raw)),
            None => ("SLOTS_DEPOSIT", lookup("SLOTS_DEPOSIT")),
        };
        let deposit = raw_deposit
            .map(|raw| {
                parse_deposit(&raw).map_err(|e| ConfigError::Invalid {
                    var: var.to_string(),
                    reason: e.to_string(),
                })
            })
            .transpose()?;

        Ok(Self { seed, deposit })
    }

    /// Reel source for a new session.
    #[must_use]
    pub fn reels(&self) -> RandomReels {
        match self.seed {
            Some(seed) => RandomReels::seeded(seed),
            None => RandomReels::new(),
        }
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}
