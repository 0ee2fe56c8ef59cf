// =============================================================================
// CONFIG — Réglages de l'outil (fichier TOML + valeurs par défaut)
// =============================================================================
//
//   [input]
//   path = "input.txt"
//
//   [resolve]
//   mode = "values"          # values | ranges
//   strategy = "interval"    # interval | brute-force
//   validate = true
//   parallel = true
//   max_candidates = 100000000
//
//   [logging]
//   level = "info"
//
// Fichier absent → valeurs par défaut. Rien n'est jamais écrit sur disque.
// Les options de la ligne de commande écrasent ensuite ces valeurs.
//
// =============================================================================

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::batch::{RangeOptions, Strategy};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub input: InputConfig,
    pub resolve: ResolveConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub path: PathBuf,
}

/// Lecture des graines : une par une, ou en paires (début, longueur)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SeedMode {
    #[default]
    Values,
    Ranges,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveConfig {
    pub mode: SeedMode,
    pub strategy: Strategy,
    /// Valider la chaîne avant toute résolution
    pub validate: bool,
    pub parallel: bool,
    /// Budget de valeurs pour la stratégie `brute-force`
    pub max_candidates: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self { path: PathBuf::from("input.txt") }
    }
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            mode: SeedMode::Values,
            strategy: Strategy::Interval,
            validate: true,
            parallel: true,
            max_candidates: Some(100_000_000),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string() }
    }
}

impl ResolveConfig {
    pub fn range_options(&self) -> RangeOptions {
        RangeOptions {
            strategy: self.strategy,
            max_candidates: self.max_candidates,
            parallel: self.parallel,
        }
    }
}

impl Config {
    /// Lit `path` s'il existe, sinon retourne la configuration par défaut.
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            toml::from_str(&contents).with_context(|| format!("parsing config {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }
}
