// =============================================================================
// BATCH — Résoudre un lot de graines et garder la plus petite valeur terminale
// =============================================================================
//
// Deux lectures du même lot de graines :
//
//   1. VALEURS : chaque nombre est une graine   →  resolve_values
//   2. INTERVALLES : les nombres vont par paires (début, longueur)
//                                               →  lowest_in_ranges
//
// Chaque trace est indépendante : l'échec d'une graine n'empêche pas les
// autres d'aboutir, et l'ordre de traitement (ou le parallélisme via rayon)
// ne change aucun résultat.
//
// Pour les intervalles, deux stratégies :
//   - Interval   : on fait traverser la chaîne aux intervalles entiers
//                  (coût indépendant de leur largeur)
//   - BruteForce : on trace chaque valeur, sous un budget optionnel vérifié
//                  AVANT de commencer
//
// =============================================================================

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::chain::CategoryMapChain;
use super::range::{Value, ValueRange};
use super::resolve::{self, ResolveError};

/// Les valeurs de départ, dans l'ordre où elles ont été déclarées.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeedSet {
    pub values: Vec<Value>,
}

/// Lot de graines illisible en paires
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeedError {
    #[error("{count} seed values cannot be read as (start, length) pairs")]
    UnpairedSeed { count: usize },

    #[error("seed range starting at {start} with length {length} is invalid")]
    InvalidRange { start: Value, length: Value },
}

impl SeedSet {
    pub fn new(values: Vec<Value>) -> Self {
        SeedSet { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Lit les valeurs comme des paires `(début, longueur)`.
    pub fn ranges(&self) -> Result<Vec<ValueRange>, SeedError> {
        if self.values.len() % 2 != 0 {
            return Err(SeedError::UnpairedSeed { count: self.values.len() });
        }
        self.values
            .chunks_exact(2)
            .map(|pair| {
                let (start, length) = (pair[0], pair[1]);
                if length < 0 {
                    return Err(SeedError::InvalidRange { start, length });
                }
                ValueRange::from_start_len(start, length)
                    .ok_or(SeedError::InvalidRange { start, length })
            })
            .collect()
    }
}

/// Stratégie de réduction pour les lots d'intervalles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Traverse la chaîne avec des intervalles entiers
    #[default]
    Interval,
    /// Trace chaque valeur une par une
    BruteForce,
}

/// Échec d'une réduction de lot
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BatchError {
    #[error("no seed to resolve")]
    Empty,

    /// `candidates` vaut `u64::MAX` quand le total déborde
    #[error("{candidates} candidate seeds exceed the budget of {budget}")]
    BudgetExceeded { candidates: u64, budget: u64 },

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Seeds(#[from] SeedError),
}

/// Résultat d'une graine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedOutcome {
    pub seed: Value,
    pub result: Result<Value, ResolveError>,
}

/// Résultats d'un lot, dans l'ordre des graines
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BatchReport {
    pub outcomes: Vec<SeedOutcome>,
}

impl BatchReport {
    /// Plus petite valeur terminale parmi les traces réussies
    pub fn lowest(&self) -> Option<Value> {
        self.outcomes.iter().filter_map(|o| o.result.ok()).min()
    }

    /// Les traces en échec
    pub fn failures(&self) -> impl Iterator<Item = &SeedOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }
}

/// Trace chaque graine indépendamment.
pub fn resolve_values(seeds: &SeedSet, chain: &CategoryMapChain, parallel: bool) -> BatchReport {
    let outcome = |&seed: &Value| SeedOutcome { seed, result: resolve::trace(seed, chain) };

    let outcomes: Vec<SeedOutcome> = if parallel {
        seeds.values.par_iter().map(outcome).collect()
    } else {
        seeds.values.iter().map(outcome).collect()
    };

    let report = BatchReport { outcomes };
    debug!(
        seeds = seeds.len(),
        failures = report.failures().count(),
        parallel,
        "resolved seed values"
    );
    report
}

/// Options de réduction sur intervalles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RangeOptions {
    pub strategy: Strategy,
    /// Nombre maximal de valeurs tracées en `BruteForce`
    pub max_candidates: Option<u64>,
    pub parallel: bool,
}

/// Plus petite valeur terminale atteinte depuis l'un des intervalles.
pub fn lowest_in_ranges(
    ranges: &[ValueRange],
    chain: &CategoryMapChain,
    options: RangeOptions,
) -> Result<Value, BatchError> {
    if ranges.iter().all(|r| r.is_empty()) {
        return Err(BatchError::Empty);
    }

    // None : le total ne tient pas dans un u64
    let candidates = ranges
        .iter()
        .try_fold(0u64, |total, r| total.checked_add(r.len()));

    debug!(ranges = ranges.len(), ?candidates, strategy = ?options.strategy, "reducing seed ranges");

    match options.strategy {
        Strategy::Interval => {
            let mut lowest: Option<Value> = None;
            for range in ranges.iter().filter(|r| !r.is_empty()) {
                let image = resolve::trace_range(*range, chain)?;
                lowest = image.iter().map(|r| r.start).chain(lowest).min();
            }
            lowest.ok_or(BatchError::Empty)
        }
        Strategy::BruteForce => {
            let budget = options.max_candidates.unwrap_or(u64::MAX);
            match candidates {
                Some(candidates) if candidates <= budget => {}
                Some(candidates) => return Err(BatchError::BudgetExceeded { candidates, budget }),
                None => return Err(BatchError::BudgetExceeded { candidates: u64::MAX, budget }),
            }
            let lowest = if options.parallel {
                ranges
                    .par_iter()
                    .flat_map_iter(|r| r.values())
                    .map(|v| resolve::trace(v, chain))
                    .try_reduce(|| Value::MAX, |a, b| Ok(a.min(b)))?
            } else {
                let mut lowest = Value::MAX;
                for v in ranges.iter().flat_map(|r| r.values()) {
                    lowest = lowest.min(resolve::trace(v, chain)?);
                }
                lowest
            };
            Ok(lowest)
        }
    }
}
