// =============================================================================
// SOLVE — Le pipeline complet : almanach → validation → résolution → minimum
// =============================================================================
//
//   1. (optionnel) valider la chaîne, échouer tôt si elle est mal formée
//   2. lire les graines en VALEURS ou en INTERVALLES
//   3. résoudre le lot
//   4. réduire au minimum des valeurs terminales
//
// C'est une fine couche de réduction : toute la logique est dans `core`.
//
// =============================================================================

use std::fmt;

use tracing::{info, warn};

use crate::config::{ResolveConfig, SeedMode};
use crate::core::batch::{self, BatchError, BatchReport};
use crate::core::range::{Value, ValueRange};
use crate::core::validate;
use crate::error::Result;
use crate::loader::Almanac;

/// Ce qui a été résolu, selon le mode de lecture des graines
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolutionDetail {
    /// Une trace par graine, dans l'ordre
    Values(BatchReport),
    /// Les intervalles de graines réduits
    Ranges(Vec<ValueRange>),
}

/// Résultat du pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// Plus petite valeur terminale
    pub lowest: Value,
    pub detail: SolutionDetail,
    /// Temps de résolution (en microsecondes)
    pub elapsed_us: u128,
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            SolutionDetail::Values(report) => {
                for outcome in &report.outcomes {
                    match &outcome.result {
                        Ok(v) => writeln!(f, "  seed {} → {}", outcome.seed, v)?,
                        Err(e) => writeln!(f, "  seed {} ✗ {}", outcome.seed, e)?,
                    }
                }
            }
            SolutionDetail::Ranges(ranges) => {
                for r in ranges {
                    writeln!(f, "  seeds {} ({} values)", r, r.len())?;
                }
            }
        }
        write!(f, "lowest: {} ({}µs)", self.lowest, self.elapsed_us)
    }
}

/// Exécute le pipeline complet sur un almanach chargé.
pub fn solve(almanac: &Almanac, settings: &ResolveConfig) -> Result<Solution> {
    if settings.validate {
        validate::validate_chain(&almanac.chain)?;
        info!(maps = almanac.chain.len(), rules = almanac.chain.rule_count(), "chain validated");
    }

    let start = std::time::Instant::now();
    let (lowest, detail) = match settings.mode {
        SeedMode::Values => {
            let report = batch::resolve_values(&almanac.seeds, &almanac.chain, settings.parallel);
            for failure in report.failures() {
                if let Err(e) = &failure.result {
                    warn!(seed = failure.seed, error = %e, "trace failed");
                }
            }
            let lowest = match report.lowest() {
                Some(v) => v,
                // Aucune trace réussie : on remonte le premier échec
                None => {
                    return Err(match report.outcomes.iter().find_map(|o| o.result.err()) {
                        Some(e) => e.into(),
                        None => BatchError::Empty.into(),
                    });
                }
            };
            (lowest, SolutionDetail::Values(report))
        }
        SeedMode::Ranges => {
            let ranges = almanac.seeds.ranges()?;
            let lowest = batch::lowest_in_ranges(&ranges, &almanac.chain, settings.range_options())?;
            (lowest, SolutionDetail::Ranges(ranges))
        }
    };
    let elapsed_us = start.elapsed().as_micros();

    info!(lowest, mode = ?settings.mode, elapsed_us = elapsed_us as u64, "resolution done");
    Ok(Solution { lowest, detail, elapsed_us })
}
