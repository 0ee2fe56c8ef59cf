// =============================================================================
// VALIDATE — Vérification d'une chaîne avant résolution
// =============================================================================
//
// Le résolveur suppose une chaîne bien formée. Ce module vérifie :
//   - chaque règle a des champs positifs et des bornes qui tiennent en i64
//   - dans une même transition, les intervalles sources sont disjoints
//   - une seule transition part de chaque catégorie
//   - depuis la base, on atteint le terminal sans trou ni cycle
//
// La validation est optionnelle mais, quand on la demande, elle échoue
// TÔT (à la construction) et rapporte TOUS les problèmes d'un coup.
//
// =============================================================================

use std::collections::HashSet;

use thiserror::Error;

use super::category::Category;
use super::chain::CategoryMapChain;

/// Problème détecté dans une chaîne
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Un champ de règle est négatif
    #[error("{from}-to-{to} rule #{rule}: fields must be non-negative")]
    NegativeRule { from: Category, to: Category, rule: usize },

    /// La borne haute source ou destination déborde d'un i64
    #[error("{from}-to-{to} rule #{rule}: interval end does not fit in 64 bits")]
    RuleOverflow { from: Category, to: Category, rule: usize },

    /// Deux intervalles sources de la même transition se chevauchent
    #[error("{from}-to-{to}: rules #{first} and #{second} have overlapping source intervals")]
    OverlappingRules { from: Category, to: Category, first: usize, second: usize },

    /// Plusieurs transitions partent de la même catégorie
    #[error("more than one map leads out of category '{from}'")]
    DuplicateTransition { from: Category },

    /// Aucune transition ne part d'une catégorie atteignable
    #[error("no map leads out of category '{category}'")]
    MissingTransition { category: Category },

    /// La chaîne revient sur une catégorie déjà visitée
    #[error("chain cycles back to category '{category}'")]
    Cycle { category: Category },
}

/// Vérifie qu'une chaîne est bien formée.
///
/// Conditions :
/// - Règles positives, sans débordement
/// - Intervalles sources disjoints dans chaque transition
/// - Au plus une transition par catégorie source
/// - Un chemin sans cycle de `Category::BASE` à `Category::TERMINAL`
pub fn validate_chain(chain: &CategoryMapChain) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut sources = HashSet::new();

    for map in chain.maps() {
        let (from, to) = (map.from, map.to);

        if !sources.insert(from) {
            errors.push(ValidationError::DuplicateTransition { from });
        }

        // Seules les règles saines participent au test de chevauchement
        let mut sound = Vec::with_capacity(map.rules.len());
        for (i, rule) in map.rules.iter().enumerate() {
            if rule.destination_start < 0 || rule.source_start < 0 || rule.length < 0 {
                errors.push(ValidationError::NegativeRule { from, to, rule: i });
            } else if rule.source_start.checked_add(rule.length).is_none()
                || rule.destination_start.checked_add(rule.length).is_none()
            {
                errors.push(ValidationError::RuleOverflow { from, to, rule: i });
            } else if rule.length > 0 {
                sound.push((i, rule.source_range()));
            }
        }

        for (a, &(first, ra)) in sound.iter().enumerate() {
            for &(second, rb) in &sound[a + 1..] {
                if ra.overlaps(&rb) {
                    errors.push(ValidationError::OverlappingRules { from, to, first, second });
                }
            }
        }
    }

    // Parcours depuis la base
    let mut visited = HashSet::new();
    let mut current = Category::BASE;
    while !current.is_terminal() {
        if !visited.insert(current) {
            errors.push(ValidationError::Cycle { category: current });
            break;
        }
        match chain.map_from(current) {
            Some(map) => current = map.to,
            None => {
                errors.push(ValidationError::MissingTransition { category: current });
                break;
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
