// =============================================================================
// RESOLVE — Le résolveur : faire traverser la chaîne à une valeur
// =============================================================================
//
// Vu comme une machine à états :
//   - états       = catégories
//   - transitions = CategoryMaps
//   - état initial = Category::BASE, état final = Category::TERMINAL
//
// ALGORITHME (trace) :
//   (cat, v) ← (BASE, start)
//   tant que cat ≠ TERMINAL :
//     F ← la transition qui part de cat     (sinon : MissingTransition)
//     v ← F(v)
//     cat ← F.to                            (déjà visitée : Cycle)
//   retourner v
//
// Chaque transition est franchie au plus une fois par trace : une chaîne qui
// revient sur une catégorie est refusée immédiatement au lieu de boucler.
// Comme il n'y a que Category::ALL.len() catégories, une trace fait au plus
// autant d'étapes.
//
// Le résolveur ne garde AUCUN état entre deux appels et ne modifie jamais la
// chaîne : on peut l'appeler depuis plusieurs threads sur la même chaîne.
//
// =============================================================================

use thiserror::Error;
use tracing::trace;

use super::category::Category;
use super::chain::CategoryMapChain;
use super::map::CategoryMap;
use super::range::{Value, ValueRange};

/// Échec d'une trace. Fatal pour cette trace seulement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// Aucune transition ne part de la catégorie courante
    #[error("no map leads out of category '{category}'")]
    MissingTransition { category: Category },

    /// La chaîne ramène sur une catégorie déjà traversée
    #[error("chain cycles back to category '{category}'")]
    Cycle { category: Category },
}

/// Parcourt la chaîne depuis la base et appelle `step` à chaque transition.
fn walk<F>(chain: &CategoryMapChain, mut step: F) -> Result<(), ResolveError>
where
    F: FnMut(&CategoryMap),
{
    let mut visited = [false; Category::ALL.len()];
    let mut current = Category::BASE;

    while !current.is_terminal() {
        if std::mem::replace(&mut visited[current.index()], true) {
            return Err(ResolveError::Cycle { category: current });
        }
        let map = chain
            .map_from(current)
            .ok_or(ResolveError::MissingTransition { category: current })?;
        step(map);
        current = map.to;
    }
    Ok(())
}

/// Valeur terminale de `start` (associée à la catégorie de base).
pub fn trace(start: Value, chain: &CategoryMapChain) -> Result<Value, ResolveError> {
    let mut value = start;
    walk(chain, |map| {
        let next = map.resolve(value);
        trace!(from = %map.from, to = %map.to, value, next, "step");
        value = next;
    })?;
    Ok(value)
}

/// Comme `trace`, mais retourne chaque étape : `(catégorie, valeur)` de la
/// base jusqu'au terminal inclus.
pub fn trace_path(start: Value, chain: &CategoryMapChain) -> Result<Vec<(Category, Value)>, ResolveError> {
    let mut path = vec![(Category::BASE, start)];
    let mut value = start;
    walk(chain, |map| {
        value = map.resolve(value);
        path.push((map.to, value));
    })?;
    Ok(path)
}

/// Image terminale d'un intervalle entier de valeurs de base.
///
/// Les intervalles sont découpés aux bornes des règles à chaque étape ; le
/// coût dépend du nombre de règles, pas de la largeur de `range`. Pour tout
/// `v` de `range`, `trace(v)` appartient à l'un des intervalles retournés.
pub fn trace_range(range: ValueRange, chain: &CategoryMapChain) -> Result<Vec<ValueRange>, ResolveError> {
    let mut ranges = if range.is_empty() { Vec::new() } else { vec![range] };
    walk(chain, |map| {
        ranges = ranges.iter().flat_map(|r| map.resolve_range(*r)).collect();
        trace!(from = %map.from, to = %map.to, pieces = ranges.len(), "range step");
    })?;
    Ok(ranges)
}

// =============================================================================
// TESTS
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// seed → soil (50 98 2), soil → location (0 15 37)
    fn two_stage() -> CategoryMapChain {
        let mut a = CategoryMap::new(Category::Seed, Category::Soil);
        a.add_rule(50, 98, 2);
        let mut b = CategoryMap::new(Category::Soil, Category::Location);
        b.add_rule(0, 15, 37);
        CategoryMapChain::new(vec![a, b])
    }

    #[test]
    fn test_trace_identity_all_the_way() {
        assert_eq!(trace(79, &two_stage()), Ok(79));
    }

    #[test]
    fn test_trace_with_matches() {
        assert_eq!(trace(98, &two_stage()), Ok(35));
    }

    #[test]
    fn test_trace_is_deterministic() {
        let chain = two_stage();
        assert_eq!(trace(99, &chain), trace(99, &chain));
    }

    #[test]
    fn test_missing_transition_names_category() {
        let mut a = CategoryMap::new(Category::Seed, Category::Soil);
        a.add_rule(50, 98, 2);
        let chain = CategoryMapChain::new(vec![a]);
        let err = trace(79, &chain).unwrap_err();
        assert_eq!(err, ResolveError::MissingTransition { category: Category::Soil });
        assert_eq!(err.to_string(), "no map leads out of category 'soil'");
    }

    #[test]
    fn test_cycle_fails_fast() {
        let chain = CategoryMapChain::new(vec![
            CategoryMap::new(Category::Seed, Category::Soil),
            CategoryMap::new(Category::Soil, Category::Water),
            CategoryMap::new(Category::Water, Category::Soil),
        ]);
        assert_eq!(trace(1, &chain), Err(ResolveError::Cycle { category: Category::Soil }));
        assert_eq!(
            trace_range(ValueRange::new(0, 10), &chain),
            Err(ResolveError::Cycle { category: Category::Soil })
        );
    }

    #[test]
    fn test_trace_path() {
        let path = trace_path(98, &two_stage()).unwrap();
        assert_eq!(
            path,
            vec![(Category::Seed, 98), (Category::Soil, 50), (Category::Location, 35)]
        );
    }

    #[test]
    fn test_trace_range_two_stage() {
        let mut image = trace_range(ValueRange::new(96, 101), &two_stage()).unwrap();
        image.sort();
        // 96, 97 → identité ; 98, 99 → 50, 51 → 35, 36 ; 100 → identité
        assert_eq!(
            image,
            vec![ValueRange::new(35, 37), ValueRange::new(96, 98), ValueRange::new(100, 101)]
        );
    }

    #[test]
    fn test_trace_range_empty() {
        assert_eq!(trace_range(ValueRange::new(5, 5), &two_stage()), Ok(vec![]));
    }

    proptest! {
        #[test]
        fn prop_trace_range_min_matches_brute_force(start in 0i64..120, width in 1i64..40) {
            let chain = two_stage();
            let brute = (start..start + width).map(|v| trace(v, &chain).unwrap()).min();
            let fast = trace_range(ValueRange::new(start, start + width), &chain)
                .unwrap()
                .iter()
                .map(|r| r.start)
                .min();
            prop_assert_eq!(brute, fast);
        }
    }
}
