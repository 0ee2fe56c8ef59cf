// =============================================================================
// CHAIN — La chaîne complète des transitions, de la base au terminal
// =============================================================================
//
// La CategoryMapChain est le "schéma" du système : un graphe dont
//   - les NŒUDS sont les catégories
//   - les ARÊTES sont les CategoryMaps (from → to)
//
// Une chaîne bien formée est un CHEMIN simple :
//
//   seed ──▶ soil ──▶ fertilizer ──▶ ... ──▶ location
//
// c'est-à-dire : toute catégorie non terminale atteignable depuis la base
// possède exactement UNE transition sortante.
//
// La chaîne est construite une fois puis n'est plus jamais modifiée ; elle
// peut donc être partagée entre threads sans synchronisation.
//
// =============================================================================

use std::collections::HashMap;
use std::fmt;

use super::category::Category;
use super::map::CategoryMap;
use super::validate::{self, ValidationError};

/// Les transitions, dans l'ordre de déclaration, indexées par catégorie source.
#[derive(Debug, Clone, Default)]
pub struct CategoryMapChain {
    maps: Vec<CategoryMap>,
    /// from → position dans `maps` (première déclaration)
    index: HashMap<Category, usize>,
}

impl CategoryMapChain {
    /// Construit la chaîne SANS validation.
    ///
    /// Une entrée qui viole les invariants (règles qui se chevauchent,
    /// transition manquante, cycle...) donne des résultats non spécifiés
    /// à la résolution, jamais de corruption. Si deux transitions partent de
    /// la même catégorie, seule la première est utilisée.
    pub fn new(maps: Vec<CategoryMap>) -> Self {
        let mut index = HashMap::with_capacity(maps.len());
        for (i, map) in maps.iter().enumerate() {
            index.entry(map.from).or_insert(i);
        }
        CategoryMapChain { maps, index }
    }

    /// Construit la chaîne et refuse toute entrée mal formée.
    pub fn validated(maps: Vec<CategoryMap>) -> Result<Self, Vec<ValidationError>> {
        let chain = CategoryMapChain::new(maps);
        validate::validate_chain(&chain)?;
        Ok(chain)
    }

    /// La transition qui part de `category`, s'il y en a une
    pub fn map_from(&self, category: Category) -> Option<&CategoryMap> {
        self.index.get(&category).map(|&i| &self.maps[i])
    }

    /// Toutes les transitions, dans l'ordre déclaré
    pub fn maps(&self) -> &[CategoryMap] {
        &self.maps
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }

    /// Nombre total de règles, toutes transitions confondues
    pub fn rule_count(&self) -> usize {
        self.maps.iter().map(|m| m.rules.len()).sum()
    }
}

impl FromIterator<CategoryMap> for CategoryMapChain {
    fn from_iter<I: IntoIterator<Item = CategoryMap>>(iter: I) -> Self {
        CategoryMapChain::new(iter.into_iter().collect())
    }
}

impl fmt::Display for CategoryMapChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, map) in self.maps.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", map)?;
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_source() {
        let chain = CategoryMapChain::new(vec![
            CategoryMap::new(Category::Soil, Category::Location),
            CategoryMap::new(Category::Seed, Category::Soil),
        ]);
        assert_eq!(chain.map_from(Category::Seed).map(|m| m.to), Some(Category::Soil));
        assert_eq!(chain.map_from(Category::Soil).map(|m| m.to), Some(Category::Location));
        assert!(chain.map_from(Category::Water).is_none());
        assert_eq!(chain.len(), 2);
    }

    #[test]
    fn test_first_duplicate_is_indexed() {
        let chain = CategoryMapChain::new(vec![
            CategoryMap::new(Category::Seed, Category::Soil),
            CategoryMap::new(Category::Seed, Category::Water),
        ]);
        assert_eq!(chain.map_from(Category::Seed).map(|m| m.to), Some(Category::Soil));
    }

    #[test]
    fn test_validated_rejects_incomplete_chain() {
        let errors = CategoryMapChain::validated(vec![CategoryMap::new(Category::Seed, Category::Soil)])
            .unwrap_err();
        assert_eq!(errors, vec![ValidationError::MissingTransition { category: Category::Soil }]);
    }

    #[test]
    fn test_chain_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CategoryMapChain>();
    }

    #[test]
    fn test_rule_count() {
        let mut a = CategoryMap::new(Category::Seed, Category::Soil);
        a.add_rule(50, 98, 2).add_rule(52, 50, 48);
        let mut b = CategoryMap::new(Category::Soil, Category::Location);
        b.add_rule(0, 15, 37);
        let chain: CategoryMapChain = vec![a, b].into_iter().collect();
        assert_eq!(chain.rule_count(), 3);
    }
}
