// =============================================================================
// MAP — Une transition entre deux catégories
// =============================================================================
//
// Une CategoryMap F : A → B regroupe toutes les RangeRules d'une transition.
//
// Pour une valeur v de A :
//   - on essaie les règles DANS L'ORDRE DÉCLARÉ
//   - la première qui couvre v donne F(v)
//   - si aucune ne couvre v, F(v) = v (identité)
//
// L'identité n'est PAS une erreur : c'est la politique "pas de mapping"
// du domaine.
//
// EXEMPLE :
//
//   seed-to-soil map:
//   50 98 2       98 → 50, 99 → 51
//   52 50 48      50 → 52, ..., 97 → 99
//
//   F(79) = 81, F(98) = 50, F(10) = 10
//
// =============================================================================

use std::fmt;

use super::category::Category;
use super::range::{Value, ValueRange};
use super::rule::RangeRule;

/// Transition `from → to` et ses règles, dans l'ordre déclaré.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryMap {
    pub from: Category,
    pub to: Category,
    pub rules: Vec<RangeRule>,
}

impl CategoryMap {
    /// Crée une transition sans règle (identité partout)
    pub fn new(from: Category, to: Category) -> Self {
        CategoryMap { from, to, rules: Vec::new() }
    }

    pub fn with_rules(from: Category, to: Category, rules: Vec<RangeRule>) -> Self {
        CategoryMap { from, to, rules }
    }

    /// Ajoute une règle `(destination, source, longueur)` en fin de liste
    pub fn add_rule(&mut self, destination_start: Value, source_start: Value, length: Value) -> &mut Self {
        self.rules.push(RangeRule::new(destination_start, source_start, length));
        self
    }

    /// Image de `value` : première règle qui couvre, identité sinon.
    pub fn resolve(&self, value: Value) -> Value {
        self.rules
            .iter()
            .find_map(|rule| rule.try_map(value))
            .unwrap_or(value)
    }

    /// Image d'un intervalle complet.
    ///
    /// Chaque règle, dans l'ordre, prélève la partie qu'elle couvre parmi les
    /// morceaux encore libres ; ce qui reste à la fin passe par l'identité.
    /// La somme des longueurs est conservée.
    pub fn resolve_range(&self, range: ValueRange) -> Vec<ValueRange> {
        let mut pending = vec![range];
        let mut image = Vec::new();

        for rule in &self.rules {
            if pending.is_empty() {
                break;
            }
            let mut next = Vec::with_capacity(pending.len());
            for piece in pending {
                let split = rule.split(piece);
                image.extend(split.mapped);
                next.extend(split.rest);
            }
            pending = next;
        }

        image.extend(pending.into_iter().filter(|r| !r.is_empty()));
        image
    }
}

impl fmt::Display for CategoryMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}-to-{} map:", self.from, self.to)?;
        for rule in &self.rules {
            writeln!(f, "{}", rule)?;
        }
        Ok(())
    }
}
