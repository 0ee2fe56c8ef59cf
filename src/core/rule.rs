// =============================================================================
// RULE — Une règle d'intervalle : source → destination à décalage constant
// =============================================================================
//
// Une RangeRule (d, s, l) envoie l'intervalle source [s, s+l) sur
// l'intervalle destination [d, d+l), valeur par valeur :
//
//     s     → d
//     s+1   → d+1
//     ...
//     s+l-1 → d+l-1
//
// Hors de [s, s+l), la règle ne dit rien (None). C'est la CategoryMap qui
// décide alors de l'identité.
//
// =============================================================================

use std::fmt;

use super::range::{Value, ValueRange};

/// Règle `(destination_start, source_start, length)`.
///
/// Les trois champs sont censés être positifs ou nuls et les bornes hautes
/// tenir dans un `i64` ; `validate` le vérifie, pas le constructeur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RangeRule {
    pub destination_start: Value,
    pub source_start: Value,
    pub length: Value,
}

/// Découpage d'un intervalle par une règle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuleSplit {
    /// La partie couverte, déjà traduite dans l'espace destination
    pub mapped: Option<ValueRange>,
    /// Les morceaux non couverts (au plus deux : avant et après)
    pub rest: Vec<ValueRange>,
}

impl RangeRule {
    pub fn new(destination_start: Value, source_start: Value, length: Value) -> Self {
        RangeRule { destination_start, source_start, length }
    }

    /// Image de `value` si elle tombe dans l'intervalle source.
    ///
    /// Aucun calcul intermédiaire ne déborde, quelle que soit l'entrée.
    /// Une image doit rester sous `i64::MAX`, borne exclusive de tout
    /// `ValueRange` ; sinon la règle ne couvre pas `value`.
    pub fn try_map(&self, value: Value) -> Option<Value> {
        let offset = value.checked_sub(self.source_start)?;
        if offset >= 0 && offset < self.length {
            self.destination_start
                .checked_add(offset)
                .filter(|&image| image < Value::MAX)
        } else {
            None
        }
    }

    /// `[source_start, source_start + length)`
    pub fn source_range(&self) -> ValueRange {
        ValueRange::new(self.source_start, self.source_start.saturating_add(self.length))
    }

    /// `[destination_start, destination_start + length)`
    pub fn destination_range(&self) -> ValueRange {
        ValueRange::new(
            self.destination_start,
            self.destination_start.saturating_add(self.length),
        )
    }

    /// Découpe `range` en partie couverte (traduite) et reste.
    pub fn split(&self, range: ValueRange) -> RuleSplit {
        if range.is_empty() {
            return RuleSplit::default();
        }
        let source = self.source_range();
        let Some(hit) = range.intersect(&source) else {
            return RuleSplit { mapped: None, rest: vec![range] };
        };

        // Calcul en i128 : les règles non validées peuvent pousser les images
        // au-delà de i64::MAX. Cette partie reste non couverte, comme dans
        // try_map.
        let delta = i128::from(self.destination_start) - i128::from(self.source_start);
        let fits_end = (i128::from(Value::MAX) - delta).min(i128::from(hit.end));

        let mut rest = Vec::with_capacity(2);
        if range.start < hit.start {
            rest.push(ValueRange::new(range.start, hit.start));
        }
        if fits_end <= i128::from(hit.start) {
            rest.push(ValueRange::new(hit.start, range.end));
            return RuleSplit { mapped: None, rest };
        }

        // hit.start ≤ fits_end ≤ hit.end : les bornes tiennent dans un i64
        let covered_end = fits_end as Value;
        let mapped = ValueRange::new(
            (i128::from(hit.start) + delta) as Value,
            (fits_end + delta) as Value,
        );
        if covered_end < range.end {
            rest.push(ValueRange::new(covered_end, range.end));
        }
        RuleSplit { mapped: Some(mapped), rest }
    }
}

/// Format d'entrée : `destination source longueur`
impl fmt::Display for RangeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.destination_start, self.source_start, self.length)
    }
}
