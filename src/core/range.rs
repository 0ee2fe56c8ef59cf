// =============================================================================
// RANGE — Valeurs et intervalles demi-ouverts
// =============================================================================
//
// Toutes les valeurs manipulées sont des entiers signés 64 bits : les
// identifiants réels dépassent largement 2^32.
//
// Un ValueRange [start, end) contient start et s'arrête JUSTE AVANT end.
// Un intervalle avec start >= end est vide.
//
// =============================================================================

use std::fmt;

/// Une valeur qui traverse la chaîne
pub type Value = i64;

/// Intervalle demi-ouvert `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ValueRange {
    pub start: Value,
    pub end: Value,
}

impl ValueRange {
    /// Intervalle `[start, end)`
    pub fn new(start: Value, end: Value) -> Self {
        ValueRange { start, end }
    }

    /// Intervalle de `length` valeurs à partir de `start`.
    ///
    /// Retourne `None` si la borne haute ne tient pas dans un `i64`.
    pub fn from_start_len(start: Value, length: Value) -> Option<Self> {
        start.checked_add(length).map(|end| ValueRange { start, end })
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Nombre de valeurs contenues (0 si vide)
    pub fn len(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            self.end.abs_diff(self.start)
        }
    }

    pub fn contains(&self, value: Value) -> bool {
        self.start <= value && value < self.end
    }

    /// Intersection, ou `None` si elle est vide
    pub fn intersect(&self, other: &ValueRange) -> Option<ValueRange> {
        let r = ValueRange {
            start: self.start.max(other.start),
            end: self.end.min(other.end),
        };
        if r.is_empty() { None } else { Some(r) }
    }

    /// Les deux intervalles partagent-ils au moins une valeur ?
    pub fn overlaps(&self, other: &ValueRange) -> bool {
        self.intersect(other).is_some()
    }

    /// Itère sur toutes les valeurs de l'intervalle
    pub fn values(&self) -> impl Iterator<Item = Value> {
        self.start..self.end
    }
}

impl fmt::Display for ValueRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_open_bounds() {
        let r = ValueRange::new(98, 100);
        assert!(r.contains(98));
        assert!(r.contains(99));
        assert!(!r.contains(100));
        assert!(!r.contains(97));
        assert_eq!(r.len(), 2);
    }

    #[test]
    fn test_empty() {
        assert!(ValueRange::new(5, 5).is_empty());
        assert!(ValueRange::new(6, 5).is_empty());
        assert_eq!(ValueRange::new(6, 5).len(), 0);
        assert_eq!(ValueRange::new(5, 5).values().count(), 0);
    }

    #[test]
    fn test_intersect() {
        let a = ValueRange::new(0, 10);
        let b = ValueRange::new(5, 15);
        assert_eq!(a.intersect(&b), Some(ValueRange::new(5, 10)));
        assert!(a.intersect(&ValueRange::new(10, 20)).is_none());
        assert!(!a.overlaps(&ValueRange::new(10, 20)));
    }

    #[test]
    fn test_from_start_len_overflow() {
        assert_eq!(ValueRange::from_start_len(79, 14), Some(ValueRange::new(79, 93)));
        assert!(ValueRange::from_start_len(i64::MAX, 1).is_none());
    }
}
