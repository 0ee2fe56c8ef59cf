// =============================================================================
// CATEGORY — Les étapes nommées du pipeline
// =============================================================================
//
// Une Category est un OBJET de la chaîne : une étape par laquelle passe
// chaque valeur avant d'atteindre la catégorie terminale.
//
// L'ensemble est FERMÉ et ORDONNÉ :
//
//   seed → soil → fertilizer → water → light → temperature → humidity → location
//   (base)                                                             (terminal)
//
// Le résolveur n'exploite pas cet ordre : seules l'appartenance et l'égalité
// comptent. L'ordre sert à l'affichage et à la validation.
//
// =============================================================================

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Une étape du pipeline.
///
/// `Seed` est la catégorie de base, `Location` la seule catégorie terminale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Seed,
    Soil,
    Fertilizer,
    Water,
    Light,
    Temperature,
    Humidity,
    Location,
}

impl Category {
    /// Catégorie de départ de toute trace
    pub const BASE: Category = Category::Seed;

    /// Catégorie d'arrêt de toute trace
    pub const TERMINAL: Category = Category::Location;

    /// Toutes les catégories, dans l'ordre du pipeline
    pub const ALL: [Category; 8] = [
        Category::Seed,
        Category::Soil,
        Category::Fertilizer,
        Category::Water,
        Category::Light,
        Category::Temperature,
        Category::Humidity,
        Category::Location,
    ];

    /// Nom tel qu'il apparaît dans les en-têtes `x-to-y map:`
    pub fn name(&self) -> &'static str {
        match self {
            Category::Seed => "seed",
            Category::Soil => "soil",
            Category::Fertilizer => "fertilizer",
            Category::Water => "water",
            Category::Light => "light",
            Category::Temperature => "temperature",
            Category::Humidity => "humidity",
            Category::Location => "location",
        }
    }

    /// Position dans le pipeline (0 pour `Seed`)
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn is_terminal(&self) -> bool {
        *self == Category::TERMINAL
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Nom de catégorie inconnu
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.name() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
