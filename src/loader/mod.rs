// =============================================================================
// LOADER — Couche d'entrée : du texte vers le modèle de données
// =============================================================================
//
// Le loader traduit une entrée externe en Almanac (graines + chaîne). Grâce
// au trait Loader, on peut supporter plusieurs formats :
//   - le format texte "almanach" (seeds: ..., x-to-y map: ...)
//   - un document TOML structuré
//
// Le cœur (module core) ne connaît JAMAIS les formats d'entrée. Les erreurs
// de lecture (nombre illisible, catégorie inconnue, en-tête manquant...)
// appartiennent au loader, pas au résolveur.
//
// =============================================================================

pub mod text;
pub mod structured;

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::core::batch::SeedSet;
use crate::core::chain::CategoryMapChain;

pub use structured::StructuredLoader;
pub use text::TextLoader;

/// Ce qu'un loader livre au cœur : les graines et la chaîne.
#[derive(Debug, Clone, Default)]
pub struct Almanac {
    pub seeds: SeedSet,
    pub chain: CategoryMapChain,
}

/// Rendu au format texte, relisible par `TextLoader`
impl fmt::Display for Almanac {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "seeds:")?;
        for seed in &self.seeds.values {
            write!(f, " {}", seed)?;
        }
        writeln!(f)?;
        for map in self.chain.maps() {
            writeln!(f)?;
            write!(f, "{}", map)?;
        }
        Ok(())
    }
}

/// Erreur de chargement. Les numéros de ligne commencent à 1.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no 'seeds:' line in input")]
    MissingSeeds,

    #[error("line {line}: second 'seeds:' line")]
    DuplicateSeeds { line: usize },

    #[error("line {line}: unknown category '{name}'")]
    UnknownCategory { line: usize, name: String },

    #[error("line {line}: '{token}' is not a non-negative 64-bit integer")]
    InvalidNumber { line: usize, token: String },

    #[error("line {line}: expected 3 numbers in a range rule, found {found}")]
    MalformedRule { line: usize, found: usize },

    #[error("line {line}: unexpected content '{content}'")]
    UnexpectedLine { line: usize, content: String },

    #[error("structured input: {0}")]
    Structured(#[from] toml::de::Error),
}

/// Trait abstrait pour tous les formats d'entrée.
///
/// Le loader livre une chaîne structurellement complète ; il ne la valide
/// pas (c'est le rôle de `core::validate`).
pub trait Loader {
    /// Lit une entrée complète
    fn load(&self, input: &str) -> Result<Almanac, LoadError>;

    /// Retourne le nom du format
    fn name(&self) -> &str;
}

/// Choisit le loader d'après l'extension : `.toml` → structuré, sinon texte.
pub fn for_path(path: &Path) -> Box<dyn Loader> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("toml") => Box::new(StructuredLoader),
        _ => Box::new(TextLoader),
    }
}

/// Lit et charge un fichier avec le loader adapté à son extension.
pub fn load_file(path: &Path) -> Result<Almanac, LoadError> {
    let input = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let loader = for_path(path);
    debug!(path = %path.display(), format = loader.name(), "loading almanac");
    loader.load(&input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_path_picks_format() {
        assert_eq!(for_path(Path::new("input.toml")).name(), "structured");
        assert_eq!(for_path(Path::new("INPUT.TOML")).name(), "structured");
        assert_eq!(for_path(Path::new("input.txt")).name(), "text");
        assert_eq!(for_path(Path::new("input")).name(), "text");
    }

    #[test]
    fn test_load_file_missing() {
        let err = load_file(Path::new("/nonexistent/almanac.txt")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
