// =============================================================================
// ERROR — Erreur de haut niveau de la bibliothèque
// =============================================================================
//
// Chaque couche garde son enum (ResolveError, ValidationError, LoadError,
// SeedError, BatchError). AlmanacError les regroupe pour qui pilote tout le
// pipeline. La configuration passe par anyhow (config::Config::load).
//
// =============================================================================

use thiserror::Error;

use crate::core::batch::{BatchError, SeedError};
use crate::core::resolve::ResolveError;
use crate::core::validate::ValidationError;
use crate::loader::LoadError;

#[derive(Error, Debug)]
pub enum AlmanacError {
    /// Input could not be read or parsed
    #[error("load error: {0}")]
    Load(#[from] LoadError),

    /// The chain failed validation
    #[error("invalid chain: {}", join(.0))]
    Validation(Vec<ValidationError>),

    /// A single trace failed
    #[error("resolve error: {0}")]
    Resolve(#[from] ResolveError),

    #[error("seed error: {0}")]
    Seeds(#[from] SeedError),

    #[error("batch error: {0}")]
    Batch(#[from] BatchError),
}

impl From<Vec<ValidationError>> for AlmanacError {
    fn from(errors: Vec<ValidationError>) -> Self {
        AlmanacError::Validation(errors)
    }
}

fn join(errors: &[ValidationError]) -> String {
    errors.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; ")
}

pub type Result<T, E = AlmanacError> = std::result::Result<T, E>;
