//! Error types for mapping session edits.

use recon_model::ModelError;
use thiserror::Error;

/// Errors from editing a [`MappingSession`](crate::MappingSession).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// No group at this index.
    #[error("group {0} not found")]
    GroupNotFound(usize),
    /// No repository slot at this index.
    #[error("slot {slot} not found ({slots} repositories configured)")]
    SlotNotFound { slot: usize, slots: usize },
    /// The field already belongs to another group.
    #[error("field '{field}' is already mapped in group '{group}'")]
    FieldAlreadyAssigned { field: String, group: String },
    /// The field is not in any group.
    #[error("field '{0}' is not mapped")]
    FieldNotAssigned(String),
    #[error(transparent)]
    Model(#[from] ModelError),
}

pub type Result<T> = std::result::Result<T, MappingError>;
