use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("a comparison needs 2 or 3 repositories, got {0}")]
    InvalidRepositoryCount(usize),
    #[error("repository '{0}' is listed more than once")]
    DuplicateRepository(String),
    #[error("slot {index} is out of range ({slots} configured)")]
    SlotOutOfRange { index: usize, slots: usize },
    #[error("field '{field}' belongs to repository '{found}', not '{expected}'")]
    RepositoryMismatch {
        field: String,
        expected: String,
        found: String,
    },
}

pub type Result<T> = std::result::Result<T, ModelError>;
