//! Field label similarity and automatic field mapping.
//!
//! [`score_similarity`] compares two labels, [`AutoMapper`] pairs the fields
//! of two repositories greedily, and [`MappingSession`] holds the resulting
//! field groups for manual review and editing.

pub mod engine;
pub mod error;
pub mod normalize;
pub mod session;
pub mod similarity;

pub use engine::{
    AutoMapper, ConfidenceThresholds, DEFAULT_MIN_SIMILARITY, MappingResult,
    generate_auto_mappings,
};
pub use error::{MappingError, Result};
pub use normalize::{key_terms, normalize_label, shared_key_terms};
pub use session::MappingSession;
pub use similarity::score_similarity;
