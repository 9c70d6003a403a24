//! Reconciliation of values reported by two or three repositories.
//!
//! [`reconcile`] compares the values mapped into one
//! [`LogicalFieldGroup`](recon_model::LogicalFieldGroup) for a single org
//! unit and period, suggests a consensus value and classifies the outcome.
//! Everything here is synchronous and free of I/O; fetching goes through
//! the [`RepositoryClient`] interface implemented by the caller.

pub mod client;
pub mod consensus;
pub mod reconcile;
pub mod token;

pub use client::{ClientError, FetchProgress, RepositoryClient, collect_fields, collect_values};
pub use consensus::consensus_value;
pub use reconcile::{reconcile, reconcile_all, summarize};
pub use token::{IssuedToken, TokenCache};
