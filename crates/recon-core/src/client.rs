//! Interface to the repositories being compared.
//!
//! Fetching is the caller's business; the reconciler only ever sees the
//! collected [`ValuesByRepository`].

use std::collections::BTreeMap;

use recon_model::{Field, ObservedValue, Repository, RepositorySet, ValuesByRepository};
use thiserror::Error;
use tracing::{debug, info_span};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("repository '{0}' not found")]
    UnknownRepository(String),
    #[error("request to repository '{repository}' failed: {message}")]
    Request { repository: String, message: String },
}

/// Source of field definitions and reported values.
pub trait RepositoryClient {
    /// Field definitions published by a repository.
    fn fields(&self, repository_id: &str) -> Result<Vec<Field>, ClientError>;

    /// Values a repository reported for one org unit and period.
    fn values(
        &self,
        repository_id: &str,
        org_unit: &str,
        period: &str,
    ) -> Result<Vec<ObservedValue>, ClientError>;
}

/// Progress after each repository has been fetched.
#[derive(Debug, Clone, Copy)]
pub struct FetchProgress<'a> {
    pub completed: usize,
    pub total: usize,
    pub repository: &'a Repository,
}

/// Fetch values from each repository in slot order, one at a time.
///
/// `on_progress` runs after every completed fetch. The first failure stops
/// the collection.
pub fn collect_values<C, F>(
    client: &C,
    repositories: &RepositorySet,
    org_unit: &str,
    period: &str,
    mut on_progress: F,
) -> Result<ValuesByRepository, ClientError>
where
    C: RepositoryClient + ?Sized,
    F: FnMut(FetchProgress<'_>),
{
    let span = info_span!("collect_values", org_unit, period);
    let _guard = span.enter();

    let total = repositories.len();
    let mut collected = ValuesByRepository::new();
    for (index, repository) in repositories.repositories().iter().enumerate() {
        let values = client.values(&repository.id, org_unit, period)?;
        debug!(repository = %repository.id, count = values.len(), "fetched values");
        collected.insert(repository.id.clone(), values);
        on_progress(FetchProgress {
            completed: index + 1,
            total,
            repository,
        });
    }
    Ok(collected)
}

/// Fetch field definitions for each repository, tagging every field with its owner.
pub fn collect_fields<C>(
    client: &C,
    repositories: &RepositorySet,
) -> Result<BTreeMap<String, Vec<Field>>, ClientError>
where
    C: RepositoryClient + ?Sized,
{
    let mut collected = BTreeMap::new();
    for repository in repositories.repositories() {
        let fields: Vec<Field> = client
            .fields(&repository.id)?
            .into_iter()
            .map(|field| field.in_repository(repository))
            .collect();
        debug!(repository = %repository.id, count = fields.len(), "fetched fields");
        collected.insert(repository.id.clone(), fields);
    }
    Ok(collected)
}
