//! Field and repository definitions.
//!
//! A [`Field`] is one data point definition ("data element") as published by
//! a single repository. Fields are read once and never modified.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Maximum number of repositories in one comparison.
pub const MAX_REPOSITORIES: usize = 3;
/// Minimum number of repositories in one comparison.
pub const MIN_REPOSITORIES: usize = 2;

/// A named data point definition from one repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Stable external identifier, unique within its repository.
    pub id: String,
    /// Human label shown in the source system.
    pub display_name: String,
    /// Alternate label used on data entry forms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_name: Option<String>,
    /// Owning dataset identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository_id: Option<String>,
    /// Owning dataset display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository_name: Option<String>,
}

impl Field {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            form_name: None,
            repository_id: None,
            repository_name: None,
        }
    }

    #[must_use]
    pub fn with_form_name(mut self, form_name: impl Into<String>) -> Self {
        self.form_name = Some(form_name.into());
        self
    }

    /// Tag the field with its owning repository.
    #[must_use]
    pub fn in_repository(mut self, repository: &Repository) -> Self {
        self.repository_id = Some(repository.id.clone());
        self.repository_name = Some(repository.name.clone());
        self
    }

    /// Form name if present and not blank.
    pub fn form_label(&self) -> Option<&str> {
        self.form_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// One of the independent data sources being compared.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Repository {
    pub id: String,
    pub name: String,
}

impl Repository {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// The ordered repositories of one comparison session.
///
/// Slot `i` of every [`LogicalFieldGroup`](crate::LogicalFieldGroup) built
/// from this set belongs to `repositories()[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositorySet {
    repositories: Vec<Repository>,
}

impl RepositorySet {
    pub fn new(repositories: Vec<Repository>) -> Result<Self> {
        let count = repositories.len();
        if !(MIN_REPOSITORIES..=MAX_REPOSITORIES).contains(&count) {
            return Err(ModelError::InvalidRepositoryCount(count));
        }
        for (index, repository) in repositories.iter().enumerate() {
            if repositories[..index].iter().any(|r| r.id == repository.id) {
                return Err(ModelError::DuplicateRepository(repository.id.clone()));
            }
        }
        Ok(Self { repositories })
    }

    pub fn repositories(&self) -> &[Repository] {
        &self.repositories
    }

    pub fn len(&self) -> usize {
        self.repositories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repositories.is_empty()
    }

    pub fn get(&self, slot: usize) -> Option<&Repository> {
        self.repositories.get(slot)
    }

    /// Slot index of the repository with the given id.
    pub fn slot_of(&self, repository_id: &str) -> Option<usize> {
        self.repositories.iter().position(|r| r.id == repository_id)
    }
}

impl<'de> Deserialize<'de> for RepositorySet {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            repositories: Vec<Repository>,
        }
        let raw = Raw::deserialize(deserializer)?;
        Self::new(raw.repositories).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(id: &str) -> Repository {
        Repository::new(id, id.to_uppercase())
    }

    #[test]
    fn repository_set_bounds() {
        assert_eq!(
            RepositorySet::new(vec![repo("a")]),
            Err(ModelError::InvalidRepositoryCount(1))
        );
        assert!(RepositorySet::new(vec![repo("a"), repo("b")]).is_ok());
        assert!(RepositorySet::new(vec![repo("a"), repo("b"), repo("c")]).is_ok());
        assert_eq!(
            RepositorySet::new(vec![repo("a"), repo("b"), repo("c"), repo("d")]),
            Err(ModelError::InvalidRepositoryCount(4))
        );
    }

    #[test]
    fn repository_set_rejects_duplicates() {
        let err = RepositorySet::new(vec![repo("a"), repo("a")]).unwrap_err();
        assert_eq!(err, ModelError::DuplicateRepository("a".to_string()));
    }

    #[test]
    fn blank_form_name_is_ignored() {
        let field = Field::new("f1", "Cases").with_form_name("  ");
        assert_eq!(field.form_label(), None);
    }
}
