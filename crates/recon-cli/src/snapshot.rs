//! JSON snapshot of the repositories being compared.
//!
//! ```json
//! {
//!   "repositories": [
//!     { "id": "hmis", "name": "HMIS", "fields": [...], "values": [...] }
//!   ],
//!   "groups": [ { "name": "Malaria cases", "fields": { "hmis": "f1", "lmis": "l7" } } ]
//! }
//! ```
//!
//! `groups` is optional. Without it, groups are built by auto-mapping.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use recon_core::{ClientError, RepositoryClient};
use recon_model::{Field, ObservedValue, Repository, RepositorySet};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub repositories: Vec<RepositorySnapshot>,
    #[serde(default)]
    pub groups: Vec<GroupSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositorySnapshot {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub values: Vec<ObservedValue>,
}

/// A hand-built field group: repository id to field id.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSpec {
    pub name: String,
    pub fields: BTreeMap<String, String>,
}

impl Snapshot {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read snapshot {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parse snapshot {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// The snapshot's repositories in file order.
    pub fn repository_set(&self) -> Result<RepositorySet> {
        let repositories = self
            .repositories
            .iter()
            .map(|r| Repository::new(r.id.as_str(), r.name.as_str()))
            .collect();
        RepositorySet::new(repositories).context("invalid repository list")
    }

    fn repository(&self, repository_id: &str) -> Result<&RepositorySnapshot, ClientError> {
        self.repositories
            .iter()
            .find(|r| r.id == repository_id)
            .ok_or_else(|| ClientError::UnknownRepository(repository_id.to_string()))
    }
}

impl RepositoryClient for Snapshot {
    fn fields(&self, repository_id: &str) -> Result<Vec<Field>, ClientError> {
        Ok(self.repository(repository_id)?.fields.clone())
    }

    fn values(
        &self,
        repository_id: &str,
        org_unit: &str,
        period: &str,
    ) -> Result<Vec<ObservedValue>, ClientError> {
        Ok(self
            .repository(repository_id)?
            .values
            .iter()
            .filter(|v| v.org_unit == org_unit && v.period == period)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "repositories": [
            {
                "id": "hmis",
                "name": "HMIS",
                "fields": [{ "id": "f1", "displayName": "Malaria cases" }],
                "values": [
                    { "fieldId": "f1", "value": "4", "orgUnit": "OU1", "period": "202403" },
                    { "fieldId": "f1", "value": "5", "orgUnit": "OU2", "period": "202403" }
                ]
            },
            { "id": "lmis", "name": "LMIS" }
        ]
    }"#;

    #[test]
    fn parses_without_groups() {
        let snapshot = Snapshot::from_json(SNAPSHOT).unwrap();
        assert!(snapshot.groups.is_empty());
        assert!(snapshot.repositories[1].fields.is_empty());
        assert_eq!(snapshot.repository_set().unwrap().len(), 2);
    }

    #[test]
    fn values_are_filtered_by_org_unit_and_period() {
        let snapshot = Snapshot::from_json(SNAPSHOT).unwrap();
        let values = snapshot.values("hmis", "OU2", "202403").unwrap();
        assert_eq!(values.len(), 1);
        assert_eq!(values[0].value, "5");
    }

    #[test]
    fn unknown_repository_is_a_client_error() {
        let snapshot = Snapshot::from_json(SNAPSHOT).unwrap();
        let err = snapshot.fields("idsr").unwrap_err();
        assert!(matches!(err, ClientError::UnknownRepository(id) if id == "idsr"));
    }

    #[test]
    fn single_repository_is_rejected() {
        let snapshot =
            Snapshot::from_json(r#"{ "repositories": [{ "id": "a", "name": "A" }] }"#).unwrap();
        assert!(snapshot.repository_set().is_err());
    }
}
