//! Logical field groups.
//!
//! A group declares that fields from different repositories describe the
//! same real-world concept. It has exactly one slot per configured
//! repository and each slot holds at most one field.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::field::{Field, Repository, RepositorySet};

/// One repository position inside a [`LogicalFieldGroup`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSlot {
    pub repository: Repository,
    pub field: Option<Field>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogicalFieldGroup {
    pub name: String,
    slots: Vec<FieldSlot>,
}

impl LogicalFieldGroup {
    /// Create an empty group with one slot per repository in `repositories`.
    pub fn new(name: impl Into<String>, repositories: &RepositorySet) -> Self {
        Self {
            name: name.into(),
            slots: repositories
                .repositories()
                .iter()
                .map(|repository| FieldSlot {
                    repository: repository.clone(),
                    field: None,
                })
                .collect(),
        }
    }

    pub fn slots(&self) -> &[FieldSlot] {
        &self.slots
    }

    /// Number of configured repository slots (2 or 3).
    pub fn configured_slots(&self) -> usize {
        self.slots.len()
    }

    pub fn field(&self, slot: usize) -> Option<&Field> {
        self.slots.get(slot).and_then(|s| s.field.as_ref())
    }

    pub fn slot_for(&self, repository_id: &str) -> Option<usize> {
        self.slots
            .iter()
            .position(|s| s.repository.id == repository_id)
    }

    /// Put `field` into `slot`, returning the field it replaced.
    ///
    /// A field that carries a repository id must belong to the slot's repository.
    pub fn assign(&mut self, slot: usize, field: Field) -> Result<Option<Field>> {
        let slots = self.slots.len();
        let target = self
            .slots
            .get_mut(slot)
            .ok_or(ModelError::SlotOutOfRange { index: slot, slots })?;
        if let Some(owner) = &field.repository_id
            && owner != &target.repository.id
        {
            return Err(ModelError::RepositoryMismatch {
                field: field.id.clone(),
                expected: target.repository.id.clone(),
                found: owner.clone(),
            });
        }
        Ok(target.field.replace(field))
    }

    /// Empty `slot`, returning the field it held.
    pub fn clear(&mut self, slot: usize) -> Result<Option<Field>> {
        let slots = self.slots.len();
        self.slots
            .get_mut(slot)
            .map(|s| s.field.take())
            .ok_or(ModelError::SlotOutOfRange { index: slot, slots })
    }

    /// True when no slot holds a field.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|s| s.field.is_none())
    }

    /// True when `field` sits in `slot` of this group.
    pub fn holds(&self, slot: usize, field_id: &str) -> bool {
        self.field(slot).is_some_and(|f| f.id == field_id)
    }

    /// A label for rule checks: the first assigned field's display name, else the group name.
    pub fn label(&self) -> &str {
        self.slots
            .iter()
            .find_map(|s| s.field.as_ref())
            .map_or(self.name.as_str(), |f| f.display_name.as_str())
    }
}

impl<'de> Deserialize<'de> for LogicalFieldGroup {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            name: String,
            slots: Vec<FieldSlot>,
        }
        let raw = Raw::deserialize(deserializer)?;
        let repositories = raw.slots.iter().map(|s| s.repository.clone()).collect();
        let repositories = RepositorySet::new(repositories).map_err(serde::de::Error::custom)?;
        let mut group = Self::new(raw.name, &repositories);
        for (index, slot) in raw.slots.into_iter().enumerate() {
            if let Some(field) = slot.field {
                group
                    .assign(index, field)
                    .map_err(serde::de::Error::custom)?;
            }
        }
        Ok(group)
    }
}
