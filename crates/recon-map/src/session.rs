//! Field group editing for one comparison session.
//!
//! The session owns every [`LogicalFieldGroup`] of a comparison and keeps
//! the cross-group invariant: a field occupies at most one group. Groups
//! can be built by hand, from auto-mapping suggestions, or both.

use recon_model::{Field, LogicalFieldGroup, MappingSuggestion, RepositorySet};
use tracing::{debug, warn};

use crate::error::{MappingError, Result};

#[derive(Debug, Clone)]
pub struct MappingSession {
    repositories: RepositorySet,
    groups: Vec<LogicalFieldGroup>,
}

impl MappingSession {
    pub fn new(repositories: RepositorySet) -> Self {
        Self {
            repositories,
            groups: Vec::new(),
        }
    }

    /// Build a session from suggestions mapping `base_slot` fields to `other_slot` fields.
    pub fn from_suggestions(
        repositories: RepositorySet,
        base_slot: usize,
        other_slot: usize,
        suggestions: &[MappingSuggestion],
    ) -> Result<Self> {
        let mut session = Self::new(repositories);
        session.apply_suggestions(base_slot, other_slot, suggestions)?;
        Ok(session)
    }

    pub fn repositories(&self) -> &RepositorySet {
        &self.repositories
    }

    pub fn groups(&self) -> &[LogicalFieldGroup] {
        &self.groups
    }

    pub fn group(&self, index: usize) -> Option<&LogicalFieldGroup> {
        self.groups.get(index)
    }

    pub fn into_groups(self) -> Vec<LogicalFieldGroup> {
        self.groups
    }

    /// Append an empty group and return its index.
    pub fn add_group(&mut self, name: impl Into<String>) -> usize {
        self.groups
            .push(LogicalFieldGroup::new(name, &self.repositories));
        self.groups.len() - 1
    }

    pub fn remove_group(&mut self, index: usize) -> Result<LogicalFieldGroup> {
        if index >= self.groups.len() {
            return Err(MappingError::GroupNotFound(index));
        }
        Ok(self.groups.remove(index))
    }

    /// Index of the group holding `field_id` in `slot`.
    pub fn find_field(&self, slot: usize, field_id: &str) -> Option<usize> {
        self.groups.iter().position(|g| g.holds(slot, field_id))
    }

    /// Put `field` into `slot` of group `group`, returning the field it replaced.
    ///
    /// Fails if the field already sits in a different group.
    pub fn assign(&mut self, group: usize, slot: usize, field: Field) -> Result<Option<Field>> {
        self.check_slot(slot)?;
        if group >= self.groups.len() {
            return Err(MappingError::GroupNotFound(group));
        }
        if let Some(owner) = self.find_field(slot, &field.id)
            && owner != group
        {
            return Err(MappingError::FieldAlreadyAssigned {
                field: field.id,
                group: self.groups[owner].name.clone(),
            });
        }
        Ok(self.groups[group].assign(slot, field)?)
    }

    /// Empty `slot` of group `group`, returning the field it held.
    pub fn unassign(&mut self, group: usize, slot: usize) -> Result<Option<Field>> {
        self.check_slot(slot)?;
        let target = self
            .groups
            .get_mut(group)
            .ok_or(MappingError::GroupNotFound(group))?;
        Ok(target.clear(slot)?)
    }

    /// Move the field `field_id` in `slot` from its current group to `to_group`.
    ///
    /// Whatever `to_group` held in that slot becomes unmapped.
    pub fn reassign(&mut self, slot: usize, field_id: &str, to_group: usize) -> Result<()> {
        self.check_slot(slot)?;
        if to_group >= self.groups.len() {
            return Err(MappingError::GroupNotFound(to_group));
        }
        let from = self
            .find_field(slot, field_id)
            .ok_or_else(|| MappingError::FieldNotAssigned(field_id.to_string()))?;
        if from == to_group {
            return Ok(());
        }
        if let Some(field) = self.groups[from].clear(slot)? {
            self.groups[to_group].assign(slot, field)?;
        }
        Ok(())
    }

    /// Fields of `slot`'s repository not yet placed in any group, in input order.
    pub fn unmapped_fields<'a>(&self, slot: usize, fields: &'a [Field]) -> Vec<&'a Field> {
        fields
            .iter()
            .filter(|f| self.find_field(slot, &f.id).is_none())
            .collect()
    }

    /// Drop groups with no fields left.
    pub fn prune_empty(&mut self) {
        self.groups.retain(|g| !g.is_empty());
    }

    /// Merge auto-mapping suggestions into the session.
    ///
    /// Each suggestion's source lands in `base_slot` (reusing the group that
    /// already holds it, or a new group named after it) and its target in
    /// `other_slot`. Suggestions whose target is already mapped elsewhere
    /// are skipped. Returns the number applied.
    pub fn apply_suggestions(
        &mut self,
        base_slot: usize,
        other_slot: usize,
        suggestions: &[MappingSuggestion],
    ) -> Result<usize> {
        self.check_slot(base_slot)?;
        self.check_slot(other_slot)?;
        let mut applied = 0;
        for suggestion in suggestions {
            if let Some(owner) = self.find_field(other_slot, &suggestion.target.id) {
                warn!(
                    target_field = %suggestion.target.id,
                    group = %self.groups[owner].name,
                    "target already mapped, skipping suggestion"
                );
                continue;
            }
            let group = match self.find_field(base_slot, &suggestion.source.id) {
                Some(index) => index,
                None => {
                    let index = self.add_group(suggestion.source.display_name.clone());
                    self.groups[index].assign(base_slot, suggestion.source.clone())?;
                    index
                }
            };
            self.assign(group, other_slot, suggestion.target.clone())?;
            applied += 1;
        }
        debug!(applied, total = suggestions.len(), "applied mapping suggestions");
        Ok(applied)
    }

    fn check_slot(&self, slot: usize) -> Result<()> {
        let slots = self.repositories.len();
        if slot >= slots {
            return Err(MappingError::SlotNotFound { slot, slots });
        }
        Ok(())
    }
}
