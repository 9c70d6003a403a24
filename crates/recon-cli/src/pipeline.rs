//! Mapping and comparison steps shared by the CLI commands.

use std::collections::BTreeMap;

use anyhow::{Context, Result, anyhow, bail};
use recon_core::{collect_fields, collect_values, reconcile_all, summarize};
use recon_map::{AutoMapper, MappingResult, MappingSession};
use recon_model::{
    ComparisonResult, ComparisonStatus, ComparisonSummary, Field, LogicalFieldGroup, Repository,
    RepositorySet,
};
use serde::Serialize;
use tracing::{debug, info, info_span, trace, warn};

use crate::logging::redact_value;
use crate::snapshot::Snapshot;

type FieldsByRepository = BTreeMap<String, Vec<Field>>;

/// Auto-mapping between two repositories of a snapshot.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapOutcome {
    pub source: Repository,
    pub target: Repository,
    #[serde(flatten)]
    pub result: MappingResult,
}

/// Reconciliation of every field group for one org unit and period.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareOutcome {
    pub org_unit: String,
    pub period: String,
    pub results: Vec<ComparisonResult>,
    pub summary: ComparisonSummary,
}

impl CompareOutcome {
    pub fn has_problems(&self) -> bool {
        self.summary.problem_count() > 0
    }
}

/// Map `source` onto `target`; defaults are the first repository and the
/// first other repository.
pub fn map_repositories(
    snapshot: &Snapshot,
    source: Option<&str>,
    target: Option<&str>,
    min_similarity: f64,
) -> Result<MapOutcome> {
    let repositories = snapshot.repository_set()?;
    let source_slot = match source {
        Some(id) => resolve_slot(&repositories, id)?,
        None => 0,
    };
    let target_slot = match target {
        Some(id) => resolve_slot(&repositories, id)?,
        None => usize::from(source_slot == 0),
    };
    if source_slot == target_slot {
        bail!("source and target must be different repositories");
    }
    let source = repositories.repositories()[source_slot].clone();
    let target = repositories.repositories()[target_slot].clone();

    let span = info_span!("map", source = %source.id, target = %target.id);
    let _guard = span.enter();

    let fields = collect_fields(snapshot, &repositories).context("load field definitions")?;
    let result = AutoMapper::new(min_similarity).run(
        fields_of(&fields, &source.id),
        fields_of(&fields, &target.id),
    );
    info!(
        suggestions = result.suggestions.len(),
        unmapped_sources = result.unmapped_sources.len(),
        unmapped_targets = result.unmapped_targets.len(),
        "auto-mapping complete"
    );
    Ok(MapOutcome {
        source,
        target,
        result,
    })
}

/// Collect values for one org unit and period and reconcile every group.
pub fn compare(
    snapshot: &Snapshot,
    org_unit: &str,
    period: &str,
    min_similarity: f64,
) -> Result<CompareOutcome> {
    let span = info_span!("compare", org_unit, period);
    let _guard = span.enter();

    let repositories = snapshot.repository_set()?;
    let fields = collect_fields(snapshot, &repositories).context("load field definitions")?;
    let groups = build_groups(snapshot, &repositories, &fields, min_similarity)?;
    if groups.is_empty() {
        warn!("no field groups to compare");
    }

    let values = collect_values(snapshot, &repositories, org_unit, period, |progress| {
        info!(
            completed = progress.completed,
            total = progress.total,
            repository = %progress.repository.id,
            "fetched repository values"
        );
    })
    .context("load reported values")?;

    let results = reconcile_all(&groups, &values, org_unit, period);
    for result in &results {
        for slot in &result.values {
            trace!(
                group = %result.group,
                repository = %slot.repository_id,
                value = redact_value(slot.value.as_deref().unwrap_or("-")),
                "reported value"
            );
        }
        if result.status != ComparisonStatus::Valid {
            debug!(
                group = %result.group,
                status = %result.status,
                suggested = redact_value(result.suggested_value.as_deref().unwrap_or("-")),
                "row needs review"
            );
        }
    }
    let summary = summarize(&results);
    Ok(CompareOutcome {
        org_unit: org_unit.to_string(),
        period: period.to_string(),
        results,
        summary,
    })
}

/// Field groups from the snapshot's `groups`, or by auto-mapping every other
/// repository against the first when none are given.
pub fn build_groups(
    snapshot: &Snapshot,
    repositories: &RepositorySet,
    fields: &FieldsByRepository,
    min_similarity: f64,
) -> Result<Vec<LogicalFieldGroup>> {
    if snapshot.groups.is_empty() {
        auto_groups(repositories, fields, min_similarity)
    } else {
        declared_groups(snapshot, repositories, fields)
    }
}

fn declared_groups(
    snapshot: &Snapshot,
    repositories: &RepositorySet,
    fields: &FieldsByRepository,
) -> Result<Vec<LogicalFieldGroup>> {
    let mut session = MappingSession::new(repositories.clone());
    for spec in &snapshot.groups {
        let group = session.add_group(spec.name.as_str());
        for (repository_id, field_id) in &spec.fields {
            let slot = resolve_slot(repositories, repository_id)?;
            let field = fields_of(fields, repository_id)
                .iter()
                .find(|f| f.id == *field_id)
                .ok_or_else(|| {
                    anyhow!("field '{field_id}' not found in repository '{repository_id}'")
                })?;
            session
                .assign(group, slot, field.clone())
                .with_context(|| format!("build group '{}'", spec.name))?;
        }
    }
    debug!(groups = session.groups().len(), "loaded declared field groups");
    Ok(session.into_groups())
}

fn auto_groups(
    repositories: &RepositorySet,
    fields: &FieldsByRepository,
    min_similarity: f64,
) -> Result<Vec<LogicalFieldGroup>> {
    let mapper = AutoMapper::new(min_similarity);
    let mut session = MappingSession::new(repositories.clone());
    let base = &repositories.repositories()[0];
    for (slot, other) in repositories.repositories().iter().enumerate().skip(1) {
        let result = mapper.run(fields_of(fields, &base.id), fields_of(fields, &other.id));
        let applied = session.apply_suggestions(0, slot, &result.suggestions)?;
        info!(
            base = %base.id,
            other = %other.id,
            applied,
            unmapped = result.unmapped_sources.len(),
            "auto-mapped repository"
        );
    }
    Ok(session.into_groups())
}

fn fields_of<'a>(fields: &'a FieldsByRepository, repository_id: &str) -> &'a [Field] {
    fields
        .get(repository_id)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn resolve_slot(repositories: &RepositorySet, repository_id: &str) -> Result<usize> {
    repositories
        .slot_of(repository_id)
        .ok_or_else(|| anyhow!("repository '{repository_id}' not found in snapshot"))
}
