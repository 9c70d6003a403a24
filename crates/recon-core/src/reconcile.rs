//! Value reconciliation for one field group, org unit and period.

use recon_model::{
    ComparisonResult, ComparisonStatus, ComparisonSummary, FieldSlot, LogicalFieldGroup,
    SlotValue, ValuesByRepository,
};
use recon_validate::validate_value;
use tracing::{debug, info};

use crate::consensus::consensus_value;

/// Compare the values each repository reported for `group`.
///
/// A repository missing from `values` counts as having no value.
pub fn reconcile(
    group: &LogicalFieldGroup,
    values: &ValuesByRepository,
    org_unit: &str,
    period: &str,
) -> ComparisonResult {
    let slots: Vec<SlotValue> = group
        .slots()
        .iter()
        .map(|slot| lookup(slot, values, org_unit, period))
        .collect();

    let suggested_value = consensus_value(slots.iter().map(SlotValue::present)).map(str::to_string);
    let (status, mut messages) = classify(group, &slots);
    if status == ComparisonStatus::Mismatch
        && let Some(suggested) = &suggested_value
    {
        messages.push(format!("Suggested value: {suggested}"));
    }

    debug!(
        group = %group.name,
        org_unit,
        period,
        status = %status,
        "reconciled field group"
    );

    ComparisonResult {
        group: group.name.clone(),
        org_unit: org_unit.to_string(),
        period: period.to_string(),
        values: slots,
        suggested_value,
        status,
        messages,
    }
}

/// Reconcile every group for one org unit and period.
pub fn reconcile_all(
    groups: &[LogicalFieldGroup],
    values: &ValuesByRepository,
    org_unit: &str,
    period: &str,
) -> Vec<ComparisonResult> {
    groups
        .iter()
        .map(|group| reconcile(group, values, org_unit, period))
        .collect()
}

/// Count statuses over a batch of results.
pub fn summarize(results: &[ComparisonResult]) -> ComparisonSummary {
    let summary = ComparisonSummary::from_results(results);
    info!(
        total = summary.total,
        valid = summary.valid,
        mismatch = summary.mismatch,
        missing = summary.missing,
        out_of_range = summary.out_of_range,
        "comparison summary"
    );
    summary
}

fn lookup(
    slot: &FieldSlot,
    values: &ValuesByRepository,
    org_unit: &str,
    period: &str,
) -> SlotValue {
    let value = slot.field.as_ref().and_then(|field| {
        values
            .get(&slot.repository.id)?
            .iter()
            .find(|observed| observed.matches(&field.id, org_unit, period))
            .map(|observed| observed.value.clone())
    });
    SlotValue {
        repository_id: slot.repository.id.clone(),
        repository_name: slot.repository.name.clone(),
        field_id: slot.field.as_ref().map(|field| field.id.clone()),
        value,
    }
}

/// Status and its messages, checked in priority order:
/// missing, then rule violations, then equality.
fn classify(group: &LogicalFieldGroup, slots: &[SlotValue]) -> (ComparisonStatus, Vec<String>) {
    let present = slots.iter().filter(|slot| slot.present().is_some()).count();
    if present == 0 {
        return (
            ComparisonStatus::Missing,
            vec!["No data in any repository".to_string()],
        );
    }
    if present < group.configured_slots() {
        let messages = slots
            .iter()
            .filter(|slot| slot.present().is_none())
            .map(|slot| match slot.field_id {
                Some(_) => format!("No data in {}", slot.repository_name),
                None => format!("No field mapped in {}", slot.repository_name),
            })
            .collect();
        return (ComparisonStatus::Missing, messages);
    }

    let violations: Vec<String> = slots
        .iter()
        .enumerate()
        .filter_map(|(index, slot)| {
            let value = slot.present()?;
            let label = group
                .field(index)
                .map_or(group.label(), |field| field.display_name.as_str());
            let error = validate_value(value, label).error()?;
            Some(format!("{} value {value}: {error}", slot.repository_name))
        })
        .collect();
    if !violations.is_empty() {
        return (ComparisonStatus::OutOfRange, violations);
    }

    let mut differences = Vec::new();
    for (index, left) in slots.iter().enumerate() {
        for right in &slots[index + 1..] {
            if let (Some(a), Some(b)) = (left.present(), right.present())
                && a != b
            {
                differences.push(format!(
                    "{} ({a}) ≠ {} ({b})",
                    left.repository_name, right.repository_name
                ));
            }
        }
    }
    if differences.is_empty() {
        (ComparisonStatus::Valid, Vec::new())
    } else {
        (ComparisonStatus::Mismatch, differences)
    }
}
