//! Reconciliation scenarios across two and three repositories.

use recon_core::{reconcile, reconcile_all, summarize};
use recon_model::{
    ComparisonStatus, Field, LogicalFieldGroup, ObservedValue, Repository, RepositorySet,
    ValuesByRepository,
};

const OU: &str = "OU_KAMPALA";
const PE: &str = "202403";

fn repos() -> RepositorySet {
    RepositorySet::new(vec![
        Repository::new("hmis", "HMIS"),
        Repository::new("lmis", "LMIS"),
        Repository::new("idsr", "IDSR"),
    ])
    .unwrap()
}

/// A three-slot group whose fields are named `label` and whose slot
/// values are `values` (None = nothing reported).
fn scenario(label: &str, values: [Option<&str>; 3]) -> (LogicalFieldGroup, ValuesByRepository) {
    let repos = repos();
    let mut group = LogicalFieldGroup::new(label, &repos);
    let mut observed = ValuesByRepository::new();
    for (slot, repository) in repos.repositories().iter().enumerate() {
        let field_id = format!("{}_f", repository.id);
        group.assign(slot, Field::new(&field_id, label)).unwrap();
        let mut reported = vec![ObservedValue::new(&field_id, "999", "OTHER_OU", PE)];
        if let Some(value) = values[slot] {
            reported.push(ObservedValue::new(&field_id, value, OU, PE));
        }
        observed.insert(repository.id.clone(), reported);
    }
    (group, observed)
}

#[test]
fn identical_values_are_valid() {
    let (group, values) = scenario("Malaria cases", [Some("42"), Some("42"), Some("42")]);
    let result = reconcile(&group, &values, OU, PE);
    assert_eq!(result.status, ComparisonStatus::Valid);
    assert_eq!(result.suggested_value.as_deref(), Some("42"));
    assert!(result.messages.is_empty());
}

#[test]
fn majority_value_is_suggested_on_mismatch() {
    let (group, values) = scenario("Malaria cases", [Some("10"), Some("10"), Some("20")]);
    let result = reconcile(&group, &values, OU, PE);
    assert_eq!(result.status, ComparisonStatus::Mismatch);
    assert_eq!(result.suggested_value.as_deref(), Some("10"));
    insta::assert_snapshot!(result.messages.join("\n"), @r"
    HMIS (10) ≠ IDSR (20)
    LMIS (10) ≠ IDSR (20)
    Suggested value: 10
    ");
}

#[test]
fn all_different_values_suggest_first_seen() {
    let (group, values) = scenario("Malaria cases", [Some("3"), Some("1"), Some("2")]);
    let result = reconcile(&group, &values, OU, PE);
    assert_eq!(result.status, ComparisonStatus::Mismatch);
    assert_eq!(result.suggested_value.as_deref(), Some("3"));
    assert_eq!(result.messages.len(), 4);
}

#[test]
fn missing_value_beats_agreement() {
    let (group, values) = scenario("Malaria cases", [Some("10"), None, Some("10")]);
    let result = reconcile(&group, &values, OU, PE);
    assert_eq!(result.status, ComparisonStatus::Missing);
    assert_eq!(result.suggested_value.as_deref(), Some("10"));
    assert_eq!(result.messages, vec!["No data in LMIS".to_string()]);
}

#[test]
fn blank_value_counts_as_missing() {
    let (group, values) = scenario("Malaria cases", [Some("10"), Some("  "), Some("10")]);
    let result = reconcile(&group, &values, OU, PE);
    assert_eq!(result.status, ComparisonStatus::Missing);
}

#[test]
fn nothing_reported_anywhere() {
    let (group, values) = scenario("Malaria cases", [None, None, None]);
    let result = reconcile(&group, &values, OU, PE);
    assert_eq!(result.status, ComparisonStatus::Missing);
    assert_eq!(result.suggested_value, None);
    assert_eq!(result.messages, vec!["No data in any repository".to_string()]);
}

#[test]
fn rule_violation_beats_agreement() {
    let (group, values) = scenario(
        "Percent of children vaccinated",
        [Some("150"), Some("150"), Some("150")],
    );
    let result = reconcile(&group, &values, OU, PE);
    assert_eq!(result.status, ComparisonStatus::OutOfRange);
    assert_eq!(result.suggested_value.as_deref(), Some("150"));
    assert_eq!(result.messages.len(), 3);
    assert_eq!(
        result.messages[0],
        "HMIS value 150: Percentage/rate cannot exceed 100%"
    );
}

#[test]
fn rule_violation_beats_mismatch() {
    let (group, values) = scenario("Malaria cases", [Some("5"), Some("-1"), Some("5")]);
    let result = reconcile(&group, &values, OU, PE);
    assert_eq!(result.status, ComparisonStatus::OutOfRange);
    assert_eq!(
        result.messages,
        vec!["LMIS value -1: Value cannot be negative".to_string()]
    );
}

#[test]
fn unmapped_slot_is_missing() {
    let (mut group, values) = scenario("Malaria cases", [Some("7"), Some("7"), Some("7")]);
    group.clear(2).unwrap();
    let result = reconcile(&group, &values, OU, PE);
    assert_eq!(result.status, ComparisonStatus::Missing);
    assert_eq!(result.values[2].field_id, None);
    assert_eq!(result.messages, vec!["No field mapped in IDSR".to_string()]);
}

#[test]
fn repository_absent_from_values_is_missing_not_a_panic() {
    let (group, mut values) = scenario("Malaria cases", [Some("7"), Some("7"), Some("7")]);
    values.remove("lmis");
    let result = reconcile(&group, &values, OU, PE);
    assert_eq!(result.status, ComparisonStatus::Missing);
    assert_eq!(result.values[1].value, None);
}

#[test]
fn only_exact_org_unit_and_period_match() {
    let (group, values) = scenario("Malaria cases", [Some("1"), Some("1"), Some("1")]);
    let result = reconcile(&group, &values, OU, "202404");
    assert_eq!(result.status, ComparisonStatus::Missing);
    assert_eq!(result.messages, vec!["No data in any repository".to_string()]);
}

#[test]
fn two_repository_comparison() {
    let repos = RepositorySet::new(vec![
        Repository::new("a", "Facility register"),
        Repository::new("b", "District report"),
    ])
    .unwrap();
    let mut group = LogicalFieldGroup::new("Deliveries", &repos);
    group.assign(0, Field::new("d1", "Deliveries")).unwrap();
    group.assign(1, Field::new("d2", "Institutional deliveries")).unwrap();
    let mut values = ValuesByRepository::new();
    values.insert("a".into(), vec![ObservedValue::new("d1", "12", OU, PE)]);
    values.insert("b".into(), vec![ObservedValue::new("d2", "14", OU, PE)]);

    let result = reconcile(&group, &values, OU, PE);

    assert_eq!(result.status, ComparisonStatus::Mismatch);
    assert_eq!(
        result.messages,
        vec![
            "Facility register (12) ≠ District report (14)".to_string(),
            "Suggested value: 12".to_string(),
        ]
    );
}

#[test]
fn batch_summary_counts_each_status() {
    let cases = [
        scenario("Cases", [Some("1"), Some("1"), Some("1")]),
        scenario("Cases", [Some("1"), Some("2"), Some("1")]),
        scenario("Cases", [None, Some("2"), Some("1")]),
        scenario("Rate", [Some("101"), Some("101"), Some("101")]),
        scenario("Cases", [Some("4"), Some("4"), Some("4")]),
    ];
    let results: Vec<_> = cases
        .iter()
        .flat_map(|(group, values)| reconcile_all(std::slice::from_ref(group), values, OU, PE))
        .collect();

    let summary = summarize(&results);

    assert_eq!(summary.total, 5);
    assert_eq!(summary.valid, 2);
    assert_eq!(summary.mismatch, 1);
    assert_eq!(summary.missing, 1);
    assert_eq!(summary.out_of_range, 1);
}
