use std::collections::BTreeSet;

use recon_map::{AutoMapper, ConfidenceThresholds, generate_auto_mappings};
use recon_model::{ConfidenceLevel, Field};

fn fields(items: &[(&str, &str)]) -> Vec<Field> {
    items
        .iter()
        .map(|(id, name)| Field::new(*id, *name))
        .collect()
}

#[test]
fn malaria_cases_map_with_high_confidence() {
    let sources = fields(&[("s1", "Number of malaria cases")]);
    let targets = fields(&[("t1", "Malaria cases, number")]);

    let suggestions = generate_auto_mappings(&sources, &targets, 0.30);

    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].source.id, "s1");
    assert_eq!(suggestions[0].target.id, "t1");
    assert_eq!(suggestions[0].confidence, ConfidenceLevel::High);
    assert!(
        suggestions[0]
            .reasons
            .contains(&"common terms: cases, malaria".to_string())
    );
}

#[test]
fn threshold_above_maximum_yields_nothing() {
    let sources = fields(&[("s1", "Deaths"), ("s2", "Births")]);
    let targets = fields(&[("t1", "Deaths"), ("t2", "Births")]);
    assert!(generate_auto_mappings(&sources, &targets, 1.1).is_empty());
}

#[test]
fn a_target_is_never_claimed_twice() {
    let sources = fields(&[
        ("s1", "Malaria cases"),
        ("s2", "Malaria cases confirmed"),
        ("s3", "Malaria cases tested"),
        ("s4", "Malaria deaths"),
    ]);
    let targets = fields(&[("t1", "Malaria cases"), ("t2", "Malaria cases tested")]);

    let suggestions = generate_auto_mappings(&sources, &targets, 0.0);

    let claimed: Vec<&str> = suggestions.iter().map(|s| s.target.id.as_str()).collect();
    let unique: BTreeSet<&str> = claimed.iter().copied().collect();
    assert_eq!(claimed.len(), unique.len());
    assert!(suggestions.len() <= targets.len());
}

#[test]
fn assignment_follows_source_order() {
    let targets = fields(&[("t1", "Malaria cases")]);
    let specific = Field::new("s1", "Malaria cases confirmed");
    let exact = Field::new("s2", "Malaria cases");

    let forward = generate_auto_mappings(&[specific.clone(), exact.clone()], &targets, 0.30);
    assert_eq!(forward.len(), 1);
    assert_eq!(forward[0].source.id, "s1");

    let reversed = generate_auto_mappings(&[exact, specific], &targets, 0.30);
    assert_eq!(reversed.len(), 1);
    assert_eq!(reversed[0].source.id, "s2");
}

#[test]
fn suggestions_are_sorted_best_first() {
    let sources = fields(&[("s1", "Malaria cases confirmed"), ("s2", "Deaths")]);
    let targets = fields(&[("t1", "Malaria cases"), ("t2", "Deaths")]);

    let suggestions = generate_auto_mappings(&sources, &targets, 0.30);

    assert_eq!(suggestions.len(), 2);
    assert_eq!(suggestions[0].source.id, "s2");
    assert_eq!(suggestions[0].score.overall, 1.0);
    assert!(suggestions[0].score.overall >= suggestions[1].score.overall);
}

#[test]
fn equal_scores_prefer_earlier_target() {
    let sources = fields(&[("s1", "Deaths")]);
    let targets = fields(&[("t1", "Deaths"), ("t2", "deaths")]);
    let suggestions = generate_auto_mappings(&sources, &targets, 0.30);
    assert_eq!(suggestions[0].target.id, "t1");
}

#[test]
fn weak_pairs_stay_unmapped_even_with_low_minimum() {
    let sources = fields(&[("s1", "Malaria cases")]);
    let targets = fields(&[("t1", "Births attended")]);

    let result = AutoMapper::new(0.1).run(&sources, &targets);

    assert!(result.suggestions.is_empty());
    assert_eq!(result.unmapped_sources.len(), 1);
    assert_eq!(result.unmapped_targets.len(), 1);
}

#[test]
fn run_reports_unmapped_fields_and_levels() {
    let sources = fields(&[("s1", "Deaths"), ("s2", "Immunization coverage")]);
    let targets = fields(&[("t1", "Deaths"), ("t2", "Stock outs")]);

    let result = AutoMapper::default().run(&sources, &targets);

    assert_eq!(result.suggestions.len(), 1);
    assert_eq!(result.unmapped_sources[0].id, "s2");
    assert_eq!(result.unmapped_targets[0].id, "t2");
    assert_eq!(result.count_by_level().get(&ConfidenceLevel::High), Some(&1));
    assert_eq!(result.filter_by_level(ConfidenceLevel::High).len(), 1);
}

#[test]
fn form_names_rescue_opaque_display_names() {
    let sources = vec![Field::new("s1", "MAL_01").with_form_name("Confirmed malaria cases")];
    let targets = vec![Field::new("t1", "QX-9").with_form_name("Malaria cases confirmed")];

    let suggestions = generate_auto_mappings(&sources, &targets, 0.30);

    assert_eq!(suggestions.len(), 1);
    assert!(
        suggestions[0]
            .reasons
            .contains(&"matched on form names".to_string())
    );
}

#[test]
fn mapping_result_serializes_camel_case() {
    let sources = fields(&[("s1", "Deaths")]);
    let targets = fields(&[("t1", "Deaths"), ("t2", "Stock outs")]);

    let result = AutoMapper::default().run(&sources, &targets);
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["suggestions"][0]["confidence"], "high");
    assert_eq!(json["unmappedTargets"][0]["id"], "t2");
    assert!(json["unmappedSources"].as_array().unwrap().is_empty());
}

#[test]
fn thresholds_fill_missing_fields_from_defaults() {
    let thresholds: ConfidenceThresholds = serde_json::from_str(r#"{"high": 0.9}"#).unwrap();
    assert_eq!(thresholds.high, 0.9);
    assert_eq!(thresholds.medium, ConfidenceThresholds::default().medium);
}
