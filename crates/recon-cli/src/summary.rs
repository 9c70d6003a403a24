use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use recon_cli::pipeline::{CompareOutcome, MapOutcome};
use recon_model::{ComparisonResult, ComparisonStatus, ConfidenceLevel, SlotValue};

pub fn print_mapping(outcome: &MapOutcome) {
    let (source, target) = (&outcome.source.name, &outcome.target.name);
    println!("Mapping: {source} -> {target}");
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source"),
        header_cell("Target"),
        header_cell("Score"),
        header_cell("Confidence"),
        header_cell("Reasons"),
    ]);
    apply_mapping_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for suggestion in &outcome.result.suggestions {
        table.add_row(vec![
            field_cell(&suggestion.source.display_name, &suggestion.source.id),
            field_cell(&suggestion.target.display_name, &suggestion.target.id),
            Cell::new(format!("{:.2}", suggestion.score.overall)),
            confidence_cell(suggestion.confidence),
            Cell::new(suggestion.reasons.join("; ")),
        ]);
    }
    println!("{table}");

    let counts = outcome.result.count_by_level();
    let count = |level: ConfidenceLevel| counts.get(&level).copied().unwrap_or(0);
    println!(
        "Suggestions: {} (high {}, medium {}, low {})",
        outcome.result.suggestions.len(),
        count(ConfidenceLevel::High),
        count(ConfidenceLevel::Medium),
        count(ConfidenceLevel::Low),
    );
    if !outcome.result.unmapped_sources.is_empty() {
        println!("Unmapped in {}:", outcome.source.name);
        for field in &outcome.result.unmapped_sources {
            println!("  - {} ({})", field.display_name, field.id);
        }
    }
}

pub fn print_comparison(outcome: &CompareOutcome) {
    println!("Org unit: {}", outcome.org_unit);
    println!("Period: {}", outcome.period);

    let repositories: Vec<&str> = outcome
        .results
        .first()
        .map(|r| r.values.iter().map(|v| v.repository_name.as_str()).collect())
        .unwrap_or_default();
    let mut header = vec![header_cell("Field group")];
    header.extend(repositories.iter().map(|name| header_cell(name)));
    header.extend([
        header_cell("Suggested"),
        header_cell("Status"),
        header_cell("Details"),
    ]);

    let mut table = Table::new();
    table.set_header(header);
    apply_comparison_table_style(&mut table);
    for index in 1..=repositories.len() + 1 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for result in &outcome.results {
        table.add_row(comparison_row(result));
    }
    println!("{table}");
    print_summary_counts(outcome);
}

fn comparison_row(result: &ComparisonResult) -> Vec<Cell> {
    let mut row = vec![Cell::new(&result.group)];
    row.extend(result.values.iter().map(value_cell));
    row.push(match &result.suggested_value {
        Some(value) => Cell::new(value).add_attribute(Attribute::Bold),
        None => dim_cell("-"),
    });
    row.push(status_cell(result.status));
    row.push(Cell::new(result.messages.join("\n")));
    row
}

fn print_summary_counts(outcome: &CompareOutcome) {
    let summary = &outcome.summary;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Total"),
        header_cell("Valid"),
        header_cell("Mismatch"),
        header_cell("Missing"),
        header_cell("Out of range"),
        header_cell("Agreement"),
    ]);
    apply_table_style(&mut table);
    for index in 0..6 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(summary.total).add_attribute(Attribute::Bold),
        count_cell(summary.valid, Color::Green),
        count_cell(summary.mismatch, Color::Red),
        count_cell(summary.missing, Color::Yellow),
        count_cell(summary.out_of_range, Color::Magenta),
        Cell::new(format!("{:.0}%", summary.agreement_rate() * 100.0)),
    ]);
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_mapping_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
    if table.column_count() >= 5 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Percentage(30)),
            ColumnConstraint::UpperBoundary(Width::Percentage(30)),
            ColumnConstraint::LowerBoundary(Width::Fixed(7)),
            ColumnConstraint::LowerBoundary(Width::Fixed(12)),
            ColumnConstraint::UpperBoundary(Width::Percentage(35)),
        ]);
    }
}

fn apply_comparison_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(180);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn field_cell(display_name: &str, id: &str) -> Cell {
    Cell::new(format!("{display_name}\n{id}"))
}

fn value_cell(slot: &SlotValue) -> Cell {
    match (&slot.field_id, slot.present()) {
        (None, _) => dim_cell("unmapped"),
        (Some(_), None) => dim_cell("-"),
        (Some(_), Some(value)) => Cell::new(value),
    }
}

fn confidence_cell(level: ConfidenceLevel) -> Cell {
    let color = match level {
        ConfidenceLevel::High => Color::Green,
        ConfidenceLevel::Medium => Color::Yellow,
        ConfidenceLevel::Low => Color::Red,
    };
    Cell::new(level.as_str()).fg(color)
}

fn status_cell(status: ComparisonStatus) -> Cell {
    match status {
        ComparisonStatus::Valid => Cell::new("VALID").fg(Color::Green),
        ComparisonStatus::Mismatch => Cell::new("MISMATCH")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        ComparisonStatus::Missing => Cell::new("MISSING").fg(Color::Yellow),
        ComparisonStatus::OutOfRange => Cell::new("OUT OF RANGE")
            .fg(Color::Magenta)
            .add_attribute(Attribute::Bold),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
