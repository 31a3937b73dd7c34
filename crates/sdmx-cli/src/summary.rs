use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use crate::types::{FilterRun, RowsRun};

pub fn print_filter_summary(run: &FilterRun) {
    let report = &run.result.report;
    println!("Data: {}", run.data.display());
    println!("Structure: {}", run.structure_id);
    match &run.output {
        Some(path) => println!("Output: {}", path.display()),
        None if report.is_empty_output() => println!("Output: -"),
        None => println!("Output: - (dry run)"),
    }
    if let Some(path) = &run.report {
        println!("Report: {}", path.display());
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Dataset"),
        header_cell("Structure"),
        header_cell("Series"),
        header_cell("Kept"),
        header_cell("Removed"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 2..5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for (index, dataset) in report.datasets.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(&dataset.structure),
            Cell::new(dataset.total),
            count_cell(dataset.kept, Color::Green),
            count_cell(dataset.removed, Color::Red),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(report.total).add_attribute(Attribute::Bold),
        count_cell(report.kept, Color::Green).add_attribute(Attribute::Bold),
        count_cell(report.removed, Color::Red).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    println!(
        "Series with global codelist violations: {}",
        report.dsd_violation_count
    );
    println!(
        "Series with content constraint violations: {}",
        report.content_violation_count
    );
    print_message_table(&report.dsd_messages, &report.content_messages);
}

fn print_message_table(dsd: &[String], content: &[String]) {
    if dsd.is_empty() && content.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Check"), header_cell("Message")]);
    apply_message_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    for message in dsd {
        table.add_row(vec![
            Cell::new("DSD").fg(Color::Red),
            Cell::new(message),
        ]);
    }
    for message in content {
        table.add_row(vec![
            Cell::new("CONTENT").fg(Color::Yellow),
            Cell::new(message),
        ]);
    }
    println!();
    println!("Messages:");
    println!("{table}");
}

pub fn print_rows_summary(run: &RowsRun) {
    let outcome = &run.outcome;
    println!("Indicator: {}", run.indicator);
    println!("Input: {}", run.csv.display());
    println!("Output: {}", run.output.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rows"),
        header_cell("Kept"),
        header_cell("Removed"),
    ]);
    apply_table_style(&mut table);
    for index in 0..3 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(outcome.total),
        count_cell(outcome.kept(), Color::Green),
        count_cell(outcome.removed, Color::Red),
    ]);
    println!("{table}");
    if outcome.reasons.is_empty() {
        return;
    }
    let mut reasons = Table::new();
    reasons.set_header(vec![header_cell("Reason")]);
    apply_message_table_style(&mut reasons);
    for reason in &outcome.reasons {
        reasons.add_row(vec![Cell::new(reason)]);
    }
    println!();
    println!("{reasons}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_message_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
    if table.column_count() >= 2 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(9)),
            ColumnConstraint::LowerBoundary(Width::Percentage(60)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

pub fn codelist_cell(value: Option<&str>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("free"),
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
