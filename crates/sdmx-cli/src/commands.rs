use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, info_span, warn};

use sdmx_cli::output::{
    RunReport, default_output_path, indicator_from_path, read_message, write_message,
    write_report,
};
use sdmx_model::IndexedConcept;
use sdmx_standards::{
    Standards, StandardsPaths, load_constraint_store, load_row_table, standards_root,
    write_row_table,
};
use sdmx_validate::{constrain_rows, filter_dataset};

use crate::cli::{FilterArgs, RowsArgs, StandardsArgs};
use crate::summary::{apply_table_style, codelist_cell, header_cell};
use crate::types::{FilterRun, RowsRun};

pub fn run_structure(args: &StandardsArgs) -> Result<()> {
    let standards = load_standards(args)?;
    let structure = &standards.structure;
    println!(
        "Structure: {}{}",
        structure.id,
        structure
            .name
            .as_deref()
            .map(|name| format!(" ({name})"))
            .unwrap_or_default()
    );
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Component"),
        header_cell("Kind"),
        header_cell("Codelist"),
        header_cell("Codes"),
    ]);
    apply_table_style(&mut table);
    for (kind, component) in structure.components() {
        let codes = standards
            .index
            .get(kind, &component.id)
            .and_then(IndexedConcept::code_count);
        table.add_row(vec![
            component.id.clone().into(),
            kind.as_str().into(),
            codelist_cell(component.codelist.as_ref().map(|cl| cl.id.as_str())),
            codelist_cell(codes.map(|count| count.to_string()).as_deref()),
        ]);
    }
    println!("{table}");
    println!(
        "Content constraints: {} series",
        standards.constraints.len()
    );
    Ok(())
}

pub fn run_filter(args: &FilterArgs) -> Result<FilterRun> {
    let data = &args.data;
    let span = info_span!("filter", data = %data.display());
    let _guard = span.enter();

    let standards = load_standards(&args.standards)?;

    let start = Instant::now();
    let message = read_message(data)?;
    if let Err(error) = message.validate() {
        warn!(%error, "data message has duplicate series keys");
    }
    info!(
        message_id = %message.header.id,
        dataset_count = message.datasets.len(),
        series_count = message.series_count(),
        duration_ms = start.elapsed().as_millis(),
        "data message loaded"
    );

    let start = Instant::now();
    let result = filter_dataset(&message, &standards.constraints, &standards.index);
    info!(
        kept = result.report.kept,
        removed = result.report.removed,
        duration_ms = start.elapsed().as_millis(),
        "filter complete"
    );

    let output = if args.dry_run || result.report.is_empty_output() {
        None
    } else {
        let path = args
            .output
            .clone()
            .unwrap_or_else(|| default_output_path(data, "json"));
        write_message(&path, &result.message)?;
        info!(path = %path.display(), "filtered message written");
        Some(path)
    };

    if let Some(path) = &args.report {
        let report = RunReport::new(data, &standards.structure.id, &result.report)
            .with_output(output.as_deref());
        write_report(path, &report)?;
        info!(path = %path.display(), "report written");
    }

    Ok(FilterRun {
        data: data.clone(),
        structure_id: standards.structure.id.clone(),
        result,
        output,
        report: args.report.clone(),
    })
}

pub fn run_rows(args: &RowsArgs) -> Result<RowsRun> {
    let csv = &args.csv;
    let indicator = args
        .indicator
        .clone()
        .unwrap_or_else(|| indicator_from_path(csv));
    let span = info_span!("rows", indicator = %indicator);
    let _guard = span.enter();

    let paths = standards_paths(&args.standards);
    let constraints = load_constraint_store(&paths.constraints)
        .with_context(|| format!("load {}", paths.constraints.display()))?;
    let table = load_row_table(csv).with_context(|| format!("load {}", csv.display()))?;

    let outcome = constrain_rows(&table, &constraints);
    if outcome.removed > 0 {
        warn!("{}", outcome.summary(&indicator));
        for reason in &outcome.reasons {
            warn!("{reason}");
        }
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(csv, "csv"));
    write_row_table(&output, &outcome.table)
        .with_context(|| format!("write {}", output.display()))?;
    info!(
        path = %output.display(),
        rows = outcome.kept(),
        "constrained rows written"
    );

    Ok(RowsRun {
        csv: csv.clone(),
        indicator,
        outcome,
        output,
    })
}

fn standards_paths(args: &StandardsArgs) -> StandardsPaths {
    let root = args.standards_dir.clone().unwrap_or_else(standards_root);
    StandardsPaths::from_root(&root)
        .with_structure(args.structure.clone())
        .with_constraints(args.constraints.clone())
}

fn load_standards(args: &StandardsArgs) -> Result<Standards> {
    let paths = standards_paths(args);
    Standards::load(&paths).with_context(|| {
        format!(
            "load standards ({}, {})",
            paths.structure.display(),
            paths.constraints.display()
        )
    })
}
