//! Human-readable output for command results.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use formfill_model::{FieldType, Fillability, FillStatus, FillSummary, TargetValues};

use crate::commands::{CheckRow, FillCommandResult, FormRow, InspectReport, TemplateStatus};

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

/// Print the outcome of the `fill` subcommand. Returns the process exit code.
pub fn print_fill_result(result: &FillCommandResult) -> i32 {
    match result {
        FillCommandResult::Preview(values) => {
            print_preview(values);
            0
        }
        FillCommandResult::Filled { output, summary } => {
            println!("Output: {}", output.display());
            print_fill_summary(summary);
            if summary.has_errors() {
                eprintln!(
                    "warning: {} of {} fields could not be written",
                    summary.errors, summary.attempted
                );
            }
            0
        }
        FillCommandResult::NotFillable { form_id } => {
            eprintln!(
                "{form_id}: template has no interactive fields; use a manual or overlay workflow"
            );
            2
        }
    }
}

fn print_preview(values: &TargetValues) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Target Field"), header_cell("Value")]);
    apply_table_style(&mut table);
    for (name, value) in values.iter() {
        table.add_row(vec![Cell::new(name), Cell::new(value.display_string())]);
    }
    println!("{table}");
    println!("{} target fields resolved", values.len());
}

fn print_fill_summary(summary: &FillSummary) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Attempted"),
        header_cell("Filled"),
        header_cell("Skipped"),
        header_cell("Errors"),
    ]);
    apply_table_style(&mut table);
    table.add_row(vec![
        Cell::new(summary.attempted),
        Cell::new(summary.filled).fg(Color::Green),
        Cell::new(summary.skipped),
        Cell::new(summary.errors).fg(if summary.errors > 0 {
            Color::Red
        } else {
            Color::Green
        }),
    ]);
    println!("{table}");

    if summary.has_errors() {
        let mut errors = Table::new();
        errors.set_header(vec![header_cell("Field"), header_cell("Error")]);
        apply_table_style(&mut errors);
        for outcome in &summary.details {
            if let FillStatus::Error(reason) = &outcome.status {
                errors.add_row(vec![
                    Cell::new(&outcome.field),
                    Cell::new(reason).fg(Color::Red),
                ]);
            }
        }
        println!("{errors}");
    }
}

pub fn print_inspect(report: &InspectReport) {
    println!("Template: {}", report.path.display());
    if let Some(title) = &report.metadata.title {
        println!("Title: {title}");
    }
    if let Some(author) = &report.metadata.author {
        println!("Author: {author}");
    }
    if let Some(producer) = &report.metadata.producer {
        println!("Producer: {producer}");
    }
    match report.fillability {
        Fillability::Fillable => println!("Fillable: yes ({} fields)", report.fields.len()),
        Fillability::NotFillable => println!("Fillable: no"),
    }
    if report.fields.is_empty() {
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Type"),
        header_cell("Req"),
        header_cell("RO"),
        header_cell("MaxLen"),
        header_cell("Options"),
    ]);
    apply_table_style(&mut table);
    for field in &report.fields {
        table.add_row(vec![
            Cell::new(&field.name),
            Cell::new(type_label(field.field_type)),
            Cell::new(if field.required { "yes" } else { "" }).set_alignment(CellAlignment::Center),
            Cell::new(if field.read_only { "yes" } else { "" }).set_alignment(CellAlignment::Center),
            Cell::new(
                field
                    .max_length
                    .map(|len| len.to_string())
                    .unwrap_or_default(),
            )
            .set_alignment(CellAlignment::Right),
            Cell::new(
                field
                    .options
                    .as_ref()
                    .map(|options| options.join(", "))
                    .unwrap_or_default(),
            ),
        ]);
    }
    println!("{table}");
}

fn type_label(field_type: FieldType) -> &'static str {
    match field_type {
        FieldType::Text => "text",
        FieldType::CheckBox => "checkbox",
        FieldType::Radio => "radio",
        FieldType::Dropdown => "dropdown",
        FieldType::Button => "button",
        FieldType::Unknown => "unknown",
    }
}

pub fn print_check(rows: &[CheckRow]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Form"),
        header_cell("Template"),
        header_cell("Status"),
        header_cell("Fields"),
        header_cell("Mapping Issues"),
    ]);
    apply_table_style(&mut table);
    for row in rows {
        let status = match row.status {
            TemplateStatus::Fillable => Cell::new("fillable").fg(Color::Green),
            TemplateStatus::NotFillable => Cell::new("not fillable").fg(Color::Yellow),
            TemplateStatus::Missing => Cell::new("missing").fg(Color::Red),
            TemplateStatus::Unreadable => Cell::new("unreadable").fg(Color::Red),
        };
        table.add_row(vec![
            Cell::new(format!("{} ({})", row.form_name, row.form_id)),
            Cell::new(&row.template_file),
            status,
            Cell::new(row.field_count).set_alignment(CellAlignment::Right),
            Cell::new(row.mapping_issues).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{table}");
}

pub fn print_forms(rows: &[FormRow]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Form ID"),
        header_cell("Name"),
        header_cell("Template"),
        header_cell("Entries"),
    ]);
    apply_table_style(&mut table);
    for row in rows {
        table.add_row(vec![
            Cell::new(&row.form_id),
            Cell::new(&row.form_name),
            Cell::new(&row.template_file),
            Cell::new(row.entries).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{table}");
}
