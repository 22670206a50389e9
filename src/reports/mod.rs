pub mod grid;

use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use kbdforge::diagnostics::{Diagnostic, Severity};
use kbdforge::registry::{LayoutRegistry, LoadFailure};

pub fn print_diagnostics(path: &str, diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        println!("✅ {}: no problems found", path);
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Line").add_attribute(Attribute::Bold),
        Cell::new("Severity").add_attribute(Attribute::Bold),
        Cell::new("Problem").add_attribute(Attribute::Bold),
    ]);
    if let Some(col) = table.column_mut(0) {
        col.set_cell_alignment(CellAlignment::Right);
    }

    for d in diagnostics {
        let severity = match d.severity() {
            Severity::Error => Cell::new(d.severity()).fg(Color::Red),
            Severity::Warning => Cell::new(d.severity()).fg(Color::Yellow),
        };
        table.add_row(vec![Cell::new(d.line), severity, Cell::new(&d.kind)]);
    }

    let errors = diagnostics.iter().filter(|d| d.is_error()).count();
    println!("{}", table);
    println!(
        "{}: {} error(s), {} warning(s)",
        path,
        errors,
        diagnostics.len() - errors
    );
}

pub fn print_layouts(registry: &LayoutRegistry, failures: &[LoadFailure]) {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.set_header(vec![
        Cell::new("Layout").add_attribute(Attribute::Bold),
        Cell::new("Keys").add_attribute(Attribute::Bold),
        Cell::new("Rows").add_attribute(Attribute::Bold),
    ]);
    for col in 1..=2 {
        if let Some(c) = table.column_mut(col) {
            c.set_cell_alignment(CellAlignment::Right);
        }
    }

    for layout in registry.list_layouts() {
        table.add_row(vec![
            Cell::new(&layout.name),
            Cell::new(layout.key_count()),
            Cell::new(layout.rows().len()),
        ]);
    }
    println!("{}", table);

    for f in failures {
        println!("⚠️  Skipped {}: {}", f.source, f.error);
    }
}
