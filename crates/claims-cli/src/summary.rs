use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::SubmitResult;

pub fn print_summary(result: &SubmitResult) {
    println!("Output: {}", result.output_dir.display());
    println!("Validation log: {}", result.validation_log.display());
    println!("Diagnostics: {}", result.diagnostics_json.display());

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Claims"),
        header_cell("Valid"),
        header_cell("Errors"),
        header_cell("Warnings"),
        header_cell("Info"),
    ]);
    apply_table_style(&mut table);
    table.add_row(vec![
        Cell::new(result.total_claims),
        Cell::new(result.valid_claims),
        count_cell(result.error_count, Color::Red),
        count_cell(result.warning_count, Color::Yellow),
        Cell::new(result.info_count),
    ]);
    println!("{table}");

    if result.dry_run {
        println!("Dry run: no 837I documents generated.");
        return;
    }
    if result.documents.is_empty() {
        println!("No valid claims to process; no 837I documents generated.");
        return;
    }

    let mut files = Table::new();
    files.set_header(vec![
        header_cell("837I File"),
        header_cell("Claims"),
        header_cell("Segments"),
    ]);
    apply_table_style(&mut files);
    align_column(&mut files, 1, CellAlignment::Right);
    align_column(&mut files, 2, CellAlignment::Right);
    for document in &result.documents {
        files.add_row(vec![
            Cell::new(document.path.display()),
            Cell::new(document.claims),
            Cell::new(document.segments),
        ]);
    }
    println!("{files}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count == 0 {
        Cell::new(count)
    } else {
        Cell::new(count).fg(color)
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
