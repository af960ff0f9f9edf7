use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::{DatasetDetail, RunOutcome};

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn print_summary(outcome: &RunOutcome) {
    println!("Reports: {}", outcome.output_dir.display());

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Dataset"),
        header_cell("Old rows"),
        header_cell("New rows"),
        header_cell("Shared"),
        header_cell("Only old"),
        header_cell("Only new"),
        header_cell("Columns"),
        header_cell("Mismatched cells"),
        header_cell("Status"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=7 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    for dataset in &outcome.datasets {
        match &dataset.detail {
            DatasetDetail::Compared(compared) => {
                let mismatched = compared.total_mismatches;
                let clean = compared.only_in_old == 0
                    && compared.only_in_new == 0
                    && mismatched == 0;
                let status = if clean {
                    Cell::new("ok").fg(Color::Green)
                } else {
                    Cell::new("diff").fg(Color::Yellow)
                };
                table.add_row(vec![
                    Cell::new(&dataset.label),
                    Cell::new(compared.old_rows),
                    Cell::new(compared.new_rows),
                    Cell::new(compared.shared_keys),
                    Cell::new(compared.only_in_old),
                    Cell::new(compared.only_in_new),
                    Cell::new(compared.compared_columns),
                    Cell::new(mismatched),
                    status,
                ]);
            }
            DatasetDetail::Failed { .. } => {
                table.add_row(vec![
                    Cell::new(&dataset.label),
                    Cell::new("-"),
                    Cell::new("-"),
                    Cell::new("-"),
                    Cell::new("-"),
                    Cell::new("-"),
                    Cell::new("-"),
                    Cell::new("-"),
                    Cell::new("failed").fg(Color::Red),
                ]);
            }
        }
    }
    println!("{table}");

    for dataset in &outcome.datasets {
        match &dataset.detail {
            DatasetDetail::Compared(compared) => {
                if compared.top_columns.is_empty() {
                    continue;
                }
                println!("\nTop mismatched columns for {}:", dataset.label);
                let mut columns = Table::new();
                columns.set_header(vec![
                    header_cell("Column"),
                    header_cell("Mismatched rows"),
                    header_cell("Mismatch rate"),
                ]);
                apply_table_style(&mut columns);
                align_column(&mut columns, 1, CellAlignment::Right);
                align_column(&mut columns, 2, CellAlignment::Right);
                for column in &compared.top_columns {
                    columns.add_row(vec![
                        Cell::new(&column.column),
                        Cell::new(column.mismatched_rows),
                        Cell::new(format!("{:.4}", column.mismatch_rate)),
                    ]);
                }
                println!("{columns}");
            }
            DatasetDetail::Failed { error } => {
                println!("\n{}: FAILED\n  {error}", dataset.label);
            }
        }
    }
}
