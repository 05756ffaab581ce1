//! Table rendering for pipeline results and column mappings.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use tf_filter::PipelineOutcome;
use tf_map::ColumnResolution;
use tf_model::{CanonicalField, CellValue, SortWarning};

/// Free-text columns wider than this are cut with an ellipsis.
const MAX_CELL_CHARS: usize = 60;

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(160);
}

/// `Matched N of M candidates.`
pub fn match_line(outcome: &PipelineOutcome) -> String {
    format!(
        "Matched {} of {} candidates.",
        outcome.matched_rows(),
        outcome.total_rows
    )
}

pub fn warning_line(warning: &SortWarning) -> String {
    format!("Warning: {warning}")
}

/// First `limit` result rows under the reordered headers.
pub fn results_table(outcome: &PipelineOutcome, limit: usize) -> Table {
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(
        outcome
            .dataset
            .headers
            .iter()
            .map(|header| header_cell(header))
            .collect::<Vec<_>>(),
    );
    for row in outcome.dataset.rows.iter().take(limit) {
        table.add_row(row.cells.iter().map(value_cell).collect::<Vec<_>>());
    }
    table
}

/// Renders the result table plus a truncation note and the match line.
pub fn render_results(outcome: &PipelineOutcome, limit: usize) -> String {
    let mut out = String::new();
    if outcome.matched_rows() > 0 {
        out.push_str(&results_table(outcome, limit).to_string());
        out.push('\n');
        if outcome.matched_rows() > limit {
            out.push_str(&format!("Showing first {limit} rows.\n"));
        }
    }
    out.push_str(&match_line(outcome));
    out
}

/// One line per canonical field with the header backing it.
pub fn mapping_table(resolution: &ColumnResolution) -> Table {
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(vec![header_cell("Field"), header_cell("Column")]);
    for field in CanonicalField::ALL {
        let column = match resolution.mapping.get(field) {
            Some(header) => Cell::new(header),
            None => dim_cell("(unresolved)"),
        };
        table.add_row(vec![field_cell(field), column]);
    }
    table
}

pub fn render_mapping(resolution: &ColumnResolution) -> String {
    let mut out = mapping_table(resolution).to_string();
    if !resolution.unmapped_headers.is_empty() {
        out.push_str(&format!(
            "\nOther columns: {}",
            resolution.unmapped_headers.join(", ")
        ));
    }
    out
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn field_cell(field: CanonicalField) -> Cell {
    Cell::new(field.as_str())
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn value_cell(value: &CellValue) -> Cell {
    match value {
        CellValue::Missing => dim_cell(""),
        CellValue::Number(_) => Cell::new(value.as_text()).set_alignment(CellAlignment::Right),
        _ => Cell::new(truncate(&value.as_text(), MAX_CELL_CHARS)),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    cut.push_str("...");
    cut
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
