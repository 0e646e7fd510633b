use comfy_table::Table;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;

use crate::model::QueryResult;
use crate::queries::QueryDef;

/// Console rendering of a result set.
pub fn render_table(query: &QueryDef, result: &QueryResult) -> String {
    let mut lines = vec![format!(">>> {}: {}", query.name, query.description)];

    if result.rows.is_empty() {
        lines.push("No rows returned.".to_string());
        return lines.join("\n");
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(&result.columns);
    for row in result.text_rows() {
        table.add_row(row);
    }

    lines.push(table.to_string());
    lines.join("\n")
}
