use crate::loader::LoadStatus;
use crate::validation::ValidationReport;

/// Render the validation report as deterministic plain text.
pub fn render_validation_report(report: &ValidationReport) -> String {
    let mut lines = Vec::new();

    lines.push("# Load validation report".to_string());
    lines.push(format!("- store: {}", report.db_path));
    lines.push(String::new());

    lines.push("## Row counts".to_string());
    lines.push("| table | source_rows | stored_rows | load |".to_string());
    lines.push("| --- | --- | --- | --- |".to_string());
    for table in &report.tables {
        let load = match &table.load {
            LoadStatus::Loaded { .. } => "ok".to_string(),
            LoadStatus::RolledBack { line, .. } => format!("rolled back (line {line})"),
        };
        lines.push(format!(
            "| {} | {} | {} | {} |",
            table.table, table.source_rows, table.stored_rows, load
        ));
    }
    lines.push(String::new());

    lines.push("## Missing values".to_string());
    let mut any_nulls = false;
    for table in &report.tables {
        for column in table.nulls.iter().filter(|column| column.nulls > 0) {
            any_nulls = true;
            let marker = if column.required { " (required)" } else { "" };
            lines.push(format!(
                "- {}.{}{}: {}",
                table.table, column.column, marker, column.nulls
            ));
        }
    }
    if !any_nulls {
        lines.push("- none".to_string());
    }
    lines.push(String::new());

    lines.push("## Duplicate primary keys".to_string());
    for table in &report.tables {
        lines.push(format!("- {}: {}", table.table, table.duplicate_keys));
    }
    lines.push(String::new());

    lines.push("## Dangling foreign keys".to_string());
    let mut any_fk = false;
    for table in &report.tables {
        for fk in &table.orphans {
            any_fk = true;
            lines.push(format!(
                "- {}.{} -> {}: {}",
                table.table, fk.column, fk.parent_table, fk.orphans
            ));
        }
    }
    if !any_fk {
        lines.push("- none".to_string());
    }

    let failed: Vec<_> = report
        .tables
        .iter()
        .filter_map(|table| match &table.load {
            LoadStatus::RolledBack { reason, .. } => Some((table.table.as_str(), reason)),
            LoadStatus::Loaded { .. } => None,
        })
        .collect();
    if !failed.is_empty() {
        lines.push(String::new());
        lines.push("## Load failures".to_string());
        for (table, reason) in failed {
            lines.push(format!("- {table}: {reason}"));
        }
    }

    lines.join("\n")
}
