use std::path::{Path, PathBuf};

use crate::errors::ReportError;
use crate::model::QueryResult;

/// Write `<output_dir>/<query>.csv`, replacing any previous export.
pub fn write_result_csv(result: &QueryResult, output_dir: &Path) -> Result<PathBuf, ReportError> {
    std::fs::create_dir_all(output_dir).map_err(|source| ReportError::Io {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let path = output_dir.join(format!("{}.csv", result.name));
    let mut writer = csv::Writer::from_path(&path)?;
    writer.write_record(&result.columns)?;
    for row in result.text_rows() {
        writer.write_record(&row)?;
    }
    writer.flush().map_err(|source| ReportError::Io {
        path: path.clone(),
        source,
    })?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use rusqlite::types::Value;

    use super::*;

    #[test]
    fn export_overwrites_with_header_and_rows() {
        let dir = std::env::temp_dir().join(format!(
            "ecomgen_export_{}",
            std::process::id()
        ));
        let result = QueryResult {
            name: "monthly_sales".to_string(),
            columns: vec!["month".to_string(), "total_revenue".to_string()],
            rows: vec![vec![Value::Text("2024-01".to_string()), Value::Real(10.0)]],
        };

        std::fs::create_dir_all(&dir).expect("create dir");
        std::fs::write(dir.join("monthly_sales.csv"), "stale,stale,stale\n").expect("seed");

        let path = write_result_csv(&result, &dir).expect("write csv");
        let contents = std::fs::read_to_string(&path).expect("read csv");
        assert_eq!(contents, "month,total_revenue\n2024-01,10.00\n");
        let _ = std::fs::remove_dir_all(&dir);
    }
}
