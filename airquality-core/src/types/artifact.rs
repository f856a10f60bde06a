use serde_json::Value;

/// Output of one ingestion run, written to a single file
#[derive(Debug, Clone, PartialEq)]
pub enum Artifact {
    Csv(CsvTable),
    Json(Value),
}

impl Artifact {
    /// Number of records carried by the artifact (CSV rows, or 1 for JSON)
    pub fn record_count(&self) -> usize {
        match self {
            Artifact::Csv(table) => table.len(),
            Artifact::Json(_) => 1,
        }
    }
}

/// Header plus rows of already-rendered cells
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsvTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    pub fn new<S: Into<String>>(header: impl IntoIterator<Item = S>) -> Self {
        Self {
            header: header.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Follow `path` through nested objects, yielding `None` on any missing step
pub fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |current, key| current.get(*key))
}

/// Render a JSON value as a CSV cell
///
/// Strings are copied verbatim, numbers keep their literal text, `null` and
/// missing values become an empty cell, anything else is compact JSON.
pub fn render_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_nested() {
        let row = json!({"Category": {"Name": "Good"}});
        assert_eq!(lookup(&row, &["Category", "Name"]), Some(&json!("Good")));
        assert_eq!(lookup(&row, &["Category", "Number"]), None);
        assert_eq!(lookup(&row, &["Missing", "Name"]), None);
    }

    #[test]
    fn test_lookup_through_null_is_none() {
        let row = json!({"Category": null});
        assert_eq!(lookup(&row, &["Category", "Name"]), None);
    }

    #[test]
    fn test_render_cell() {
        assert_eq!(render_cell(Some(&json!("2024-01-01"))), "2024-01-01");
        assert_eq!(render_cell(Some(&json!(42))), "42");
        assert_eq!(render_cell(Some(&json!(40.2923))), "40.2923");
        assert_eq!(render_cell(Some(&json!(-79.8817))), "-79.8817");
        assert_eq!(render_cell(Some(&Value::Null)), "");
        assert_eq!(render_cell(None), "");
        assert_eq!(render_cell(Some(&json!(true))), "true");
    }

    #[test]
    fn test_table_rows() {
        let mut table = CsvTable::new(["AQI", "Category"]);
        assert!(table.is_empty());
        table.push_row(vec!["42".to_string(), "Good".to_string()]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0], vec!["42", "Good"]);
    }
}
