use airquality_core::Artifact;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::IngestError;

/// Write an artifact to `path`, replacing any previous file
///
/// CSV tables get a header row followed by their data rows; JSON values are
/// pretty-printed with two-space indentation. The parent directory is
/// created when missing.
pub fn write_artifact(path: &Path, artifact: &Artifact) -> Result<(), IngestError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    match artifact {
        Artifact::Csv(table) => {
            // Rows are written as returned, even when their width differs from the header
            let mut writer = csv::WriterBuilder::new().flexible(true).from_path(path)?;
            writer.write_record(&table.header)?;
            for row in &table.rows {
                writer.write_record(row)?;
            }
            writer.flush()?;
        }
        Artifact::Json(value) => {
            let mut writer = BufWriter::new(File::create(path)?);
            serde_json::to_writer_pretty(&mut writer, value)?;
            writer.flush()?;
        }
    }

    tracing::debug!(
        "Wrote {} record(s) to {}",
        artifact.record_count(),
        path.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use airquality_core::CsvTable;
    use serde_json::json;

    #[test]
    fn test_write_csv_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        fs::write(&path, "stale,content\n1,2\n3,4\n").unwrap();

        let mut table = CsvTable::new(["a", "b"]);
        table.push_row(vec!["x".to_string(), "".to_string()]);
        write_artifact(&path, &Artifact::Csv(table)).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines, vec!["a,b", "x,"]);
    }

    #[test]
    fn test_write_csv_quotes_commas() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let mut table = CsvTable::new(["name"]);
        table.push_row(vec!["Clairton, PA".to_string()]);
        write_artifact(&path, &Artifact::Csv(table)).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"Clairton, PA\""));
    }

    #[test]
    fn test_write_json_pretty_creates_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.json");

        write_artifact(&path, &Artifact::Json(json!({"Data": [1]}))).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, "{\n  \"Data\": [\n    1\n  ]\n}");
    }
}
