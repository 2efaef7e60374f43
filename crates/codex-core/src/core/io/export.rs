use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("JSON serialization error for '{path}': {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
    #[error("CSV writing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
}

/// One named curve of a chart, stored as `(x, y)` pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub name: String,
    pub points: Vec<(f64, f64)>,
}

impl ChartSeries {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            points: Vec::new(),
        }
    }

    pub fn from_points(name: impl Into<String>, points: Vec<(f64, f64)>) -> Self {
        Self {
            name: name.into(),
            points,
        }
    }

    pub fn push(&mut self, x: f64, y: f64) {
        self.points.push((x, y));
    }
}

#[derive(Serialize)]
struct ChartRow<'a> {
    series: &'a str,
    x: f64,
    y: f64,
}

fn create(path: &Path) -> Result<File, ExportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ExportError::Io {
            path: parent.to_string_lossy().to_string(),
            source: e,
        })?;
    }
    File::create(path).map_err(|e| ExportError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })
}

/// Writes `value` as pretty-printed JSON, creating parent directories as needed.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ExportError> {
    let file = create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), value).map_err(|e| ExportError::Json {
        path: path.to_string_lossy().to_string(),
        source: e,
    })
}

/// Writes chart data in long format with the header `series,x,y`.
pub fn write_series_csv(path: &Path, series: &[ChartSeries]) -> Result<(), ExportError> {
    let file = create(path)?;
    let csv_err = |e: csv::Error| ExportError::Csv {
        path: path.to_string_lossy().to_string(),
        source: e,
    };

    let mut writer = csv::Writer::from_writer(BufWriter::new(file));
    for s in series {
        for &(x, y) in &s.points {
            writer
                .serialize(ChartRow {
                    series: &s.name,
                    x,
                    y,
                })
                .map_err(csv_err)?;
        }
    }
    writer.flush().map_err(|e| ExportError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn series_csv_is_written_in_long_format() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("charts").join("cascade.csv");
        let mut a = ChartSeries::new("a");
        a.push(0.0, 1.5);
        a.push(1.0, 2.5);
        let b = ChartSeries::from_points("b", vec![(0.0, -1.0)]);

        write_series_csv(&path, &[a, b]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines, vec!["series,x,y", "a,0.0,1.5", "a,1.0,2.5", "b,0.0,-1.0"]);
    }

    #[test]
    fn json_export_round_trips_through_serde_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.json");
        write_json(&path, &serde_json::json!({ "bcs_score": 0.82 })).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["bcs_score"], 0.82);
    }

    #[test]
    fn unwritable_target_reports_io_error() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "").unwrap();
        let result = write_json(&blocker.join("nested.json"), &1);
        assert!(matches!(result, Err(ExportError::Io { .. })));
    }
}
