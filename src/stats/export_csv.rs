//! CSV export of chart series: one row per curve point.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::stats::survival::ChartSeries;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to create {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush csv: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Serialize)]
struct CurveRow<'a> {
    series: &'a str,
    hours: f64,
    percent: f64,
}

pub fn write_series<W: Write>(writer: W, series: &[ChartSeries]) -> Result<(), ExportError> {
    let mut csv = csv::Writer::from_writer(writer);
    for entry in series {
        for point in &entry.data {
            csv.serialize(CurveRow {
                series: &entry.id,
                hours: point.x,
                percent: point.y,
            })?;
        }
    }
    csv.flush()?;
    Ok(())
}

pub fn export_series(path: impl AsRef<Path>, series: &[ChartSeries]) -> Result<(), ExportError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| ExportError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    write_series(file, series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::survival::CurvePoint;

    #[test]
    fn writes_header_and_one_row_per_point() {
        let series = vec![
            ChartSeries {
                id: "No refills".to_string(),
                data: vec![CurvePoint { x: 9.5, y: 50.0 }, CurvePoint { x: 10.0, y: 0.0 }],
            },
            ChartSeries {
                id: "One refill".to_string(),
                data: Vec::new(),
            },
        ];
        let mut out = Vec::new();
        write_series(&mut out, &series).expect("export should succeed");
        let text = String::from_utf8(out).expect("csv is utf-8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["series,hours,percent", "No refills,9.5,50.0", "No refills,10.0,0.0"]);
    }
}
