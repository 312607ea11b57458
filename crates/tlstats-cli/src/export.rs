//! CSV export of analyzed corpus records.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::corpus::DigestRecord;
use crate::error::DigestError;
use crate::flatten::{cell_text, flatten};

/// Timestamp suffix for export filenames, e.g. `260828143059`.
pub fn unique_suffix() -> String {
    Local::now().format("%y%m%d%H%M%S").to_string()
}

/// Export path for a corpus file: `<out_dir>/<input-stem>_<timestamp>.csv`.
pub fn export_path(out_dir: &Path, input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "corpus".to_string());
    out_dir.join(format!("{stem}_{}.csv", unique_suffix()))
}

/// Write records to a CSV file at `path`.
///
/// The header is the sorted union of every record's flattened keys, so
/// optional columns (classification, requirement text) appear whenever at
/// least one record carries them; records lacking a column leave the cell
/// empty.
pub fn write_csv(records: &[DigestRecord], path: &Path) -> Result<(), DigestError> {
    let flattened: Vec<_> = records
        .iter()
        .map(|record| serde_json::to_value(record).map(|value| flatten(&value)))
        .collect::<Result<_, _>>()?;

    let mut headers = BTreeSet::new();
    for row in &flattened {
        headers.extend(row.keys().cloned());
    }
    let headers: Vec<&String> = headers.iter().collect();

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(&headers)?;
    for row in &flattened {
        let cells: Vec<String> = headers
            .iter()
            .map(|header| row.get(*header).map(cell_text).unwrap_or_default())
            .collect();
        writer.write_record(&cells)?;
    }
    writer.flush().map_err(DigestError::Io)?;
    Ok(())
}
