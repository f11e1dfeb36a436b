use crate::domain::customer::LabeledRecord;
use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;
use tracing::info;

/// Loads labeled rows from a CSV file with a header row.
///
/// Columns are matched by header name; extra columns are ignored.
pub fn read_dataset(path: &Path) -> Result<Vec<LabeledRecord>> {
    let file = File::open(path).with_context(|| format!("Failed to open dataset {:?}", path))?;
    let mut rdr = csv::Reader::from_reader(BufReader::new(file));

    let mut rows = Vec::new();
    for (line, result) in rdr.deserialize().enumerate() {
        let record: LabeledRecord =
            result.with_context(|| format!("Invalid dataset row {} in {:?}", line + 1, path))?;
        rows.push(record);
    }

    info!("Loaded {} labeled rows from {:?}", rows.len(), path);
    Ok(rows)
}

/// Writes labeled rows as CSV, creating parent directories as needed.
pub fn write_dataset(path: &Path, rows: &[LabeledRecord]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }
    }

    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create dataset {:?}", path))?;
    for row in rows {
        wtr.serialize(row).context("Failed to write dataset row")?;
    }
    wtr.flush().context("Failed to flush dataset")?;

    info!("Wrote {} labeled rows to {:?}", rows.len(), path);
    Ok(())
}
