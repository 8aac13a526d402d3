use std::path::{Path, PathBuf};

use common::result::base::NotebookRecord;
use strum_macros::{Display, EnumIter, EnumString};
use tracing::info;

use crate::errors::ExportError;

pub mod csv;
pub mod json;
pub mod xlsx;
pub mod xml;

/// File formats the collected notebooks can be saved as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OutputFormat {
    Json,
    Csv,
    Xml,
    Xlsx,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Xml => "xml",
            OutputFormat::Xlsx => "xlsx",
        }
    }

    /// `<dir>/<stem>.<extension>`
    pub fn path_in(&self, dir: &Path, stem: &str) -> PathBuf {
        dir.join(format!("{stem}.{}", self.extension()))
    }

    pub fn write(&self, path: &Path, records: &[NotebookRecord]) -> Result<(), ExportError> {
        match self {
            OutputFormat::Json => json::write_records(path, records),
            OutputFormat::Csv => csv::write_records(path, records),
            OutputFormat::Xml => xml::write_records(path, records),
            OutputFormat::Xlsx => xlsx::write_records(path, records),
        }
    }
}

/// Writes `records` once per format and returns the created files
pub fn export_all(
    formats: &[OutputFormat],
    dir: &Path,
    stem: &str,
    records: &[NotebookRecord],
) -> Result<Vec<PathBuf>, ExportError> {
    let mut written: Vec<PathBuf> = Vec::with_capacity(formats.len());

    for format in formats {
        let path = format.path_in(dir, stem);

        format.write(&path, records)?;
        info!("Saved {} notebooks to {}", records.len(), path.display());

        written.push(path);
    }

    Ok(written)
}
