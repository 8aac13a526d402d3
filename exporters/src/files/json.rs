use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use common::result::base::NotebookRecord;

use crate::errors::ExportError;

/// Pretty printed array of objects keyed by column header
pub fn write_records(path: &Path, records: &[NotebookRecord]) -> Result<(), ExportError> {
    let mut writer = BufWriter::new(File::create(path)?);

    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.flush()?;

    Ok(())
}

pub fn read_records(path: &Path) -> Result<Vec<NotebookRecord>, ExportError> {
    let reader = BufReader::new(File::open(path)?);

    Ok(serde_json::from_reader(reader)?)
}
