use std::path::Path;

use common::result::base::NotebookRecord;

use crate::errors::ExportError;

/// Header row followed by one row per notebook, in column order
pub fn write_records(path: &Path, records: &[NotebookRecord]) -> Result<(), ExportError> {
    let mut writer = ::csv::Writer::from_path(path)?;

    for record in records {
        writer.serialize(record)?;
    }

    writer.flush()?;

    Ok(())
}

pub fn read_records(path: &Path) -> Result<Vec<NotebookRecord>, ExportError> {
    let mut reader = ::csv::Reader::from_path(path)?;
    let mut records: Vec<NotebookRecord> = Vec::new();

    for record in reader.deserialize() {
        records.push(record?);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use common::result::enums::Column;
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;
    use tempfile::tempdir;

    use super::*;
    use crate::files::testing::records;

    #[test]
    fn reads_back_what_was_written() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notebooks.csv");

        write_records(&path, &records()).unwrap();

        assert_eq!(read_records(&path).unwrap(), records());
    }

    #[test]
    fn header_row_follows_column_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notebooks.csv");

        write_records(&path, &records()).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        let headers: Vec<&str> = Column::iter().map(|column| column.header()).collect();

        assert_eq!(text.lines().next().unwrap(), headers.join(","));
        assert_eq!(text.lines().count(), 3);
    }
}
