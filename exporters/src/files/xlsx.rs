use std::path::Path;

use common::result::{
    base::{FieldValue, NotebookRecord},
    enums::Column,
};
use rust_xlsxwriter::{Format, Workbook};
use strum::IntoEnumIterator;

use crate::{constants::XLSX_SHEET_NAME, errors::ExportError};

/// Single sheet, bold header row, prices stored as numbers
pub fn write_records(path: &Path, records: &[NotebookRecord]) -> Result<(), ExportError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(XLSX_SHEET_NAME)?;

    for (col, column) in Column::iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, column.header(), &header_format)?;
    }

    for (row, record) in records.iter().enumerate() {
        let row = row as u32 + 1;

        for (col, column) in Column::iter().enumerate() {
            let col = col as u16;

            match record.field(column) {
                FieldValue::Integer(value) => {
                    worksheet.write_number(row, col, f64::from(value))?;
                }
                FieldValue::Text(value) => {
                    worksheet.write_string(row, col, value)?;
                }
            }
        }
    }

    worksheet.autofit();
    workbook.save(path)?;

    Ok(())
}
