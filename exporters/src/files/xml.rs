use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
};

use common::result::{base::NotebookRecord, enums::Column};
use quick_xml::{
    Reader, Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use strum::IntoEnumIterator;

use crate::{
    constants::{XML_RECORD_TAG, XML_ROOT_TAG},
    errors::ExportError,
};

fn xml_error(err: impl ToString) -> ExportError {
    ExportError::Xml(err.to_string())
}

/// `<Ноутбуки><Ноутбук><Производитель>..</Производитель>..</Ноутбук>..</Ноутбуки>`
pub fn write_records(path: &Path, records: &[NotebookRecord]) -> Result<(), ExportError> {
    let mut writer = Writer::new_with_indent(BufWriter::new(File::create(path)?), b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(xml_error)?;
    writer
        .write_event(Event::Start(BytesStart::new(XML_ROOT_TAG)))
        .map_err(xml_error)?;

    for record in records {
        writer
            .write_event(Event::Start(BytesStart::new(XML_RECORD_TAG)))
            .map_err(xml_error)?;

        for column in Column::iter() {
            let value = record.field(column).to_string();

            writer
                .create_element(column.xml_tag())
                .write_text_content(BytesText::new(&value))
                .map_err(xml_error)?;
        }

        writer
            .write_event(Event::End(BytesEnd::new(XML_RECORD_TAG)))
            .map_err(xml_error)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new(XML_ROOT_TAG)))
        .map_err(xml_error)?;

    writer.into_inner().flush()?;

    Ok(())
}

pub fn read_records(path: &Path) -> Result<Vec<NotebookRecord>, ExportError> {
    parse_records(&fs::read_to_string(path)?)
}

/// Cells missing from a `Ноутбук` element keep their default value
pub fn parse_records(xml: &str) -> Result<Vec<NotebookRecord>, ExportError> {
    let mut reader = Reader::from_str(xml);
    let mut records: Vec<NotebookRecord> = Vec::new();

    let mut record: Option<NotebookRecord> = None;
    let mut cell: Option<(Column, String)> = None;

    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Start(element) => {
                let name = String::from_utf8_lossy(element.name().as_ref()).into_owned();

                if name == XML_RECORD_TAG {
                    record = Some(NotebookRecord::default());
                } else if record.is_some() {
                    cell = Column::iter()
                        .find(|column| column.xml_tag() == name)
                        .map(|column| (column, String::new()));
                }
            }
            Event::Text(text) => {
                if let Some((_, value)) = cell.as_mut() {
                    value.push_str(&text.unescape().map_err(xml_error)?);
                }
            }
            Event::End(element) => {
                let name = String::from_utf8_lossy(element.name().as_ref()).into_owned();

                if name == XML_RECORD_TAG {
                    records.extend(record.take());
                } else if let Some((column, value)) = cell.take()
                    && let Some(record) = record.as_mut()
                {
                    record
                        .set_field(column, value.clone())
                        .map_err(|_| ExportError::InvalidValue {
                            column: column.header().into(),
                            value,
                        })?;
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(records)
}
