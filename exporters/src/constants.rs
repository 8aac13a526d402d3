pub(crate) const XML_ROOT_TAG: &str = "Ноутбуки";
pub(crate) const XML_RECORD_TAG: &str = "Ноутбук";

pub(crate) const XLSX_SHEET_NAME: &str = "Ноутбуки";

pub const DEFAULT_TABLE_NAME: &str = "Gaming notebooks";
pub(crate) const DEFAULT_POSTGRES_PORT: u16 = 5432;
