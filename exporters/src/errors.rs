use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to access output file")]
    Io(#[from] std::io::Error),
    #[error("Failed to (de)serialize JSON")]
    Json(#[from] serde_json::Error),
    #[error("Failed to (de)serialize CSV")]
    Csv(#[from] csv::Error),
    #[error("Failed to (de)serialize XML: {0}")]
    Xml(String),
    #[error("Failed to write spreadsheet")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    #[error("Database request failed")]
    Sql(#[from] sqlx::Error),
    #[error("'{0}' cannot be used as a table name")]
    InvalidTableName(String),
    #[error("Database setting {0} is not set")]
    MissingSetting(&'static str),
    #[error("Column {column} holds '{value}', expected an integer")]
    InvalidValue { column: String, value: String },
}
