use crate::{constants::DEFAULT_POSTGRES_PORT, errors::ExportError};

/// Connection settings of the relational sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl DatabaseConfig {
    /// Every setting but the port is mandatory, the name of the first missing
    /// one is reported
    pub fn from_parts(
        host: Option<String>,
        port: Option<u16>,
        user: Option<String>,
        password: Option<String>,
        database: Option<String>,
    ) -> Result<Self, ExportError> {
        Ok(Self {
            host: host.ok_or(ExportError::MissingSetting("HOST"))?,
            port: port.unwrap_or(DEFAULT_POSTGRES_PORT),
            user: user.ok_or(ExportError::MissingSetting("USER_NAME"))?,
            password: password.ok_or(ExportError::MissingSetting("PASSWORD"))?,
            database: database.ok_or(ExportError::MissingSetting("DB_NAME"))?,
        })
    }
}
