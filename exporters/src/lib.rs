pub mod config;
pub mod constants;
pub mod errors;
pub mod files;
pub mod postgres;
