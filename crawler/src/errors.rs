use thiserror::Error;
use tokio::task::JoinError;

#[derive(Error, Debug)]
pub enum CrawlerError {
    #[error("Failed to launch browser: {0}")]
    BrowserLaunch(String),
    #[error("Failed to navigate to {url}: {reason}")]
    Navigation { url: String, reason: String },
    #[error("Failed to read page source: {0}")]
    PageSource(String),
    #[error("Failed to interact with element '{selector}': {reason}")]
    Interaction { selector: String, reason: String },
    #[error("{0} is not supported by this session")]
    Unsupported(&'static str),
    #[error("No page has been loaded yet")]
    NoPageLoaded,
    #[error("Browser task did not finish")]
    BlockingTask(#[from] JoinError),
    #[error("Unprotected crawler general error")]
    UnprotectedClientMiddlewareGeneralError(#[from] reqwest_middleware::Error),
    #[error("Unprotected crawler general error")]
    UnprotectedClientGeneralError(#[from] reqwest::Error),
}
