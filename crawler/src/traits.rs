use async_trait::async_trait;

use crate::errors::CrawlerError;

/// One navigation context shared by every phase of a run.
///
/// Implementations keep the most recently loaded page; `page_source` returns
/// its current markup, which for a browser may still be changing as scripts
/// render it.
#[async_trait]
pub trait PageSession: Send {
    async fn navigate(&mut self, url: &str) -> Result<(), CrawlerError>;

    async fn page_source(&mut self) -> Result<String, CrawlerError>;

    async fn click(&mut self, selector: &str) -> Result<(), CrawlerError>;

    /// Replaces the content of an input element with `text`
    async fn fill(&mut self, selector: &str, text: &str) -> Result<(), CrawlerError>;
}
