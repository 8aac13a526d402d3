use crawler::errors::CrawlerError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Browser session failed")]
    Session(#[from] CrawlerError),
    #[error("Failed to parse amount into an integer: {0}")]
    InvalidNumber(String),
    #[error("Pattern {pattern} did not match '{haystack}'")]
    PatternMismatch { pattern: String, haystack: String },
    #[error("Missing attribute {0} from element {1}")]
    HtmlElementMissingAttribute(String, String),
    #[error("Price widget did not render after {attempts} checks")]
    RenderTimeout { attempts: u32 },
    #[error("Listing page {url} could not be loaded after {attempts} attempts")]
    ListingUnavailable {
        url: String,
        attempts: u32,
        #[source]
        source: CrawlerError,
    },
    #[error("Failed to collect notebook {url}")]
    Item {
        url: String,
        #[source]
        source: Box<CatalogError>,
    },
    #[error("Failed to access URL list")]
    UrlList(#[from] std::io::Error),
}
