use catalog::errors::CatalogError;
use crawler::errors::CrawlerError;
use exporters::errors::ExportError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Failed to open a browser session")]
    Session(#[from] CrawlerError),
    #[error("Scraping the catalog failed")]
    Catalog(#[from] CatalogError),
    #[error("Saving notebooks failed")]
    Export(#[from] ExportError),
    #[error("No notebook URLs to collect, the catalog listing or the URL file is empty")]
    NothingToCollect,
}
