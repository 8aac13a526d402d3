use std::time::Duration;

use async_trait::async_trait;
use reqwest::ClientBuilder as BaseClientBuilder;
use reqwest_middleware::{ClientBuilder as RetryableClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use tracing::{debug, info};

use crate::{errors::CrawlerError, traits::PageSession};

const PAGE_TIMEOUT_SECONDS: u64 = 30;
const PAGE_MIN_SECS_BACKOFF: u64 = 10;
const PAGE_MAX_SECS_BACKOFF: u64 = 60;
const MAX_RETRY: u32 = 3;

const USER_AGENT: &str = "notebook-catalog/1.0";

/// Plain HTTP session. It never runs scripts, so it only suits pages that
/// are rendered server side (saved pages, mirrors, static fixtures).
pub struct UnprotectedCrawler {
    client: ClientWithMiddleware,
    current_page: Option<String>,
}

impl UnprotectedCrawler {
    pub fn new() -> Result<Self, CrawlerError> {
        Ok(Self {
            client: Self::create_client()?,
            current_page: None,
        })
    }

    fn create_client() -> Result<ClientWithMiddleware, CrawlerError> {
        let base_client = BaseClientBuilder::new()
            .gzip(true)
            .cookie_store(true)
            .http1_ignore_invalid_headers_in_responses(true)
            .timeout(Duration::from_secs(PAGE_TIMEOUT_SECONDS))
            .user_agent(USER_AGENT)
            .build()?;

        let retry_strat = ExponentialBackoff::builder()
            .retry_bounds(
                Duration::from_secs(PAGE_MIN_SECS_BACKOFF),
                Duration::from_secs(PAGE_MAX_SECS_BACKOFF),
            )
            .build_with_max_retries(MAX_RETRY);
        let retry_middleware = RetryTransientMiddleware::new_with_policy(retry_strat);

        Ok(RetryableClientBuilder::new(base_client)
            .with(retry_middleware)
            .build())
    }
}

#[async_trait]
impl PageSession for UnprotectedCrawler {
    async fn navigate(&mut self, url: &str) -> Result<(), CrawlerError> {
        info!("Sending request to {url}");

        let response = self.client.get(url).send().await?.error_for_status()?;

        debug!("{response:?}");

        self.current_page = Some(response.text().await?);

        Ok(())
    }

    async fn page_source(&mut self) -> Result<String, CrawlerError> {
        self.current_page.clone().ok_or(CrawlerError::NoPageLoaded)
    }

    async fn click(&mut self, _selector: &str) -> Result<(), CrawlerError> {
        Err(CrawlerError::Unsupported("click"))
    }

    async fn fill(&mut self, _selector: &str, _text: &str) -> Result<(), CrawlerError> {
        Err(CrawlerError::Unsupported("fill"))
    }
}
