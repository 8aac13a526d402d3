use std::{ops::RangeInclusive, sync::LazyLock, time::Duration};

use common::utils::{CRAWL_COOLDOWN_MAX_SECS, CRAWL_COOLDOWN_MIN_SECS};
use crawler::{errors::CrawlerError, traits::PageSession};
use rand::Rng;
use scraper::{Html, Selector};
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::{
    errors::CatalogError,
    site::{BASE_URL, CHARACTERISTICS_SUFFIX, ITEM_LINK_SELECTOR, LISTING_URL_TEMPLATE},
    utils::html::{element_extract_attr, static_selector},
};

const DEFAULT_MAX_FETCH_ATTEMPTS: u32 = 3;

static ITEM_LINK: LazyLock<Selector> = LazyLock::new(|| static_selector(ITEM_LINK_SELECTOR));

/// Outcome of loading one listing page. Only a page that loaded and listed
/// nothing ends pagination, a failed load is retried.
#[derive(Debug)]
pub enum ListingPage {
    Items(Vec<String>),
    Empty,
    FetchError(CrawlerError),
}

/// Pagination progress of one discovery run
#[derive(Debug)]
pub struct CrawlState {
    page: u32,
    urls: Vec<String>,
}

impl Default for CrawlState {
    fn default() -> Self {
        Self {
            page: 1,
            urls: Vec::new(),
        }
    }
}

impl CrawlState {
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Listing pages that yielded notebooks
    pub fn pages_crawled(&self) -> u32 {
        self.page - 1
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn into_urls(self) -> Vec<String> {
        self.urls
    }

    /// Appends a page's URLs as-is (repeats included) and moves to the next page
    fn advance(&mut self, mut page_urls: Vec<String>) {
        self.urls.append(&mut page_urls);
        self.page += 1;
    }
}

/// Extracts the characteristics URL of every notebook on a listing page.
pub fn parse_listing(source: &str) -> Result<Vec<String>, CatalogError> {
    let html = Html::parse_document(source);
    let mut urls: Vec<String> = Vec::new();

    for link in html.select(&ITEM_LINK) {
        let href = element_extract_attr(link, "href")?;

        urls.push(format!("{BASE_URL}{href}{CHARACTERISTICS_SUFFIX}"));
    }

    Ok(urls)
}

pub struct CatalogCrawlerBuilder {
    cooldown_secs: RangeInclusive<u64>,
    max_fetch_attempts: u32,
    max_pages: Option<u32>,
}

impl Default for CatalogCrawlerBuilder {
    fn default() -> Self {
        Self {
            cooldown_secs: CRAWL_COOLDOWN_MIN_SECS..=CRAWL_COOLDOWN_MAX_SECS,
            max_fetch_attempts: DEFAULT_MAX_FETCH_ATTEMPTS,
            max_pages: None,
        }
    }
}

impl CatalogCrawlerBuilder {
    pub fn with_cooldown_secs(mut self, min: u64, max: u64) -> Self {
        self.cooldown_secs = min.min(max)..=min.max(max);

        self
    }

    pub fn with_max_fetch_attempts(mut self, attempts: u32) -> Self {
        self.max_fetch_attempts = attempts.max(1);

        self
    }

    pub fn with_max_pages(mut self, max_pages: Option<u32>) -> Self {
        self.max_pages = max_pages;

        self
    }

    pub fn build(self) -> CatalogCrawler {
        CatalogCrawler { options: self }
    }
}

/// Walks the paginated listing until a page comes back empty.
pub struct CatalogCrawler {
    options: CatalogCrawlerBuilder,
}

impl CatalogCrawler {
    pub fn builder() -> CatalogCrawlerBuilder {
        CatalogCrawlerBuilder::default()
    }

    pub fn page_url(&self, page: u32) -> String {
        LISTING_URL_TEMPLATE.replace("{page}", &page.to_string())
    }

    pub async fn discover_all_urls<S>(&self, session: &mut S) -> Result<Vec<String>, CatalogError>
    where
        S: PageSession + ?Sized,
    {
        Ok(self.discover(session).await?.into_urls())
    }

    /// Same walk as [`Self::discover_all_urls`], keeping the pagination state
    pub async fn discover<S>(&self, session: &mut S) -> Result<CrawlState, CatalogError>
    where
        S: PageSession + ?Sized,
    {
        let mut state = CrawlState::default();

        loop {
            if let Some(max_pages) = self.options.max_pages
                && state.page() > max_pages
            {
                info!("Stopping at the page limit ({max_pages})");
                break;
            }

            let url = self.page_url(state.page());

            let Some(page_urls) = self.load_page(session, &url).await? else {
                info!("Page {} is empty, catalog exhausted", state.page());
                break;
            };

            info!("Page {}: {} notebooks", state.page(), page_urls.len());
            state.advance(page_urls);
        }

        info!(
            "Discovered {} notebook URLs on {} pages",
            state.urls().len(),
            state.pages_crawled()
        );

        Ok(state)
    }

    /// Retries failed loads. `None` is an empty page, exhausted retries are
    /// [`CatalogError::ListingUnavailable`].
    async fn load_page<S>(
        &self,
        session: &mut S,
        url: &str,
    ) -> Result<Option<Vec<String>>, CatalogError>
    where
        S: PageSession + ?Sized,
    {
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;

            match self.fetch_listing(session, url).await? {
                ListingPage::FetchError(err) if attempt < self.options.max_fetch_attempts => {
                    warn!("Listing page {url} failed to load (attempt {attempt}): {err}");
                    sleep(self.cooldown()).await;
                }
                ListingPage::FetchError(source) => {
                    return Err(CatalogError::ListingUnavailable {
                        url: url.into(),
                        attempts: attempt,
                        source,
                    });
                }
                ListingPage::Items(urls) => return Ok(Some(urls)),
                ListingPage::Empty => return Ok(None),
            }
        }
    }

    /// One navigation; the random pause both throttles requests and gives
    /// the listing time to render
    async fn fetch_listing<S>(&self, session: &mut S, url: &str) -> Result<ListingPage, CatalogError>
    where
        S: PageSession + ?Sized,
    {
        debug!("Loading listing page {url}");

        if let Err(err) = session.navigate(url).await {
            return Ok(ListingPage::FetchError(err));
        }

        sleep(self.cooldown()).await;

        let source = match session.page_source().await {
            Ok(source) => source,
            Err(err) => return Ok(ListingPage::FetchError(err)),
        };

        let urls = parse_listing(&source)?;

        if urls.is_empty() {
            return Ok(ListingPage::Empty);
        }

        Ok(ListingPage::Items(urls))
    }

    fn cooldown(&self) -> Duration {
        let secs = rand::thread_rng().gen_range(self.options.cooldown_secs.clone());

        Duration::from_secs(secs)
    }
}
