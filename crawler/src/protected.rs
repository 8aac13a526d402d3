use std::{fmt::Display, sync::Arc, time::Duration};

use async_trait::async_trait;
use headless_chrome::{Browser, LaunchOptions, Tab};
use tokio::task;
use tracing::{debug, info};

use crate::{errors::CrawlerError, traits::PageSession};

const WINDOW_SIZE: (u32, u32) = (1920, 1080);
// the catalog pauses for several seconds between pages, chrome must not
// consider the connection idle in the meantime
const IDLE_BROWSER_TIMEOUT_SECS: u64 = 600;
const CLEAR_INPUT_JS: &str = "function() { this.value = ''; }";

/// Browser-backed session, for pages that are rendered client side.
///
/// The Chrome process belongs to this struct and is shut down when it is
/// dropped, so every exit path of a run releases it.
pub struct ProtectedCrawler {
    tab: Arc<Tab>,
    _browser: Browser,
}

impl ProtectedCrawler {
    pub fn new(headless: bool) -> Result<Self, CrawlerError> {
        let browser = Self::create_browser(headless)?;
        let tab = browser
            .new_tab()
            .map_err(|err| CrawlerError::BrowserLaunch(err.to_string()))?;

        info!("Launched Chrome (headless: {headless})");

        Ok(Self {
            tab,
            _browser: browser,
        })
    }

    fn create_browser(headless: bool) -> Result<Browser, CrawlerError> {
        let launch_opts = LaunchOptions::default_builder()
            .headless(headless)
            .window_size(Some(WINDOW_SIZE))
            .idle_browser_timeout(Duration::from_secs(IDLE_BROWSER_TIMEOUT_SECS))
            .build()
            .map_err(|err| CrawlerError::BrowserLaunch(err.to_string()))?;

        Browser::new(launch_opts).map_err(|err| CrawlerError::BrowserLaunch(err.to_string()))
    }

    /// CDP calls block, so they run on tokio's blocking pool
    async fn with_tab<T, E, F>(&self, operation: F) -> Result<Result<T, String>, CrawlerError>
    where
        T: Send + 'static,
        E: Display,
        F: FnOnce(&Tab) -> Result<T, E> + Send + 'static,
    {
        let tab = Arc::clone(&self.tab);
        let outcome =
            task::spawn_blocking(move || operation(&tab).map_err(|err| err.to_string())).await?;

        Ok(outcome)
    }
}

#[async_trait]
impl PageSession for ProtectedCrawler {
    async fn navigate(&mut self, url: &str) -> Result<(), CrawlerError> {
        debug!("Navigating to {url}");

        let target = url.to_string();

        self.with_tab(move |tab| {
            tab.navigate_to(&target)
                .and_then(|tab| tab.wait_until_navigated())
                .map(|_| ())
        })
        .await?
        .map_err(|reason| CrawlerError::Navigation {
            url: url.into(),
            reason,
        })
    }

    async fn page_source(&mut self) -> Result<String, CrawlerError> {
        self.with_tab(|tab| tab.get_content())
            .await?
            .map_err(CrawlerError::PageSource)
    }

    async fn click(&mut self, selector: &str) -> Result<(), CrawlerError> {
        let query = selector.to_string();

        self.with_tab(move |tab| {
            tab.wait_for_element(&query)
                .and_then(|element| element.click().map(|_| ()))
        })
        .await?
        .map_err(|reason| CrawlerError::Interaction {
            selector: selector.into(),
            reason,
        })
    }

    async fn fill(&mut self, selector: &str, text: &str) -> Result<(), CrawlerError> {
        let query = selector.to_string();
        let text = text.to_string();

        self.with_tab(move |tab| {
            tab.wait_for_element(&query)
                .and_then(|element| {
                    element
                        .call_js_fn(CLEAR_INPUT_JS, vec![], false)
                        .and_then(|_| element.click())
                        .map(|_| ())
                })
                .and_then(|_| tab.type_str(&text).map(|_| ()))
        })
        .await?
        .map_err(|reason| CrawlerError::Interaction {
            selector: selector.into(),
            reason,
        })
    }
}
