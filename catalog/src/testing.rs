use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use crawler::{errors::CrawlerError, traits::PageSession};

const BLANK_PAGE: &str = "<html><head></head><body></body></html>";

/// Scripted session: every URL maps to the successive renders a browser would
/// show for it. Each `page_source` call advances to the next render and the
/// last one sticks. Unknown URLs load a blank page.
#[derive(Default)]
pub(crate) struct FakeSession {
    pages: HashMap<String, VecDeque<String>>,
    navigation_failures: HashMap<String, u32>,
    current: Option<String>,
    pub(crate) navigations: Vec<String>,
    pub(crate) actions: Vec<String>,
}

impl FakeSession {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_page(self, url: &str, source: &str) -> Self {
        self.with_renders(url, &[source])
    }

    pub(crate) fn with_renders(mut self, url: &str, sources: &[&str]) -> Self {
        self.pages.insert(
            url.into(),
            sources.iter().map(|source| source.to_string()).collect(),
        );

        self
    }

    pub(crate) fn failing_navigation(mut self, url: &str, times: u32) -> Self {
        self.navigation_failures.insert(url.into(), times);

        self
    }
}

#[async_trait]
impl PageSession for FakeSession {
    async fn navigate(&mut self, url: &str) -> Result<(), CrawlerError> {
        self.navigations.push(url.into());

        if let Some(remaining) = self.navigation_failures.get_mut(url)
            && *remaining > 0
        {
            *remaining -= 1;

            return Err(CrawlerError::Navigation {
                url: url.into(),
                reason: "connection reset".into(),
            });
        }

        self.current = Some(url.into());

        Ok(())
    }

    async fn page_source(&mut self) -> Result<String, CrawlerError> {
        let Some(url) = &self.current else {
            return Err(CrawlerError::NoPageLoaded);
        };

        let Some(renders) = self.pages.get_mut(url) else {
            return Ok(BLANK_PAGE.into());
        };

        let source = match renders.len() {
            0 => BLANK_PAGE.to_string(),
            1 => renders[0].clone(),
            _ => renders.pop_front().unwrap_or_default(),
        };

        Ok(source)
    }

    async fn click(&mut self, selector: &str) -> Result<(), CrawlerError> {
        self.actions.push(format!("click {selector}"));

        Ok(())
    }

    async fn fill(&mut self, selector: &str, text: &str) -> Result<(), CrawlerError> {
        self.actions.push(format!("fill {selector} {text}"));

        Ok(())
    }
}
