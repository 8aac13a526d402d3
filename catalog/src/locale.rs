use std::time::Duration;

use crawler::traits::PageSession;
use tokio::time::sleep;
use tracing::info;

use crate::{
    errors::CatalogError,
    site::{CITY_INPUT_SELECTOR, CITY_LINK_SELECTOR, CITY_SUGGESTION_SELECTOR},
};

/// Pauses around each step of the city picker. The picker is animated and
/// the suggestion list is fetched on the fly.
#[derive(Debug, Clone)]
pub struct LocaleOptions {
    pub landing_settle: Duration,
    pub before_open: Duration,
    pub after_open: Duration,
    pub after_typing: Duration,
    pub after_select: Duration,
}

impl Default for LocaleOptions {
    fn default() -> Self {
        Self {
            landing_settle: Duration::from_secs(10),
            before_open: Duration::from_secs(7),
            after_open: Duration::from_secs(7),
            after_typing: Duration::from_secs(1),
            after_select: Duration::from_secs(10),
        }
    }
}

/// Opens `landing_url` and switches the storefront to `city`, so that prices
/// and availability on every following page belong to that city.
pub async fn select_city<S>(
    session: &mut S,
    landing_url: &str,
    city: &str,
    options: &LocaleOptions,
) -> Result<(), CatalogError>
where
    S: PageSession + ?Sized,
{
    info!("Selecting city {city}");

    session.navigate(landing_url).await?;
    sleep(options.landing_settle).await;

    sleep(options.before_open).await;
    session.click(CITY_LINK_SELECTOR).await?;
    sleep(options.after_open).await;

    session.fill(CITY_INPUT_SELECTOR, city).await?;
    sleep(options.after_typing).await;

    session.click(CITY_SUGGESTION_SELECTOR).await?;
    sleep(options.after_select).await;

    Ok(())
}

#[cfg(test)]
mod tests {
    use crawler::errors::CrawlerError;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{site::DEFAULT_CITY, testing::FakeSession};

    const LANDING: &str = "https://www.dns-shop.ru/catalog/17a892f816404e77/noutbuki/?f[p3q]=b3ci&p=1";

    #[tokio::test(start_paused = true)]
    async fn drives_the_city_picker_in_order() {
        let mut session = FakeSession::new();

        select_city(&mut session, LANDING, DEFAULT_CITY, &LocaleOptions::default())
            .await
            .unwrap();

        assert_eq!(session.navigations, vec![LANDING.to_string()]);
        assert_eq!(
            session.actions,
            vec![
                format!("click {CITY_LINK_SELECTOR}"),
                format!("fill {CITY_INPUT_SELECTOR} Краснодар"),
                format!("click {CITY_SUGGESTION_SELECTOR}"),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn waits_the_configured_time() {
        let mut session = FakeSession::new();
        let start = tokio::time::Instant::now();

        select_city(&mut session, LANDING, "Сочи", &LocaleOptions::default())
            .await
            .unwrap();

        assert_eq!(start.elapsed(), Duration::from_secs(35));
    }

    #[tokio::test(start_paused = true)]
    async fn landing_failure_stops_before_the_picker() {
        let mut session = FakeSession::new().failing_navigation(LANDING, 1);

        let result = select_city(&mut session, LANDING, "Сочи", &LocaleOptions::default()).await;

        assert!(matches!(
            result,
            Err(CatalogError::Session(CrawlerError::Navigation { .. }))
        ));
        assert!(session.actions.is_empty());
    }
}
