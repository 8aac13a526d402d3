use std::{sync::LazyLock, time::Duration};

use common::result::base::PriceRecord;
use crawler::traits::PageSession;
use scraper::{Html, Selector};
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::{
    errors::CatalogError,
    site::{ACTIVE_PRICE_SELECTOR, CURRENCY_SIGN, PREVIOUS_PRICE_SELECTOR, PRICE_SELECTOR},
    utils::{
        conversions::{discount_percent, rubles_to_i32},
        html::{element_to_text, static_selector},
    },
};

const DEFAULT_POLL_INTERVAL_SECS: u64 = 1;
const DEFAULT_MAX_POLLS: u32 = 30;

static PREVIOUS_PRICE: LazyLock<Selector> =
    LazyLock::new(|| static_selector(PREVIOUS_PRICE_SELECTOR));
static ACTIVE_PRICE: LazyLock<Selector> = LazyLock::new(|| static_selector(ACTIVE_PRICE_SELECTOR));
static PRICE: LazyLock<Selector> = LazyLock::new(|| static_selector(PRICE_SELECTOR));

/// What the price widget shows at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceState {
    Discounted { price: i32, original_price: i32 },
    FullPrice { price: i32 },
    NotYetRendered,
}

impl PriceState {
    /// Reads the widget out of a page source. Amounts that are present but
    /// unreadable are errors, a widget that has not filled in yet is not.
    pub fn from_source(source: &str) -> Result<Self, CatalogError> {
        let document = Html::parse_document(source);

        if let Some(previous) = document.select(&PREVIOUS_PRICE).next() {
            // the marker can show up before the container it belongs to
            let Some(active) = document.select(&ACTIVE_PRICE).next() else {
                return Ok(PriceState::NotYetRendered);
            };

            // the active container reads "<current> ₽ <previous> ₽"
            let active_text = element_to_text(active);
            let current = active_text
                .split(CURRENCY_SIGN)
                .next()
                .unwrap_or_default();

            return Ok(PriceState::Discounted {
                price: rubles_to_i32(current)?,
                original_price: rubles_to_i32(&element_to_text(previous))?,
            });
        }

        if let Some(price) = document.select(&PRICE).next() {
            let text = element_to_text(price);

            if text.is_empty() {
                return Ok(PriceState::NotYetRendered);
            }

            return Ok(PriceState::FullPrice {
                price: rubles_to_i32(&text)?,
            });
        }

        Ok(PriceState::NotYetRendered)
    }

    /// `None` while the widget is still rendering
    pub fn resolved(self) -> Result<Option<PriceRecord>, CatalogError> {
        let record = match self {
            PriceState::Discounted {
                price,
                original_price,
            } => PriceRecord {
                price,
                original_price,
                discount_percent: discount_percent(price, original_price)?,
            },
            PriceState::FullPrice { price } => PriceRecord {
                price,
                original_price: 0,
                discount_percent: 0,
            },
            PriceState::NotYetRendered => return Ok(None),
        };

        Ok(Some(record))
    }
}

/// Polls the current page until the price widget settles.
#[derive(Debug, Clone)]
pub struct PriceResolver {
    poll_interval: Duration,
    max_polls: u32,
}

impl Default for PriceResolver {
    fn default() -> Self {
        Self::new(
            Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            DEFAULT_MAX_POLLS,
        )
    }
}

impl PriceResolver {
    pub fn new(poll_interval: Duration, max_polls: u32) -> Self {
        Self {
            poll_interval,
            max_polls: max_polls.max(1),
        }
    }

    pub async fn resolve<S>(&self, session: &mut S) -> Result<PriceRecord, CatalogError>
    where
        S: PageSession + ?Sized,
    {
        let mut polls: u32 = 0;

        loop {
            let source = session.page_source().await?;
            polls += 1;

            if let Some(price) = PriceState::from_source(&source)?.resolved()? {
                debug!("Resolved {price:?} after {polls} check(s)");
                return Ok(price);
            }

            if polls >= self.max_polls {
                warn!("Price widget still empty after {polls} checks");
                return Err(CatalogError::RenderTimeout { attempts: polls });
            }

            debug!("Price not rendered yet ({polls}/{}), retrying", self.max_polls);
            sleep(self.poll_interval).await;
        }
    }
}
