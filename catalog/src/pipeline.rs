use common::{result::base::NotebookRecord, utils::error_chain};
use crawler::traits::PageSession;
use indicatif::ProgressBar;
use tracing::{error, info};

use crate::{collector::ItemCollector, errors::CatalogError};

/// What to do when a single notebook cannot be collected
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop the run at the first failed notebook
    #[default]
    Abort,
    /// Log the failure, leave the notebook out and carry on
    SkipAndLog,
}

#[derive(Debug, Default)]
pub struct CollectionReport {
    pub records: Vec<NotebookRecord>,
    /// URLs left out under [`FailurePolicy::SkipAndLog`]
    pub skipped: Vec<String>,
}

impl CollectionReport {
    pub fn discounted(&self) -> usize {
        self.records
            .iter()
            .filter(|record| record.is_discounted())
            .count()
    }
}

/// Collects every URL in order with one session. Records keep the order of
/// `urls`; a failed notebook never produces a record.
pub async fn collect_all<S>(
    collector: &ItemCollector,
    session: &mut S,
    urls: &[String],
    policy: FailurePolicy,
    progress: &ProgressBar,
) -> Result<CollectionReport, CatalogError>
where
    S: PageSession + ?Sized,
{
    let mut report = CollectionReport::default();

    progress.set_length(urls.len() as u64);

    for url in urls {
        match collector.collect(session, url).await {
            Ok(record) => report.records.push(record),
            Err(err) => {
                let err = CatalogError::Item {
                    url: url.clone(),
                    source: Box::new(err),
                };

                match policy {
                    FailurePolicy::Abort => {
                        progress.abandon();
                        return Err(err);
                    }
                    FailurePolicy::SkipAndLog => {
                        error!("Skipping notebook: {}", error_chain(&err));
                        report.skipped.push(url.clone());
                    }
                }
            }
        }

        progress.inc(1);
    }

    progress.finish();

    info!(
        "Collected {} notebooks, skipped {}",
        report.records.len(),
        report.skipped.len()
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{price::PriceResolver, testing::FakeSession};

    const GOOD: &str = r#"
        <div class="product-buy"><div class="product-buy__price">99 990 ₽</div></div>
        <div><span>Модель</span></div><div>MSI Katana 15</div>
        <div><span>Разрешение экрана</span></div><div>1920x1080</div>
    "#;
    const NO_MODEL: &str = r#"
        <div class="product-buy"><div class="product-buy__price">10 ₽</div></div>
    "#;

    fn collector() -> ItemCollector {
        ItemCollector::builder()
            .with_price_resolver(PriceResolver::new(Duration::from_secs(1), 2))
            .build()
    }

    fn urls() -> Vec<String> {
        ["https://a/1/", "https://a/2/", "https://a/3/"]
            .map(String::from)
            .to_vec()
    }

    fn session() -> FakeSession {
        FakeSession::new()
            .with_page("https://a/1/", GOOD)
            .with_page("https://a/2/", NO_MODEL)
            .with_page("https://a/3/", GOOD)
    }

    #[tokio::test(start_paused = true)]
    async fn abort_stops_at_first_failure() {
        let mut session = session();

        let result = collect_all(
            &collector(),
            &mut session,
            &urls(),
            FailurePolicy::Abort,
            &ProgressBar::hidden(),
        )
        .await;

        match result {
            Err(CatalogError::Item { url, source }) => {
                assert_eq!(url, "https://a/2/");
                assert!(matches!(*source, CatalogError::PatternMismatch { .. }));
            }
            other => panic!("Expected item failure, got {other:?}"),
        }
        assert_eq!(session.navigations.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn skip_leaves_failed_items_out() {
        let mut session = session();
        let progress = ProgressBar::hidden();

        let report = collect_all(
            &collector(),
            &mut session,
            &urls(),
            FailurePolicy::SkipAndLog,
            &progress,
        )
        .await
        .unwrap();

        let collected: Vec<&str> = report
            .records
            .iter()
            .map(|record| record.url.as_str())
            .collect();

        assert_eq!(collected, vec!["https://a/1/", "https://a/3/"]);
        assert_eq!(report.skipped, vec!["https://a/2/".to_string()]);
        assert_eq!(report.records[0].model, "Katana 15");
        assert_eq!(report.records[0].price, 99990);
        assert_eq!(report.discounted(), 0);
        assert_eq!(progress.position(), 3);
    }

    #[test]
    fn error_chain_is_flattened() {
        let err = CatalogError::Item {
            url: "https://a/1/".into(),
            source: Box::new(CatalogError::RenderTimeout { attempts: 3 }),
        };

        assert_eq!(
            error_chain(&err),
            "Failed to collect notebook https://a/1/: Price widget did not render after 3 checks"
        );
    }
}
