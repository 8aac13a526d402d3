use std::{path::Path, time::Duration};

use catalog::{
    collector::ItemCollector,
    listing::CatalogCrawler,
    locale::{LocaleOptions, select_city},
    pipeline::{CollectionReport, collect_all},
    price::PriceResolver,
    url_list::{read_urls, write_urls},
};
use common::result::base::NotebookRecord;
use crawler::{
    errors::CrawlerError, protected::ProtectedCrawler, traits::PageSession,
    unprotected::UnprotectedCrawler,
};
use exporters::{
    config::DatabaseConfig, files::export_all, postgres::PostgresConnector,
};
use indicatif::{ProgressBar, ProgressStyle};
use metrics::{Metrics, put_metric};
use tokio::task::spawn_blocking;
use tracing::{info, warn};

use crate::{
    cli::{CollectArgs, DiscoverArgs, SessionArgs, SessionKind},
    errors::AppError,
};

const PROGRESS_TEMPLATE: &str = "{elapsed_precise} [{bar:40}] {pos}/{len} notebooks (eta {eta})";

/// The session is dropped, and Chrome with it, once the returned box goes
/// out of scope.
pub async fn open_session(args: &SessionArgs) -> Result<Box<dyn PageSession>, AppError> {
    let session: Box<dyn PageSession> = match args.session {
        SessionKind::Chrome => {
            let headless = !args.visible;
            let crawler = spawn_blocking(move || ProtectedCrawler::new(headless))
                .await
                .map_err(CrawlerError::BlockingTask)??;

            Box::new(crawler)
        }
        SessionKind::Http => Box::new(UnprotectedCrawler::new()?),
    };

    Ok(session)
}

pub async fn discover(
    session: &mut dyn PageSession,
    kind: SessionKind,
    args: &DiscoverArgs,
    urls_file: &Path,
) -> Result<Vec<String>, AppError> {
    let crawler = CatalogCrawler::builder()
        .with_max_fetch_attempts(args.max_fetch_attempts)
        .with_max_pages(args.max_pages)
        .with_cooldown_secs(args.cooldown_min_secs, args.cooldown_max_secs)
        .build();

    match kind {
        SessionKind::Chrome => {
            select_city(
                session,
                &crawler.page_url(1),
                &args.city,
                &LocaleOptions::default(),
            )
            .await?;
        }
        SessionKind::Http => {
            warn!("Plain HTTP sessions cannot pick a city, the storefront default is used");
        }
    }

    let state = crawler.discover(session).await?;
    put_metric!(Metrics::ListingPagesCrawled, u64::from(state.pages_crawled()));

    let urls = state.into_urls();
    write_urls(urls_file, &urls)?;

    if urls.is_empty() {
        warn!(
            "No notebooks found on the first listing page, {} is empty",
            urls_file.display()
        );
    } else {
        info!("Saved {} notebook URLs to {}", urls.len(), urls_file.display());
    }

    Ok(urls)
}

pub async fn collect(
    session: &mut dyn PageSession,
    args: &CollectArgs,
    urls: &[String],
) -> Result<(), AppError> {
    if urls.is_empty() {
        warn!("The URL list has no notebooks, nothing is collected or exported");
        return Err(AppError::NothingToCollect);
    }

    let collector = ItemCollector::builder()
        .with_settle_time(Duration::from_secs(args.settle_secs))
        .with_price_resolver(PriceResolver::new(
            Duration::from_secs(1),
            args.max_price_polls,
        ))
        .build();

    let progress = ProgressBar::new(urls.len() as u64).with_style(
        ProgressStyle::with_template(PROGRESS_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let report = collect_all(
        &collector,
        session,
        urls,
        args.on_item_error.into(),
        &progress,
    )
    .await?;

    emit_metrics(&report);

    export_all(&args.formats, &args.output_dir, &args.file_stem, &report.records)?;

    if args.postgres {
        save_to_postgres(args, &report.records).await?;
    }

    Ok(())
}

pub fn load_urls(urls_file: &Path) -> Result<Vec<String>, AppError> {
    Ok(read_urls(urls_file)?)
}

fn emit_metrics(report: &CollectionReport) {
    put_metric!(Metrics::NotebooksCollected, report.records.len() as u64);
    put_metric!(Metrics::NotebooksDiscounted, report.discounted() as u64);
    put_metric!(Metrics::NotebooksSkipped, report.skipped.len() as u64);
}

async fn save_to_postgres(args: &CollectArgs, records: &[NotebookRecord]) -> Result<(), AppError> {
    let database = &args.database;
    let config = DatabaseConfig::from_parts(
        database.host.clone(),
        database.port,
        database.user.clone(),
        database.password.clone(),
        database.database.clone(),
    )?;

    let connector = PostgresConnector::new(&config).await?;
    let result = connector.replace_table(&args.table, records).await;
    connector.close().await;

    let table = result?;
    info!("Notebooks saved to table {table}");

    Ok(())
}
