use std::{sync::LazyLock, time::Duration};

use common::result::base::{ABSENT, NotebookRecord};
use crawler::traits::PageSession;
use regex::Regex;
use tokio::time::sleep;
use tracing::debug;

use crate::{
    characteristics::Characteristics, errors::CatalogError, price::PriceResolver,
    utils::regex::unwrap_regex_captures,
};

const DEFAULT_SETTLE_SECS: u64 = 5;

/// Manufacturers whose name contains a space; every other manufacturer is the
/// first word of the model caption.
pub const MULTI_WORD_MANUFACTURERS: &[&str] = &["Dream Machines"];

const MODEL: &str = "Модель";
const OPERATING_SYSTEM: &str = "Операционная система";
const SCREEN_TYPE: &str = "Тип экрана";
const SCREEN_DIAGONAL: &str = "Диагональ экрана (дюйм)";
const SCREEN_RESOLUTION: &str = "Разрешение экрана";
const SCREEN_REFRESH_RATE: &str = "Максимальная частота обновления экрана";
const CPU_MODEL: &str = "Модель процессора";
const CPU_PERFORMANCE_CORES: &str = "Количество производительных ядер";
const CPU_FREQUENCY: &str = "Частота процессора";
const RAM_TYPE: &str = "Тип оперативной памяти";
const RAM_SIZE: &str = "Объем оперативной памяти";
const RAM_FREQUENCY: &str = "Частота оперативной памяти";
const INTEGRATED_GPU_MODEL: &str = "Модель встроенной видеокарты";
const DISCRETE_GPU_MODEL: &str = "Модель дискретной видеокарты";
const DISCRETE_GPU_VENDOR: &str = "Производитель видеочипа";
const DISCRETE_GPU_MEMORY: &str = "Объем видеопамяти";
const SSD_SIZE: &str = "Общий объем твердотельных накопителей (SSD)";
const SSD_TYPE: &str = "Тип SSD диска";
const HDD_SIZE: &str = "Общий объем жестких дисков (HDD)";

static MODEL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    let manufacturers: Vec<String> = MULTI_WORD_MANUFACTURERS
        .iter()
        .map(|manufacturer| regex::escape(manufacturer))
        .collect();

    Regex::new(&format!(r"^({}|.+?) (.+)$", manufacturers.join("|")))
        .expect("Regex should compile as nothing has changed")
});

static RESOLUTION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+x\d+)").expect("Regex should compile as nothing has changed")
});

pub struct ItemCollectorBuilder {
    settle_time: Duration,
    price_resolver: PriceResolver,
}

impl Default for ItemCollectorBuilder {
    fn default() -> Self {
        Self {
            settle_time: Duration::from_secs(DEFAULT_SETTLE_SECS),
            price_resolver: PriceResolver::default(),
        }
    }
}

impl ItemCollectorBuilder {
    pub fn with_settle_time(mut self, settle_time: Duration) -> Self {
        self.settle_time = settle_time;

        self
    }

    pub fn with_price_resolver(mut self, price_resolver: PriceResolver) -> Self {
        self.price_resolver = price_resolver;

        self
    }

    pub fn build(self) -> ItemCollector {
        ItemCollector {
            settle_time: self.settle_time,
            price_resolver: self.price_resolver,
        }
    }
}

/// Turns one characteristics page into a [`NotebookRecord`].
pub struct ItemCollector {
    settle_time: Duration,
    price_resolver: PriceResolver,
}

impl ItemCollector {
    pub fn builder() -> ItemCollectorBuilder {
        ItemCollectorBuilder::default()
    }

    pub async fn collect<S>(&self, session: &mut S, url: &str) -> Result<NotebookRecord, CatalogError>
    where
        S: PageSession + ?Sized,
    {
        debug!("Collecting {url}");

        session.navigate(url).await?;
        sleep(self.settle_time).await;

        let source = session.page_source().await?;
        let record = compose_record(&Characteristics::parse(&source), url)?;

        // the price widget renders on its own schedule, so it is polled
        // after the static characteristics have been read
        let price = self.price_resolver.resolve(session).await?;

        Ok(record.with_price(price))
    }
}

/// Builds every non-price column. Prices are left at zero.
pub fn compose_record(page: &Characteristics, url: &str) -> Result<NotebookRecord, CatalogError> {
    let [manufacturer, model] = split_model(&page.lookup(MODEL))?;

    Ok(NotebookRecord {
        manufacturer,
        model,
        cpu: compose_cpu(page),
        discrete_gpu: compose_discrete_gpu(page),
        integrated_gpu: page.lookup(INTEGRATED_GPU_MODEL),
        ram: compose_ram(page),
        ssd: format!("{} {}", page.lookup(SSD_SIZE), page.lookup(SSD_TYPE)),
        hdd: capitalize_first(&page.lookup(HDD_SIZE)),
        screen: compose_screen(page)?,
        operating_system: page.lookup(OPERATING_SYSTEM),
        url: url.into(),
        ..Default::default()
    })
}

/// "Dream Machines Clevo X170" -> ["Dream Machines", "Clevo X170"]
pub fn split_model(caption: &str) -> Result<[String; 2], CatalogError> {
    unwrap_regex_captures(&MODEL_REGEX, caption)
}

fn compose_screen(page: &Characteristics) -> Result<String, CatalogError> {
    let [resolution] = unwrap_regex_captures(&RESOLUTION_REGEX, &page.lookup(SCREEN_RESOLUTION))?;

    Ok(format!(
        "{} {} {} {}",
        resolution,
        page.lookup(SCREEN_DIAGONAL),
        page.lookup(SCREEN_TYPE),
        page.lookup(SCREEN_REFRESH_RATE)
    ))
}

fn compose_cpu(page: &Characteristics) -> String {
    let model = page.lookup(CPU_MODEL);
    let cores = page.lookup(CPU_PERFORMANCE_CORES);
    let frequency = page.lookup(CPU_FREQUENCY);

    if frequency == ABSENT {
        format!("{model} кол-во ядер: {cores}")
    } else {
        format!("{model} {cores}x{frequency}")
    }
}

fn compose_ram(page: &Characteristics) -> String {
    let size = page.lookup(RAM_SIZE);
    let kind = page.lookup(RAM_TYPE);
    let frequency = page.lookup(RAM_FREQUENCY);

    if frequency == ABSENT {
        format!("{size} {kind}")
    } else {
        format!("{size} {kind} {frequency}")
    }
}

fn compose_discrete_gpu(page: &Characteristics) -> String {
    let model = page.lookup(DISCRETE_GPU_MODEL);

    if model == ABSENT {
        return ABSENT.into();
    }

    // missing vendor or memory keep their sentinel in place
    format!(
        "{} {model} {}",
        page.lookup(DISCRETE_GPU_VENDOR),
        page.lookup(DISCRETE_GPU_MEMORY)
    )
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
