use std::fmt::{Display, Formatter, Result};

use strum_macros::EnumIter;

/// Output columns of a notebook record, in the order every sink writes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Column {
    Manufacturer,
    Model,
    Price,
    OriginalPrice,
    DiscountPercent,
    Cpu,
    DiscreteGpu,
    IntegratedGpu,
    Ram,
    Ssd,
    Hdd,
    Screen,
    OperatingSystem,
    Url,
}

impl Column {
    /// Human readable column name, matching the storefront's locale.
    pub fn header(&self) -> &'static str {
        match self {
            Column::Manufacturer => "Производитель",
            Column::Model => "Модель",
            Column::Price => "Цена",
            Column::OriginalPrice => "Цена без скидки",
            Column::DiscountPercent => "Скидка",
            Column::Cpu => "Процессор",
            Column::DiscreteGpu => "Дискретная видеокарта",
            Column::IntegratedGpu => "Встроенная видеокарта",
            Column::Ram => "Оперативная память",
            Column::Ssd => "SSD",
            Column::Hdd => "HDD",
            Column::Screen => "Экран",
            Column::OperatingSystem => "Операционная система",
            Column::Url => "Ссылка",
        }
    }

    pub fn sql_name(&self) -> &'static str {
        match self {
            Column::Manufacturer => "manufacturer",
            Column::Model => "model",
            Column::Price => "price",
            Column::OriginalPrice => "price_without_discount",
            Column::DiscountPercent => "discount",
            Column::Cpu => "cpu",
            Column::DiscreteGpu => "discrete_graphics_card",
            Column::IntegratedGpu => "integrated_graphics",
            Column::Ram => "ram",
            Column::Ssd => "ssd",
            Column::Hdd => "hdd",
            Column::Screen => "screen",
            Column::OperatingSystem => "operating_system",
            Column::Url => "url",
        }
    }

    /// XML names cannot hold spaces, so they become underscores
    pub fn xml_tag(&self) -> String {
        self.header().replace(' ', "_")
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            Column::Price | Column::OriginalPrice | Column::DiscountPercent
        )
    }
}

impl Display for Column {
    fn fmt(&self, format: &mut Formatter) -> Result {
        write!(format, "{}", self.header())
    }
}
