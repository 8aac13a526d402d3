use std::{
    fmt::{Display, Formatter},
    num::ParseIntError,
};

use serde::{Deserialize, Serialize};

use crate::result::enums::Column;

/// Value written for any characteristic a notebook page does not list.
pub const ABSENT: &str = "Нет";

#[derive(Deserialize, Serialize, Debug, Default, Clone, Copy, Eq, PartialEq)]
pub struct PriceRecord {
    pub price: i32,
    /// Zero when the notebook is not discounted
    pub original_price: i32,
    pub discount_percent: i32,
}

#[derive(Deserialize, Serialize, Debug, Clone, Eq, PartialEq)]
pub struct NotebookRecord {
    #[serde(rename = "Производитель")]
    pub manufacturer: String,
    #[serde(rename = "Модель")]
    pub model: String,
    #[serde(rename = "Цена")]
    pub price: i32,
    #[serde(rename = "Цена без скидки")]
    pub original_price: i32,
    #[serde(rename = "Скидка")]
    pub discount_percent: i32,
    #[serde(rename = "Процессор")]
    pub cpu: String,
    #[serde(rename = "Дискретная видеокарта")]
    pub discrete_gpu: String,
    #[serde(rename = "Встроенная видеокарта")]
    pub integrated_gpu: String,
    #[serde(rename = "Оперативная память")]
    pub ram: String,
    #[serde(rename = "SSD")]
    pub ssd: String,
    #[serde(rename = "HDD")]
    pub hdd: String,
    #[serde(rename = "Экран")]
    pub screen: String,
    #[serde(rename = "Операционная система")]
    pub operating_system: String,
    #[serde(rename = "Ссылка")]
    pub url: String,
}

/// Borrowed view of a single record cell
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Integer(i32),
}

impl Display for FieldValue<'_> {
    fn fmt(&self, format: &mut Formatter) -> std::fmt::Result {
        match self {
            FieldValue::Text(text) => write!(format, "{text}"),
            FieldValue::Integer(number) => write!(format, "{number}"),
        }
    }
}

impl Default for NotebookRecord {
    fn default() -> Self {
        Self {
            manufacturer: ABSENT.into(),
            model: ABSENT.into(),
            price: 0,
            original_price: 0,
            discount_percent: 0,
            cpu: ABSENT.into(),
            discrete_gpu: ABSENT.into(),
            integrated_gpu: ABSENT.into(),
            ram: ABSENT.into(),
            ssd: ABSENT.into(),
            hdd: ABSENT.into(),
            screen: ABSENT.into(),
            operating_system: ABSENT.into(),
            url: ABSENT.into(),
        }
    }
}

impl NotebookRecord {
    pub fn with_price(mut self, price: PriceRecord) -> Self {
        self.price = price.price;
        self.original_price = price.original_price;
        self.discount_percent = price.discount_percent;

        self
    }

    pub fn price_record(&self) -> PriceRecord {
        PriceRecord {
            price: self.price,
            original_price: self.original_price,
            discount_percent: self.discount_percent,
        }
    }

    pub fn is_discounted(&self) -> bool {
        self.original_price != 0
    }

    pub fn field(&self, column: Column) -> FieldValue<'_> {
        match column {
            Column::Manufacturer => FieldValue::Text(&self.manufacturer),
            Column::Model => FieldValue::Text(&self.model),
            Column::Price => FieldValue::Integer(self.price),
            Column::OriginalPrice => FieldValue::Integer(self.original_price),
            Column::DiscountPercent => FieldValue::Integer(self.discount_percent),
            Column::Cpu => FieldValue::Text(&self.cpu),
            Column::DiscreteGpu => FieldValue::Text(&self.discrete_gpu),
            Column::IntegratedGpu => FieldValue::Text(&self.integrated_gpu),
            Column::Ram => FieldValue::Text(&self.ram),
            Column::Ssd => FieldValue::Text(&self.ssd),
            Column::Hdd => FieldValue::Text(&self.hdd),
            Column::Screen => FieldValue::Text(&self.screen),
            Column::OperatingSystem => FieldValue::Text(&self.operating_system),
            Column::Url => FieldValue::Text(&self.url),
        }
    }

    /// Used by sinks that read records back as plain text cells.
    pub fn set_field(&mut self, column: Column, value: String) -> Result<(), ParseIntError> {
        match column {
            Column::Manufacturer => self.manufacturer = value,
            Column::Model => self.model = value,
            Column::Price => self.price = value.trim().parse()?,
            Column::OriginalPrice => self.original_price = value.trim().parse()?,
            Column::DiscountPercent => self.discount_percent = value.trim().parse()?,
            Column::Cpu => self.cpu = value,
            Column::DiscreteGpu => self.discrete_gpu = value,
            Column::IntegratedGpu => self.integrated_gpu = value,
            Column::Ram => self.ram = value,
            Column::Ssd => self.ssd = value,
            Column::Hdd => self.hdd = value,
            Column::Screen => self.screen = value,
            Column::OperatingSystem => self.operating_system = value,
            Column::Url => self.url = value,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    use super::*;

    fn sample() -> NotebookRecord {
        NotebookRecord {
            manufacturer: "ASUS".into(),
            model: "ROG Strix G15".into(),
            cpu: "AMD Ryzen 7 6800H 8x3.2 ГГц".into(),
            url: "https://www.dns-shop.ru/product/abc/characteristics/".into(),
            ..Default::default()
        }
        .with_price(PriceRecord {
            price: 36990,
            original_price: 45990,
            discount_percent: 20,
        })
    }

    #[test]
    fn default_record_uses_absent_value_everywhere() {
        let record = NotebookRecord::default();

        for column in Column::iter().filter(|column| !column.is_integer()) {
            assert_eq!(record.field(column), FieldValue::Text(ABSENT));
        }
    }

    #[test]
    fn set_field_rebuilds_record_from_text_cells() {
        let original = sample();
        let mut rebuilt = NotebookRecord::default();

        for column in Column::iter() {
            rebuilt
                .set_field(column, original.field(column).to_string())
                .unwrap();
        }

        assert_eq!(rebuilt, original);
        assert!(rebuilt.is_discounted());
    }

    #[test]
    fn set_field_rejects_non_numeric_price() {
        let mut record = NotebookRecord::default();

        assert!(record.set_field(Column::Price, "36 990 ₽".into()).is_err());
    }
}
