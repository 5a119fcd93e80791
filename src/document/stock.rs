//! Stock reports (`CEGALD`)

use chrono::NaiveDate;

use super::{Coin, Envelope, FileType, Identification, IdentificationHeader};
use crate::conv::Fixed;
use crate::Composite;

#[derive(Composite, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_impls", derive(serde::Serialize))]
pub struct Stock {
    #[sinli(position = 1)]
    pub identification_header: IdentificationHeader,
    #[sinli(position = 2)]
    pub identification: Identification,
    #[sinli(position = 3)]
    pub header: StockHeader,
    #[sinli(position = 4)]
    pub details: Vec<StockDetail>,
}

impl Stock {
    #[must_use]
    pub fn new(envelope: &Envelope, header: StockHeader, details: Vec<StockDetail>) -> Self {
        Self {
            identification_header: envelope.identification_header(FileType::Stock),
            identification: envelope.identification(FileType::Stock),
            header,
            details,
        }
    }
}

#[derive(Composite, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_impls", derive(serde::Serialize))]
pub struct StockHeader {
    #[sinli(position = 1, literal = "C")]
    pub tag: Fixed,
    #[sinli(position = 2, width = 40)]
    pub client_name: String,
    #[sinli(position = 3, width = 8)]
    pub stock_date: NaiveDate,
    #[sinli(position = 4, width = 3)]
    pub coin: Coin,
}

impl StockHeader {
    #[must_use]
    pub fn new(client_name: impl Into<String>, stock_date: NaiveDate) -> Self {
        Self {
            tag: Fixed,
            client_name: client_name.into(),
            stock_date,
            coin: Coin::Euro,
        }
    }
}

/// Units available of one title
#[derive(Composite, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde_impls", derive(serde::Serialize))]
pub struct StockDetail {
    #[sinli(position = 1, literal = "D")]
    pub tag: Fixed,
    #[sinli(position = 2, width = 17)]
    pub isbn: String,
    #[sinli(position = 3, width = 6)]
    pub quantity: i32,
    #[sinli(position = 4, width = 10)]
    pub price_without_vat: f64,
}
