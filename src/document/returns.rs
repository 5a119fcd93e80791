//! Returns of goods (`DEVOLU`)

use chrono::NaiveDate;

use super::{
    Envelope, FileType, Identification, IdentificationHeader, LegacyCoin, PriceType, ReturnCause,
    ReturnDocumentType, ReturnType,
};
use crate::conv::Fixed;
use crate::Composite;

#[derive(Composite, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_impls", derive(serde::Serialize))]
pub struct Return {
    #[sinli(position = 1)]
    pub identification_header: IdentificationHeader,
    #[sinli(position = 2)]
    pub identification: Identification,
    #[sinli(position = 3)]
    pub header: ReturnHeader,
    #[sinli(position = 4)]
    pub details: Vec<ReturnDetail>,
}

impl Return {
    #[must_use]
    pub fn new(envelope: &Envelope, header: ReturnHeader, details: Vec<ReturnDetail>) -> Self {
        Self {
            identification_header: envelope.identification_header(FileType::Return),
            identification: envelope.identification(FileType::Return),
            header,
            details,
        }
    }
}

#[derive(Composite, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_impls", derive(serde::Serialize))]
pub struct ReturnHeader {
    #[sinli(position = 1, literal = "C")]
    pub tag: Fixed,
    #[sinli(position = 2, width = 40)]
    pub client_name: String,
    #[sinli(position = 3, width = 40)]
    pub provider_name: String,
    #[sinli(position = 4, width = 10)]
    pub order_code: String,
    #[sinli(position = 5, width = 8)]
    pub document_date: NaiveDate,
    #[sinli(position = 6, width = 1)]
    pub document_type: ReturnDocumentType,
    #[sinli(position = 7, width = 1)]
    pub return_type: ReturnType,
    #[sinli(position = 8, width = 1)]
    pub book_fair: bool,
    #[sinli(position = 9, width = 1)]
    pub coin: LegacyCoin,
}

#[derive(Composite, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_impls", derive(serde::Serialize))]
pub struct ReturnDetail {
    #[sinli(position = 1, literal = "D")]
    pub tag: Fixed,
    #[sinli(position = 2, width = 17)]
    pub isbn: String,
    #[sinli(position = 3, width = 18)]
    pub ean: String,
    #[sinli(position = 4, width = 15)]
    pub reference: String,
    #[sinli(position = 5, width = 50)]
    pub title: String,
    #[sinli(position = 6, width = 6)]
    pub quantity: i32,
    #[sinli(position = 7, width = 10)]
    pub price_without_vat: f64,
    #[sinli(position = 8, width = 10)]
    pub price_with_vat: f64,
    /// Percentage
    #[sinli(position = 9, width = 10)]
    pub discount: f64,
    #[sinli(position = 10, width = 1)]
    pub price_type: PriceType,
    #[sinli(position = 11, width = 1)]
    pub novelty: bool,
    #[sinli(position = 12, width = 10)]
    pub purchase_document: String,
    #[sinli(position = 13, width = 8)]
    pub purchase_date: Option<NaiveDate>,
    #[sinli(position = 14, width = 1)]
    pub return_cause: Option<ReturnCause>,
}

impl ReturnDetail {
    #[must_use]
    pub fn new(isbn: impl Into<String>, quantity: i32, price_type: PriceType) -> Self {
        Self {
            tag: Fixed,
            isbn: isbn.into(),
            ean: String::new(),
            reference: String::new(),
            title: String::new(),
            quantity,
            price_without_vat: 0.0,
            price_with_vat: 0.0,
            discount: 0.0,
            price_type,
            novelty: false,
            purchase_document: String::new(),
            purchase_date: None,
            return_cause: None,
        }
    }
}
