//! Assorted imports for writing and encoding SINLI documents
//!
//! ```
//! use sinli::prelude::*;
//! ```

pub use crate::document::{
    file_name, Coin, Envelope, FileType, FileVersion, FormatType, Identification,
    IdentificationHeader, LegacyCoin, Order, OrderDeliveryPoint, OrderDetail, OrderHeader,
    OrderSource, OrderType, PriceType, Return, ReturnCause, ReturnDetail, ReturnDocumentType,
    ReturnHeader, ReturnType, Sale, SaleDetail, SaleHeader, SaleTicket, Stock, StockDetail,
    StockHeader, Subject,
};

#[doc(no_inline)]
pub use crate::{Composite, Encode, Fixed};

#[doc(no_inline)]
pub use chrono::{NaiveDate, NaiveDateTime};
