//! SINLI documents
//!
//! Record layouts of the SINLI files exchanged between booksellers and
//! distributors, expressed as [`Composite`](crate::Composite) types. Every
//! file opens with the same two envelope lines, an [`IdentificationHeader`]
//! and an [`Identification`], followed by the lines of one document kind:
//!
//!   * [`Stock`] (`CEGALD`), a stock report
//!   * [`Sale`] (`CEGALV`), sales grouped into tickets
//!   * [`Order`] (`PEDIDO`), a purchase order
//!   * [`Return`] (`DEVOLU`), a return of goods
//!
//! The mail carrying a file is identified by its [`Subject`], and the file
//! itself by the name returned by [`file_name`]. An [`Envelope`] holds the
//! addressing data shared by all three and builds them consistently for a
//! given [`FileType`].

use std::borrow::Cow;
use std::fmt;

use chrono::NaiveDateTime;

use crate::conv::Fixed;
use crate::error::Result;
use crate::scalar::{Scalar, ToScalar};
use crate::Composite;

pub mod order;
pub mod returns;
pub mod sale;
pub mod stock;

pub use self::order::{Order, OrderDeliveryPoint, OrderDetail, OrderHeader};
pub use self::returns::{Return, ReturnDetail, ReturnHeader};
pub use self::sale::{Sale, SaleDetail, SaleHeader, SaleTicket};
pub use self::stock::{Stock, StockDetail, StockHeader};

/// Defines a closed list of protocol tokens, rendered as a string column.
macro_rules! code_list {
    ($(#[$meta:meta])* $name:ident { $($(#[$vmeta:meta])* $variant:ident => $code:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde_impls", derive(serde::Serialize))]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Token written to the file
            #[must_use]
            pub const fn code(&self) -> &'static str {
                match self {
                    $($name::$variant => $code),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.code())
            }
        }

        impl ToScalar for $name {
            fn to_scalar(&self) -> Scalar<'_> {
                Scalar::Str(Cow::Borrowed(self.code()))
            }
        }

        crate::impl_scalar_field!($name);
    };
}

code_list! {
    /// Layout of the file body
    FormatType {
        Normalized => "N",
        Free => "L",
    }
}

code_list! {
    /// Document kind carried by a file
    FileType {
        Stock => "CEGALD",
        Order => "PEDIDO",
        Return => "DEVOLU",
        Sale => "CEGALV",
    }
}

impl FileType {
    /// Revision of the document layout implemented for this kind
    #[must_use]
    pub const fn version(&self) -> FileVersion {
        match self {
            FileType::Stock => FileVersion::STOCK,
            FileType::Order => FileVersion::ORDER,
            FileType::Return => FileVersion::RETURN,
            FileType::Sale => FileVersion::SALE,
        }
    }
}

/// Revision number of a document layout
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde_impls", derive(serde::Serialize))]
pub struct FileVersion(pub u8);

impl FileVersion {
    pub const STOCK: Self = Self(2);
    pub const ORDER: Self = Self(7);
    pub const RETURN: Self = Self(2);
    pub const SALE: Self = Self(3);
}

impl ToScalar for FileVersion {
    fn to_scalar(&self) -> Scalar<'_> {
        Scalar::Int(i128::from(self.0))
    }
}

crate::impl_scalar_field!(FileVersion);

code_list! {
    /// Currency, as an ISO 4217 code
    Coin {
        Euro => "EUR",
    }
}

code_list! {
    /// Currency, as the one-letter code of older layouts
    LegacyCoin {
        Euro => "E",
        Peseta => "P",
    }
}

code_list! {
    OrderType {
        Normal => "N",
        Fair => "F",
        Deposit => "D",
        Other => "O",
    }
}

code_list! {
    /// Who originated an order line
    OrderSource {
        Normal => "N",
        Client => "C",
    }
}

code_list! {
    ReturnDocumentType {
        Definitive => "D",
        Requested => "P",
    }
}

code_list! {
    ReturnType {
        /// Firm sale
        Definitive => "F",
        Deposit => "D",
    }
}

code_list! {
    PriceType {
        Fixed => "F",
        Free => "L",
    }
}

code_list! {
    ReturnCause {
        Damaged => "0",
        Outdated => "1",
        Incident => "2",
    }
}

/// Subject of the mail a file is attached to, such as
/// `ESFANDE12345678ESFANDE87654321CEGALD02FANDE`
#[derive(Composite, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_impls", derive(serde::Serialize))]
pub struct Subject {
    #[sinli(position = 1, literal = "ESFANDE")]
    pub source_prefix: Fixed,
    #[sinli(position = 2, width = 8)]
    pub source_id: String,
    #[sinli(position = 3, literal = "ESFANDE")]
    pub destination_prefix: Fixed,
    #[sinli(position = 4, width = 8)]
    pub destination_id: String,
    #[sinli(position = 5, width = 6)]
    pub file_type: FileType,
    #[sinli(position = 6, width = 2)]
    pub file_version: FileVersion,
    #[sinli(position = 7, literal = "FANDE")]
    pub suffix: Fixed,
}

impl Subject {
    #[must_use]
    pub fn new(source_id: impl Into<String>, destination_id: impl Into<String>, file_type: FileType) -> Self {
        Self {
            source_prefix: Fixed,
            source_id: source_id.into(),
            destination_prefix: Fixed,
            destination_id: destination_id.into(),
            file_type,
            file_version: file_type.version(),
            suffix: Fixed,
        }
    }

    /// Renders the subject as a single line, without trailing blanks or
    /// line terminator.
    ///
    /// # Errors
    ///
    /// Fails if an identifier does not fit in its eight columns (unless the
    /// `truncate_overflow` feature cuts it down instead).
    pub fn to_subject_line(&self) -> Result<String> {
        let mut line = crate::render(self)?;
        line.truncate(line.trim_end().len());
        Ok(line)
    }
}

/// First line of every file
#[derive(Composite, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_impls", derive(serde::Serialize))]
pub struct IdentificationHeader {
    #[sinli(position = 1, literal = "I")]
    pub tag: Fixed,
    #[sinli(position = 2, width = 1)]
    pub format: FormatType,
    #[sinli(position = 3, width = 6)]
    pub document: FileType,
    #[sinli(position = 4, width = 2)]
    pub version: FileVersion,
    /// Sender, as `Lnnnnnnn`
    #[sinli(position = 5, width = 8)]
    pub source_id: String,
    /// Receiver, as `Lnnnnnnn`
    #[sinli(position = 6, width = 8)]
    pub destination_id: String,
    #[sinli(position = 7, width = 5)]
    pub records: u32,
    #[sinli(position = 8, width = 7)]
    pub transmission_number: u32,
    #[sinli(position = 9, width = 15)]
    pub local_source_id: String,
    #[sinli(position = 10, width = 15)]
    pub local_destination_id: String,
    #[sinli(position = 11, width = 7)]
    pub free_text: String,
    #[sinli(position = 12, literal = "FANDE")]
    pub suffix: Fixed,
}

impl IdentificationHeader {
    /// Header of a normalized file of the given kind, with every optional
    /// field left blank.
    #[must_use]
    pub fn new(file_type: FileType, source_id: impl Into<String>, destination_id: impl Into<String>) -> Self {
        Self {
            tag: Fixed,
            format: FormatType::Normalized,
            document: file_type,
            version: file_type.version(),
            source_id: source_id.into(),
            destination_id: destination_id.into(),
            records: 0,
            transmission_number: 0,
            local_source_id: String::new(),
            local_destination_id: String::new(),
            free_text: String::new(),
            suffix: Fixed,
        }
    }
}

/// Second line of every file
#[derive(Composite, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_impls", derive(serde::Serialize))]
pub struct Identification {
    #[sinli(position = 1, literal = "I")]
    pub tag: Fixed,
    #[sinli(position = 2, width = 50)]
    pub source_email: String,
    #[sinli(position = 3, width = 50)]
    pub destination_email: String,
    #[sinli(position = 4, width = 6)]
    pub file_type: FileType,
    #[sinli(position = 5, width = 2)]
    pub file_version: FileVersion,
    #[sinli(position = 6, width = 8)]
    pub transmission_number: u32,
}

impl Identification {
    #[must_use]
    pub fn new(file_type: FileType, source_email: impl Into<String>, destination_email: impl Into<String>) -> Self {
        Self {
            tag: Fixed,
            source_email: source_email.into(),
            destination_email: destination_email.into(),
            file_type,
            file_version: file_type.version(),
            transmission_number: 0,
        }
    }
}

/// Addressing data of a sender and a receiver
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde_impls", derive(serde::Serialize))]
pub struct Envelope {
    pub source_id: String,
    pub destination_id: String,
    pub source_email: String,
    pub destination_email: String,
}

impl Envelope {
    #[must_use]
    pub fn identification_header(&self, file_type: FileType) -> IdentificationHeader {
        IdentificationHeader::new(file_type, self.source_id.as_str(), self.destination_id.as_str())
    }

    #[must_use]
    pub fn identification(&self, file_type: FileType) -> Identification {
        Identification::new(file_type, self.source_email.as_str(), self.destination_email.as_str())
    }

    #[must_use]
    pub fn subject(&self, file_type: FileType) -> Subject {
        Subject::new(self.source_id.as_str(), self.destination_id.as_str(), file_type)
    }
}

/// Name under which a file is stored and attached, as in
/// `sinli_N_20210101_093000_L1234567.snl`.
#[must_use]
pub fn file_name(format: FormatType, timestamp: NaiveDateTime, source_id: &str) -> String {
    format!(
        "sinli_{}_{}_{}.snl",
        format,
        timestamp.format("%Y%m%d_%H%M%S"),
        source_id
    )
}
