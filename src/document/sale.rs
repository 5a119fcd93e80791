//! Sales reports (`CEGALV`)
//!
//! Sales are grouped into tickets; each ticket line is followed by the lines
//! of the titles it sold.

use chrono::NaiveDate;

use super::{Coin, Envelope, FileType, Identification, IdentificationHeader};
use crate::conv::Fixed;
use crate::Composite;

#[derive(Composite, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_impls", derive(serde::Serialize))]
pub struct Sale {
    #[sinli(position = 1)]
    pub identification_header: IdentificationHeader,
    #[sinli(position = 2)]
    pub identification: Identification,
    #[sinli(position = 3)]
    pub header: SaleHeader,
    #[sinli(position = 4)]
    pub tickets: Vec<SaleTicket>,
}

impl Sale {
    #[must_use]
    pub fn new(envelope: &Envelope, header: SaleHeader, tickets: Vec<SaleTicket>) -> Self {
        Self {
            identification_header: envelope.identification_header(FileType::Sale),
            identification: envelope.identification(FileType::Sale),
            header,
            tickets,
        }
    }
}

#[derive(Composite, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_impls", derive(serde::Serialize))]
pub struct SaleHeader {
    #[sinli(position = 1, literal = "C")]
    pub tag: Fixed,
    #[sinli(position = 2, width = 40)]
    pub client_name: String,
    #[sinli(position = 3, width = 8)]
    pub dispatch_date: NaiveDate,
    #[sinli(position = 4, width = 3)]
    pub coin: Coin,
}

impl SaleHeader {
    #[must_use]
    pub fn new(client_name: impl Into<String>, dispatch_date: NaiveDate) -> Self {
        Self {
            tag: Fixed,
            client_name: client_name.into(),
            dispatch_date,
            coin: Coin::Euro,
        }
    }
}

#[derive(Composite, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_impls", derive(serde::Serialize))]
pub struct SaleTicket {
    #[sinli(position = 1, literal = "T")]
    pub tag: Fixed,
    /// Zero for the generic client
    #[sinli(position = 2, width = 10)]
    pub client_number: u64,
    #[sinli(position = 3, width = 8)]
    pub sale_date: NaiveDate,
    #[sinli(position = 4, width = 10)]
    pub sale_number: String,
    #[sinli(position = 5, width = 10)]
    pub net_amount: f64,
    #[sinli(position = 6)]
    pub details: Vec<SaleDetail>,
}

impl SaleTicket {
    /// Ticket of the generic client, with its net amount left at zero.
    #[must_use]
    pub fn new(sale_date: NaiveDate, sale_number: impl Into<String>, details: Vec<SaleDetail>) -> Self {
        Self {
            tag: Fixed,
            client_number: 0,
            sale_date,
            sale_number: sale_number.into(),
            net_amount: 0.0,
            details,
        }
    }
}

#[derive(Composite, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde_impls", derive(serde::Serialize))]
pub struct SaleDetail {
    #[sinli(position = 1, literal = "D")]
    pub tag: Fixed,
    #[sinli(position = 2, width = 17)]
    pub isbn: String,
    #[sinli(position = 3, width = 6)]
    pub quantity: i32,
    #[sinli(position = 4, width = 10)]
    pub price_without_vat: f64,
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::document::test::{envelope, new_year};
    use crate::error::{Error, ValueError};

    fn ticket() -> SaleTicket {
        let detail = |isbn: &str, price| SaleDetail {
            isbn: String::from(isbn),
            quantity: 1,
            price_without_vat: price,
            ..Default::default()
        };
        SaleTicket {
            client_number: 777,
            net_amount: 2.0,
            ..SaleTicket::new(
                new_year(),
                "1234",
                vec![detail("9781234567890", 1.01), detail("9781234567891", 0.99)],
            )
        }
    }

    #[test]
    fn sale_file() {
        let sale = Sale::new(
            &envelope(),
            SaleHeader::new("Client Name", new_year()),
            vec![ticket(), ticket()],
        );
        let ticket_lines = concat!(
            "T0000000777202101011234      0000000200\r\n",
            "D9781234567890    0000010000000101\r\n",
            "D9781234567891    0000010000000099\r\n",
        );
        let want = [
            "INCEGALV031234567812345678000000000000                                     FANDE\r\n",
            "Isource@fakemail.com                               destination@fakemail.com                          CEGALV0300000000\r\n",
            "CClient Name                             20210101EUR\r\n",
            ticket_lines,
            ticket_lines,
        ]
        .concat();
        assert_eq!(crate::render(&sale).unwrap(), want);
    }

    #[test]
    fn ticket_without_details() {
        let bare = SaleTicket::new(new_year(), "1", Vec::new());
        assert_eq!(
            crate::render(&bare).unwrap(),
            "T0000000000202101011         0000000000\r\n"
        );
    }

    #[test]
    fn failing_detail_aborts_document() {
        let mut ticket = ticket();
        ticket.details[1].quantity = 1_000_000;
        let sale = Sale::new(&envelope(), SaleHeader::new("Client Name", new_year()), vec![ticket]);
        assert_eq!(
            crate::encode(&sale),
            Err(Error::Value {
                field: "quantity",
                source: ValueError::TooWide { limit: 6, actual: 7 }
            })
        );
    }
}
