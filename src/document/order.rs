//! Purchase orders (`PEDIDO`)

use chrono::NaiveDate;

use super::{Envelope, FileType, Identification, IdentificationHeader, LegacyCoin, OrderSource, OrderType};
use crate::conv::Fixed;
use crate::Composite;

#[derive(Composite, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_impls", derive(serde::Serialize))]
pub struct Order {
    #[sinli(position = 1)]
    pub identification_header: IdentificationHeader,
    #[sinli(position = 2)]
    pub identification: Identification,
    #[sinli(position = 3)]
    pub header: OrderHeader,
    /// Alternative delivery addresses, usually none
    #[sinli(position = 4)]
    pub delivery_points: Vec<OrderDeliveryPoint>,
    #[sinli(position = 5)]
    pub details: Vec<OrderDetail>,
}

impl Order {
    #[must_use]
    pub fn new(envelope: &Envelope, header: OrderHeader, details: Vec<OrderDetail>) -> Self {
        Self {
            identification_header: envelope.identification_header(FileType::Order),
            identification: envelope.identification(FileType::Order),
            header,
            delivery_points: Vec::new(),
            details,
        }
    }
}

#[derive(Composite, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_impls", derive(serde::Serialize))]
pub struct OrderHeader {
    #[sinli(position = 1, literal = "C")]
    pub tag: Fixed,
    #[sinli(position = 2, width = 40)]
    pub client_name: String,
    #[sinli(position = 3, width = 40)]
    pub provider_name: String,
    #[sinli(position = 4, width = 8)]
    pub order_date: NaiveDate,
    #[sinli(position = 5, width = 10)]
    pub order_code: String,
    #[sinli(position = 6, width = 1)]
    pub order_type: OrderType,
    #[sinli(position = 7, width = 1)]
    pub coin: LegacyCoin,
    #[sinli(position = 8, width = 1)]
    pub print_on_demand: bool,
    #[sinli(position = 9, width = 8)]
    pub requested_delivery_date: Option<NaiveDate>,
    #[sinli(position = 10, width = 8)]
    pub last_delivery_allowed_date: Option<NaiveDate>,
    #[sinli(position = 11, width = 1)]
    pub last_delivery_expiration: bool,
    #[sinli(position = 12, width = 15)]
    pub batch: String,
}

impl OrderHeader {
    /// Header of a normal order in euros, with every optional field left
    /// blank.
    #[must_use]
    pub fn new(
        client_name: impl Into<String>,
        provider_name: impl Into<String>,
        order_date: NaiveDate,
        order_code: impl Into<String>,
    ) -> Self {
        Self {
            tag: Fixed,
            client_name: client_name.into(),
            provider_name: provider_name.into(),
            order_date,
            order_code: order_code.into(),
            order_type: OrderType::Normal,
            coin: LegacyCoin::Euro,
            print_on_demand: false,
            requested_delivery_date: None,
            last_delivery_allowed_date: None,
            last_delivery_expiration: false,
            batch: String::new(),
        }
    }
}

#[derive(Composite, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde_impls", derive(serde::Serialize))]
pub struct OrderDeliveryPoint {
    #[sinli(position = 1, literal = "E")]
    pub tag: Fixed,
    #[sinli(position = 2, width = 50)]
    pub name: String,
    #[sinli(position = 3, width = 80)]
    pub address: String,
    #[sinli(position = 4, width = 5)]
    pub postal_code: String,
    #[sinli(position = 5, width = 50)]
    pub city: String,
    #[sinli(position = 6, width = 40)]
    pub province: String,
}

#[derive(Composite, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_impls", derive(serde::Serialize))]
pub struct OrderDetail {
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
    pub price_with_vat: f64,
    /// Keep the line open if it cannot be served at once
    #[sinli(position = 8, width = 1)]
    pub want_pending: bool,
    #[sinli(position = 9, width = 1)]
    pub order_source: OrderSource,
    #[sinli(position = 10, width = 1)]
    pub fast_delivery: bool,
    #[sinli(position = 11, width = 10)]
    pub code: String,
}

impl OrderDetail {
    #[must_use]
    pub fn new(isbn: impl Into<String>, quantity: i32) -> Self {
        Self {
            tag: Fixed,
            isbn: isbn.into(),
            ean: String::new(),
            reference: String::new(),
            title: String::new(),
            quantity,
            price_with_vat: 0.0,
            want_pending: false,
            order_source: OrderSource::Normal,
            fast_delivery: false,
            code: String::new(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::document::test::{envelope, new_year};

    fn header() -> OrderHeader {
        OrderHeader::new("Client Name", "Provider", new_year(), "P-1")
    }

    #[test]
    fn header_line() {
        let mut header = header();
        header.requested_delivery_date = NaiveDate::from_ymd_opt(2021, 1, 15);
        let line = crate::render(&header).unwrap();
        assert_eq!(line.len(), 1 + 40 + 40 + 8 + 10 + 1 + 1 + 1 + 8 + 8 + 1 + 15 + 2);
        assert_eq!(
            &line[81..],
            "20210101P-1       NEN20210115        N               \r\n"
        );
    }

    #[test]
    fn detail_line() {
        let detail = OrderDetail {
            title: "El Quijote".into(),
            price_with_vat: 19.95,
            want_pending: true,
            ..OrderDetail::new("9788420412146", 3)
        };
        assert_eq!(
            crate::render(&detail).unwrap(),
            format!(
                "D9788420412146    {}{}El Quijote{}0000030000001995SNN{}\r\n",
                " ".repeat(18),
                " ".repeat(15),
                " ".repeat(40),
                " ".repeat(10)
            )
        );
    }

    #[test]
    fn delivery_points_follow_header() {
        let mut order = Order::new(&envelope(), header(), vec![OrderDetail::new("9781234567890", 1)]);
        let text = crate::render(&order).unwrap();
        assert_eq!(text.lines().count(), 4);
        assert!(text.starts_with("INPEDIDO07"));

        order.delivery_points.push(OrderDeliveryPoint {
            name: "Almacén".into(),
            postal_code: "28001".into(),
            city: "Madrid".into(),
            ..Default::default()
        });
        let text = crate::render(&order).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[3].starts_with("EAlmacén"));
        assert!(lines[4].starts_with("D9781234567890"));
    }
}
