use criterion::{black_box, criterion_group, criterion_main, Criterion};

use sinli::conv::target::ByteCounter;
use sinli::prelude::*;
use sinli::{Cp850, Target};

fn sample_sale(tickets: usize) -> Sale {
    let day = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
    let envelope = Envelope {
        source_id: "L1234567".into(),
        destination_id: "L7654321".into(),
        source_email: "librería@fakemail.com".into(),
        destination_email: "distribuidora@fakemail.com".into(),
    };
    let tickets = (0..tickets)
        .map(|n| {
            let details = (0..8)
                .map(|i| SaleDetail {
                    isbn: format!("978{:010}", n * 8 + i),
                    quantity: 1,
                    price_without_vat: 9.95 + i as f64,
                    ..Default::default()
                })
                .collect();
            SaleTicket {
                net_amount: 120.0,
                ..SaleTicket::new(day, n.to_string(), details)
            }
        })
        .collect();
    Sale::new(&envelope, SaleHeader::new("Librería Ñandú", day), tickets)
}

fn encode_bench(c: &mut Criterion) {
    let sale = sample_sale(100);

    c.bench_function("render", |b| b.iter(|| black_box(sale.to_text())));
    c.bench_function("encode", |b| b.iter(|| black_box(sale.to_sinli())));
}

fn target_bench(c: &mut Criterion) {
    let sale = sample_sale(100);

    c.bench_function("write_to vec", |b| {
        b.iter(|| {
            let mut buf: Vec<u8> = Vec::create();
            black_box(sale.write_to(&mut buf, &Cp850))
        })
    });
    c.bench_function("write_to counter", |b| {
        b.iter(|| black_box(sale.write_to(&mut ByteCounter::create(), &Cp850)))
    });
}

criterion_group!(benches, encode_bench, target_bench);
criterion_main!(benches);
