use criterion::{Criterion, criterion_group, criterion_main};
use scaledec::Decimal;
use serde::{Deserialize, Serialize};
use std::{hint::black_box, str::FromStr};

// ============================================================================
// JSON Serialization/Deserialization
// ============================================================================

fn bench_serialize_json(c: &mut Criterion) {
    c.bench_function("decimal_serialize_json", |b| {
        let d = Decimal::from_str("123.456789").unwrap();
        b.iter(|| black_box(serde_json::to_string(&black_box(d)).unwrap()));
    });
}

fn bench_deserialize_json(c: &mut Criterion) {
    c.bench_function("decimal_deserialize_json", |b| {
        let json = r#""123.456789""#;
        b.iter(|| black_box(serde_json::from_str::<Decimal>(black_box(json)).unwrap()));
    });
}

fn bench_deserialize_json_integer(c: &mut Criterion) {
    c.bench_function("decimal_deserialize_json_integer", |b| {
        let json = "123456789";
        b.iter(|| black_box(serde_json::from_str::<Decimal>(black_box(json)).unwrap()));
    });
}

fn bench_roundtrip_json(c: &mut Criterion) {
    c.bench_function("decimal_roundtrip_json", |b| {
        let d = Decimal::from_str("123.456789").unwrap();
        b.iter(|| {
            let json = serde_json::to_string(&black_box(d)).unwrap();
            black_box(serde_json::from_str::<Decimal>(&json).unwrap())
        });
    });
}

fn bench_rust_decimal_serialize_json(c: &mut Criterion) {
    c.bench_function("rust_decimal_serialize_json", |b| {
        let d = rust_decimal::Decimal::from_str_exact("123.456789").unwrap();
        b.iter(|| black_box(serde_json::to_string(&black_box(d)).unwrap()));
    });
}

fn bench_rust_decimal_deserialize_json(c: &mut Criterion) {
    c.bench_function("rust_decimal_deserialize_json", |b| {
        let json = r#""123.456789""#;
        b.iter(|| {
            black_box(serde_json::from_str::<rust_decimal::Decimal>(black_box(json)).unwrap())
        });
    });
}

// ============================================================================
// Struct with Multiple Decimals (Realistic Scenario)
// ============================================================================

#[derive(Serialize, Deserialize)]
struct Trade {
    price: Decimal,
    quantity: Decimal,
    commission: Decimal,
}

#[derive(Serialize, Deserialize)]
struct TradeRustDecimal {
    price: rust_decimal::Decimal,
    quantity: rust_decimal::Decimal,
    commission: rust_decimal::Decimal,
}

fn bench_struct_serialize_json(c: &mut Criterion) {
    c.bench_function("decimal_struct_serialize_json", |b| {
        let trade = Trade {
            price: Decimal::from_str("123.45").unwrap(),
            quantity: Decimal::from_str("1000").unwrap(),
            commission: Decimal::from_str("2.50").unwrap(),
        };
        b.iter(|| black_box(serde_json::to_string(&black_box(&trade)).unwrap()));
    });
}

fn bench_struct_deserialize_json(c: &mut Criterion) {
    c.bench_function("decimal_struct_deserialize_json", |b| {
        let json = r#"{"price":"123.45","quantity":"1000","commission":"2.50"}"#;
        b.iter(|| black_box(serde_json::from_str::<Trade>(black_box(json)).unwrap()));
    });
}

fn bench_rust_decimal_struct_serialize_json(c: &mut Criterion) {
    c.bench_function("rust_decimal_struct_serialize_json", |b| {
        let trade = TradeRustDecimal {
            price: rust_decimal::Decimal::from_str_exact("123.45").unwrap(),
            quantity: rust_decimal::Decimal::from_str_exact("1000").unwrap(),
            commission: rust_decimal::Decimal::from_str_exact("2.50").unwrap(),
        };
        b.iter(|| black_box(serde_json::to_string(&black_box(&trade)).unwrap()));
    });
}

fn bench_rust_decimal_struct_deserialize_json(c: &mut Criterion) {
    c.bench_function("rust_decimal_struct_deserialize_json", |b| {
        let json = r#"{"price":"123.45","quantity":"1000","commission":"2.50"}"#;
        b.iter(|| black_box(serde_json::from_str::<TradeRustDecimal>(black_box(json)).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_serialize_json,
    bench_deserialize_json,
    bench_deserialize_json_integer,
    bench_roundtrip_json,
    bench_rust_decimal_serialize_json,
    bench_rust_decimal_deserialize_json,
    bench_struct_serialize_json,
    bench_struct_deserialize_json,
    bench_rust_decimal_struct_serialize_json,
    bench_rust_decimal_struct_deserialize_json,
);

criterion_main!(benches);
