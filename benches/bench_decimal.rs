use std::hint::black_box;
use std::str::FromStr;

use criterion::{Criterion, criterion_group, criterion_main};
use scaledec::{Decimal, RoundingMode};

fn bench_addition(c: &mut Criterion) {
    c.bench_function("decimal_addition", |b| {
        let x = Decimal::from_str("123.456789").unwrap();
        let y = Decimal::from_str("987.654321").unwrap();
        b.iter(|| black_box(black_box(x) + black_box(y)));
    });
}

fn bench_addition_unaligned(c: &mut Criterion) {
    c.bench_function("decimal_addition_unaligned", |b| {
        let x = Decimal::from_str("123.45").unwrap();
        let y = Decimal::from_str("0.000000000000000000000001").unwrap();
        b.iter(|| black_box(black_box(x) + black_box(y)));
    });
}

fn bench_subtraction(c: &mut Criterion) {
    c.bench_function("decimal_subtraction", |b| {
        let x = Decimal::from_str("987.654321").unwrap();
        let y = Decimal::from_str("123.456789").unwrap();
        b.iter(|| black_box(black_box(x) - black_box(y)));
    });
}

fn bench_multiplication(c: &mut Criterion) {
    c.bench_function("decimal_multiplication", |b| {
        let x = Decimal::from_str("123.456789").unwrap();
        let y = Decimal::from_str("9.876543").unwrap();
        b.iter(|| black_box(black_box(x) * black_box(y)));
    });
}

fn bench_multiplication_wide(c: &mut Criterion) {
    c.bench_function("decimal_multiplication_wide", |b| {
        let x = Decimal::from_str("7.9228162514264337593543950335").unwrap();
        b.iter(|| black_box(black_box(x) * black_box(x)));
    });
}

fn bench_division(c: &mut Criterion) {
    c.bench_function("decimal_division", |b| {
        let x = Decimal::from_str("123.456789").unwrap();
        let y = Decimal::from_str("9.876543").unwrap();
        b.iter(|| black_box(black_box(x) / black_box(y)));
    });
}

fn bench_division_exact(c: &mut Criterion) {
    c.bench_function("decimal_division_exact", |b| {
        let x = Decimal::from_str("1000.50").unwrap();
        let y = Decimal::from_str("2").unwrap();
        b.iter(|| black_box(black_box(x) / black_box(y)));
    });
}

fn bench_remainder(c: &mut Criterion) {
    c.bench_function("decimal_remainder", |b| {
        let x = Decimal::from_str("123.456789").unwrap();
        let y = Decimal::from_str("0.07").unwrap();
        b.iter(|| black_box(black_box(x) % black_box(y)));
    });
}

fn bench_parsing(c: &mut Criterion) {
    c.bench_function("decimal_parsing", |b| {
        b.iter(|| black_box(Decimal::from_str(black_box("123.456789")).unwrap()));
    });
}

fn bench_formatting(c: &mut Criterion) {
    c.bench_function("decimal_formatting", |b| {
        let d = Decimal::from_str("123.456789").unwrap();
        b.iter(|| black_box(format!("{}", d)));
    });
}

fn bench_price_times_quantity(c: &mut Criterion) {
    c.bench_function("decimal_price_times_quantity", |b| {
        let price = Decimal::from_str("123.45").unwrap();
        let quantity = Decimal::from(1000);
        b.iter(|| black_box(black_box(price) * black_box(quantity)));
    });
}

fn bench_sum(c: &mut Criterion) {
    c.bench_function("decimal_sum_1000_values", |b| {
        let values: Vec<Decimal> = (0..1000)
            .map(|i| Decimal::from_str(&format!("{}.{:02}", i, i % 100)).unwrap())
            .collect();
        b.iter(|| black_box(values.iter().copied().sum::<Decimal>()));
    });
}

fn bench_rounding(c: &mut Criterion) {
    c.bench_function("decimal_round_to_2_decimals", |b| {
        let d = Decimal::from_str("123.456789").unwrap();
        b.iter(|| black_box(black_box(d).round_dp_with_mode(2, RoundingMode::ToEven)));
    });
}

fn bench_words_write_read(c: &mut Criterion) {
    c.bench_function("decimal_words_write_read", |b| {
        let d = Decimal::from_str("123.456789").unwrap();
        b.iter(|| {
            let words = black_box(d).to_words();
            black_box(Decimal::from_words(black_box(words)).unwrap())
        });
    });
}

fn bench_comparison(c: &mut Criterion) {
    c.bench_function("decimal_comparison_mixed_scale", |b| {
        let x = Decimal::from_str("123.450").unwrap();
        let y = Decimal::from_str("123.46").unwrap();
        b.iter(|| black_box(black_box(x) < black_box(y)));
    });
}

fn bench_float_conversion(c: &mut Criterion) {
    c.bench_function("decimal_from_f64", |b| {
        b.iter(|| black_box(Decimal::try_from_f64(black_box(123.456789)).unwrap()));
    });
}

fn bench_currency_conversion(c: &mut Criterion) {
    c.bench_function("decimal_to_currency_units", |b| {
        let d = Decimal::from_str("123.456789").unwrap();
        b.iter(|| black_box(black_box(d).to_currency_units().unwrap()));
    });
}

criterion_group!(
    benches,
    bench_addition,
    bench_addition_unaligned,
    bench_subtraction,
    bench_multiplication,
    bench_multiplication_wide,
    bench_division,
    bench_division_exact,
    bench_remainder,
    bench_parsing,
    bench_formatting,
    bench_price_times_quantity,
    bench_sum,
    bench_rounding,
    bench_words_write_read,
    bench_comparison,
    bench_float_conversion,
    bench_currency_conversion,
);

criterion_main!(benches);
