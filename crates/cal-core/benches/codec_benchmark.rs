//! Calendar Hot Path Benchmarks
//!
//! Measures the work done for every button click:
//! - Token encoding and decoding
//! - Keyboard rendering
//! - Full decode → transition → render dispatch

use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use cal_core::{
    Action, CalendarConfig, CallbackToken, DialogScreen, Locales, Localization, MonthView, Render,
    Screen, WidgetKind, dispatch,
};

/// Benchmark token codec
fn bench_token_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("token_codec");

    let token = CallbackToken::with_day(WidgetKind::Dialog, Screen::DayGrid, 2024, 12, 31);
    group.bench_function("encode", |b| b.iter(|| black_box(&token).encode()));

    let samples = [
        ("select_day", "cal:d:d:D:2024:12:31"),
        ("next_month", "cal:s:v:>:2024:12"),
        ("cancel", "cal:s:v:x"),
        ("malformed", "cal:s:v:D:2024:12"),
    ];
    for (name, data) in samples {
        group.bench_with_input(BenchmarkId::new("decode", name), data, |b, data| {
            b.iter(|| CallbackToken::decode(black_box(data)))
        });
    }

    group.finish();
}

/// Benchmark keyboard rendering
fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let config = CalendarConfig::default();
    let l10n = Localization::english();

    group.bench_function("month_view", |b| {
        let view = MonthView { year: 2024, month: 2 };
        b.iter(|| black_box(view).render(&config, &l10n))
    });

    group.bench_function("year_page", |b| {
        let screen = DialogScreen::YearPage { page: 124 };
        b.iter(|| black_box(screen).render(&config, &l10n))
    });

    group.bench_function("month_grid", |b| {
        let screen = DialogScreen::MonthGrid { year: 1989 };
        b.iter(|| black_box(screen).render(&config, &l10n))
    });

    group.finish();
}

/// Benchmark a complete click
fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");
    let config = CalendarConfig::default();
    let locales = Locales::builtin();
    let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap_or_default();

    let clicks = [
        CallbackToken::with_month(WidgetKind::Simple, Screen::MonthView, Action::NextMonth, 2024, 12),
        CallbackToken::with_year(WidgetKind::Dialog, Screen::YearPage, Action::SelectYear, 1989),
        CallbackToken::with_day(WidgetKind::Simple, Screen::MonthView, 2024, 2, 29),
    ];
    for token in clicks {
        let data = token.encode();
        group.bench_with_input(BenchmarkId::from_parameter(&data), &data, |b, data| {
            b.iter(|| dispatch(black_box(data), &config, &locales, today))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_token_codec, bench_render, bench_dispatch);
criterion_main!(benches);
