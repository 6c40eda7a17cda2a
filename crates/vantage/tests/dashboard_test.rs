//! Full dashboard runs against in-memory and file-backed providers.

use approx::assert_relative_eq;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rstest::rstest;
use vantage::{
    DashboardConfig, IndexCatalog, build_dashboard,
    data::{PriceSeries, file::CsvPriceProvider, memory::StaticPriceProvider},
    metrics::{Diagnostic, MetricKind, MetricValue},
    output::{ExportFormat, Exporter},
};

/// Weekdays starting at 2023-01-02.
fn trading_days(n: usize) -> Vec<NaiveDate> {
    let mut date = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
    let mut days = Vec::with_capacity(n);
    while days.len() < n {
        if !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            days.push(date);
        }
        date += Duration::days(1);
    }
    days
}

fn wave(symbol: &str, dates: &[NaiveDate], level: f64, phase: f64) -> PriceSeries {
    let prices = (0..dates.len())
        .map(|i| level * (1.0 + 0.0004 * i as f64 + 0.03 * ((i as f64 + phase) * 0.2).sin()))
        .collect();
    PriceSeries::new(symbol, dates.to_vec(), prices).unwrap()
}

fn full_provider(n: usize) -> StaticPriceProvider {
    let dates = trading_days(n);

    StaticPriceProvider::new()
        .with_series(wave("ITUB4.SA", &dates, 30.0, 0.0))
        .with_series(wave("PETR4.SA", &dates, 38.0, 1.5))
        .with_series(wave("BBDC3.SA", &dates, 14.0, 3.0))
        .with_series(wave("^BVSP", &dates, 120_000.0, 0.5))
}

#[tokio::test]
async fn test_index_y_dashboard() {
    let provider = full_provider(400);
    let catalog = IndexCatalog::builtin();
    let definition = catalog.get("Index Y").unwrap();

    let dashboard = build_dashboard(&provider, definition, &DashboardConfig::default())
        .await
        .unwrap();

    assert!(dashboard.diagnostics.is_empty());
    assert_eq!(dashboard.index_series.dates(), dashboard.benchmark_series.dates());
    assert_relative_eq!(dashboard.benchmark_series.values()[0], 100.0);

    for entry in dashboard.index_metrics.entries() {
        assert!(
            entry.value.value().is_some(),
            "{} should be defined for the index",
            entry.kind
        );
    }
    assert_eq!(
        dashboard.benchmark_metrics.get(MetricKind::InformationRatio),
        MetricValue::NotApplicable
    );
    assert!(!dashboard.monthly.is_empty());
    assert!(dashboard.composition.iter().all(|row| row.included));
}

#[tokio::test]
async fn test_benchmark_only_dates_are_dropped() {
    let dates = trading_days(30);
    let mut bench_dates = dates.clone();
    // Saturday trading for the benchmark only
    bench_dates.push(NaiveDate::from_ymd_opt(2023, 1, 7).unwrap());
    bench_dates.sort();

    let provider = StaticPriceProvider::new()
        .with_series(wave("ITUB4.SA", &dates, 30.0, 0.0))
        .with_series(wave("PETR4.SA", &dates, 38.0, 1.5))
        .with_series(wave("BBDC3.SA", &dates, 14.0, 3.0))
        .with_series(wave("^BVSP", &bench_dates, 120_000.0, 0.5));

    let definition = IndexCatalog::builtin().get("Index Y").unwrap().clone();
    let dashboard = build_dashboard(&provider, &definition, &DashboardConfig::default())
        .await
        .unwrap();

    assert_eq!(dashboard.benchmark_series.len(), 30);
    assert_eq!(dashboard.index_series.dates(), dates.as_slice());
    assert!(matches!(
        dashboard.index_metrics.get(MetricKind::Beta),
        MetricValue::Value(_)
    ));
    assert!(
        dashboard
            .diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::InsufficientHistory { actual: 30, .. }))
    );
}

#[rstest]
#[case(ExportFormat::Csv, "metric,index,benchmark")]
#[case(ExportFormat::Json, "\"index_metrics\"")]
#[tokio::test]
async fn test_export(#[case] format: ExportFormat, #[case] expected: &str) {
    let provider = full_provider(300);
    let definition = IndexCatalog::builtin().get("Index Y").unwrap().clone();

    let dashboard = build_dashboard(&provider, &definition, &DashboardConfig::default())
        .await
        .unwrap();

    assert!(dashboard.export_to_string(format).unwrap().contains(expected));
}

#[tokio::test]
async fn test_csv_provider_dashboard() {
    let dir = std::env::temp_dir().join("vantage_dashboard_test");
    std::fs::create_dir_all(&dir).unwrap();
    let provider = CsvPriceProvider::new(&dir);

    let dates = trading_days(260);
    for series in [
        wave("BBAS3.SA", &dates, 27.0, 0.0),
        wave("PETR4.SA", &dates, 38.0, 1.0),
        wave("^BVSP", &dates, 120_000.0, 2.0),
    ] {
        CsvPriceProvider::write_file(&series, &provider.path_for(series.symbol())).unwrap();
    }

    let definition = IndexCatalog::builtin().get("Index X").unwrap().clone();
    let dashboard = build_dashboard(&provider, &definition, &DashboardConfig::default())
        .await
        .unwrap();

    // EZTC3.SA has no file
    assert_eq!(
        dashboard.diagnostics,
        vec![Diagnostic::data_unavailable("EZTC3.SA")]
    );
    assert_relative_eq!(dashboard.index_series.values()[0], 80.0, epsilon = 1e-9);
    assert!(dashboard.index_metrics.get(MetricKind::TrailingReturn).value().is_some());

    let table = dashboard.to_ascii_table();
    assert!(table.contains("EZTC3.SA"));
    assert!(table.contains("(no data)"));

    std::fs::remove_dir_all(dir).ok();
}
