// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of PVData.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use tempfile::TempDir;

use pvdata_core::{DatasetError, PvDataset, Selection};
use pvdata_types::{DatasetOptions, Metric};

const DAY1: i64 = 1577836800; // 2020-01-01 00:00:00 UTC
const DAY2: i64 = 1577923200; // 2020-01-02 00:00:00 UTC

fn write_day(root: &Path, date: &str, metric: Metric, csv: &str) {
    let dir = root.join(date);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(metric.filename()), csv).unwrap();
}

/// One reading every `step` seconds, starting `step` seconds into the day
fn constant_day(base: i64, value: f64, step: i64) -> String {
    let mut csv = String::new();
    let mut offset = step;
    while offset < 86_400 {
        writeln!(csv, "{},{value}", base + offset).unwrap();
        offset += step;
    }
    csv
}

#[test]
fn test_reference_trapezoid_scenario() {
    let tmp = TempDir::new().unwrap();
    write_day(
        tmp.path(),
        "2020-01-01",
        Metric::Consumption,
        "1577836800,100.0\n1577840400,200.0\n",
    );

    let dataset = PvDataset::open(tmp.path());

    // 2 real rows + 2 sentinels in the day series
    let series = dataset.series(Metric::Consumption).unwrap();
    assert_eq!(series.len(), 4);

    // The sentinel a second before the first sample lands on the previous
    // day; the unified table collapses the midnight tie to the sentinel
    let rows = dataset.full().unwrap();
    assert_eq!(rows.len(), 3);

    assert_eq!(rows[0].delta_time, None);
    assert_eq!(rows[0].consumption, Some(0.0));

    assert_eq!(rows[1].timestamp.timestamp(), DAY1);
    assert_eq!(rows[1].consumption, Some(0.0));
    assert_eq!(rows[1].consumption_joules, Some(0.0));

    // 200*3600 + ((200 - 0)*3600)/2, the predecessor being the zero-valued
    // day-start sentinel
    assert_eq!(rows[2].delta_time, Some(3600.0));
    assert_eq!(rows[2].consumption_joules, Some(1_080_000.0));

    // Selecting the day returns only rows whose derived date matches
    let Selection::Rows(selected) = dataset.select("2020-01-01").unwrap() else {
        panic!("expected rows");
    };
    assert_eq!(selected.len(), 2);

    let daily = dataset.daily().unwrap();
    let day = daily
        .iter()
        .find(|summary| summary.date == NaiveDate::from_ymd_opt(2020, 1, 1).unwrap())
        .unwrap();
    assert_eq!(day.consumption_max, Some(200.0));
    assert_eq!(day.consumption_joules, Some(1_080_000.0));
    assert_eq!(day.consumption_daily, Some(1_080_000.0 / 86_400.0));
}

#[test]
fn test_constant_power_round_trip() {
    const WATTS: f64 = 1000.0;

    let tmp = TempDir::new().unwrap();
    write_day(
        tmp.path(),
        "2020-01-01",
        Metric::Consumption,
        &constant_day(DAY1, WATTS, 600),
    );
    write_day(
        tmp.path(),
        "2020-01-02",
        Metric::Consumption,
        &constant_day(DAY2, WATTS, 600),
    );

    let dataset = PvDataset::open(tmp.path());
    let daily = dataset.daily().unwrap();

    for date in [
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2020, 1, 2).unwrap(),
    ] {
        let day = daily.iter().find(|summary| summary.date == date).unwrap();

        // Total energy is V * 86400 up to the synthetic zero ramp at the
        // start of the day
        let joules = day.consumption_joules.unwrap();
        assert!((joules - WATTS * 86_400.0).abs() / (WATTS * 86_400.0) < 0.02);

        // The daily column is exactly the joules total over 86400
        assert_eq!(day.consumption_daily, Some(joules / 86_400.0));
    }

    // No energy leaks across the boundary: the second day's opening row is
    // pinned to zero
    let rows = dataset.full().unwrap();
    let boundary = rows
        .iter()
        .find(|row| row.timestamp.timestamp() == DAY2)
        .unwrap();
    assert_eq!(boundary.consumption_joules, Some(0.0));
}

#[test]
fn test_generation_ceiling_excludes_glitches() {
    let tmp = TempDir::new().unwrap();
    write_day(
        tmp.path(),
        "2020-01-01",
        Metric::Generation,
        "1577840400,600000\n1577844000,420.0\n",
    );

    let dataset = PvDataset::open(tmp.path());

    let series = dataset.series(Metric::Generation).unwrap();
    assert!(series.samples.iter().all(|sample| sample.value <= 500_000.0));

    let rows = dataset.full().unwrap();
    assert!(
        !rows
            .iter()
            .any(|row| row.timestamp.timestamp() == 1577840400)
    );
}

#[test]
fn test_mixed_cadence_outer_join() {
    let tmp = TempDir::new().unwrap();
    write_day(
        tmp.path(),
        "2020-01-01",
        Metric::Consumption,
        &constant_day(DAY1, 500.0, 600),
    );
    write_day(
        tmp.path(),
        "2020-01-01",
        Metric::Battery,
        &constant_day(DAY1, 48.0, 1800),
    );

    let options = DatasetOptions::new(tmp.path())
        .with_metrics(vec![Metric::Consumption, Metric::Generation, Metric::Battery]);
    let dataset = PvDataset::new(options);
    let rows = dataset.full().unwrap();

    // Union of timestamps, strictly increasing, delta matching the gaps
    for pair in rows.windows(2) {
        assert!(pair[0].timestamp < pair[1].timestamp);
        #[expect(clippy::cast_precision_loss)]
        let gap = (pair[1].timestamp - pair[0].timestamp).num_seconds() as f64;
        assert_eq!(pair[1].delta_time, Some(gap));
    }
    assert_eq!(rows[0].delta_time, None);

    // Battery readings only exist on the coarser cadence
    let battery_rows = rows.iter().filter(|row| row.battery.is_some()).count();
    let consumption_rows = rows.iter().filter(|row| row.consumption.is_some()).count();
    assert!(battery_rows < consumption_rows);

    // Generation never appears, and outer-join rows tolerate that
    assert!(rows.iter().all(|row| row.generation.is_none()));

    // Battery participates in integration once enabled
    assert!(rows.iter().any(|row| row.battery_joules.is_some()));
}

#[test]
fn test_days_missing_a_metric_leave_gaps() {
    let tmp = TempDir::new().unwrap();
    write_day(
        tmp.path(),
        "2020-01-01",
        Metric::Consumption,
        &constant_day(DAY1, 500.0, 3600),
    );
    write_day(
        tmp.path(),
        "2020-01-01",
        Metric::Generation,
        &constant_day(DAY1, 300.0, 3600),
    );
    // Day 2 has consumption only
    write_day(
        tmp.path(),
        "2020-01-02",
        Metric::Consumption,
        &constant_day(DAY2, 500.0, 3600),
    );

    let dataset = PvDataset::open(tmp.path());
    let daily = dataset.daily().unwrap();

    let day2 = daily
        .iter()
        .find(|summary| summary.date == NaiveDate::from_ymd_opt(2020, 1, 2).unwrap())
        .unwrap();
    assert!(day2.consumption_max.is_some());
    assert_eq!(day2.generation_max, None);
    // The joules sum over an all-missing day is zero, not None
    assert_eq!(day2.generation_joules, Some(0.0));
}

#[test]
fn test_timestamp_correction_end_to_end() {
    let tmp = TempDir::new().unwrap();
    // Second row's timestamp carries a concatenated digit run; its last ten
    // digits are the real value
    write_day(
        tmp.path(),
        "2020-01-01",
        Metric::Consumption,
        "1577840400,100.0\n157784151577841600,150.0\n",
    );

    let dataset = PvDataset::open(tmp.path());
    let rows = dataset.full().unwrap();

    assert!(
        rows.iter()
            .any(|row| row.timestamp.timestamp() == 1577841600 && row.consumption == Some(150.0))
    );
}

#[test]
fn test_empty_file_is_skipped_not_fatal() {
    let tmp = TempDir::new().unwrap();
    write_day(tmp.path(), "2020-01-01", Metric::Consumption, "");
    write_day(
        tmp.path(),
        "2020-01-02",
        Metric::Consumption,
        "1577926800,100.0\n",
    );

    let dataset = PvDataset::open(tmp.path());
    let rows = dataset.full().unwrap();
    assert!(!rows.is_empty());
    assert!(
        rows.iter()
            .all(|row| row.date != NaiveDate::from_ymd_opt(2020, 1, 1).unwrap())
    );
}

#[test]
fn test_unknown_selector_is_a_typed_error() {
    let tmp = TempDir::new().unwrap();
    write_day(
        tmp.path(),
        "2020-01-01",
        Metric::Consumption,
        "1577840400,100.0\n",
    );

    let dataset = PvDataset::open(tmp.path());
    let error = dataset.select("not-a-date").unwrap_err();
    assert!(matches!(error, DatasetError::UnknownSelector(_)));
}

#[test]
fn test_peak_day_label_selects_its_rows() {
    let tmp = TempDir::new().unwrap();
    write_day(
        tmp.path(),
        "2020-01-01",
        Metric::Generation,
        &constant_day(DAY1, 300.0, 3600),
    );
    write_day(
        tmp.path(),
        "2020-01-02",
        Metric::Generation,
        &constant_day(DAY2, 900.0, 3600),
    );

    let dataset = PvDataset::open(tmp.path());

    let Selection::Rows(rows) = dataset.select("Peak Generation Day").unwrap() else {
        panic!("expected rows");
    };
    assert!(!rows.is_empty());
    assert!(
        rows.iter()
            .all(|row| row.date == NaiveDate::from_ymd_opt(2020, 1, 2).unwrap())
    );

    // Labeled summaries pick the same day up
    let special_days = dataset.special_days().unwrap();
    assert!(special_days.iter().any(|(special, summary)| {
        special.name == "Peak Generation Day"
            && summary.date == NaiveDate::from_ymd_opt(2020, 1, 2).unwrap()
    }));
}

#[test]
fn test_unified_table_serializes() {
    let tmp = TempDir::new().unwrap();
    write_day(
        tmp.path(),
        "2020-01-01",
        Metric::Consumption,
        "1577840400,100.0\n",
    );

    let dataset = PvDataset::open(tmp.path());
    let rows = dataset.full().unwrap();

    let json = serde_json::to_string(&*rows).unwrap();
    assert!(json.contains("\"consumption\":100.0"));
    assert!(json.contains("\"date\":\"2020-01-01\""));
}
