// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of PVData.

use chrono::NaiveDate;

use pvdata_types::{DailySummary, Metric, SpecialDate, UnifiedRow};

/// Calendar dates of interest for this plant: controller incidents, weather
/// references, and the astronomical markers. Annotation only.
pub const SPECIAL_LABELS: [(&str, &str); 15] = [
    ("2016 charge controller degradation 1", "2016-10-31"), // Estimated
    ("2017 charge controller fix 1", "2017-07-19"),
    ("2017 charge controller restoration 1", "2017-07-20"), // Full day after fix
    ("2017 charge controller degradation 2", "2017-08-03"),
    ("2017 charge controller restoration 2", "2017-09-13"),
    ("2017 eclipse", "2017-08-21"),
    ("cloudless day", "2016-10-24"),
    ("2017 spring equinox", "2017-03-20"),
    ("2017 summer solstice", "2017-06-21"),
    ("2017 autumn equinox", "2017-09-22"),
    ("2017 winter solstice", "2017-12-21"),
    ("2018 spring equinox", "2017-03-20"),
    ("2018 summer solstice", "2017-06-21"),
    ("2018 autumn equinox", "2017-09-22"),
    ("2018 winter solstice", "2017-12-21"),
];

/// The fixed label table plus the two data-derived entries: the days with
/// the highest recorded generation and consumption readings.
pub fn special_dates(rows: &[UnifiedRow]) -> Vec<SpecialDate> {
    let mut dates: Vec<SpecialDate> = SPECIAL_LABELS
        .iter()
        .filter_map(|&(name, date)| {
            NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .ok()
                .map(|date| SpecialDate {
                    name: name.to_owned(),
                    date,
                })
        })
        .collect();

    if let Some(date) = peak_date(rows, Metric::Generation) {
        dates.push(SpecialDate {
            name: "Peak Generation Day".to_owned(),
            date,
        });
    }
    if let Some(date) = peak_date(rows, Metric::Consumption) {
        dates.push(SpecialDate {
            name: "Peak Consumption Day".to_owned(),
            date,
        });
    }

    dates
}

/// Date of the first row carrying the metric's highest raw reading.
fn peak_date(rows: &[UnifiedRow], metric: Metric) -> Option<NaiveDate> {
    let mut best: Option<(f64, NaiveDate)> = None;
    for row in rows {
        if let Some(value) = row.value(metric)
            && best.is_none_or(|(max, _)| value > max)
        {
            best = Some((value, row.date));
        }
    }
    best.map(|(_, date)| date)
}

/// The daily table restricted to special dates, labeled.
pub fn special_days(
    daily: &[DailySummary],
    specials: &[SpecialDate],
) -> Vec<(SpecialDate, DailySummary)> {
    specials
        .iter()
        .filter_map(|special| {
            daily
                .iter()
                .find(|summary| summary.date == special.date)
                .map(|summary| (special.clone(), summary.clone()))
        })
        .collect()
}
