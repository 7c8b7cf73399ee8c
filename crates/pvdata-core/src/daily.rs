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

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::info;

use pvdata_types::{DailySummary, Metric, UnifiedRow};

/// Seconds per day, the divisor for the mean-power equivalent.
const SECONDS_PER_DAY: f64 = 86_400.0;

/// Collapse the unified table into one summary row per calendar date.
///
/// Raw metric columns aggregate to their in-day maximum (`None` when the
/// metric never appears that day). Each enabled metric's joules column sums
/// over the day, skipping `None` intervals, and divides by 86400 into the
/// `daily` mean-power column.
pub fn summarize(rows: &[UnifiedRow], metrics: &[Metric]) -> Vec<DailySummary> {
    info!("Computing daily statistics");

    let mut days: BTreeMap<NaiveDate, DailySummary> = BTreeMap::new();

    for row in rows {
        let summary = days
            .entry(row.date)
            .or_insert_with(|| DailySummary::new(row.date));

        for metric in Metric::ALL {
            if let Some(value) = row.value(metric) {
                let max = summary.max(metric).map_or(value, |current| current.max(value));
                summary.set_max(metric, Some(max));
            }
        }

        for &metric in metrics {
            let total =
                summary.joules(metric).unwrap_or(0.0) + row.joules(metric).unwrap_or(0.0);
            summary.set_joules(metric, Some(total));
        }
    }

    for summary in days.values_mut() {
        for &metric in metrics {
            if let Some(joules) = summary.joules(metric) {
                summary.set_daily(metric, Some(joules / SECONDS_PER_DAY));
            }
        }
    }

    days.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn row(ts: i64, consumption: Option<f64>, joules: Option<f64>) -> UnifiedRow {
        let mut row = UnifiedRow::new(Utc.timestamp_opt(ts, 0).unwrap());
        row.consumption = consumption;
        row.consumption_joules = joules;
        row
    }

    #[test]
    fn test_groups_by_date() {
        let rows = vec![
            row(1577836800, Some(10.0), Some(0.0)),   // 2020-01-01
            row(1577840400, Some(30.0), Some(100.0)), // 2020-01-01
            row(1577923200, Some(20.0), Some(0.0)),   // 2020-01-02
        ];

        let summaries = summarize(&rows, &[Metric::Consumption]);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].date, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert_eq!(summaries[1].date, NaiveDate::from_ymd_opt(2020, 1, 2).unwrap());
    }

    #[test]
    fn test_max_and_joules_sum() {
        let rows = vec![
            row(1577836800, Some(10.0), Some(0.0)),
            row(1577840400, Some(30.0), Some(100.0)),
            row(1577844000, Some(20.0), Some(50.0)),
        ];

        let summaries = summarize(&rows, &[Metric::Consumption]);
        assert_eq!(summaries[0].consumption_max, Some(30.0));
        assert_eq!(summaries[0].consumption_joules, Some(150.0));
        // Never sampled: no maxima, and generation was not integrated
        assert_eq!(summaries[0].generation_max, None);
        assert_eq!(summaries[0].generation_joules, None);
    }

    #[test]
    fn test_daily_average_is_joules_over_86400() {
        let rows = vec![
            row(1577836800, Some(10.0), Some(0.0)),
            row(1577840400, Some(10.0), Some(864_000.0)),
        ];

        let summaries = summarize(&rows, &[Metric::Consumption]);
        assert_eq!(summaries[0].consumption_daily, Some(10.0));
        assert_eq!(
            summaries[0].consumption_daily,
            summaries[0].consumption_joules.map(|j| j / 86_400.0)
        );
    }

    #[test]
    fn test_none_joules_sum_as_zero() {
        let rows = vec![row(1577836800, Some(10.0), None)];

        let summaries = summarize(&rows, &[Metric::Consumption]);
        assert_eq!(summaries[0].consumption_joules, Some(0.0));
    }
}
