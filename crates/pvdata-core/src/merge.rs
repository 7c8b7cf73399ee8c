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

use chrono::{DateTime, Utc};

use pvdata_types::{MetricSeries, UnifiedRow};

/// Outer-join metric series on exact timestamp equality.
///
/// Every distinct timestamp appearing in any series yields exactly one row;
/// metrics without a sample at that instant stay `None`. Within one series,
/// a later sample at the same timestamp wins, so a day-start sentinel
/// overrides a real midnight reading. The `date` column is derived from the
/// timestamp, and `delta_time` is the gap to the previous row in seconds
/// (`None` on the first row).
pub fn merge_series<'a, I>(series: I) -> Vec<UnifiedRow>
where
    I: IntoIterator<Item = &'a MetricSeries>,
{
    let mut by_timestamp: BTreeMap<DateTime<Utc>, UnifiedRow> = BTreeMap::new();

    for metric_series in series {
        for sample in &metric_series.samples {
            by_timestamp
                .entry(sample.timestamp)
                .or_insert_with(|| UnifiedRow::new(sample.timestamp))
                .set_value(metric_series.metric, Some(sample.value));
        }
    }

    let mut rows: Vec<UnifiedRow> = by_timestamp.into_values().collect();

    let mut previous: Option<DateTime<Utc>> = None;
    for row in &mut rows {
        #[expect(clippy::cast_precision_loss)]
        let delta = previous.map(|p| (row.timestamp - p).num_seconds() as f64);
        row.delta_time = delta;
        previous = Some(row.timestamp);
    }

    rows
}
