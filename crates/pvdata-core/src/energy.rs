// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of PVData.

use chrono::NaiveTime;
use tracing::info;

use pvdata_types::{Metric, UnifiedRow};

/// Attach trapezoidal interval energy to the unified table.
///
/// For each enabled metric, the energy for the interval ending at row `i` is
///
/// ```text
/// joules[i] = value[i] * dt[i] + ((value[i] - value[i-1]) * dt[i]) / 2
/// ```
///
/// the area under the linearly-interpolated power curve over
/// `[t[i-1], t[i]]`, in watt-seconds. A `None` endpoint value or `delta_time`
/// leaves the energy `None`; rows sitting exactly at the start of their
/// calendar day are forced to zero afterwards so no interval spans a day
/// boundary.
pub fn integrate(rows: &mut [UnifiedRow], metrics: &[Metric]) {
    for &metric in metrics {
        info!("Calculating absolute energy for {metric}");

        let mut previous: Option<f64> = None;
        for row in rows.iter_mut() {
            let joules = match (row.value(metric), previous, row.delta_time) {
                (Some(value), Some(prior), Some(dt)) => {
                    Some(value * dt + ((value - prior) * dt) / 2.0)
                }
                _ => None,
            };

            let joules = if at_day_start(row) { Some(0.0) } else { joules };
            row.set_joules(metric, joules);

            previous = row.value(metric);
        }
    }
}

fn at_day_start(row: &UnifiedRow) -> bool {
    row.timestamp == row.date.and_time(NaiveTime::MIN).and_utc()
}
