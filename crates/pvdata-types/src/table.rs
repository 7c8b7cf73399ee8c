// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of PVData.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::metric::Metric;

/// One row of the unified (outer-joined) table: every distinct timestamp
/// seen in any enabled metric series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedRow {
    pub timestamp: DateTime<Utc>,
    /// Calendar day, always derived from `timestamp` (UTC)
    pub date: NaiveDate,
    /// House load (watts)
    pub consumption: Option<f64>,
    /// PV output (watts)
    pub generation: Option<f64>,
    /// Battery bank voltage (volts)
    pub battery: Option<f64>,
    /// Seconds since the previous row; `None` for the first row
    pub delta_time: Option<f64>,
    /// Trapezoidal energy over the interval ending at this row (watt-seconds)
    pub consumption_joules: Option<f64>,
    pub generation_joules: Option<f64>,
    pub battery_joules: Option<f64>,
}

impl UnifiedRow {
    #[must_use]
    pub fn new(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            date: timestamp.date_naive(),
            consumption: None,
            generation: None,
            battery: None,
            delta_time: None,
            consumption_joules: None,
            generation_joules: None,
            battery_joules: None,
        }
    }

    #[must_use]
    pub fn value(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Consumption => self.consumption,
            Metric::Generation => self.generation,
            Metric::Battery => self.battery,
        }
    }

    pub fn set_value(&mut self, metric: Metric, value: Option<f64>) {
        match metric {
            Metric::Consumption => self.consumption = value,
            Metric::Generation => self.generation = value,
            Metric::Battery => self.battery = value,
        }
    }

    #[must_use]
    pub fn joules(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Consumption => self.consumption_joules,
            Metric::Generation => self.generation_joules,
            Metric::Battery => self.battery_joules,
        }
    }

    pub fn set_joules(&mut self, metric: Metric, joules: Option<f64>) {
        match metric {
            Metric::Consumption => self.consumption_joules = joules,
            Metric::Generation => self.generation_joules = joules,
            Metric::Battery => self.battery_joules = joules,
        }
    }
}

/// Per-calendar-day statistics derived from the unified table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    /// Peak house load for the day (watts)
    pub consumption_max: Option<f64>,
    /// Peak PV output for the day (watts)
    pub generation_max: Option<f64>,
    /// Peak battery voltage for the day (volts)
    pub battery_max: Option<f64>,
    /// Total daily energy (watt-seconds); `None` when the metric is disabled
    pub consumption_joules: Option<f64>,
    pub generation_joules: Option<f64>,
    pub battery_joules: Option<f64>,
    /// Mean-power equivalent: total joules / 86400 (watts)
    pub consumption_daily: Option<f64>,
    pub generation_daily: Option<f64>,
    pub battery_daily: Option<f64>,
}

impl DailySummary {
    #[must_use]
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            consumption_max: None,
            generation_max: None,
            battery_max: None,
            consumption_joules: None,
            generation_joules: None,
            battery_joules: None,
            consumption_daily: None,
            generation_daily: None,
            battery_daily: None,
        }
    }

    #[must_use]
    pub fn max(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Consumption => self.consumption_max,
            Metric::Generation => self.generation_max,
            Metric::Battery => self.battery_max,
        }
    }

    pub fn set_max(&mut self, metric: Metric, max: Option<f64>) {
        match metric {
            Metric::Consumption => self.consumption_max = max,
            Metric::Generation => self.generation_max = max,
            Metric::Battery => self.battery_max = max,
        }
    }

    #[must_use]
    pub fn joules(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Consumption => self.consumption_joules,
            Metric::Generation => self.generation_joules,
            Metric::Battery => self.battery_joules,
        }
    }

    pub fn set_joules(&mut self, metric: Metric, joules: Option<f64>) {
        match metric {
            Metric::Consumption => self.consumption_joules = joules,
            Metric::Generation => self.generation_joules = joules,
            Metric::Battery => self.battery_joules = joules,
        }
    }

    #[must_use]
    pub fn daily(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Consumption => self.consumption_daily,
            Metric::Generation => self.generation_daily,
            Metric::Battery => self.battery_daily,
        }
    }

    pub fn set_daily(&mut self, metric: Metric, daily: Option<f64>) {
        match metric {
            Metric::Consumption => self.consumption_daily = daily,
            Metric::Generation => self.generation_daily = daily,
            Metric::Battery => self.battery_daily = daily,
        }
    }
}

/// A calendar date carrying a human-meaningful label (plant event, anomaly,
/// astronomical marker). Annotation only; never part of the numeric pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialDate {
    pub name: String,
    pub date: NaiveDate,
}

/// Plot-ready projection: the shared key columns plus one chosen variant of
/// the consumption/generation pair under their canonical names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphedRow {
    /// Present for unified-table projections, absent for daily ones
    pub timestamp: Option<DateTime<Utc>>,
    pub date: NaiveDate,
    pub delta_time: Option<f64>,
    pub consumption: Option<f64>,
    pub generation: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_unified_row_date_derived_from_timestamp() {
        let ts = Utc.with_ymd_and_hms(2017, 8, 21, 13, 30, 0).unwrap();
        let row = UnifiedRow::new(ts);
        assert_eq!(row.date, NaiveDate::from_ymd_opt(2017, 8, 21).unwrap());
        assert!(row.consumption.is_none());
        assert!(row.delta_time.is_none());
    }

    #[test]
    fn test_metric_accessors_roundtrip() {
        let ts = Utc.with_ymd_and_hms(2017, 8, 21, 0, 0, 0).unwrap();
        let mut row = UnifiedRow::new(ts);

        for metric in Metric::ALL {
            row.set_value(metric, Some(42.0));
            assert_eq!(row.value(metric), Some(42.0));
            row.set_joules(metric, Some(0.0));
            assert_eq!(row.joules(metric), Some(0.0));
        }
    }
}
