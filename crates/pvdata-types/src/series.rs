// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of PVData.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::metric::Metric;

/// One raw sensor reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub timestamp: DateTime<Utc>,
    /// Watts for the power metrics, volts for battery
    pub value: f64,
}

impl Sample {
    #[must_use]
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// One metric's samples for a single calendar day, sorted by timestamp.
///
/// Always holds the filtered real rows plus two synthetic zero-value
/// sentinels: one a second before the first real sample and one at the
/// start of the day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaySeries {
    /// Calendar day (UTC) of the first recorded timestamp
    pub date: NaiveDate,
    pub samples: Vec<Sample>,
}

impl DaySeries {
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Concatenation of a metric's [`DaySeries`] across every available date,
/// in date order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricSeries {
    pub metric: Metric,
    pub samples: Vec<Sample>,
}

impl MetricSeries {
    #[must_use]
    pub fn new(metric: Metric) -> Self {
        Self {
            metric,
            samples: Vec::new(),
        }
    }

    /// Append one day's samples, preserving their internal order
    pub fn push_day(&mut self, day: DaySeries) {
        self.samples.extend(day.samples);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
