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

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDate;
use parking_lot::RwLock;
use tracing::debug;

use crate::daily::summarize;
use crate::energy::integrate;
use crate::error::{DatasetError, Result};
use crate::merge::merge_series;
use crate::series::{assemble, scan_dates};
use crate::special::{SPECIAL_LABELS, special_dates, special_days};
use pvdata_types::{
    DailySummary, DatasetOptions, GraphedRow, Metric, MetricSeries, SpecialDate, UnifiedRow,
};

/// Result of a selector lookup.
#[derive(Debug, Clone)]
pub enum Selection {
    /// The full daily summary table (`"total"` / `"daily"`)
    Daily(Arc<Vec<DailySummary>>),
    /// The unified rows of one calendar day (may be empty)
    Rows(Vec<UnifiedRow>),
}

/// Handle over one dataset folder.
///
/// Every derived view is computed on first access and memoized for the
/// lifetime of the handle; nothing is ever recomputed implicitly. Call
/// [`PvDataset::invalidate`] after changing the folder contents to force a
/// re-read on the next access. Failures are not cached.
#[derive(Debug)]
pub struct PvDataset {
    options: DatasetOptions,
    series: RwLock<HashMap<Metric, Arc<MetricSeries>>>,
    full: RwLock<Option<Arc<Vec<UnifiedRow>>>>,
    daily: RwLock<Option<Arc<Vec<DailySummary>>>>,
    special: RwLock<Option<Arc<Vec<SpecialDate>>>>,
}

impl PvDataset {
    #[must_use]
    pub fn new(options: DatasetOptions) -> Self {
        Self {
            options,
            series: RwLock::new(HashMap::new()),
            full: RwLock::new(None),
            daily: RwLock::new(None),
            special: RwLock::new(None),
        }
    }

    /// Open `folder` with the default metric set
    #[must_use]
    pub fn open(folder: impl Into<PathBuf>) -> Self {
        Self::new(DatasetOptions::new(folder))
    }

    #[must_use]
    pub fn folder(&self) -> &Path {
        &self.options.folder
    }

    #[must_use]
    pub fn metrics(&self) -> &[Metric] {
        &self.options.metrics
    }

    /// Drop every memoized view; the next access re-reads the folder.
    pub fn invalidate(&self) {
        debug!("Invalidating dataset caches for {}", self.folder().display());
        self.series.write().clear();
        *self.full.write() = None;
        *self.daily.write() = None;
        *self.special.write() = None;
    }

    /// Calendar days currently present on disk (never cached)
    pub fn dates(&self) -> Result<Vec<NaiveDate>> {
        scan_dates(self.folder())
    }

    /// One metric's concatenated series
    pub fn series(&self, metric: Metric) -> Result<Arc<MetricSeries>> {
        if let Some(cached) = self.series.read().get(&metric) {
            return Ok(cached.clone());
        }

        let series = Arc::new(assemble(self.folder(), metric)?);
        self.series.write().insert(metric, series.clone());
        Ok(series)
    }

    /// The unified table: all enabled metrics outer-joined on timestamp,
    /// with interval energy attached
    pub fn full(&self) -> Result<Arc<Vec<UnifiedRow>>> {
        if let Some(cached) = self.full.read().clone() {
            return Ok(cached);
        }

        let mut all_series = Vec::with_capacity(self.options.metrics.len());
        for &metric in &self.options.metrics {
            all_series.push(self.series(metric)?);
        }

        let mut rows = merge_series(all_series.iter().map(Arc::as_ref));
        integrate(&mut rows, &self.options.metrics);

        let rows = Arc::new(rows);
        *self.full.write() = Some(rows.clone());
        Ok(rows)
    }

    /// The per-day summary table
    pub fn daily(&self) -> Result<Arc<Vec<DailySummary>>> {
        if let Some(cached) = self.daily.read().clone() {
            return Ok(cached);
        }

        let summaries = Arc::new(summarize(&self.full()?, &self.options.metrics));
        *self.daily.write() = Some(summaries.clone());
        Ok(summaries)
    }

    /// The label table plus the data-derived peak days
    pub fn special_dates(&self) -> Result<Arc<Vec<SpecialDate>>> {
        if let Some(cached) = self.special.read().clone() {
            return Ok(cached);
        }

        let dates = Arc::new(special_dates(&self.full()?));
        *self.special.write() = Some(dates.clone());
        Ok(dates)
    }

    /// Daily summaries for the special dates that have data, labeled
    pub fn special_days(&self) -> Result<Vec<(SpecialDate, DailySummary)>> {
        Ok(special_days(&self.daily()?, &self.special_dates()?))
    }

    /// Every valid selector: the fixed labels followed by the dates with data
    pub fn keys(&self) -> Result<Vec<String>> {
        let mut keys: Vec<String> = SPECIAL_LABELS
            .iter()
            .map(|&(name, _)| name.to_owned())
            .collect();
        keys.extend(
            self.daily()?
                .iter()
                .map(|summary| summary.date.format("%Y-%m-%d").to_string()),
        );
        Ok(keys)
    }

    /// Look up a view by selector.
    ///
    /// `"total"` and `"daily"` name the summary table; a special-date label
    /// or an ISO `YYYY-MM-DD` string names one day's unified rows (an empty
    /// result is fine, a day without data is not an error). Anything else is
    /// [`DatasetError::UnknownSelector`].
    pub fn select(&self, key: &str) -> Result<Selection> {
        if key == "total" || key == "daily" {
            return Ok(Selection::Daily(self.daily()?));
        }

        if let Some(special) = self
            .special_dates()?
            .iter()
            .find(|special| special.name == key)
        {
            return Ok(Selection::Rows(self.rows_for_date(special.date)?));
        }

        match NaiveDate::parse_from_str(key, "%Y-%m-%d") {
            Ok(date) => Ok(Selection::Rows(self.rows_for_date(date)?)),
            Err(_) => Err(DatasetError::UnknownSelector(key.to_owned())),
        }
    }

    fn rows_for_date(&self, date: NaiveDate) -> Result<Vec<UnifiedRow>> {
        Ok(self
            .full()?
            .iter()
            .filter(|row| row.date == date)
            .cloned()
            .collect())
    }
}

/// Plot-ready projection of the unified table: key columns plus the raw
/// consumption/generation readings.
#[must_use]
pub fn graphed(rows: &[UnifiedRow]) -> Vec<GraphedRow> {
    rows.iter()
        .map(|row| GraphedRow {
            timestamp: Some(row.timestamp),
            date: row.date,
            delta_time: row.delta_time,
            consumption: row.consumption,
            generation: row.generation,
        })
        .collect()
}

/// Plot-ready projection of the daily table: the daily-average variants
/// under the canonical column names.
#[must_use]
pub fn graphed_daily(summaries: &[DailySummary]) -> Vec<GraphedRow> {
    summaries
        .iter()
        .map(|summary| GraphedRow {
            timestamp: None,
            date: summary.date,
            delta_time: None,
            consumption: summary.consumption_daily,
            generation: summary.generation_daily,
        })
        .collect()
}
