// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of PVData.

use std::path::Path;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{DatasetError, Result};
use crate::reader::read_day_series;
use pvdata_types::{Metric, MetricSeries};

/// List the calendar days available under the data folder.
///
/// A day is a subdirectory whose name parses strictly as zero-padded
/// `YYYY-MM-DD`; anything else in the folder is ignored. The result is
/// sorted, which for this name format is also chronological order.
pub fn scan_dates(folder: &Path) -> Result<Vec<NaiveDate>> {
    let entries = std::fs::read_dir(folder).map_err(|source| DatasetError::Folder {
        path: folder.to_path_buf(),
        source,
    })?;

    let mut dates = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| DatasetError::Folder {
            path: folder.to_path_buf(),
            source,
        })?;

        if !entry.path().is_dir() {
            continue;
        }

        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };

        // Zero-padded names only; chrono alone would also accept "2017-7-9"
        if name.len() == 10
            && let Ok(date) = NaiveDate::parse_from_str(name, "%Y-%m-%d")
        {
            dates.push(date);
        }
    }

    dates.sort_unstable();
    Ok(dates)
}

/// Build one metric's full series by concatenating its per-day files in
/// date order.
///
/// Days without a file for this metric contribute nothing; the resulting
/// gaps are tolerated by the downstream outer join. A malformed file aborts
/// the whole series build with the offending path in the error.
pub fn assemble(folder: &Path, metric: Metric) -> Result<MetricSeries> {
    let mut series = MetricSeries::new(metric);

    for date in scan_dates(folder)? {
        let path = folder
            .join(date.format("%Y-%m-%d").to_string())
            .join(metric.filename());
        if !path.exists() {
            continue;
        }

        if let Some(day) = read_day_series(&path, metric.ceiling())? {
            debug!("Read {} {} samples for {date}", day.len(), metric);
            series.push_day(day);
        }
    }

    Ok(series)
}
