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

use std::path::Path;

use chrono::{DateTime, NaiveTime, TimeZone, Utc};
use tracing::{debug, warn};

use crate::error::{DatasetError, Result};
use pvdata_types::{DaySeries, Sample};

/// Truncate-and-retry budget for malformed timestamps.
const CORRECTION_ATTEMPTS: usize = 2;

/// The logger writes epoch seconds as a 10-digit field; a glitched row
/// carries extra concatenated digits on top of it.
const MALFORMED_THRESHOLD: i64 = 100_000_000_000;
const TRUNCATION_MODULUS: i64 = 10_000_000_000;

#[derive(Debug)]
struct RawRow {
    timestamp: i64,
    value: Option<f64>,
}

/// Read one per-day metric export into a [`DaySeries`].
///
/// The file has no header and two columns: integer epoch seconds and a float
/// value. Returns `Ok(None)` for a file with no rows at all (the day simply
/// has no data for this metric). Rows whose value is missing, unparseable,
/// or above `limit` are excluded; the two zero-value sentinels (one second
/// before the first sample, and at the start of the derived day) are always
/// kept. Samples come back stably sorted by timestamp.
pub fn read_day_series(path: &Path, limit: Option<f64>) -> Result<Option<DaySeries>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|source| DatasetError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record.map_err(|source| DatasetError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let raw_timestamp = record.get(0).unwrap_or("").trim();
        let timestamp: i64 =
            raw_timestamp
                .parse()
                .map_err(|_| DatasetError::MalformedTimestamp {
                    path: path.to_path_buf(),
                    raw: raw_timestamp.to_owned(),
                })?;

        let value = record.get(1).and_then(|cell| cell.trim().parse::<f64>().ok());
        rows.push(RawRow { timestamp, value });
    }

    if rows.is_empty() {
        warn!("Skipping empty dataset file {}", path.display());
        return Ok(None);
    }

    correct_timestamps(&mut rows, path)?;

    // The export holds a single day; derive its boundaries from the first
    // (corrected) timestamp.
    let first_timestamp = rows[0].timestamp;
    let first_instant =
        epoch_instant(first_timestamp).ok_or_else(|| DatasetError::CorrectionExhausted {
            path: path.to_path_buf(),
            timestamp: first_timestamp,
        })?;
    let date = first_instant.date_naive();
    let day_start = date.and_time(NaiveTime::MIN).and_utc();

    let mut samples = Vec::with_capacity(rows.len() + 2);
    for row in &rows {
        let Some(value) = row.value else {
            debug!("Dropping valueless row at {} in {}", row.timestamp, path.display());
            continue;
        };
        if let Some(limit) = limit
            && value > limit
        {
            debug!(
                "Dropping out-of-range value {value} at {} in {}",
                row.timestamp,
                path.display()
            );
            continue;
        }
        let instant =
            epoch_instant(row.timestamp).ok_or_else(|| DatasetError::CorrectionExhausted {
                path: path.to_path_buf(),
                timestamp: row.timestamp,
            })?;
        samples.push(Sample::new(instant, value));
    }

    // Sentinels go in after the real rows; the stable sort below therefore
    // places the day-start sentinel after a real sample sharing its
    // timestamp, which is what the day-boundary energy zeroing relies on.
    samples.push(Sample::new(first_instant - chrono::Duration::seconds(1), 0.0));
    samples.push(Sample::new(day_start, 0.0));
    samples.sort_by_key(|sample| sample.timestamp);

    Ok(Some(DaySeries { date, samples }))
}

/// Bounded correction loop for timestamps with extra concatenated digits.
fn correct_timestamps(rows: &mut [RawRow], path: &Path) -> Result<()> {
    for _ in 0..CORRECTION_ATTEMPTS {
        if !rows.iter().any(|row| is_malformed(row.timestamp)) {
            return Ok(());
        }

        warn!("Correcting timestamp error in {}", path.display());
        for row in rows.iter_mut().filter(|row| is_malformed(row.timestamp)) {
            row.timestamp = truncate_timestamp(row.timestamp);
        }
    }

    match rows.iter().find(|row| is_malformed(row.timestamp)) {
        Some(row) => Err(DatasetError::CorrectionExhausted {
            path: path.to_path_buf(),
            timestamp: row.timestamp,
        }),
        None => Ok(()),
    }
}

fn is_malformed(timestamp: i64) -> bool {
    timestamp.abs() >= MALFORMED_THRESHOLD
}

/// Keep the last 10 decimal digits, the logger's real epoch field.
fn truncate_timestamp(timestamp: i64) -> i64 {
    timestamp.abs() % TRUNCATION_MODULUS
}

fn epoch_instant(timestamp: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(timestamp, 0).single()
}
