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

//! Error types for the dataset pipeline

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to scan data folder {path}: {source}")]
    Folder {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: csv::Error },

    #[error("malformed timestamp {raw:?} in {path}")]
    MalformedTimestamp { path: PathBuf, raw: String },

    #[error("timestamp correction exhausted in {path}: {timestamp} is not an epoch instant")]
    CorrectionExhausted { path: PathBuf, timestamp: i64 },

    #[error("unknown selector: {0}")]
    UnknownSelector(String),
}

pub type Result<T> = std::result::Result<T, DatasetError>;
