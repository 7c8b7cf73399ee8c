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

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::metric::Metric;

/// Options for opening a dataset folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetOptions {
    /// Root data directory holding one `YYYY-MM-DD` subdirectory per day
    pub folder: PathBuf,

    /// Metrics that participate in the unified table and the energy
    /// integration. Battery is recorded on a different cadence and stays
    /// off unless explicitly enabled.
    #[serde(default = "default_metrics")]
    pub metrics: Vec<Metric>,
}

fn default_metrics() -> Vec<Metric> {
    vec![Metric::Consumption, Metric::Generation]
}

impl DatasetOptions {
    /// Options for `folder` with the default metric set
    #[must_use]
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
            metrics: default_metrics(),
        }
    }

    /// Replace the enabled metric list
    #[must_use]
    pub fn with_metrics(mut self, metrics: Vec<Metric>) -> Self {
        self.metrics = metrics;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_metrics_exclude_battery() {
        let options = DatasetOptions::new("/data/pv");
        assert_eq!(options.metrics, vec![Metric::Consumption, Metric::Generation]);
    }

    #[test]
    fn test_metrics_deserialize_default() {
        let options: DatasetOptions = serde_json::from_str(r#"{"folder": "/data/pv"}"#).unwrap();
        assert_eq!(options.metrics, vec![Metric::Consumption, Metric::Generation]);

        let options: DatasetOptions =
            serde_json::from_str(r#"{"folder": "/data/pv", "metrics": ["battery"]}"#).unwrap();
        assert_eq!(options.metrics, vec![Metric::Battery]);
    }
}
