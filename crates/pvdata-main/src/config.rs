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

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

use pvdata_types::{DatasetOptions, Metric};

/// Application configuration for the pvdata CLI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Root data directory (one `YYYY-MM-DD` subdirectory per day)
    pub data_folder: PathBuf,

    /// Metrics included in the unified table and energy integration
    #[serde(default = "default_metrics")]
    pub metrics: Vec<Metric>,

    /// Log level (debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_metrics() -> Vec<Metric> {
    vec![Metric::Consumption, Metric::Generation]
}

fn default_log_level() -> String {
    "info".to_owned()
}

fn default_data_folder() -> PathBuf {
    PathBuf::from("dataset")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_folder: default_data_folder(),
            metrics: default_metrics(),
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `config.toml` or fall back to defaults with
    /// environment overrides
    pub fn load() -> Result<Self> {
        if let Ok(config_str) = std::fs::read_to_string("config.toml") {
            let config: AppConfig =
                toml::from_str(&config_str).context("Failed to parse config.toml")?;
            info!("Loaded configuration from config.toml");
            config.validate()?;
            return Ok(config);
        }

        warn!("No configuration file found, using defaults with environment overrides");
        let config = Self::from_env();
        config.validate()?;
        Ok(config)
    }

    /// Defaults plus environment variable overrides (development/testing)
    fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(folder) = std::env::var("DATADIR") {
            config.data_folder = PathBuf::from(folder);
        }

        config
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.data_folder.as_os_str().is_empty() {
            anyhow::bail!("data_folder cannot be empty");
        }

        if self.metrics.is_empty() {
            anyhow::bail!("At least one metric must be enabled");
        }

        let mut seen = Vec::new();
        for metric in &self.metrics {
            if seen.contains(&metric) {
                anyhow::bail!("Metric '{metric}' is enabled twice");
            }
            seen.push(metric);
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => anyhow::bail!("Invalid log_level '{other}'"),
        }

        Ok(())
    }

    /// Dataset options for the configured folder and metric set
    #[must_use]
    pub fn dataset_options(&self) -> DatasetOptions {
        DatasetOptions::new(self.data_folder.clone()).with_metrics(self.metrics.clone())
    }
}
