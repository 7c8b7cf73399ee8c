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
use std::fmt;

/// Readings above this are charge-controller glitches, not real power.
pub const MAX_WATTS: f64 = 500_000.0;

/// One of the fixed sensor channels recorded by the plant logger.
///
/// Each metric maps to exactly one CSV file per calendar-day directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// House load power (watts)
    Consumption,
    /// PV array output power (watts)
    Generation,
    /// Battery bank voltage (volts)
    Battery,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Consumption, Metric::Generation, Metric::Battery];

    /// Fixed file name inside each `YYYY-MM-DD` directory
    #[must_use]
    pub fn filename(self) -> &'static str {
        match self {
            Metric::Consumption => "XBSYS.LOAD.P.csv",
            Metric::Generation => "XBSYS.PV.P.csv",
            Metric::Battery => "XBSYS.BATT_BANK1_V.csv",
        }
    }

    /// Column label used in the unified and daily tables
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Metric::Consumption => "consumption",
            Metric::Generation => "generation",
            Metric::Battery => "battery",
        }
    }

    /// Upper plausibility bound applied at read time.
    ///
    /// Power metrics are capped at [`MAX_WATTS`]; battery voltage is not
    /// range-checked.
    #[must_use]
    pub fn ceiling(self) -> Option<f64> {
        match self {
            Metric::Consumption | Metric::Generation => Some(MAX_WATTS),
            Metric::Battery => None,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
