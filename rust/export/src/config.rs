// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Export configuration loaded from environment variables.

/// Lowest coordinate precision the exporter will write with.
pub const MIN_COORDINATE_PRECISION: usize = 12;

/// Export configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    /// Significant digits per node coordinate. Values below
    /// [`MIN_COORDINATE_PRECISION`] are raised to it.
    pub coordinate_precision: usize,
}

impl ExportConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            coordinate_precision: std::env::var("ELMER_COORD_PRECISION")
                .unwrap_or_else(|_| MIN_COORDINATE_PRECISION.to_string())
                .parse()
                .unwrap_or(MIN_COORDINATE_PRECISION),
        }
    }

    /// Precision actually used for coordinates.
    pub fn precision(&self) -> usize {
        self.coordinate_precision.max(MIN_COORDINATE_PRECISION)
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            coordinate_precision: MIN_COORDINATE_PRECISION,
        }
    }
}
