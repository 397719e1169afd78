//! Size units used for reporting byte totals.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::error::ConfigError;

/// Binary size unit (powers of 1024).
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[serde(rename_all = "UPPERCASE")]
pub enum SizeUnit {
    Kb,
    Mb,
    #[default]
    Gb,
    Tb,
}

impl SizeUnit {
    /// Parse a unit name such as `"mb"` or `"GB"`.
    pub fn parse(name: &str) -> Result<Self, ConfigError> {
        Self::from_str(name.trim()).map_err(|_| ConfigError::UnknownUnit {
            name: name.to_string(),
        })
    }

    /// Power of 1024 this unit represents.
    pub fn degree(&self) -> u32 {
        match self {
            Self::Kb => 1,
            Self::Mb => 2,
            Self::Gb => 3,
            Self::Tb => 4,
        }
    }

    /// Number of bytes in one unit.
    pub fn divisor(&self) -> u64 {
        1024u64.pow(self.degree())
    }

    /// Convert a byte count to this unit, rounded to 2 decimal places.
    pub fn convert(&self, bytes: u64) -> f64 {
        let value = bytes as f64 / self.divisor() as f64;
        (value * 100.0).round() / 100.0
    }
}
