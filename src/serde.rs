//! Deserializable configuration.
//!
//! These types are meant to be read from a configuration file (for example
//! JSON) and converted into the core types. Omitted fields take the defaults.

use serde::{Deserialize, Serialize};

use crate::bitmap::{BitmapLimits, DEFAULT_MAX_AUX, DEFAULT_MAX_PAIRS};

/// Capacity limits for bitmap entries.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct BitmapLimitsDef {
    /// Pairs per entry.
    #[serde(default)]
    pub max_pairs: Option<usize>,
    /// Quality indices per entry.
    #[serde(default)]
    pub max_quality: Option<usize>,
    /// Statistics per family per entry.
    #[serde(default)]
    pub max_stats: Option<usize>,
}

impl From<BitmapLimitsDef> for BitmapLimits {
    fn from(value: BitmapLimitsDef) -> Self {
        BitmapLimits {
            max_pairs: value.max_pairs.unwrap_or(DEFAULT_MAX_PAIRS),
            max_quality: value.max_quality.unwrap_or(DEFAULT_MAX_AUX),
            max_stats: value.max_stats.unwrap_or(DEFAULT_MAX_AUX),
        }
    }
}
