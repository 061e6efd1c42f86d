//! Ranked result rows handed out by the analyzer.

use serde::{Deserialize, Serialize};

/// Total trips picked up in one zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneCount {
    pub zone: String,
    pub count: u64,
}

impl ZoneCount {
    /// Builds a row from a raw zone key; invalid UTF-8 is replaced with U+FFFD.
    pub fn from_raw(zone: &[u8], count: u64) -> Self {
        ZoneCount {
            zone: String::from_utf8_lossy(zone).into_owned(),
            count,
        }
    }
}

/// Trips picked up in one zone during one hour of the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotCount {
    pub zone: String,
    pub hour: u8,
    pub count: u64,
}

impl SlotCount {
    pub fn from_raw(zone: &[u8], hour: u8, count: u64) -> Self {
        SlotCount {
            zone: String::from_utf8_lossy(zone).into_owned(),
            hour,
            count,
        }
    }
}
