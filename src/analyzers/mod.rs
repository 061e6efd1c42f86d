//! Pickup aggregation and ranking.
//!
//! This module keeps per-zone and per-(zone, hour) trip counts while
//! streaming trip records, and answers top-k queries over those counts.

pub mod analyzer;
pub mod ranking;
pub mod types;
