use serde::Serialize;

/// Why a line was left out of the aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    Empty,
    TooFewFields,
    EmptyZone,
    MalformedTimestamp,
    HourOutOfRange,
}

/// Bookkeeping for one or more ingestion passes.
///
/// Purely informational: the aggregator never fails, it only tallies.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct IngestStats {
    pub sources: usize,
    pub sources_unavailable: usize,

    // lines after the header
    pub lines_read: u64,
    pub accepted: u64,

    // skipped lines, by reason
    pub empty_lines: u64,
    pub too_few_fields: u64,
    pub empty_zone: u64,
    pub malformed_timestamp: u64,
    pub hour_out_of_range: u64,
}

impl IngestStats {
    /// Stats for a source that could not be opened or fetched.
    pub fn unavailable() -> Self {
        IngestStats {
            sources: 1,
            sources_unavailable: 1,
            ..Default::default()
        }
    }

    pub fn record_skip(&mut self, reason: SkipReason) {
        let slot = match reason {
            SkipReason::Empty => &mut self.empty_lines,
            SkipReason::TooFewFields => &mut self.too_few_fields,
            SkipReason::EmptyZone => &mut self.empty_zone,
            SkipReason::MalformedTimestamp => &mut self.malformed_timestamp,
            SkipReason::HourOutOfRange => &mut self.hour_out_of_range,
        };
        *slot += 1;
    }

    /// Malformed lines; blank lines are not counted as malformed.
    pub fn malformed(&self) -> u64 {
        self.too_few_fields
            + self.empty_zone
            + self.malformed_timestamp
            + self.hour_out_of_range
    }

    pub fn pct(part: u64, total: u64) -> f64 {
        if total == 0 {
            0.0
        } else {
            (part as f64 / total as f64) * 100.0
        }
    }

    pub fn accepted_pct(&self) -> f64 {
        Self::pct(self.accepted, self.lines_read)
    }

    /// Folds the counters of another pass into this one.
    pub fn merge(&mut self, other: &IngestStats) {
        self.sources += other.sources;
        self.sources_unavailable += other.sources_unavailable;
        self.lines_read += other.lines_read;
        self.accepted += other.accepted;
        self.empty_lines += other.empty_lines;
        self.too_few_fields += other.too_few_fields;
        self.empty_zone += other.empty_zone;
        self.malformed_timestamp += other.malformed_timestamp;
        self.hour_out_of_range += other.hour_out_of_range;
    }
}
