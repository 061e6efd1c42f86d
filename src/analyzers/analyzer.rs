use crate::analyzers::ranking::{RawSlotCount, RawZoneCount, slot_rank, top_k_by, zone_rank};
use crate::analyzers::types::{SlotCount, ZoneCount};
use crate::parser::{HOURS_PER_DAY, TripRecord, parse_record};
use crate::source::open_source;
use crate::stats::IngestStats;
use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;
use tracing::{debug, trace, warn};

/// Per-hour pickup counts for a single zone.
pub type HourlyCounts = [u64; HOURS_PER_DAY];

/// Streaming aggregator over trip-record files.
///
/// Keeps one running total and one 24-slot hour histogram per pickup zone.
/// Zones are keyed and ordered by their raw bytes, so any non-empty field
/// counts, whatever its encoding. Ingestion can be repeated to accumulate
/// several sources; the ranking queries only read the state and return
/// owned rows.
#[derive(Debug, Default, Clone)]
pub struct TripAnalyzer {
    zone_counts: HashMap<Vec<u8>, u64>,
    zone_hour_counts: HashMap<Vec<u8>, HourlyCounts>,
}

impl TripAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingests a trip-record file from disk.
    ///
    /// A file that cannot be opened leaves the state untouched and is
    /// reported through [`IngestStats::sources_unavailable`].
    #[tracing::instrument(skip_all, fields(path = %path.display()))]
    pub fn ingest_file(&mut self, path: &Path) -> IngestStats {
        match open_source(path) {
            Ok(reader) => self.ingest_reader(reader),
            Err(e) => {
                warn!(error = %e, "Source unavailable, skipping");
                IngestStats::unavailable()
            }
        }
    }

    /// Ingests every record from `reader`.
    ///
    /// The first line is a header and is always discarded. Malformed lines
    /// are skipped and tallied; a read error ends the pass early but keeps
    /// whatever was counted before it.
    pub fn ingest_reader<R: BufRead>(&mut self, mut reader: R) -> IngestStats {
        let mut stats = IngestStats {
            sources: 1,
            ..Default::default()
        };
        let mut line = Vec::new();

        match reader.read_until(b'\n', &mut line) {
            Ok(0) => {
                debug!("Empty source, nothing to ingest");
                return stats;
            }
            Ok(_) => {}
            Err(e) => {
                warn!(error = %e, "Failed to read header, skipping source");
                stats.sources_unavailable = 1;
                return stats;
            }
        }

        loop {
            line.clear();
            match reader.read_until(b'\n', &mut line) {
                Ok(0) => break,
                Ok(_) => {}
                Err(e) => {
                    warn!(
                        error = %e,
                        lines_read = stats.lines_read,
                        "Read failed mid-source, stopping"
                    );
                    break;
                }
            }

            stats.lines_read += 1;
            let raw = line.strip_suffix(b"\n").unwrap_or(&line);

            match parse_record(raw) {
                Ok(record) => {
                    self.record(record);
                    stats.accepted += 1;
                }
                Err(reason) => {
                    trace!(line = stats.lines_read, ?reason, "Skipping line");
                    stats.record_skip(reason);
                }
            }
        }

        debug!(
            lines_read = stats.lines_read,
            accepted = stats.accepted,
            malformed = stats.malformed(),
            distinct_zones = self.zone_counts.len(),
            "Source ingested"
        );
        stats
    }

    fn record(&mut self, record: TripRecord<'_>) {
        // Only allocate the key the first time a zone shows up.
        match self.zone_counts.get_mut(record.zone) {
            Some(count) => *count += 1,
            None => {
                self.zone_counts.insert(record.zone.to_owned(), 1);
            }
        }

        match self.zone_hour_counts.get_mut(record.zone) {
            Some(hours) => hours[record.hour] += 1,
            None => {
                let mut hours = [0; HOURS_PER_DAY];
                hours[record.hour] = 1;
                self.zone_hour_counts.insert(record.zone.to_owned(), hours);
            }
        }
    }

    /// Total pickups seen for `zone`, zero if it never appeared.
    pub fn zone_count(&self, zone: impl AsRef<[u8]>) -> u64 {
        self.zone_counts.get(zone.as_ref()).copied().unwrap_or(0)
    }

    pub fn hourly_counts(&self, zone: impl AsRef<[u8]>) -> Option<&HourlyCounts> {
        self.zone_hour_counts.get(zone.as_ref())
    }

    pub fn distinct_zones(&self) -> usize {
        self.zone_counts.len()
    }

    pub fn total_trips(&self) -> u64 {
        self.zone_counts.values().sum()
    }

    /// The `k` zones with the most pickups, busiest first.
    ///
    /// Ties are broken by zone name ascending. Returns every zone when
    /// fewer than `k` exist and nothing when `k` is zero.
    pub fn top_zones(&self, k: usize) -> Vec<ZoneCount> {
        if k == 0 {
            return Vec::new();
        }

        let candidates: Vec<RawZoneCount<'_>> = self
            .zone_counts
            .iter()
            .map(|(zone, &count)| (zone.as_slice(), count))
            .collect();

        top_k_by(candidates, k, zone_rank)
            .into_iter()
            .map(|(zone, count)| ZoneCount::from_raw(zone, count))
            .collect()
    }

    /// The `k` busiest (zone, hour) slots.
    ///
    /// Hours with no pickups are never candidates. Ties are broken by zone
    /// name, then hour, both ascending.
    pub fn top_busy_slots(&self, k: usize) -> Vec<SlotCount> {
        if k == 0 {
            return Vec::new();
        }

        let mut candidates: Vec<RawSlotCount<'_>> =
            Vec::with_capacity(self.zone_hour_counts.len() * HOURS_PER_DAY);
        for (zone, hours) in &self.zone_hour_counts {
            for (hour, &count) in (0u8..).zip(hours.iter()) {
                if count > 0 {
                    candidates.push((zone.as_slice(), hour, count));
                }
            }
        }

        top_k_by(candidates, k, slot_rank)
            .into_iter()
            .map(|(zone, hour, count)| SlotCount::from_raw(zone, hour, count))
            .collect()
    }
}
