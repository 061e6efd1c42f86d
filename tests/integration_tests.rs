use std::path::{Path, PathBuf};

use trip_hotspots::analyzers::analyzer::TripAnalyzer;
use trip_hotspots::analyzers::types::{SlotCount, ZoneCount};
use trip_hotspots::output::{ReportFormat, TripReport, write_report};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn zone(zone: &str, count: u64) -> ZoneCount {
    ZoneCount {
        zone: zone.to_string(),
        count,
    }
}

fn slot(zone: &str, hour: u8, count: u64) -> SlotCount {
    SlotCount {
        zone: zone.to_string(),
        hour,
        count,
    }
}

#[test]
fn test_full_pipeline() {
    let mut analyzer = TripAnalyzer::new();
    let stats = analyzer.ingest_file(&fixture("sample_trips.csv"));

    assert_eq!(stats.sources_unavailable, 0);
    assert_eq!(stats.lines_read, 16);
    assert_eq!(stats.accepted, 11);
    assert_eq!(stats.empty_lines, 1);
    assert_eq!(stats.malformed(), 4);

    assert_eq!(
        analyzer.top_zones(3),
        vec![zone("Downtown", 4), zone("Airport", 3), zone("Harbor", 2)]
    );
    assert_eq!(
        analyzer.top_busy_slots(4),
        vec![
            slot("Downtown", 7, 3),
            slot("Airport", 17, 2),
            slot("Harbor", 17, 2),
            slot("Uptown", 8, 2),
        ]
    );
}

#[test]
fn test_multiple_sources_accumulate() {
    let mut analyzer = TripAnalyzer::new();
    analyzer.ingest_file(&fixture("sample_trips.csv"));
    let stats = analyzer.ingest_file(&fixture("extra_trips_crlf.csv"));
    assert_eq!(stats.accepted, 2);

    assert_eq!(
        analyzer.top_zones(10),
        vec![
            zone("Downtown", 4),
            zone("Airport", 3),
            zone("Harbor", 3),
            zone("Uptown", 2),
            zone("Midtown", 1),
        ]
    );
    assert_eq!(
        analyzer.top_busy_slots(2),
        vec![slot("Downtown", 7, 3), slot("Harbor", 17, 3)]
    );

    for z in analyzer.top_zones(10) {
        let hours = analyzer.hourly_counts(&z.zone).unwrap();
        assert_eq!(hours.iter().sum::<u64>(), z.count);
    }
}

#[test]
fn test_missing_source_does_not_disturb_state() {
    let mut analyzer = TripAnalyzer::new();
    analyzer.ingest_file(&fixture("sample_trips.csv"));
    let before = analyzer.top_zones(10);

    let stats = analyzer.ingest_file(&fixture("does_not_exist.csv"));

    assert_eq!(stats.sources_unavailable, 1);
    assert_eq!(analyzer.top_zones(10), before);
}

#[test]
fn test_json_report_file() {
    let mut analyzer = TripAnalyzer::new();
    let ingest = analyzer.ingest_file(&fixture("sample_trips.csv"));
    let report = TripReport::build(
        &analyzer,
        vec!["sample_trips.csv".to_string()],
        ingest,
        2,
        1,
    );

    let path = std::env::temp_dir().join("trip_hotspots_integration_report.json");
    let _ = std::fs::remove_file(&path);
    write_report(Some(&path), ReportFormat::Json, &report).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["top_zones"].as_array().unwrap().len(), 2);
    assert_eq!(value["top_slots"][0]["zone"], "Downtown");
    assert_eq!(value["ingest"]["lines_read"], 16);

    std::fs::remove_file(&path).unwrap();
}
