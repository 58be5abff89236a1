mod helpers;

use helpers::MeasurementFileFactory;
use station_mart::engine::aggregate::finalize::{StationSummary, finalize};
use station_mart::engine::backend::{AggregateEngine, ScanOptions, all_engines};
use station_mart::ingest::record::MeasurementParser;

fn summaries_for(
    engine: &dyn AggregateEngine,
    lines: &[&str],
    chunk_size: usize,
) -> Vec<StationSummary> {
    let factory = MeasurementFileFactory::new();
    let path = factory.file_with_lines("input.csv", lines);
    let outcome = engine
        .scan(&path, &MeasurementParser::new(';'), &ScanOptions { chunk_size })
        .unwrap();
    finalize(outcome.table).unwrap()
}

fn rows(summaries: &[StationSummary]) -> Vec<(String, f64, f64, f64)> {
    summaries
        .iter()
        .map(|s| (s.station.clone(), s.min, s.mean, s.max))
        .collect()
}

// scenario fixtures -------------------------------------------------------

#[test]
fn single_key_boundary() {
    for engine in all_engines() {
        let summaries = summaries_for(engine.as_ref(), &["A;1.0", "A;2.0", "A;3.0"], 2);
        assert_eq!(
            rows(&summaries),
            vec![("A".to_string(), 1.0, 2.0, 3.0)],
            "engine {}",
            engine.name()
        );
    }
}

#[test]
fn multi_key_scenario() {
    for engine in all_engines() {
        let summaries =
            summaries_for(engine.as_ref(), &["B;5.0", "A;1.0", "A;3.0", "B;7.0"], 3);
        assert_eq!(
            rows(&summaries),
            vec![
                ("A".to_string(), 1.0, 2.0, 3.0),
                ("B".to_string(), 5.0, 6.0, 7.0)
            ],
            "engine {}",
            engine.name()
        );
    }
}

#[test]
fn empty_input_yields_empty_output() {
    for engine in all_engines() {
        let summaries = summaries_for(engine.as_ref(), &[], 4);
        assert!(summaries.is_empty(), "engine {}", engine.name());
    }
}

#[test]
fn all_malformed_input_yields_empty_output_and_full_skip_count() {
    let lines = &["not a row", "A;b;c", "A;NOPE"];
    for engine in all_engines() {
        let factory = MeasurementFileFactory::new();
        let path = factory.file_with_lines("junk.csv", lines);
        let outcome = engine
            .scan(
                &path,
                &MeasurementParser::new(';'),
                &ScanOptions { chunk_size: 2 },
            )
            .unwrap();

        assert_eq!(outcome.lines, 3, "engine {}", engine.name());
        assert_eq!(outcome.skipped, 3, "engine {}", engine.name());
        assert!(finalize(outcome.table).unwrap().is_empty());
    }
}

// cross-engine properties -------------------------------------------------

#[test]
fn determinism_two_runs_agree() {
    let lines = &["C;9.5", "A;1.25", "B;-4.0", "A;2.75", "B;0.5"];
    for engine in all_engines() {
        let first = summaries_for(engine.as_ref(), lines, 2);
        let second = summaries_for(engine.as_ref(), lines, 2);
        assert_eq!(first, second, "engine {}", engine.name());
    }
}

#[test]
fn every_partition_matches_the_sequential_pass() {
    let mut lines = Vec::new();
    for i in 0..120 {
        lines.push(format!("S{};{}.25", i % 11, (i % 31) as f64 - 15.0));
    }
    let line_refs: Vec<&str> = lines.iter().map(String::as_str).collect();

    let engines = all_engines();
    let reference = summaries_for(engines[0].as_ref(), &line_refs, usize::MAX);

    for engine in &engines {
        for chunk_size in [1, 7, 32, 1000] {
            let partitioned = summaries_for(engine.as_ref(), &line_refs, chunk_size);
            assert_eq!(
                partitioned,
                reference,
                "engine {} chunk_size {}",
                engine.name(),
                chunk_size
            );
        }
    }
}

#[test]
fn malformed_lines_never_disturb_the_statistics() {
    let clean = &["A;1.0", "B;5.0", "A;3.0", "B;7.0"];
    let noisy = &[
        "garbage",
        "A;1.0",
        "B;5.0",
        "A;not-a-number",
        "A;3.0",
        "too;many;fields",
        "B;7.0",
        "",
    ];

    for engine in all_engines() {
        let from_clean = summaries_for(engine.as_ref(), clean, 3);
        let from_noisy = summaries_for(engine.as_ref(), noisy, 3);
        assert_eq!(from_clean, from_noisy, "engine {}", engine.name());
    }
}

#[test]
fn output_is_sorted_for_any_input_order() {
    let shuffled = &["zulu;1.0", "Mike;2.0", "alpha;3.0", "Bravo;4.0"];
    for engine in all_engines() {
        let summaries = summaries_for(engine.as_ref(), shuffled, 2);
        let stations: Vec<&str> = summaries.iter().map(|s| s.station.as_str()).collect();
        // Byte-wise ascending: uppercase before lowercase.
        assert_eq!(
            stations,
            vec!["Bravo", "Mike", "alpha", "zulu"],
            "engine {}",
            engine.name()
        );
    }
}
