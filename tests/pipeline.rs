//! End-to-end runs of both pipeline variants over real temp files.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use most_flights::{
    count, cross_check, CountMap, CountPipeline, PooledPipeline, RowPolicy, SequentialPipeline,
    Validation,
};

const FLIGHTS: &str = "P1,LHR,JFK\nP2,CDG,SFO\nP1,JFK,LHR\nP3,AMS,OSL\nP2,SFO,CDG\nP1,LHR,SIN\n";

fn write_csv(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn expected(pairs: &[(&str, u64)]) -> CountMap {
    pairs.iter().map(|(id, n)| (id.to_string(), *n)).collect()
}

async fn counts_of<P: CountPipeline>(pipeline: P) -> CountMap {
    pipeline.run().await.unwrap()
}

#[tokio::test]
async fn pooled_run_counts_the_worked_example() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "flights.csv", FLIGHTS);

    let totals = counts_of(PooledPipeline::new(path, RowPolicy::CountAll, 2)).await;

    assert_eq!(totals, expected(&[("P1", 3), ("P2", 2), ("P3", 1)]));
    assert_eq!(
        count::top_passengers(&totals),
        Some((3, vec!["P1".to_string()]))
    );
}

#[tokio::test]
async fn chunked_run_matches_the_single_pass_baseline() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "flights.csv", FLIGHTS);

    let baseline = counts_of(SequentialPipeline::new(path.clone(), RowPolicy::CountAll)).await;

    for workers in [1, 2, 3, 8] {
        let chunked = counts_of(PooledPipeline::new(
            path.clone(),
            RowPolicy::CountAll,
            workers,
        ))
        .await;
        assert_eq!(chunked, baseline, "diverged at {workers} workers");
    }
}

#[tokio::test]
async fn chunked_run_matches_the_baseline_under_header_skip() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(
        &dir,
        "flights.csv",
        "Passenger ID,From,To\nP1,LHR,JFK\nP2,CDG,SFO\nP1,JFK,LHR\n",
    );
    let policy = RowPolicy::SkipHeader {
        sentinel: RowPolicy::DEFAULT_SENTINEL.to_string(),
    };

    let baseline = counts_of(SequentialPipeline::new(path.clone(), policy.clone())).await;
    let chunked = counts_of(PooledPipeline::new(path, policy, 3)).await;

    assert_eq!(baseline, expected(&[("P1", 2), ("P2", 1)]));
    assert_eq!(chunked, baseline);
}

#[tokio::test]
async fn counting_twice_gives_the_same_totals() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "flights.csv", FLIGHTS);

    let first = counts_of(PooledPipeline::new(path.clone(), RowPolicy::CountAll, 4)).await;
    let second = counts_of(PooledPipeline::new(path, RowPolicy::CountAll, 4)).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn empty_input_counts_nobody() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "flights.csv", "");

    let totals = counts_of(PooledPipeline::new(path, RowPolicy::CountAll, 4)).await;

    assert!(totals.is_empty());
    assert_eq!(count::top_passengers(&totals), None);
}

#[tokio::test]
async fn ragged_rows_still_count_by_first_field() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "flights.csv", "P1\nP1,LHR\nP2,CDG,SFO,extra\n");

    let totals = counts_of(PooledPipeline::new(path, RowPolicy::CountAll, 2)).await;

    assert_eq!(totals, expected(&[("P1", 2), ("P2", 1)]));
}

#[tokio::test]
async fn cross_check_verifies_a_reordered_copy() {
    let dir = TempDir::new().unwrap();
    let primary = write_csv(&dir, "flights.csv", FLIGHTS);
    // same records, different order and different extra fields
    let secondary = write_csv(
        &dir,
        "flights_datetime.csv",
        "P3,AMS,OSL,2024-01-02\nP1,LHR,JFK,2024-01-01\nP2,CDG,SFO,2024-01-01\nP1,JFK,LHR,2024-01-03\nP1,LHR,SIN,2024-01-04\nP2,SFO,CDG,2024-01-05\n",
    );

    let totals = counts_of(PooledPipeline::new(primary, RowPolicy::CountAll, 4)).await;
    let outcome = cross_check(&totals, secondary, RowPolicy::CountAll, 4)
        .await
        .unwrap();

    assert_eq!(outcome, Validation::Verified);
}

#[tokio::test]
async fn cross_check_flags_diverging_counts() {
    let dir = TempDir::new().unwrap();
    let primary = write_csv(&dir, "flights.csv", FLIGHTS);
    let secondary = write_csv(&dir, "other.csv", "P1,LHR,JFK\nP2,CDG,SFO\n");

    let totals = counts_of(PooledPipeline::new(primary, RowPolicy::CountAll, 4)).await;
    let outcome = cross_check(&totals, secondary, RowPolicy::CountAll, 4)
        .await
        .unwrap();

    assert_eq!(outcome, Validation::Mismatch);
}

#[tokio::test]
async fn cross_check_skips_a_missing_file_without_failing() {
    let dir = TempDir::new().unwrap();
    let primary = write_csv(&dir, "flights.csv", FLIGHTS);
    let missing = dir.path().join("no_such_file.csv");

    let totals = counts_of(PooledPipeline::new(primary, RowPolicy::CountAll, 4)).await;
    let outcome = cross_check(&totals, missing, RowPolicy::CountAll, 4)
        .await
        .unwrap();

    assert_eq!(outcome, Validation::Skipped);
    // the primary result is untouched
    assert_eq!(totals, expected(&[("P1", 3), ("P2", 2), ("P3", 1)]));
}

#[tokio::test]
async fn missing_primary_input_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("no_such_file.csv");

    let err = PooledPipeline::new(missing, RowPolicy::CountAll, 4)
        .run()
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        most_flights::PipelineError::NotFound { .. }
    ));
}
