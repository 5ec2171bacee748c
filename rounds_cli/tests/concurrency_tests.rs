//! Concurrency tests for the rounds binary.
//!
//! These tests verify that multiple processes can safely:
//! - Write to the drink WAL simultaneously (file locking)
//! - Read state while drinks are being logged
//! - Perform rollup operations without corruption

use assert_cmd::Command;
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("rounds"))
}

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

fn start_night(data_dir: &std::path::Path) {
    cli()
        .arg("start")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success();
}

#[test]
fn test_concurrent_drink_logging() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();
    start_night(&data_dir);

    // Log drinks with slight delays (more realistic than thundering herd)
    for i in 0..5 {
        thread::sleep(Duration::from_millis(i * 5));
        cli()
            .arg("log")
            .arg("beer")
            .arg("--data-dir")
            .arg(&data_dir)
            .assert()
            .success();
    }

    // Verify all drinks were logged
    let wal_path = data_dir.join("wal/drinks.wal");
    let wal_content = std::fs::read_to_string(&wal_path).expect("Failed to read WAL");

    // Count lines (each line is a drink)
    let drink_count = wal_content.lines().count();
    assert_eq!(drink_count, 5, "Expected 5 drinks, got {}", drink_count);
}

#[test]
fn test_reads_interleaved_with_writes() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();
    start_night(&data_dir);

    for i in 0..3 {
        thread::sleep(Duration::from_millis(i * 10));
        cli()
            .arg("log")
            .arg("wine")
            .arg("--data-dir")
            .arg(&data_dir)
            .assert()
            .success();

        // Readers can run at any point between writes
        cli()
            .arg("status")
            .arg("--data-dir")
            .arg(&data_dir)
            .assert()
            .success();
    }

    let wal_content =
        std::fs::read_to_string(data_dir.join("wal/drinks.wal")).expect("Failed to read WAL");
    assert_eq!(wal_content.lines().count(), 3);
}

#[test]
fn test_rollup_after_heavy_logging() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();
    start_night(&data_dir);

    for _ in 0..10 {
        cli()
            .arg("log")
            .arg("seltzer")
            .arg("--data-dir")
            .arg(&data_dir)
            .assert()
            .success();
    }

    cli()
        .arg("rollup")
        .arg("--cleanup")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success();

    // All rows made it to the archive and the processed WAL was removed
    let reader = std::fs::read_to_string(data_dir.join("drinks.csv")).unwrap();
    assert_eq!(reader.lines().count(), 11); // header + 10 rows
    assert!(!data_dir.join("wal/drinks.wal.processed").exists());
}
