//! Error and timing tests for parlab-core

use std::time::Duration;

use parlab_core::{speedup, time_it, ParlabError, Stopwatch};

#[test]
fn test_error_display() {
    let err = ParlabError::InvalidInput("window must be positive".into());
    assert_eq!(err.to_string(), "Invalid input: window must be positive");

    let err = ParlabError::Timeout("3 tasks pending".into());
    assert_eq!(err.to_string(), "Timeout: 3 tasks pending");
}

#[test]
fn test_io_error_conversion() {
    fn read_missing() -> parlab_core::Result<String> {
        Ok(std::fs::read_to_string("/definitely/not/here/parlab.toml")?)
    }
    assert!(matches!(read_missing(), Err(ParlabError::Io(_))));
}

#[test]
fn test_serialization_error_conversion() {
    fn parse() -> parlab_core::Result<serde_json::Value> {
        Ok(serde_json::from_str("{not json")?)
    }
    assert!(matches!(parse(), Err(ParlabError::Serialization(_))));
}

#[test]
fn test_overlapping_work_shows_speedup() {
    let sleep = Duration::from_millis(30);

    let (_, sequential) = time_it("sequential", || {
        for _ in 0..3 {
            std::thread::sleep(sleep);
        }
    });
    let (_, parallel) = time_it("parallel", || {
        let handles: Vec<_> = (0..3)
            .map(|_| std::thread::spawn(move || std::thread::sleep(sleep)))
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
    });

    assert!(speedup(&sequential, &parallel) > 1.5);
}

#[test]
fn test_stopwatch_finish_keeps_start_time() {
    let watch = Stopwatch::start();
    let started_at = watch.started_at();
    let timing = watch.finish("noop");
    assert_eq!(timing.started_at, started_at);
    assert_eq!(timing.label, "noop");
}
