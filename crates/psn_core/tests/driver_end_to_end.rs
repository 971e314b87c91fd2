//! End-to-end runs against a shell-script stand-in for the `modest` executable.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use psn_core::checker::{CheckerClient, ModestClient, ToolValidator};
use psn_core::driver::{DriverError, StopReason, WindowedVerificationDriver};
use psn_core::models::{PropertyType, RunConfig, RunMode};
use psn_core::render::TemplateRenderer;
use psn_core::results::{read_timeline_csv, ResultSink};
use psn_core::trace::ModestTraceParser;
use tempfile::tempdir;

/// Serializes script creation and execution within this binary.
static SERIAL: Mutex<()> = Mutex::new(());

const TEMPLATE: &str = "{{CLK_LOW}} {{CLK_HIGH}} {{STRIDE}}\n";

/// Reads "lower upper stride" from the model and reports probability 1
/// from cycle 20 on. `check` echoes the model back.
const FAKE_MODEST: &str = r#"#!/bin/sh
case "$1" in
  --version)
    echo "The Modest Toolset (test double) v1.0"
    ;;
  simulate)
    read lo hi stride < "$2"
    c=$lo
    while [ "$c" -le "$hi" ]; do
      echo "+ Property P_$c"
      if [ "$c" -ge 20 ]; then
        echo "  Estimated probability: 1"
      else
        echo "  Estimated probability: 0"
      fi
      c=$((c + stride))
    done
    ;;
  check)
    echo "Checking $5"
    cat "$5"
    ;;
esac
"#;

const BROKEN_MODEST: &str = r#"#!/bin/sh
echo "model.modest(1,1): error: unexpected token" >&2
exit 1
"#;

/// Exits cleanly with a usable trace that still mentions `error:`, and
/// rejects every model in `check`.
const NOISY_MODEST: &str = r#"#!/bin/sh
case "$1" in
  simulate)
    echo "+ Property P_0"
    echo "  Estimated probability: 0.5"
    echo "note: relative error: 0.01"
    ;;
  check)
    echo "model.modest(1,1): error: unknown identifier"
    exit 1
    ;;
esac
"#;

fn install_script(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("modest");
    fs::write(&path, body).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

fn driver(exe: &Path, work: &Path, results: &Path) -> WindowedVerificationDriver {
    WindowedVerificationDriver::new(
        TemplateRenderer::new(TEMPLATE),
        ModestClient::new(exe, work),
        ModestTraceParser::new(),
        ResultSink::new(results),
    )
}

fn config(horizon: Option<u64>) -> RunConfig {
    RunConfig::builder(2, PropertyType::Resistive)
        .horizon(horizon)
        .block_size(10)
        .build()
        .unwrap()
}

#[test]
fn simulate_stops_at_saturation_and_cleans_up() {
    let _guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let dir = tempdir().unwrap();
    let exe = install_script(dir.path(), FAKE_MODEST);
    let work = dir.path().join("work");
    let results = dir.path().join("results");

    let outcome = driver(&exe, &work, &results)
        .run(&config(None), RunMode::Simulate)
        .unwrap();

    assert_eq!(
        outcome.stop_reason,
        StopReason::Saturated {
            clock_cycle: 20,
            p_max: 1.0
        }
    );
    assert_eq!(outcome.windows_attempted, 3);
    assert_eq!(outcome.sample_count(), 30);

    assert_eq!(
        outcome.artifacts.csv,
        results.join("noc_2x2_resistive_noise_threshold_1_stride_1_block_size_10.csv")
    );
    let reread = read_timeline_csv(&outcome.artifacts.csv).unwrap();
    assert_eq!(reread, outcome.timeline);

    assert_eq!(fs::read_dir(&work).unwrap().count(), 0);
}

#[test]
fn check_logs_reports_and_writes_empty_csv() {
    let _guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let dir = tempdir().unwrap();
    let exe = install_script(dir.path(), FAKE_MODEST);
    let work = dir.path().join("work");
    let results = dir.path().join("results");

    let outcome = driver(&exe, &work, &results)
        .run(&config(Some(19)), RunMode::Check)
        .unwrap();

    assert_eq!(outcome.stop_reason, StopReason::HorizonExhausted);
    assert_eq!(outcome.windows_attempted, 2);

    let csv = fs::read_to_string(&outcome.artifacts.csv).unwrap();
    assert_eq!(csv, "Clock Cycle,Probability\r\n");

    let log = fs::read_to_string(&outcome.artifacts.run_log).unwrap();
    assert!(log.starts_with("Modest check parameters:\n"));
    assert!(log.contains("Checking "));
    assert!(log.contains("10 19 1"));
    assert!(log.contains("\nTotal elapsed time: "));
}

#[test]
fn reported_errors_skip_windows_and_keep_model() {
    let _guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let dir = tempdir().unwrap();
    let exe = install_script(dir.path(), BROKEN_MODEST);
    let work = dir.path().join("work");
    let results = dir.path().join("results");

    let outcome = driver(&exe, &work, &results)
        .run(&config(Some(9)), RunMode::Simulate)
        .unwrap();

    assert_eq!(outcome.windows_skipped, 1);
    assert!(outcome.timeline.is_empty());
    assert!(work.join("noc_2x2_resistive_0_9.modest").exists());

    let log = fs::read_to_string(&outcome.artifacts.run_log).unwrap();
    assert!(log.contains("error: unexpected token"));
    assert!(log.contains("model kept at "));
}

#[test]
fn clean_exit_with_error_marker_keeps_samples_and_model() {
    let _guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let dir = tempdir().unwrap();
    let exe = install_script(dir.path(), NOISY_MODEST);
    let work = dir.path().join("work");
    let results = dir.path().join("results");

    let outcome = driver(&exe, &work, &results)
        .run(&config(Some(0)), RunMode::Simulate)
        .unwrap();

    assert_eq!(outcome.windows_skipped, 0);
    assert_eq!(outcome.sample_count(), 1);
    assert_eq!(outcome.timeline.samples()[0].probability, 0.5);

    let kept = work.join("noc_2x2_resistive_0_0.modest");
    assert!(kept.exists());
    let log = fs::read_to_string(&outcome.artifacts.run_log).unwrap();
    assert!(log.contains(&format!("model kept at {}", kept.display())));
}

#[test]
fn check_reports_with_error_marker_keep_model() {
    let _guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let dir = tempdir().unwrap();
    let exe = install_script(dir.path(), NOISY_MODEST);
    let work = dir.path().join("work");
    let results = dir.path().join("results");

    let outcome = driver(&exe, &work, &results)
        .run(&config(Some(9)), RunMode::Check)
        .unwrap();

    assert_eq!(outcome.windows_skipped, 0);
    assert!(work.join("noc_2x2_resistive_0_9.modest").exists());

    let log = fs::read_to_string(&outcome.artifacts.run_log).unwrap();
    assert!(log.contains("error: unknown identifier"));
    assert!(log.contains("model kept at "));
}

#[test]
fn missing_executable_writes_nothing() {
    let dir = tempdir().unwrap();
    let results = dir.path().join("results");

    let err = driver(&dir.path().join("no-such-modest"), &dir.path().join("work"), &results)
        .run(&config(Some(9)), RunMode::Simulate)
        .unwrap_err();

    assert!(matches!(err, DriverError::Precondition(_)));
    assert!(!results.exists());
}

#[test]
fn validator_reports_version_line() {
    let _guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let dir = tempdir().unwrap();
    let exe = install_script(dir.path(), FAKE_MODEST);

    let client = ModestClient::new(&exe, dir.path());
    assert!(client.ensure_available().is_ok());
    assert_eq!(client.tool_name(), "modest");

    let version = ToolValidator::version(&exe).unwrap();
    assert_eq!(version, "The Modest Toolset (test double) v1.0");
}
