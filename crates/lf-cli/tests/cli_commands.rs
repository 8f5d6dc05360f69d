//! CLI command integration tests.

#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn lf() -> Command {
    Command::cargo_bin("lf").unwrap()
}

// ---------------------------------------------------------------------------
// play
// ---------------------------------------------------------------------------

#[test]
fn play_prints_the_opening_and_quits() {
    lf().arg("play")
        .write_stdin("look\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("LANTERNFALL"))
        .stdout(predicate::str::contains("Dormitory"))
        .stdout(predicate::str::contains("Goodbye."));
}

#[test]
fn play_ends_cleanly_at_end_of_input() {
    lf().arg("play")
        .write_stdin("take lantern\ni\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Taken."))
        .stdout(predicate::str::contains("a brass lantern"));
}

#[test]
fn play_asks_which_cloak() {
    lf().arg("play")
        .write_stdin("take cloak\nblue\ninventory\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Which cloak do you mean"))
        .stdout(predicate::str::contains("a blue cloak"));
}

#[test]
fn play_writes_a_json_transcript() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");
    lf().args(["play", "--seed", "7", "--transcript"])
        .arg(&path)
        .write_stdin("wait\nscore\n")
        .assert()
        .success();
    let json = fs::read_to_string(&path).unwrap();
    assert!(json.contains("\"input\": \"wait\""));
    assert!(json.contains("Time passes."));
}

#[test]
fn play_reads_a_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{ "verbosity": "superbrief", "seed": 3 }"#).unwrap();
    lf().args(["play", "--config"])
        .arg(&path)
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("seed 3"))
        .stdout(predicate::str::contains("Corridor"))
        .stdout(predicate::str::contains("flickering panels").not());
}

#[test]
fn play_rejects_a_bad_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{ "volume": 11 }"#).unwrap();
    lf().args(["play", "--config"])
        .arg(&path)
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load config"));
}

// ---------------------------------------------------------------------------
// vocab / map
// ---------------------------------------------------------------------------

#[test]
fn vocab_lists_verbs_and_directions() {
    lf().arg("vocab")
        .assert()
        .success()
        .stdout(predicate::str::contains("pick up"))
        .stdout(predicate::str::contains("starboard"))
        .stdout(predicate::str::contains("northeast"));
}

#[test]
fn map_lists_demo_locations() {
    lf().arg("map")
        .assert()
        .success()
        .stdout(predicate::str::contains("Machine Shop"))
        .stdout(predicate::str::contains("(guarded)"))
        .stdout(predicate::str::contains("dark"));
}
