//! Integration tests for the noor CLI commands.
//!
//! Every test writes its own config into a temporary directory, so tests can run in parallel.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{tempdir, TempDir};

/// Al-Fatihah plus the last three chapters.
fn fixture() -> PathBuf {
  Path::new(env!("CARGO_MANIFEST_DIR")).join("../noor/tests/fixtures/short_surahs.json")
}

// Helper function to create a clean command instance bound to a config file
fn noor(config: &Path) -> Command {
  let mut cmd = Command::cargo_bin("noor").unwrap();
  cmd.arg("--config").arg(config);
  cmd
}

// Helper that runs `init` against a temporary directory
fn setup() -> (TempDir, PathBuf) {
  let dir = tempdir().unwrap();
  let config = dir.path().join("config.toml");
  noor(&config)
    .arg("init")
    .arg("--database-path")
    .arg(dir.path().join("noor.db"))
    .arg("--dataset-path")
    .arg(fixture())
    .assert()
    .success()
    .stdout(predicate::str::contains("Created config"));
  (dir, config)
}

#[test]
fn test_init_refuses_overwrite() {
  let (dir, config) = setup();
  assert!(config.exists());
  assert!(dir.path().join("noor.db").exists());

  noor(&config)
    .arg("init")
    .assert()
    .failure()
    .stderr(predicate::str::contains("already exists"));

  noor(&config).arg("init").arg("--force").assert().success();
}

#[test]
fn test_index_summary() {
  let (_dir, config) = setup();
  noor(&config)
    .arg("index")
    .arg("--surahs")
    .assert()
    .success()
    .stdout(predicate::str::contains("4 surahs, 22 ayahs, 26 rows"))
    .stdout(predicate::str::contains("Al-Ikhlas"))
    .stdout(predicate::str::contains("row 19"));
}

#[test]
fn test_locate() {
  let (_dir, config) = setup();

  noor(&config)
    .args(["locate", "112"])
    .assert()
    .success()
    .stdout(predicate::str::contains("header is row 8"))
    .stdout(predicate::str::contains("Offset 1194px"));

  noor(&config)
    .args(["locate", "1:7"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Ayah 1:7 (#7) is row 7"))
    .stdout(predicate::str::contains("estimated height 282px"));

  noor(&config)
    .args(["locate", "30", "--juz"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Ayah 112:1 (#8) is row 9"));

  noor(&config)
    .args(["locate", "2:255"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("not found"));

  noor(&config)
    .args(["locate", "two"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Invalid ayah reference"));
}

#[test]
fn test_position_roundtrip() {
  let (_dir, config) = setup();

  noor(&config)
    .arg("position")
    .assert()
    .success()
    .stdout(predicate::str::contains("Reading position: 1:1 (#1), row 1"));

  noor(&config)
    .args(["position", "--set", "113:3"])
    .assert()
    .success()
    .stdout(predicate::str::contains("set to 113:3 (#14)"));

  noor(&config)
    .arg("position")
    .assert()
    .success()
    .stdout(predicate::str::contains("Reading position: 113:3 (#14), row 16"));
}

#[test]
fn test_bookmark_workflow() {
  let (_dir, config) = setup();

  noor(&config)
    .args(["bookmark", "list"])
    .assert()
    .success()
    .stdout(predicate::str::contains("No bookmarks yet"));

  noor(&config)
    .args(["bookmark", "add", "114:1"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Bookmarked 114:1 [color 0]"));

  noor(&config)
    .args(["bookmark", "add", "114:1"])
    .assert()
    .success()
    .stdout(predicate::str::contains("already bookmarked"));

  noor(&config)
    .args(["bookmark", "toggle", "2"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Bookmarked 1:2 [color 1]"));

  noor(&config)
    .args(["bookmark", "toggle", "114:1"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Removed bookmark on 114:1"));

  noor(&config)
    .args(["bookmark", "list"])
    .assert()
    .success()
    .stdout(predicate::str::contains("1 bookmarks"))
    .stdout(predicate::str::contains("1:2"));

  noor(&config)
    .args(["bookmark", "remove", "no-such-id"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("No bookmark with id"));
}

#[test]
fn test_tracking_workflow() {
  let (_dir, config) = setup();

  for prayer in ["1", "2", "3", "4", "witr"] {
    noor(&config).args(["track", "toggle", "2024-03-09", prayer]).assert().success();
  }
  noor(&config)
    .args(["track", "toggle", "2024-03-10", "tahajjud2"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Marked tahajjud2 on 2024-03-10 (2/9 points)"));

  noor(&config)
    .args(["track", "stats"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Current streak: 2 nights"))
    .stdout(predicate::str::contains("Perfect nights: 1"))
    .stdout(predicate::str::contains("Total points: 11"));

  noor(&config)
    .args(["track", "heatmap", "--weeks", "2", "--until", "2024-03-10"])
    .assert()
    .success()
    .stdout(predicate::str::contains("2024-02-26"))
    .stdout(predicate::str::contains("2024-03-04"));

  noor(&config)
    .args(["track", "toggle", "2024-03-10", "fajr"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Unknown prayer"));

  noor(&config)
    .args(["track", "toggle", "10/03/2024", "witr"])
    .assert()
    .failure();
}

#[test]
fn test_qibla() {
  let dir = tempdir().unwrap();
  let config = dir.path().join("config.toml");

  noor(&config)
    .args(["qibla", "51.5074", "-0.1278"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Qibla bearing: 118."))
    .stdout(predicate::str::contains("Etc/GMT+0"));

  noor(&config)
    .args(["qibla", "51.5074", "-0.1278", "--heading", "117"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Facing Qibla"));

  noor(&config)
    .args(["qibla", "51.5074", "-0.1278", "--heading", "90"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Turn Right: turn 29.0° right"));

  noor(&config).args(["qibla", "95", "10"]).assert().failure();
}
