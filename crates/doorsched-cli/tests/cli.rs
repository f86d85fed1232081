use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

const SUPREME: &str = "SLH2410025: Tauranga Intermediate School Block D
Area: Ground Floor
D0.01 Accessible WC Timber
Grab rail supplied by builder
MS2604PT dormakaba Privacy latch 1 SSS
HG100 Hinge 3 SSS
D0.02 Store Timber
HG100 Hinge 3 SSS
";

const STANDARD: &str = "Door Area Description Rating Handing Door Type
D0.01 Accessible WC Timber
MS2604PT 1 dormakaba Privacy latch SSS
";

fn doorsched() -> Command {
    Command::cargo_bin("doorsched").unwrap()
}

#[test]
fn test_extract_csv_uses_dialect_headers() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("schedule.txt");
    fs::write(&input, STANDARD).unwrap();

    doorsched()
        .args(["extract", "-f", "csv"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Door,Description,Dr type,Code,Quantity Product,Description Product,Finish",
        ))
        .stdout(predicate::str::contains(
            "D0.01,Accessible WC,Timber,MS2604PT,1,dormakaba Privacy latch,SSS",
        ));
}

#[test]
fn test_extract_json_includes_job() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("schedule.txt");
    fs::write(&input, SUPREME).unwrap();

    let output = doorsched()
        .args(["extract", "-d", "supreme", "-f", "json"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["dialect"], "supreme");
    assert_eq!(json["job"]["number"], "SLH2410025");
    assert_eq!(json["rows"].as_array().unwrap().len(), 3);
    assert_eq!(json["rows"][0]["notes"], "Grab rail supplied by builder");
}

#[test]
fn test_extract_filter_by_door() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("schedule.txt");
    fs::write(&input, SUPREME).unwrap();

    doorsched()
        .args(["extract", "-d", "supreme", "-f", "csv", "--door", "D0.02"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("D0.02"))
        .stdout(predicate::str::contains("D0.01").not());
}

#[test]
fn test_extract_text_summary() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("schedule.txt");
    fs::write(&input, SUPREME).unwrap();

    doorsched()
        .args(["extract", "-d", "supreme", "-f", "text", "--summary"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Rows: 3 (2 doors)"))
        .stdout(predicate::str::contains("Product totals:"));
}

#[test]
fn test_extract_wrong_dialect_fails() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("schedule.txt");
    fs::write(&input, SUPREME).unwrap();

    doorsched()
        .args(["extract", "-d", "ara"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No data extracted"));
}

#[test]
fn test_extract_unknown_dialect_is_rejected() {
    doorsched()
        .args(["extract", "-d", "acme", "schedule.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown dialect"));
}

#[test]
fn test_extract_missing_input() {
    doorsched()
        .args(["extract", "does-not-exist.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_batch_writes_outputs_and_summary() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), SUPREME).unwrap();
    fs::write(dir.path().join("b.txt"), "nothing to see here\n").unwrap();
    let out = dir.path().join("out");
    let pattern = dir.path().join("*.txt");

    doorsched()
        .args(["batch", "-d", "supreme", "-f", "csv", "--summary", "--continue-on-error"])
        .arg(pattern.to_str().unwrap())
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 successful"));

    let csv = fs::read_to_string(out.join("SLH2410025_Tauranga_Intermediate_School_Block_D.csv"))
        .unwrap();
    assert!(csv.starts_with("Door,Area,Description,Door Type,Notes,Code"));

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert!(summary.contains("a.txt,success,3,2,SLH2410025,"));
    assert!(summary.contains("b.txt,error"));
}

#[test]
fn test_config_init_and_set() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.json");

    doorsched()
        .arg("--config")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .success();

    doorsched()
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "extraction.dialect", "ara"])
        .assert()
        .success();

    doorsched()
        .arg("--config")
        .arg(&config)
        .args(["config", "get", "extraction.dialect"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"ara\""));

    doorsched()
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "extraction.nope", "1"])
        .assert()
        .failure();
}

#[test]
fn test_batch_job_name_with_slash_stays_in_output_dir() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("a.txt"),
        SUPREME.replace("Tauranga Intermediate School Block D", "Block D/E Upgrade"),
    )
    .unwrap();
    let out = dir.path().join("out");
    let pattern = dir.path().join("*.txt");

    doorsched()
        .args(["batch", "-d", "supreme", "-f", "csv", "--continue-on-error"])
        .arg(pattern.to_str().unwrap())
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success();

    assert!(out.join("SLH2410025_Block_D_E_Upgrade.csv").is_file());
}

#[test]
fn test_batch_colliding_names_are_all_written() {
    let dir = tempdir().unwrap();
    for sub in ["a", "b", "c"] {
        fs::create_dir(dir.path().join(sub)).unwrap();
        fs::write(dir.path().join(sub).join("x.txt"), STANDARD).unwrap();
    }
    let out = dir.path().join("out");
    let pattern = dir.path().join("*").join("x.txt");

    doorsched()
        .args(["batch", "-f", "csv"])
        .arg(pattern.to_str().unwrap())
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("3 successful"));

    let written = fs::read_dir(&out).unwrap().count();
    assert_eq!(written, 3);
    assert!(out.join("door_hardware_schedule_x_2.csv").is_file());
}

#[test]
fn test_extract_search_products() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("schedule.txt");
    fs::write(&input, SUPREME).unwrap();

    doorsched()
        .args(["extract", "-d", "supreme", "-f", "csv", "--search", "hinge"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("HG100"))
        .stdout(predicate::str::contains("MS2604PT").not());

    doorsched()
        .args(["extract", "-d", "supreme", "--search", "closer"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No data extracted"));
}
