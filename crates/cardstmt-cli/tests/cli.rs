use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const STATEMENT: &str = "Total Amount Due: 24,560.75 Minimum Amount: 1,200.00 \
                         Credit Limit: 50,000.00 Due Date: 05/06/2024 Finance Charges Applied";

/// Command with the user config directory pointed into `dir`.
fn cardstmt(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("cardstmt").unwrap();
    cmd.env("XDG_CONFIG_HOME", dir.path()).current_dir(dir.path());
    cmd
}

#[test]
fn text_command_prints_json() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("statement.txt");
    fs::write(&input, STATEMENT).unwrap();

    cardstmt(&dir)
        .arg("text")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("{\n    \"total_amount_due\": 24560.75,"))
        .stdout(predicate::str::contains("\"due_date\": \"05/06/2024\""))
        .stdout(predicate::str::contains("\"interest_charged\": true"))
        .stdout(predicate::str::contains("\"credit_limit\": 50000.0"));
}

#[test]
fn text_command_reads_stdin() {
    let dir = TempDir::new().unwrap();

    cardstmt(&dir)
        .args(["text", "-"])
        .write_stdin("nothing useful here")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total_amount_due\": null"))
        .stdout(predicate::str::contains("\"interest_charged\": false"));
}

#[test]
fn text_command_csv() {
    let dir = TempDir::new().unwrap();

    cardstmt(&dir)
        .args(["text", "-", "--format", "csv"])
        .write_stdin(STATEMENT)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "total_amount_due,minimum_due,due_date,interest_charged,credit_limit\n\
             24560.75,1200.00,05/06/2024,true,50000.00",
        ));
}

#[test]
fn process_saves_to_configured_path() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("statement.txt");
    fs::write(&input, STATEMENT).unwrap();

    cardstmt(&dir)
        .arg("process")
        .arg(&input)
        .arg("--save")
        .assert()
        .success();

    let saved = fs::read_to_string(dir.path().join("output").join("result.json")).unwrap();
    assert!(saved.contains("\"minimum_due\": 1200.0"));
}

#[test]
fn process_missing_file_fails() {
    let dir = TempDir::new().unwrap();

    cardstmt(&dir)
        .args(["process", "does-not-exist.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn process_rejects_malformed_pdf() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("broken.pdf");
    fs::write(&input, b"this is not a pdf").unwrap();

    cardstmt(&dir)
        .arg("process")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed PDF"));
}

#[test]
fn batch_writes_summary() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.txt"), STATEMENT).unwrap();
    fs::write(dir.path().join("b.pdf"), b"garbage").unwrap();
    let out = dir.path().join("out");

    let pattern = dir.path().join("*").display().to_string();
    cardstmt(&dir)
        .arg("batch")
        .arg(&pattern)
        .arg("--output-dir")
        .arg(&out)
        .args(["--summary", "--continue-on-error"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 successful, 1 failed"));

    assert!(out.join("a.json").exists());
    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert!(summary.starts_with("filename,status,source,total_amount_due"));
    assert!(summary.contains("a.txt,success,text,24560.75,1200.00,05/06/2024,true,50000.00"));
    assert!(summary.contains("b.pdf,error,"));
}

#[test]
fn batch_keeps_same_named_outputs_apart() {
    let dir = TempDir::new().unwrap();
    for sub in ["x", "y"] {
        fs::create_dir(dir.path().join(sub)).unwrap();
        fs::write(dir.path().join(sub).join("a.txt"), STATEMENT).unwrap();
    }
    let out = dir.path().join("out");

    let pattern = dir.path().join("*").join("a.txt").display().to_string();
    cardstmt(&dir)
        .arg("batch")
        .arg(&pattern)
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 successful, 0 failed"));

    assert!(out.join("a.txt.json").exists());
    assert!(out.join("a.txt-2.json").exists());
}

#[test]
fn config_init_then_get() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("cardstmt.json");

    cardstmt(&dir)
        .arg("--config")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .success();
    assert!(config.exists());

    cardstmt(&dir)
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "extraction.context_window", "300"])
        .assert()
        .success();

    cardstmt(&dir)
        .arg("--config")
        .arg(&config)
        .args(["config", "get", "extraction.context_window"])
        .assert()
        .success()
        .stdout(predicate::str::contains("300"));
}
