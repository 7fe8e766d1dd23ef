use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;
use std::path::Path;

mod common;
use common::{Sandbox, init_sandbox};

#[test]
fn test_init_creates_database() {
    let sb = Sandbox::new();
    sb.kpr()
        .arg("init")
        .assert()
        .success()
        .stdout(contains("Database initialized"));
    assert!(Path::new(&sb.db).exists());
    // Test mode writes no config file.
    assert!(!sb.root().join(".kpr").join("kpr.conf").exists());
}

#[test]
fn test_commands_create_schema_lazily() {
    let sb = Sandbox::new();
    sb.kpr()
        .args(["note", "list"])
        .assert()
        .success()
        .stdout(contains("No note records found."));
}

#[test]
fn test_unusable_storage_is_reported() {
    let sb = Sandbox::new();
    fs::write(&sb.db, vec![b'x'; 4096]).unwrap();

    sb.kpr()
        .args(["note", "list"])
        .assert()
        .failure()
        .stderr(contains("Storage unavailable"));
}

#[test]
fn test_db_tables_summary_schema() {
    let sb = init_sandbox();
    sb.kpr().args(["note", "add", "a", "b"]).assert().success();

    sb.kpr()
        .args(["db", "--tables"])
        .assert()
        .success()
        .stdout(contains("completed_todos").and(contains("service_hours")));

    sb.kpr()
        .args(["db", "--summary"])
        .assert()
        .success()
        .stdout(contains("│ notes           │ 1    │"));

    sb.kpr()
        .args(["db", "--schema", "hours"])
        .assert()
        .success()
        .stdout(contains("hours_worked"));

    sb.kpr()
        .args(["db", "--schema", "nope"])
        .assert()
        .failure()
        .stderr(contains("unknown table"));
}

#[test]
fn test_db_check_and_vacuum() {
    let sb = init_sandbox();
    sb.kpr()
        .args(["db", "--check", "--vacuum", "--info"])
        .assert()
        .success()
        .stdout(contains("Integrity check passed"))
        .stdout(contains("Vacuum completed"))
        .stdout(contains("• Size:"));
}

#[test]
fn test_log_print_records_mutations() {
    let sb = init_sandbox();
    sb.kpr().args(["note", "add", "a", "b"]).assert().success();
    sb.kpr().args(["note", "delete", "1", "-y"]).assert().success();

    sb.kpr()
        .args(["log", "--print"])
        .assert()
        .success()
        .stdout(contains("init"))
        .stdout(contains("add (note #1)"))
        .stdout(contains("del (note #1)"));
}

#[test]
fn test_backup_plain_and_force() {
    let sb = init_sandbox();
    let dest = sb.path("backup.db");

    sb.kpr()
        .args(["backup", "--file", dest.to_str().unwrap()])
        .assert()
        .success()
        .stdout(contains("Backup created"));
    assert!(dest.exists());

    // Existing destination: declining the prompt keeps the old file.
    fs::write(&dest, "old").unwrap();
    sb.kpr()
        .args(["backup", "--file", dest.to_str().unwrap()])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Backup cancelled"));
    assert_eq!(fs::read_to_string(&dest).unwrap(), "old");

    sb.kpr()
        .args(["backup", "--file", dest.to_str().unwrap(), "--force"])
        .assert()
        .success();
    assert_ne!(fs::read(&dest).unwrap(), b"old");
}

#[test]
fn test_backup_compressed() {
    let sb = init_sandbox();
    let dest = sb.path("backup.db");

    sb.kpr()
        .args(["backup", "--file", dest.to_str().unwrap(), "--compress"])
        .assert()
        .success()
        .stdout(contains("backup.zip"));
    assert!(sb.path("backup.zip").exists());
    assert!(!dest.exists());
}

#[test]
fn test_config_print() {
    let sb = Sandbox::new();
    sb.kpr()
        .args(["config", "--print"])
        .assert()
        .success()
        .stdout(contains("log_backups: 3"))
        .stdout(contains(sb.db.as_str()));
}
