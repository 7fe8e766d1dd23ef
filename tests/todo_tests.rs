use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::init_sandbox;

#[test]
fn test_todo_done_moves_to_archive() {
    let sb = init_sandbox();
    sb.kpr()
        .args(["todo", "add", "Write report", "--deadline", "2024-03-01"])
        .assert()
        .success()
        .stdout(contains("To-do #1 added"));

    sb.kpr()
        .args(["todo", "done", "1"])
        .assert()
        .success()
        .stdout(contains("Write report"));

    assert!(sb.json(&["todo", "list", "--json"]).as_array().unwrap().is_empty());

    let done = sb.json(&["todo", "list", "--completed", "--json"]);
    let done = done.as_array().unwrap();
    assert_eq!(done.len(), 1);
    assert_eq!(done[0]["content"], "Write report");
    assert_eq!(done[0]["deadline"], "2024-03-01");
    assert!(done[0]["completed_at"].as_str().unwrap() >= done[0]["created_at"].as_str().unwrap());
}

#[test]
fn test_todo_done_twice_is_not_found() {
    let sb = init_sandbox();
    sb.kpr().args(["todo", "add", "Once"]).assert().success();
    sb.kpr().args(["todo", "done", "1"]).assert().success();

    sb.kpr()
        .args(["todo", "done", "1"])
        .assert()
        .failure()
        .stderr(contains("no to-do with id 1"));

    let done = sb.json(&["todo", "list", "--completed", "--json"]);
    assert_eq!(done.as_array().unwrap().len(), 1);
}

#[test]
fn test_todo_list_shows_deadline_placeholder() {
    let sb = init_sandbox();
    sb.kpr().args(["todo", "add", "Call mom"]).assert().success();

    sb.kpr()
        .args(["todo", "list"])
        .assert()
        .success()
        .stdout(contains("Call mom").and(contains("No deadline")));
}

#[test]
fn test_todo_clear_deadline() {
    let sb = init_sandbox();
    sb.kpr()
        .args(["todo", "add", "Pay rent", "--deadline", "2024-07-01"])
        .assert()
        .success();

    sb.kpr()
        .args(["todo", "update", "1", "--clear-deadline"])
        .assert()
        .success();

    let todos = sb.json(&["todo", "list", "--json"]);
    assert!(todos[0]["deadline"].is_null());
    assert_eq!(todos[0]["content"], "Pay rent");
}

#[test]
fn test_todo_invalid_deadline() {
    let sb = init_sandbox();
    sb.kpr()
        .args(["todo", "add", "Pay rent", "--deadline", "next week"])
        .assert()
        .failure();
    assert!(sb.json(&["todo", "list", "--json"]).as_array().unwrap().is_empty());
}

#[test]
fn test_todo_update_without_fields_fails() {
    let sb = init_sandbox();
    sb.kpr().args(["todo", "add", "x"]).assert().success();
    sb.kpr()
        .args(["todo", "update", "1"])
        .assert()
        .failure()
        .stderr(contains("nothing to update"));
}
