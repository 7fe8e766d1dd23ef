use kpr::core::{HourTracker, NoteManager, ToDoManager};
use kpr::db::Storage;
use kpr::errors::AppError;
use kpr::models::HourEntryUpdate;

fn storage() -> (tempfile::TempDir, Storage) {
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::new(dir.path().join("kpr.db"));
    (dir, storage)
}

#[test]
fn test_service_hours_round_trip() {
    let (_dir, s) = storage();
    let hours = HourTracker::new(&s).unwrap();

    hours.set_total(40.0).unwrap();
    assert_eq!(hours.remaining().unwrap(), 40.0);

    let entry = hours.log_hours("Shelter", 5.0, Some("2024-01-01")).unwrap();
    assert_eq!(hours.remaining().unwrap(), 35.0);

    hours
        .update_entry(
            entry.id,
            HourEntryUpdate {
                hours: Some(8.0),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(hours.remaining().unwrap(), 32.0);

    hours.delete_entry(entry.id).unwrap();
    assert_eq!(hours.remaining().unwrap(), 40.0);
}

#[test]
fn test_note_search_finds_inserted_record() {
    let (_dir, s) = storage();
    let notes = NoteManager::new(&s).unwrap();

    let x = notes.add("Groceries", "Milk, eggs").unwrap().id;
    let hits = notes.search("milk").unwrap();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, x);
}

#[test]
fn test_completed_todo_leaves_active_list() {
    let (_dir, s) = storage();
    let todos = ToDoManager::new(&s).unwrap();

    let y = todos.add("Write report", Some("2024-03-01")).unwrap();
    todos.complete(y.id).unwrap();

    assert!(todos.list().unwrap().iter().all(|t| t.uuid != y.uuid));
    let archived: Vec<_> = todos
        .list_completed()
        .unwrap()
        .into_iter()
        .filter(|t| t.uuid == y.uuid)
        .collect();
    assert_eq!(archived.len(), 1);
    assert!(archived[0].completed_at >= y.created_at);
}

#[test]
fn test_managers_share_one_database() {
    let (_dir, s) = storage();
    let notes = NoteManager::new(&s).unwrap();
    let todos = ToDoManager::new(&s).unwrap();

    notes.add("n", "").unwrap();
    todos.add("t", None).unwrap();

    // Reopening the same file sees both records.
    let reopened = Storage::new(s.path());
    assert_eq!(NoteManager::new(&reopened).unwrap().list().unwrap().len(), 1);
    assert_eq!(ToDoManager::new(&reopened).unwrap().list().unwrap().len(), 1);
}

#[test]
fn test_missing_ids_are_not_found_everywhere() {
    let (_dir, s) = storage();
    let notes = NoteManager::new(&s).unwrap();
    let todos = ToDoManager::new(&s).unwrap();
    let hours = HourTracker::new(&s).unwrap();

    assert!(matches!(notes.delete(1), Err(AppError::NotFound { .. })));
    assert!(matches!(todos.delete(1), Err(AppError::NotFound { .. })));
    assert!(matches!(hours.delete_entry(1), Err(AppError::NotFound { .. })));
}

#[test]
fn test_legacy_database_with_negative_hours_still_opens() {
    let (_dir, s) = storage();
    let conn = rusqlite::Connection::open(s.path()).unwrap();
    conn.execute_batch(
        "CREATE TABLE hours (
             id TEXT PRIMARY KEY, job_name TEXT NOT NULL,
             hours_worked REAL NOT NULL, date TEXT NOT NULL
         );
         CREATE TABLE service_hours (
             id INTEGER PRIMARY KEY, total_hours REAL NOT NULL, remaining_hours REAL NOT NULL
         );
         INSERT INTO hours VALUES ('e1', 'Shelter', 3.0, '2024-01-04');
         INSERT INTO hours VALUES ('e2', 'Correction', -1.5, '2024-01-05');
         INSERT INTO service_hours VALUES (1, 40, 38.5);",
    )
    .unwrap();
    drop(conn);

    let hours = HourTracker::new(&s).unwrap();
    let entries = hours.list(None).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1].hours_worked, -1.5);
    assert_eq!(hours.remaining().unwrap(), 38.5);

    // New writes still go through validation.
    assert!(matches!(
        hours.log_hours("Shelter", -1.0, None),
        Err(AppError::Validation(_))
    ));
}
