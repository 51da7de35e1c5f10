//! Integration tests for the audit log store

use std::sync::Arc;
use std::thread;

use clinicbot::core::AuditStore;
use clinicbot::types::{LogRecord, Turn};

fn temp_store() -> (tempfile::TempDir, AuditStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = AuditStore::new(dir.path().join("user_logs.db"));
    (dir, store)
}

/// Schema creation is idempotent and never touches existing rows
#[test]
fn test_ensure_schema_is_idempotent() {
    let (_dir, store) = temp_store();

    store.ensure_schema().unwrap();
    store.append(&LogRecord::from_turn(&Turn::new("greet", "hi"))).unwrap();
    store.ensure_schema().unwrap();
    store.ensure_schema().unwrap();

    assert_eq!(store.count().unwrap(), 1);
}

/// Ids are assigned in append order
#[test]
fn test_ids_increase() {
    let (_dir, store) = temp_store();
    store.ensure_schema().unwrap();

    let first = store.append(&LogRecord::from_turn(&Turn::new("a", ""))).unwrap();
    let second = store.append(&LogRecord::from_turn(&Turn::new("b", ""))).unwrap();

    assert!(second > first);
}

/// Null slots are stored as NULL, not as empty strings
#[test]
fn test_null_columns_survive() {
    let (_dir, store) = temp_store();
    store.ensure_schema().unwrap();

    let turn = Turn::new("ask_doctor", "who is my doctor").with_empty_slot("doctor_name");
    store.append(&LogRecord::from_turn(&turn)).unwrap();

    let row = &store.recent(1).unwrap()[0];
    assert_eq!(row.record.doctor, None);
    assert_eq!(row.record.department, None);
    assert_eq!(row.record.user_message.as_deref(), Some("who is my doctor"));
}

/// Concurrent writers each get their own connection; no rows are lost
#[test]
fn test_concurrent_appends() {
    let (_dir, store) = temp_store();
    store.ensure_schema().unwrap();
    let store = Arc::new(store);

    let writers: Vec<_> = (0..8)
        .map(|w| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..25 {
                    let turn = Turn::new(format!("writer_{w}"), format!("message {i}"));
                    store.append(&LogRecord::from_turn(&turn)).unwrap();
                }
            })
        })
        .collect();

    for writer in writers {
        writer.join().unwrap();
    }

    assert_eq!(store.count().unwrap(), 200);
    let rows = store.recent(500).unwrap();
    assert_eq!(rows.len(), 200);
    assert!(rows.windows(2).all(|w| w[0].id < w[1].id));
}
