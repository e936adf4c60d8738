use rusqlite::Connection;
use std::path::Path;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use suite_core::{Contact, ContactRepository, ContactStore, ContactUpdate, RepoError};

fn open_store(dir: &Path) -> ContactStore {
    ContactStore::open(dir.join("contacts.db")).unwrap()
}

#[test]
fn open_creates_file_and_is_repeatable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contacts.db");
    assert!(!path.exists());

    let store = ContactStore::open(&path).unwrap();
    assert!(path.exists());
    assert_eq!(store.path(), path.as_path());

    store.initialize().unwrap();
    ContactStore::open(&path).unwrap();
    assert!(store.list_contacts().unwrap().is_empty());
}

#[test]
fn lifecycle_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(dir.path());

    assert!(store
        .add_contact(&Contact::new("Ada", "555-1000").with_email("ada@x.com"))
        .unwrap());
    assert!(!store.add_contact(&Contact::new("Ada", "555-2000")).unwrap());
    assert_eq!(
        store.get_contact("Ada").unwrap(),
        Some(Contact::new("Ada", "555-1000").with_email("ada@x.com"))
    );

    let update = ContactUpdate {
        phone: Some("555-9999".to_string()),
        email: None,
    };
    assert!(store.update_contact("Ada", &update).unwrap());
    assert_eq!(
        store.get_contact("Ada").unwrap(),
        Some(Contact::new("Ada", "555-9999").with_email("ada@x.com"))
    );

    assert!(store.delete_contact("Ada").unwrap());
    assert_eq!(store.get_contact("Ada").unwrap(), None);
}

#[test]
fn records_survive_reopening_the_store() {
    let dir = tempfile::tempdir().unwrap();
    {
        let store = open_store(dir.path());
        store.add_contact(&Contact::new("Bob", "555-2000")).unwrap();
    }

    let reopened = open_store(dir.path());
    assert_eq!(
        reopened.get_contact("Bob").unwrap(),
        Some(Contact::new("Bob", "555-2000"))
    );
}

#[test]
fn list_length_tracks_adds_minus_deletes() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(dir.path());

    let names = ["Eve", "Dan", "Cat", "Ann", "Ben"];
    let mut added = 0;
    for name in names {
        if store.add_contact(&Contact::new(name, "555")).unwrap() {
            added += 1;
        }
    }
    // duplicates and misses must not move the count
    store.add_contact(&Contact::new("Ann", "000")).unwrap();
    let mut deleted = 0;
    for name in ["Dan", "Zed", "Dan"] {
        if store.delete_contact(name).unwrap() {
            deleted += 1;
        }
    }

    let listed = store.list_contacts().unwrap();
    assert_eq!(listed.len(), added - deleted);
    let listed_names: Vec<&str> = listed.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(listed_names, ["Ann", "Ben", "Cat", "Eve"]);
}

#[test]
fn two_store_handles_share_the_same_file() {
    let dir = tempfile::tempdir().unwrap();
    let first = open_store(dir.path());
    let second = open_store(dir.path());

    first.add_contact(&Contact::new("Ada", "1")).unwrap();
    assert!(!second.add_contact(&Contact::new("Ada", "2")).unwrap());
    assert!(second.delete_contact("Ada").unwrap());
    assert!(first.get_contact("Ada").unwrap().is_none());
}

#[test]
fn unopenable_path_propagates_storage_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing-dir").join("contacts.db");

    let err = ContactStore::open(&path).unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));
}

#[test]
fn update_waits_for_concurrent_writer_to_commit() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(dir.path());
    store.add_contact(&Contact::new("Ada", "1")).unwrap();

    let path = store.path().to_path_buf();
    let (locked_tx, locked_rx) = mpsc::channel();
    let writer = thread::spawn(move || {
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(
            "BEGIN IMMEDIATE;
             INSERT INTO contacts (name, phone) VALUES ('Cy', '3');",
        )
        .unwrap();
        locked_tx.send(()).unwrap();
        thread::sleep(Duration::from_millis(300));
        conn.execute_batch("COMMIT;").unwrap();
    });

    locked_rx.recv().unwrap();
    let update = ContactUpdate {
        phone: Some("9".to_string()),
        email: None,
    };
    let updated = store.update_contact("Ada", &update).unwrap();
    writer.join().unwrap();

    assert!(updated);
    assert_eq!(store.get_contact("Ada").unwrap().unwrap().phone, "9");
    assert!(store.get_contact("Cy").unwrap().is_some());
}
