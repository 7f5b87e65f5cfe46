//! Shared test fixtures: members, sessions, pre-seeded documents and a
//! tempfile-backed store.

use tempfile::TempDir;

use climbclub::models::document::Document;
use climbclub::models::member::Member;
use climbclub::models::session::Session;
use climbclub::store::Store;

pub fn member(id: &str, name: &str) -> Member {
    Member {
        id: id.to_string(),
        name: name.to_string(),
        email: String::new(),
        belay: false,
        emergency: String::new(),
        pr: String::new(),
        notes: String::new(),
    }
}

pub fn session(id: &str, date: &str, capacity: u32) -> Session {
    Session {
        id: id.to_string(),
        date: date.to_string(),
        location: "Grip Sluppen".to_string(),
        start: "19:00".to_string(),
        end: "21:00".to_string(),
        discipline: "Bouldering".to_string(),
        capacity,
        notes: String::new(),
    }
}

/// Four members plus s1 (capacity 2) and s2 (unlimited). The sequence
/// counter continues at 10.
pub fn seeded_document() -> Document {
    Document {
        members: vec![
            member("m1", "Anna Hansen"),
            member("m2", "Erik Normann"),
            member("m3", "Magnus Moldekleiv"),
            member("m4", "Diana Berg"),
        ],
        sessions: vec![session("s1", "2026-09-02", 2), session("s2", "2026-09-04", 0)],
        attendance: Default::default(),
        seq: 10,
    }
}

/// A store backed by a fresh temp directory. The TempDir must be kept
/// alive for the backing file to remain valid.
pub fn setup_store() -> (TempDir, Store) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = Store::open(dir.path().join("club.json")).expect("Failed to open store");
    (dir, store)
}
