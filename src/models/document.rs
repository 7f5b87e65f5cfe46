use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::attendance::AttendanceRecord;
use super::member::Member;
use super::session::Session;

/// sessionId -> memberId -> record. BTreeMap keeps the serialized file
/// stable across saves.
pub type AttendanceMap = BTreeMap<String, BTreeMap<String, AttendanceRecord>>;

/// The entire persisted state of the club, mirroring the JSON file layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub sessions: Vec<Session>,
    #[serde(default)]
    pub attendance: AttendanceMap,
    #[serde(rename = "_seq", default = "default_seq")]
    pub seq: u64,
}

fn default_seq() -> u64 {
    1
}

impl Default for Document {
    fn default() -> Self {
        Document {
            members: Vec::new(),
            sessions: Vec::new(),
            attendance: BTreeMap::new(),
            seq: 1,
        }
    }
}

impl Document {
    /// Mint the next id from the sequence counter. Ids are never reused,
    /// even after deletions.
    pub fn mint_id(&mut self) -> String {
        let id = self.seq;
        self.seq += 1;
        id.to_string()
    }

    pub fn member(&self, id: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    pub fn session(&self, id: &str) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id == id)
    }
}
