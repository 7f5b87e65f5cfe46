use serde::{Deserialize, Serialize};

/// Per-(session, member) attendance record. `registered` and `attended`
/// are independent: a walk-in can be attended without ever registering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    #[serde(default)]
    pub registered: bool,
    #[serde(default)]
    pub attended: bool,
    #[serde(default)]
    pub notes: String,
}

impl AttendanceRecord {
    /// A record carrying no information is equivalent to "no record" and
    /// is removed rather than stored.
    pub fn is_empty(&self) -> bool {
        !self.registered && !self.attended && self.notes.is_empty()
    }
}

/// Where a member stands with respect to one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    NotRegistered,
    Registered,
    Attended,
}
