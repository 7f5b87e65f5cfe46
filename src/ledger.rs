//! Attendance ledger: the rules for how a member's relationship to one
//! session evolves (unregistered -> registered -> attended).
//!
//! Capacity only gates registration. Marking attendance is always allowed,
//! so walk-ins can be recorded without a prior registration and without
//! counting against capacity. Unregistration is a soft delete: the
//! `registered` flag is cleared but recorded attendance survives. Records
//! that end up carrying no information are removed from the mapping.
//!
//! Operations are synchronous read-modify-write on the in-memory document;
//! the store serializes access behind its mutex.

use std::fmt;

use serde::Serialize;

use crate::models::attendance::{AttendanceRecord, Status};
use crate::models::document::Document;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerError {
    SessionNotFound,
    MemberNotFound,
    /// Registration refused: the session is at capacity and the member is
    /// not already registered.
    Full,
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerError::SessionNotFound => write!(f, "session not found"),
            LedgerError::MemberNotFound => write!(f, "member not found"),
            LedgerError::Full => write!(f, "session is full"),
        }
    }
}

impl std::error::Error for LedgerError {}

/// Registered head count and capacity for one session. `capacity` is
/// `None` when the session is unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Occupancy {
    pub registered: usize,
    pub capacity: Option<u32>,
}

fn check_session(doc: &Document, session_id: &str) -> Result<(), LedgerError> {
    if doc.session(session_id).is_none() {
        return Err(LedgerError::SessionNotFound);
    }
    Ok(())
}

fn check_pair(doc: &Document, session_id: &str, member_id: &str) -> Result<(), LedgerError> {
    check_session(doc, session_id)?;
    if doc.member(member_id).is_none() {
        return Err(LedgerError::MemberNotFound);
    }
    Ok(())
}

/// Apply `mutate` to the (possibly new) record for the pair, then drop the
/// record and its roster again if they end up semantically empty. Callers
/// must have validated the pair first.
fn upsert<F>(doc: &mut Document, session_id: &str, member_id: &str, mutate: F)
where
    F: FnOnce(&mut AttendanceRecord),
{
    let roster = doc.attendance.entry(session_id.to_string()).or_default();
    let record = roster.entry(member_id.to_string()).or_default();
    mutate(record);
    if record.is_empty() {
        roster.remove(member_id);
    }
    if roster.is_empty() {
        doc.attendance.remove(session_id);
    }
}

/// Register a member for a session. Idempotent: registering twice is a
/// no-op and never touches recorded attendance or notes.
pub fn register(doc: &mut Document, session_id: &str, member_id: &str) -> Result<(), LedgerError> {
    check_pair(doc, session_id, member_id)?;
    let already = doc
        .attendance
        .get(session_id)
        .and_then(|roster| roster.get(member_id))
        .is_some_and(|record| record.registered);
    if !already && is_full(doc, session_id)? {
        return Err(LedgerError::Full);
    }
    upsert(doc, session_id, member_id, |record| record.registered = true);
    Ok(())
}

/// Drop a member's registration, keeping any recorded attendance. The
/// record disappears entirely only once it carries no information.
pub fn unregister(doc: &mut Document, session_id: &str, member_id: &str) -> Result<(), LedgerError> {
    check_pair(doc, session_id, member_id)?;
    upsert(doc, session_id, member_id, |record| record.registered = false);
    Ok(())
}

/// Set or clear the attended flag. Not capacity-checked: capacity gates
/// registration, not physical attendance.
pub fn mark_attended(
    doc: &mut Document,
    session_id: &str,
    member_id: &str,
    value: bool,
) -> Result<(), LedgerError> {
    check_pair(doc, session_id, member_id)?;
    upsert(doc, session_id, member_id, |record| record.attended = value);
    Ok(())
}

/// Free-text note on the pair, no validation.
pub fn set_notes(
    doc: &mut Document,
    session_id: &str,
    member_id: &str,
    text: &str,
) -> Result<(), LedgerError> {
    check_pair(doc, session_id, member_id)?;
    upsert(doc, session_id, member_id, |record| {
        record.notes = text.to_string()
    });
    Ok(())
}

/// Admin upsert of a full record (roster editing). Not capacity-checked.
pub fn put_record(
    doc: &mut Document,
    session_id: &str,
    member_id: &str,
    record: AttendanceRecord,
) -> Result<(), LedgerError> {
    check_pair(doc, session_id, member_id)?;
    upsert(doc, session_id, member_id, |slot| *slot = record);
    Ok(())
}

/// Admin hard delete of a record, attendance history included.
pub fn remove_record(
    doc: &mut Document,
    session_id: &str,
    member_id: &str,
) -> Result<(), LedgerError> {
    check_pair(doc, session_id, member_id)?;
    if let Some(roster) = doc.attendance.get_mut(session_id) {
        roster.remove(member_id);
        if roster.is_empty() {
            doc.attendance.remove(session_id);
        }
    }
    Ok(())
}

/// Remove a member from every session's roster. Called after the member
/// itself has been deleted, so there is no existence check.
pub fn cascade_delete_member(doc: &mut Document, member_id: &str) {
    doc.attendance.retain(|_, roster| {
        roster.remove(member_id);
        !roster.is_empty()
    });
}

/// Drop the entire roster of a deleted session.
pub fn cascade_delete_session(doc: &mut Document, session_id: &str) {
    doc.attendance.remove(session_id);
}

pub fn registered_count(doc: &Document, session_id: &str) -> usize {
    doc.attendance
        .get(session_id)
        .map(|roster| roster.values().filter(|r| r.registered).count())
        .unwrap_or(0)
}

fn capacity_of(doc: &Document, session_id: &str) -> Option<u32> {
    doc.session(session_id)
        .map(|s| s.capacity)
        .filter(|&cap| cap > 0)
}

pub fn occupancy(doc: &Document, session_id: &str) -> Result<Occupancy, LedgerError> {
    check_session(doc, session_id)?;
    Ok(Occupancy {
        registered: registered_count(doc, session_id),
        capacity: capacity_of(doc, session_id),
    })
}

pub fn is_full(doc: &Document, session_id: &str) -> Result<bool, LedgerError> {
    let occ = occupancy(doc, session_id)?;
    Ok(occ.capacity.is_some_and(|cap| occ.registered >= cap as usize))
}

/// Tri-state status of a pair. A missing record is simply `NotRegistered`;
/// read queries never fail for an absent record.
pub fn status_for(doc: &Document, session_id: &str, member_id: &str) -> Status {
    match doc
        .attendance
        .get(session_id)
        .and_then(|roster| roster.get(member_id))
    {
        Some(record) if record.attended => Status::Attended,
        Some(record) if record.registered => Status::Registered,
        _ => Status::NotRegistered,
    }
}
