//! JSON file persistence for the club document.
//!
//! One process owns one file. Saves are whole-document, last-write-wins;
//! sharing the file between multiple server processes is not supported.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::errors::AppError;
use crate::models::document::Document;

pub struct Store {
    path: PathBuf,
    state: Mutex<Document>,
}

impl Store {
    /// Open a store backed by `path`. A missing file yields the default
    /// empty document; the file is created on first save.
    pub fn open(path: impl Into<PathBuf>) -> Result<Store, AppError> {
        let path = path.into();
        let doc = match fs::read_to_string(&path) {
            Ok(text) => parse_document(&text)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No data file at {}, starting empty", path.display());
                Document::default()
            }
            Err(e) => return Err(AppError::Io(e)),
        };
        Ok(Store {
            path,
            state: Mutex::new(doc),
        })
    }

    /// Run a read-only closure against the current document.
    pub fn read<R>(&self, f: impl FnOnce(&Document) -> R) -> R {
        let doc = self.state.lock().expect("store mutex poisoned");
        f(&doc)
    }

    /// Run a mutating closure; the document is persisted only when the
    /// closure succeeds.
    pub fn update<R>(
        &self,
        f: impl FnOnce(&mut Document) -> Result<R, AppError>,
    ) -> Result<R, AppError> {
        let mut doc = self.state.lock().expect("store mutex poisoned");
        let out = f(&mut doc)?;
        save_document(&self.path, &doc)?;
        Ok(out)
    }

    /// Replace the whole document (bulk import) and persist it.
    pub fn replace(&self, doc: Document) -> Result<(), AppError> {
        let mut guard = self.state.lock().expect("store mutex poisoned");
        save_document(&self.path, &doc)?;
        *guard = doc;
        Ok(())
    }
}

/// Parse a document from raw JSON, folding in the legacy split shape and
/// scrubbing records that carry no information.
pub fn document_from_value(value: serde_json::Value) -> Result<Document, AppError> {
    let mut value = value;
    let legacy = value
        .as_object_mut()
        .and_then(|obj| obj.remove("registrations"));
    let mut doc: Document = serde_json::from_value(value)?;

    // Legacy documents kept registrations in a separate
    // {sessionId: [memberId]} map next to the attendance records.
    if let Some(serde_json::Value::Object(registrations)) = legacy {
        for (session_id, member_ids) in registrations {
            let Some(member_ids) = member_ids.as_array() else {
                continue;
            };
            let roster = doc.attendance.entry(session_id).or_default();
            for member_id in member_ids.iter().filter_map(|v| v.as_str()) {
                roster.entry(member_id.to_string()).or_default().registered = true;
            }
        }
    }

    doc.attendance.retain(|_, roster| {
        roster.retain(|_, record| !record.is_empty());
        !roster.is_empty()
    });

    Ok(doc)
}

fn parse_document(text: &str) -> Result<Document, AppError> {
    document_from_value(serde_json::from_str(text)?)
}

/// Write to a sibling temp file and rename over the target, so a crash
/// mid-save never leaves a truncated document behind.
fn save_document(path: &Path, doc: &Document) -> Result<(), AppError> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }
    let text = serde_json::to_string_pretty(doc)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, text)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
