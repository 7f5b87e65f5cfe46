use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::auth::session::require_admin;
use crate::errors::AppError;
use crate::store::{Store, document_from_value};

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub timestamp: String,
}

/// GET /api/health
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(Health {
        status: "ok",
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// GET /api/data - the whole document, for backup or inspection
pub async fn export(store: web::Data<Store>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(store.read(|doc| doc.clone())))
}

#[derive(Debug, Serialize)]
pub struct ImportSummary {
    pub members: usize,
    pub sessions: usize,
    pub attendance_records: usize,
}

/// PUT /api/data - admin bulk import, replacing the current document.
/// Legacy-shaped documents are migrated on the way in.
pub async fn import(
    store: web::Data<Store>,
    session: Session,
    body: web::Json<serde_json::Value>,
) -> Result<HttpResponse, AppError> {
    require_admin(&session)?;
    let doc = document_from_value(body.into_inner()).map_err(|e| match e {
        AppError::Json(err) => AppError::Validation(format!("Invalid document: {err}")),
        other => other,
    })?;
    let summary = ImportSummary {
        members: doc.members.len(),
        sessions: doc.sessions.len(),
        attendance_records: doc.attendance.values().map(|roster| roster.len()).sum(),
    };
    store.replace(doc)?;
    log::info!(
        "Imported document: {} members, {} sessions, {} attendance records",
        summary.members,
        summary.sessions,
        summary.attendance_records
    );
    Ok(HttpResponse::Ok().json(summary))
}
