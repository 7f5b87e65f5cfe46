use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::auth::session::require_admin;
use crate::errors::AppError;
use crate::ledger;
use crate::models::attendance::AttendanceRecord;
use crate::store::Store;

/// Body for the register/unregister/attend convenience routes. The acting
/// member is always an explicit parameter, never ambient state.
#[derive(Debug, Deserialize)]
pub struct MemberRef {
    pub member_id: String,
}

#[derive(Debug, Deserialize)]
pub struct AttendForm {
    pub member_id: String,
    #[serde(default = "default_attended")]
    pub attended: bool,
}

fn default_attended() -> bool {
    true
}

/// GET /api/attendance - the full sessionId -> memberId -> record mapping
pub async fn list(store: web::Data<Store>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(store.read(|doc| doc.attendance.clone())))
}

/// GET /api/sessions/{id}/attendance - one session's roster
pub async fn roster(
    store: web::Data<Store>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let session_id = path.into_inner();
    let roster = store
        .read(|doc| {
            doc.session(&session_id)
                .map(|_| doc.attendance.get(&session_id).cloned().unwrap_or_default())
        })
        .ok_or(AppError::NotFound("session"))?;
    Ok(HttpResponse::Ok().json(roster))
}

/// GET /api/sessions/{id}/occupancy
pub async fn occupancy(
    store: web::Data<Store>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let session_id = path.into_inner();
    let occ = store.read(|doc| ledger::occupancy(doc, &session_id))?;
    Ok(HttpResponse::Ok().json(occ))
}

/// POST /api/sessions/{id}/register - responds with updated occupancy
pub async fn register(
    store: web::Data<Store>,
    path: web::Path<String>,
    body: web::Json<MemberRef>,
) -> Result<HttpResponse, AppError> {
    let session_id = path.into_inner();
    let occ = store.update(|doc| {
        ledger::register(doc, &session_id, &body.member_id)?;
        Ok(ledger::occupancy(doc, &session_id)?)
    })?;
    Ok(HttpResponse::Ok().json(occ))
}

/// POST /api/sessions/{id}/unregister
pub async fn unregister(
    store: web::Data<Store>,
    path: web::Path<String>,
    body: web::Json<MemberRef>,
) -> Result<HttpResponse, AppError> {
    let session_id = path.into_inner();
    let occ = store.update(|doc| {
        ledger::unregister(doc, &session_id, &body.member_id)?;
        Ok(ledger::occupancy(doc, &session_id)?)
    })?;
    Ok(HttpResponse::Ok().json(occ))
}

/// POST /api/sessions/{id}/attend - mark or clear attendance; walk-ins
/// are allowed, so no capacity check applies here
pub async fn attend(
    store: web::Data<Store>,
    path: web::Path<String>,
    body: web::Json<AttendForm>,
) -> Result<HttpResponse, AppError> {
    let session_id = path.into_inner();
    let status = store.update(|doc| {
        ledger::mark_attended(doc, &session_id, &body.member_id, body.attended)?;
        Ok(ledger::status_for(doc, &session_id, &body.member_id))
    })?;
    Ok(HttpResponse::Ok().json(status))
}

/// PUT /api/attendance/{session_id}/{member_id} - admin upsert of a full
/// record, used by the roster management view
pub async fn put_record(
    store: web::Data<Store>,
    session: Session,
    path: web::Path<(String, String)>,
    body: web::Json<AttendanceRecord>,
) -> Result<HttpResponse, AppError> {
    require_admin(&session)?;
    let (session_id, member_id) = path.into_inner();
    let record = body.into_inner();
    store.update(|doc| Ok(ledger::put_record(doc, &session_id, &member_id, record)?))?;
    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /api/attendance/{session_id}/{member_id} - admin hard delete
pub async fn remove_record(
    store: web::Data<Store>,
    session: Session,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    require_admin(&session)?;
    let (session_id, member_id) = path.into_inner();
    store.update(|doc| Ok(ledger::remove_record(doc, &session_id, &member_id)?))?;
    Ok(HttpResponse::NoContent().finish())
}
