use actix_session::Session;
use actix_web::{HttpResponse, web};

use crate::auth::session::require_admin;
use crate::errors::AppError;
use crate::ledger;
use crate::models::session::SessionForm;
use crate::store::Store;

/// GET /api/sessions - all sessions, sorted by date
pub async fn list(store: web::Data<Store>) -> Result<HttpResponse, AppError> {
    let mut sessions = store.read(|doc| doc.sessions.clone());
    sessions.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.start.cmp(&b.start)));
    Ok(HttpResponse::Ok().json(sessions))
}

/// POST /api/sessions - admin
pub async fn create(
    store: web::Data<Store>,
    session: Session,
    body: web::Json<SessionForm>,
) -> Result<HttpResponse, AppError> {
    require_admin(&session)?;
    let form = body.into_inner();
    form.validate()?;
    let created = store.update(|doc| {
        let id = doc.mint_id();
        let created = form.into_session(id);
        doc.sessions.push(created.clone());
        Ok(created)
    })?;
    log::info!("Created session {} on {}", created.id, created.date);
    Ok(HttpResponse::Created().json(created))
}

/// PUT /api/sessions/{id} - admin, full-record update. Capacity changes
/// never evict already-registered members.
pub async fn update(
    store: web::Data<Store>,
    session: Session,
    path: web::Path<String>,
    body: web::Json<SessionForm>,
) -> Result<HttpResponse, AppError> {
    require_admin(&session)?;
    let id = path.into_inner();
    let form = body.into_inner();
    form.validate()?;
    let updated = store.update(|doc| {
        let slot = doc
            .sessions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(AppError::NotFound("session"))?;
        *slot = form.into_session(id.clone());
        Ok(slot.clone())
    })?;
    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /api/sessions/{id} - admin; drops the session's entire roster
pub async fn delete(
    store: web::Data<Store>,
    session: Session,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    require_admin(&session)?;
    let id = path.into_inner();
    store.update(|doc| {
        if doc.session(&id).is_none() {
            return Err(AppError::NotFound("session"));
        }
        doc.sessions.retain(|s| s.id != id);
        ledger::cascade_delete_session(doc, &id);
        Ok(())
    })?;
    log::info!("Deleted session {id}");
    Ok(HttpResponse::NoContent().finish())
}
