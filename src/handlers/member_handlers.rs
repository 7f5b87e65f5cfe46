use actix_session::Session;
use actix_web::{HttpResponse, web};

use crate::auth::session::require_admin;
use crate::errors::AppError;
use crate::ledger;
use crate::models::member::MemberForm;
use crate::store::Store;

/// GET /api/members - all members, sorted by name
pub async fn list(store: web::Data<Store>) -> Result<HttpResponse, AppError> {
    let mut members = store.read(|doc| doc.members.clone());
    members.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(HttpResponse::Ok().json(members))
}

/// POST /api/members - open to everyone: members add themselves
pub async fn create(
    store: web::Data<Store>,
    body: web::Json<MemberForm>,
) -> Result<HttpResponse, AppError> {
    let form = body.into_inner();
    form.validate()?;
    let member = store.update(|doc| {
        let id = doc.mint_id();
        let member = form.into_member(id);
        doc.members.push(member.clone());
        Ok(member)
    })?;
    log::info!("Created member {} ({})", member.name, member.id);
    Ok(HttpResponse::Created().json(member))
}

/// PUT /api/members/{id} - full-record update
pub async fn update(
    store: web::Data<Store>,
    path: web::Path<String>,
    body: web::Json<MemberForm>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let form = body.into_inner();
    form.validate()?;
    let member = store.update(|doc| {
        let slot = doc
            .members
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(AppError::NotFound("member"))?;
        *slot = form.into_member(id.clone());
        Ok(slot.clone())
    })?;
    Ok(HttpResponse::Ok().json(member))
}

/// DELETE /api/members/{id} - admin; removes the member from every
/// session's roster as well
pub async fn delete(
    store: web::Data<Store>,
    session: Session,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    require_admin(&session)?;
    let id = path.into_inner();
    store.update(|doc| {
        if doc.member(&id).is_none() {
            return Err(AppError::NotFound("member"));
        }
        doc.members.retain(|m| m.id != id);
        ledger::cascade_delete_member(doc, &id);
        Ok(())
    })?;
    log::info!("Deleted member {id}");
    Ok(HttpResponse::NoContent().finish())
}
