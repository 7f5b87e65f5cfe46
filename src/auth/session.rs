use actix_session::Session;

use crate::errors::AppError;

const ADMIN_KEY: &str = "is_admin";

pub fn is_admin(session: &Session) -> bool {
    session
        .get::<bool>(ADMIN_KEY)
        .unwrap_or(None)
        .unwrap_or(false)
}

pub fn grant_admin(session: &Session) {
    let _ = session.insert(ADMIN_KEY, true);
}

/// Guard for admin-only handlers. The server is the authorization
/// boundary; handlers trust nothing from the client beyond the session.
pub fn require_admin(session: &Session) -> Result<(), AppError> {
    if is_admin(session) {
        Ok(())
    } else {
        Err(AppError::Unauthorized)
    }
}
