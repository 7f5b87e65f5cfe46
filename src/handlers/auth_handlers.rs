use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};

use crate::auth::AdminCredentials;
use crate::auth::password;
use crate::auth::session::{grant_admin, is_admin};
use crate::errors::{ApiErrorResponse, AppError};

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthStatus {
    pub admin: bool,
}

/// POST /api/auth/login - verify the admin password and mark the session
pub async fn login(
    creds: web::Data<AdminCredentials>,
    session: Session,
    body: web::Json<LoginForm>,
) -> Result<HttpResponse, AppError> {
    if password::verify_password(&body.password, &creds.password_hash)? {
        grant_admin(&session);
        log::info!("Admin login");
        Ok(HttpResponse::Ok().json(AuthStatus { admin: true }))
    } else {
        log::warn!("Failed admin login attempt");
        Ok(HttpResponse::Unauthorized().json(ApiErrorResponse {
            error: "Invalid password".to_string(),
        }))
    }
}

/// POST /api/auth/logout
pub async fn logout(session: Session) -> HttpResponse {
    session.purge();
    HttpResponse::Ok().json(AuthStatus { admin: false })
}

/// GET /api/auth/status
pub async fn status(session: Session) -> HttpResponse {
    HttpResponse::Ok().json(AuthStatus {
        admin: is_admin(&session),
    })
}
