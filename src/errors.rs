use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;

use crate::ledger::LedgerError;

/// JSON body for all error responses.
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: String,
}

#[derive(Debug)]
pub enum AppError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Validation(String),
    Unauthorized,
    NotFound(&'static str),
    Full,
    Hash(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Io(e) => write!(f, "I/O error: {e}"),
            AppError::Json(e) => write!(f, "JSON error: {e}"),
            AppError::Validation(msg) => write!(f, "{msg}"),
            AppError::Unauthorized => write!(f, "Admin access required"),
            AppError::NotFound(what) => write!(f, "{what} not found"),
            AppError::Full => write!(f, "Session is full"),
            AppError::Hash(e) => write!(f, "Hash error: {e}"),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let body = ApiErrorResponse {
            error: self.to_string(),
        };
        match self {
            AppError::Validation(_) => HttpResponse::BadRequest().json(body),
            AppError::Unauthorized => HttpResponse::Unauthorized().json(body),
            AppError::NotFound(_) => HttpResponse::NotFound().json(body),
            AppError::Full => HttpResponse::Conflict().json(body),
            _ => {
                log::error!("{self}");
                HttpResponse::InternalServerError().json(ApiErrorResponse {
                    error: "Internal server error".to_string(),
                })
            }
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Io(e)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Json(e)
    }
}

impl From<LedgerError> for AppError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::SessionNotFound => AppError::NotFound("session"),
            LedgerError::MemberNotFound => AppError::NotFound("member"),
            LedgerError::Full => AppError::Full,
        }
    }
}
