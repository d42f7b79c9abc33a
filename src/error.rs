use rocket::http::Status;
use rocket::response::{self, Responder};
use rocket::serde::json::Json;
use rocket::{Request, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::auth::{CredentialError, OtpError};
use crate::config::ConfigError;
use crate::mail::MailError;
use crate::payload::PayloadError;
use crate::report::ReportError;

/// Every failure a route can report. Rendered as `{success: false, message}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    AuthFailure(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("No expenses found for this user/category.")]
    EmptyDataset,
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Internal(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn status(&self) -> Status {
        match self {
            ApiError::NotFound(_) | ApiError::EmptyDataset => Status::NotFound,
            ApiError::Validation(_) | ApiError::AuthFailure(_) => Status::BadRequest,
            ApiError::Unauthorized(_) => Status::Unauthorized,
            ApiError::Database(_)
            | ApiError::Pool(_)
            | ApiError::Io(_)
            | ApiError::Internal(_) => Status::InternalServerError,
        }
    }

    pub fn user_not_found() -> Self {
        ApiError::NotFound("User not found".to_string())
    }
}

impl From<PayloadError> for ApiError {
    fn from(err: PayloadError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<OtpError> for ApiError {
    fn from(err: OtpError) -> Self {
        ApiError::AuthFailure(err.to_string())
    }
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::EmptyDataset => ApiError::EmptyDataset,
            ReportError::Render(reason) => ApiError::Internal(reason),
        }
    }
}

impl From<CredentialError> for ApiError {
    fn from(err: CredentialError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<MailError> for ApiError {
    fn from(err: MailError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        let status = self.status();
        let message = if status == Status::InternalServerError {
            error!(error = %self, path = %req.uri(), "request failed");
            "Something went wrong, please try again later.".to_string()
        } else {
            self.to_string()
        };
        let body = Json(json!({ "success": false, "message": message }));
        Response::build_from(body.respond_to(req)?)
            .status(status)
            .ok()
    }
}
