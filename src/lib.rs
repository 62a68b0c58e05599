pub mod classify;
pub mod config;
pub mod model;
pub mod notify;
pub mod reminder;
pub mod reservations;
pub mod session;
pub mod store;

use std::sync::Arc;

use axum::{extract::FromRef, http::StatusCode, response::{IntoResponse, Response}};
use thiserror::Error;

use crate::notify::ChannelNotifier;
use crate::session::Session;
use crate::store::ReservationStore;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub store: Arc<dyn ReservationStore>,
    pub session: Arc<Session>,
    pub notifier: Arc<ChannelNotifier>,
}

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("store write failed: {0}")]
    StoreWrite(#[from] sqlx::Error),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("notifications are not available on this platform")]
    UnsupportedPlatform,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::StoreWrite(_) => StatusCode::BAD_GATEWAY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::UnsupportedPlatform => StatusCode::NOT_IMPLEMENTED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        (status, self.to_string()).into_response()
    }
}
