//! Admin endpoint errors and their HTTP rendering.

use crate::discovery::ports::DiscoveryError;
use crate::host_catalog::domain::HostCatalogDomainError;
use crate::routing::services::HostSelectionError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Body returned for any unexpected failure.
const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

/// Failures surfaced by admin handlers.
#[derive(Debug, Error)]
pub enum AdminError {
    /// The command named an action the endpoint does not support.
    #[error("unsupported action '{0}'")]
    UnknownAction(String),
    /// A query parameter failed validation.
    #[error(transparent)]
    InvalidInput(#[from] HostCatalogDomainError),
    /// Host selection failed.
    #[error(transparent)]
    Selection(#[from] HostSelectionError),
    /// Discovery failed internally.
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
}

impl AdminError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::UnknownAction(_) | Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::Selection(HostSelectionError::NotAuthorized { .. }) => StatusCode::FORBIDDEN,
            Self::Selection(
                HostSelectionError::SourceSetNotFound { .. } | HostSelectionError::SourceNotFound(_),
            ) => StatusCode::NOT_FOUND,
            Self::Selection(HostSelectionError::NoHosts(_)) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Selection(
                HostSelectionError::Catalog(_)
                | HostSelectionError::Access(_)
                | HostSelectionError::Discovery(_),
            )
            | Self::Discovery(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %self, "admin request failed");
            String::from(INTERNAL_ERROR_MESSAGE)
        } else {
            self.to_string()
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
