//! API error type
//!
//! Every failure leaves the service as `{"detail": "..."}`. Input problems
//! map to 422, a missing band to 404, anything else to 500.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Message returned when a band id does not exist
pub const BAND_NOT_FOUND: &str = "Band not found";

#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed request that never reached application logic (422)
    #[error("{0}")]
    Unprocessable(String),

    /// bandcat-common error
    #[error(transparent)]
    Common(#[from] bandcat_common::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Common(err) if err.is_validation() => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Common(bandcat_common::Error::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Common(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Unprocessable(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Unprocessable(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Unprocessable(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            error!("Request failed: {}", self);
        } else if status == StatusCode::UNPROCESSABLE_ENTITY {
            warn!("Rejected request: {}", self);
        }

        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bandcat_common::Error;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::from(Error::InvalidGenre("jazz".into())).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::from(Error::InvalidAlbumData("album 0".into())).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::from(Error::NotFound(BAND_NOT_FOUND.into())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(Error::Internal("boom".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_not_found_detail_is_bare_message() {
        let err = ApiError::from(Error::NotFound(BAND_NOT_FOUND.into()));
        assert_eq!(err.to_string(), BAND_NOT_FOUND);
    }
}
