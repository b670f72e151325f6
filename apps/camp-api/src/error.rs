//! Error types for the Camp API.
//!
//! Every failure leaves the server as `{"errors": [...]}` with a status code:
//!
//! | Error                          | Status | Body                          |
//! |--------------------------------|--------|-------------------------------|
//! | `CoreError::Validation`        | 422    | one message per violation     |
//! | `CoreError::NotFound`          | 404    | `"<Resource> was not found."` |
//! | `ApiError::BadRequest`         | 400    | the message                   |
//! | `ApiError::Conflict`           | 409    | the message                   |
//! | `ApiError::Internal`           | 500    | `"Internal server error."`    |

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use camp_core::{CoreError, ValidationErrors};
use camp_db::DbError;
use serde::Serialize;
use tracing::{debug, error, warn};

/// Body returned for 500s; the cause only goes to the log.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error.";

/// Camp API errors.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Serialize)]
struct ErrorBody {
    errors: Vec<String>,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Core(CoreError::Validation(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Core(CoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Messages for the `errors` array.
    pub fn messages(&self) -> Vec<String> {
        match self {
            ApiError::Core(CoreError::Validation(errors)) => errors.messages(),
            ApiError::Core(not_found @ CoreError::NotFound(_)) => vec![not_found.to_string()],
            ApiError::BadRequest(message) | ApiError::Conflict(message) => vec![message.clone()],
            ApiError::Internal(_) => vec![INTERNAL_ERROR_MESSAGE.to_string()],
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Core(CoreError::Validation(errors))
    }
}

impl From<DbError> for ApiError {
    fn from(error: DbError) -> Self {
        match error {
            DbError::NotFound { resource, .. } => ApiError::Core(CoreError::NotFound(resource)),
            DbError::IntegrityViolation { message } => ApiError::Conflict(message),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            ApiError::Core(CoreError::Validation(errors)) => {
                debug!(%errors, "Validation failed")
            }
            ApiError::Conflict(message) => warn!(%message, "Integrity violation"),
            ApiError::Internal(cause) => error!(%cause, "Request failed"),
            _ => {}
        }

        let body = ErrorBody {
            errors: self.messages(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camp_core::{Resource, ValidationError};

    #[test]
    fn test_validation_maps_to_422_with_every_message() {
        let mut errors = ValidationErrors::new();
        errors.push(ValidationError::CamperNameRequired);
        errors.push(ValidationError::AgeOutOfRange);

        let err = ApiError::from(errors);
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            err.messages(),
            vec!["Camper must have a name.", "Age must be between 8 and 18."]
        );
    }

    #[test]
    fn test_db_errors() {
        let err = ApiError::from(DbError::not_found(Resource::Activity, 4));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.messages(), vec!["Activity was not found."]);

        let err = ApiError::from(DbError::integrity("Camper 3 does not exist"));
        assert_eq!(err.status(), StatusCode::CONFLICT);
        assert_eq!(err.messages(), vec!["Camper 3 does not exist"]);

        let err = ApiError::from(DbError::PoolExhausted);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.messages(), vec![INTERNAL_ERROR_MESSAGE]);
    }
}
