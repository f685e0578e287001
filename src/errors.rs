use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Every failure a request can surface. Store and infrastructure failures
/// stay behind a generic message; the rest map to stable client errors.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Not authorized to {0}")]
    Forbidden(&'static str),

    #[error("You have already applied for this job")]
    DuplicateApplication,

    #[error("Authentication required")]
    Unauthorized,

    #[error(transparent)]
    Store(#[from] sqlx::Error),

    #[error(transparent)]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::Validation(_) | Error::DuplicateApplication => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Forbidden(_) => StatusCode::FORBIDDEN,
            Error::Unauthorized => StatusCode::UNAUTHORIZED,
            Error::Store(_) | Error::Migrate(_) | Error::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            tracing::error!("request failed: {}", &self);
            "Server error".to_string()
        } else {
            self.to_string()
        };
        (status, Json(json!({ "message": message }))).into_response()
    }
}

/// Maps a store-level unique violation to the duplicate-application error,
/// leaving everything else on the generic store path.
pub fn duplicate_application(err: sqlx::Error) -> Error {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => Error::DuplicateApplication,
        _ => Error::Store(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_keep_their_message() {
        let res = Error::NotFound("Job").into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        let res = Error::Forbidden("update this job").into_response();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            Error::Forbidden("update this job").to_string(),
            "Not authorized to update this job"
        );

        let res = Error::DuplicateApplication.into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn store_errors_stay_generic() {
        let err = Error::Store(sqlx::Error::PoolTimedOut);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let res = err.into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn unauthorized_maps_to_401() {
        assert_eq!(Error::Unauthorized.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn non_unique_store_errors_pass_through() {
        match duplicate_application(sqlx::Error::RowNotFound) {
            Error::Store(_) => {}
            other => panic!("unexpected mapping: {}", other),
        }
    }
}
