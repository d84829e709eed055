use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use chain_order_engine::{ApiError, StoreError};
use thiserror::Error;

use crate::{push::PushError, source::SourceError};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(String),
    #[error("Invalid request. {0}")]
    InvalidRequest(String),
    #[error("Could not read request path: {0}")]
    InvalidRequestPath(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("Invalid server configuration. {0}")]
    ConfigurationError(String),
    #[error("The data was not found. {0}")]
    NoRecordFound(String),
    #[error("The record already exists. {0}")]
    RecordAlreadyExists(String),
    #[error("The confirmation feed is not available. {0}")]
    FeedUnavailable(#[from] SourceError),
    #[error("Push gateway error. {0}")]
    PushError(#[from] PushError),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::InvalidRequestPath(_) => StatusCode::BAD_REQUEST,
            Self::NoRecordFound(_) => StatusCode::NOT_FOUND,
            Self::RecordAlreadyExists(_) => StatusCode::CONFLICT,
            Self::FeedUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BackendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::PushError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .body(serde_json::json!({ "error": self.to_string() }).to_string())
    }
}

impl From<ApiError> for ServerError {
    fn from(e: ApiError) -> Self {
        match e {
            ApiError::InvalidArgument(s) => Self::InvalidRequest(s),
            ApiError::StoreError(e) => e.into(),
        }
    }
}

impl From<StoreError> for ServerError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::OrderAlreadyExists(_) | StoreError::WalletAlreadyExists(_) => {
                Self::RecordAlreadyExists(e.to_string())
            },
            StoreError::ChainTxNotFound(_) => Self::NoRecordFound(e.to_string()),
            StoreError::DriverError(_) | StoreError::MigrationError(_) => {
                Self::BackendError(format!("Database error: {e}"))
            },
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn api_errors_map_to_status_codes() {
        let err = ServerError::from(ApiError::InvalidArgument("tx param can't be empty string".into()));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        let err = ServerError::from(ApiError::StoreError(StoreError::WalletAlreadyExists("A".into())));
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        let err = ServerError::from(StoreError::MigrationError("bad".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "An error occurred on the backend of the server. Database error: Database migration error: bad");
    }
}
