use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

/// Service-specific error types
///
/// This enum defines the errors that can be returned to API clients.
/// Each variant represents a specific error case and includes relevant details.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// A gas price record has neither (or both) of an oracle and a fixed value
    #[error("The gas price oracle or a fixed gas price was not provided for chain {chain}")]
    GasPriceNotConfigured { chain: String },

    /// No chain with the requested id exists
    #[error("Chain not found: {0}")]
    ChainNotFound(String),

    /// Query parameters could not be interpreted
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

/// Errors raised while loading stored records
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to read fixture: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse fixture: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two records share the same primary key
    #[error("duplicate {kind} `{key}`")]
    Duplicate { kind: &'static str, key: String },

    /// A record references a chain that does not exist
    #[error("{kind} `{key}` references unknown chain {chain_id}")]
    UnknownChain {
        kind: &'static str,
        key: String,
        chain_id: u64,
    },
}

/// Structured error response for the API
///
/// This structure defines the JSON format of error responses returned by the API.
#[derive(Serialize)]
struct ErrorResponse {
    /// Human-readable error message
    error: String,

    /// Machine-readable error code
    error_code: String,

    /// Optional detailed error information
    details: Option<String>,
}

impl ServiceError {
    fn error_code(&self) -> &'static str {
        match self {
            ServiceError::GasPriceNotConfigured { .. } => "GAS_PRICE_NOT_CONFIGURED",
            ServiceError::ChainNotFound(_) => "CHAIN_NOT_FOUND",
            ServiceError::InvalidQuery(_) => "INVALID_QUERY",
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            ServiceError::GasPriceNotConfigured { chain } => Some(chain.clone()),
            ServiceError::ChainNotFound(details) | ServiceError::InvalidQuery(details) => {
                Some(details.clone())
            }
        }
    }
}

impl ResponseError for ServiceError {
    /// Convert the error to an HTTP response with a JSON error body
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            error_code: self.error_code().to_string(),
            details: self.details(),
        })
    }

    /// Get the HTTP status code for this error
    fn status_code(&self) -> StatusCode {
        match *self {
            ServiceError::GasPriceNotConfigured { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::ChainNotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
        }
    }
}
