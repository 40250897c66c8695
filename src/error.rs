use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Failures while parsing a page spec or assembling the output document.
///
/// These are client errors: the input (spec string or PDF bytes) was bad,
/// and retrying without correcting it cannot succeed.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Page numbers are required.")]
    EmptySpec,

    #[error("Invalid page number: {0}")]
    InvalidPage(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Page {page} is out of range (1-{total})")]
    PageOutOfRange { page: u32, total: u32 },

    #[error("Failed to load PDF: {0}")]
    Load(#[source] lopdf::Error),

    #[error("Failed to build output PDF: {0}")]
    Build(#[source] lopdf::Error),

    #[error("Failed to save PDF: {0}")]
    Save(#[source] std::io::Error),
}

/// Errors surfaced at the HTTP boundary.
///
/// Responses are plain text: validation and parse failures map to 400 with
/// the specific message, infrastructure failures map to 500.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Uploaded file not found.")]
    MissingUpload,

    #[error("Error downloading the file.")]
    Transfer(#[source] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ExtractError> for AppError {
    fn from(err: ExtractError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::MissingUpload | AppError::Transfer(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status.is_server_error() {
            tracing::error!("request failed: {}", self);
        } else {
            tracing::debug!("rejected request: {}", self);
        }

        (status, self.to_string()).into_response()
    }
}
