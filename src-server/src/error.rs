use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use satview_core::bitcoin::PriceError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// An upstream/cache/store chain came up empty; carries the endpoint's
    /// stable message plus the underlying error detail.
    #[error("{message}")]
    Upstream {
        message: &'static str,
        #[source]
        source: PriceError,
    },
}

impl ApiError {
    pub fn upstream(message: &'static str, source: PriceError) -> Self {
        ApiError::Upstream { message, source }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, error) = match &self {
            ApiError::Upstream { message, source } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                message.to_string(),
                source.to_string(),
            ),
        };
        let body = Json(ErrorBody { message, error });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
