use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tutor_system::{AnswerError, ErrorResponse};

pub const BACKEND_FAILURE_MESSAGE: &str = "Failed to get a response from the AI.";
pub const EXTRACTION_FAILURE_MESSAGE: &str = "Failed to read the uploaded PDF.";
pub const UNSUPPORTED_BODY_MESSAGE: &str = "Expected a JSON body or a multipart form.";

#[derive(Debug)]
pub enum ApiError {
    /// The request body could not be decoded.
    Rejected { status: StatusCode, message: String },
    UnsupportedMediaType,
    Answer(AnswerError),
}

impl From<AnswerError> for ApiError {
    fn from(err: AnswerError) -> Self {
        ApiError::Answer(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Rejected { status, .. } => *status,
            ApiError::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::Answer(AnswerError::MissingQuestion) => StatusCode::BAD_REQUEST,
            ApiError::Answer(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::Rejected { message, .. } => message.clone(),
            ApiError::UnsupportedMediaType => UNSUPPORTED_BODY_MESSAGE.to_string(),
            ApiError::Answer(AnswerError::MissingQuestion) => {
                AnswerError::MissingQuestion.to_string()
            }
            ApiError::Answer(AnswerError::Extraction(_)) => EXTRACTION_FAILURE_MESSAGE.to_string(),
            ApiError::Answer(AnswerError::Backend(_)) => BACKEND_FAILURE_MESSAGE.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.message(),
        };
        (self.status(), Json(body)).into_response()
    }
}
