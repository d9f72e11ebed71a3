use crate::ask_response::ApiError;
use axum::async_trait;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use axum::Json;
use tutor_system::AskRequest;

pub struct UploadedFile {
    pub filename: String,
    pub data: Vec<u8>,
}

/// Body of `POST /api/ask`: either client-extracted context as JSON, or a
/// multipart form carrying the PDF itself.
pub enum AskPayload {
    Json(AskRequest),
    Form {
        question: String,
        file: Option<UploadedFile>,
    },
}

#[async_trait]
impl<S> FromRequest<S> for AskPayload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("")
            .to_ascii_lowercase();

        if content_type.starts_with("application/json") {
            let Json(body) = Json::<AskRequest>::from_request(req, state)
                .await
                .map_err(|e| ApiError::Rejected {
                    status: e.status(),
                    message: e.body_text(),
                })?;
            Ok(AskPayload::Json(body))
        } else if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| ApiError::Rejected {
                    status: e.status(),
                    message: e.body_text(),
                })?;
            parse_multipart(multipart).await
        } else {
            Err(ApiError::UnsupportedMediaType)
        }
    }
}

async fn parse_multipart(mut multipart: Multipart) -> Result<AskPayload, ApiError> {
    let mut question = String::new();
    let mut file = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "question" => {
                question = field.text().await.map_err(multipart_error)?;
            }
            "file" => {
                let filename = field.file_name().unwrap_or("upload.pdf").to_string();
                let data = field.bytes().await.map_err(multipart_error)?.to_vec();
                file = Some(UploadedFile { filename, data });
            }
            _ => {
                field.bytes().await.map_err(multipart_error)?;
            }
        }
    }

    Ok(AskPayload::Form { question, file })
}

fn multipart_error(err: axum::extract::multipart::MultipartError) -> ApiError {
    ApiError::Rejected {
        status: err.status(),
        message: err.body_text(),
    }
}
