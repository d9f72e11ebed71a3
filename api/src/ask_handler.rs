use crate::ask_payload::AskPayload;
use crate::ask_response::ApiError;
use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use tutor_system::{AnswerError, AskResponse, HealthResponse};
use uuid::Uuid;

pub async fn ask(
    State(state): State<AppState>,
    payload: AskPayload,
) -> Result<Json<AskResponse>, ApiError> {
    let request_id = Uuid::new_v4();

    let result = match payload {
        AskPayload::Json(body) => {
            log::info!(
                "[{}] Question with {} chars of client context",
                request_id,
                body.context.len()
            );
            state
                .answer_service
                .answer(&body.question, &body.context)
                .await
        }
        AskPayload::Form { question, file } => {
            match &file {
                Some(file) => log::info!(
                    "[{}] Question with upload {} ({} bytes)",
                    request_id,
                    file.filename,
                    file.data.len()
                ),
                None => log::info!("[{}] Question without upload", request_id),
            }
            state
                .answer_service
                .answer_with_pdf(&question, file.map(|f| f.data))
                .await
        }
    };

    match result {
        Ok(answer) => {
            log::info!("[{}] Answered ({} chars)", request_id, answer.len());
            Ok(Json(AskResponse { answer }))
        }
        Err(err) => {
            match &err {
                AnswerError::MissingQuestion => {
                    log::warn!("[{}] Rejected: question is missing", request_id)
                }
                AnswerError::Extraction(e) => {
                    log::error!("[{}] Error reading uploaded PDF: {}", request_id, e)
                }
                AnswerError::Backend(e) => {
                    log::error!("[{}] Error communicating with the model: {}", request_id, e)
                }
            }
            Err(err.into())
        }
    }
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        model: state.answer_service.model_name().to_string(),
    })
}
