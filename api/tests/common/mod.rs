#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use tutor_api::{create_router, AppState};
use tutor_system::{AnswerService, BackendError, InferenceBackend};

pub const BOUNDARY: &str = "----tutor-test-boundary";

/// Records prompts and replies with a canned answer, or fails on demand.
#[derive(Default)]
pub struct StubBackend {
    pub prompts: Mutex<Vec<String>>,
    pub fail_with_status: Option<u16>,
}

impl StubBackend {
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl InferenceBackend for StubBackend {
    async fn generate(&self, prompt: &str) -> Result<String, BackendError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match self.fail_with_status {
            Some(code) => Err(BackendError::Status {
                status: code,
                body: "model crashed".to_string(),
            }),
            None => Ok("Stub answer".to_string()),
        }
    }

    fn model_name(&self) -> &str {
        "phi3"
    }
}

pub async fn send(backend: &Arc<StubBackend>, request: Request<Body>) -> (u16, Value) {
    send_with_limit(backend, request, 1024 * 1024).await
}

pub async fn send_with_limit(
    backend: &Arc<StubBackend>,
    request: Request<Body>,
    max_upload_bytes: usize,
) -> (u16, Value) {
    let state = AppState::new(AnswerService::new(backend.clone()));
    let app = create_router(state, max_upload_bytes);

    let response: Response<Body> = app.oneshot(request).await.unwrap();
    let status = response.status().as_u16();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

pub fn json_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/ask")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub struct Part<'a> {
    pub name: &'a str,
    pub filename: Option<&'a str>,
    pub content_type: Option<&'a str>,
    pub data: Vec<u8>,
}

impl<'a> Part<'a> {
    pub fn text(name: &'a str, value: &str) -> Self {
        Self {
            name,
            filename: None,
            content_type: None,
            data: value.as_bytes().to_vec(),
        }
    }

    pub fn file(name: &'a str, filename: &'a str, data: Vec<u8>) -> Self {
        Self {
            name,
            filename: Some(filename),
            content_type: Some("application/pdf"),
            data,
        }
    }
}

pub fn multipart_request(parts: Vec<Part<'_>>) -> Request<Body> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        let mut disposition = format!("Content-Disposition: form-data; name=\"{}\"", part.name);
        if let Some(filename) = part.filename {
            disposition.push_str(&format!("; filename=\"{filename}\""));
        }
        body.extend_from_slice(disposition.as_bytes());
        body.extend_from_slice(b"\r\n");
        if let Some(content_type) = part.content_type {
            body.extend_from_slice(format!("Content-Type: {content_type}\r\n").as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(&part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/ask")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

pub fn pdf_with_pages(pages: &[&str]) -> Vec<u8> {
    tutor_system::sample_pdf::pdf_with_pages(pages).unwrap()
}
