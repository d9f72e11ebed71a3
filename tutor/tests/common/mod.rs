#![allow(dead_code)]

use axum::{http::StatusCode, routing::post, Json, Router};
use serde_json::Value;
use std::sync::{Arc, Mutex};

pub fn pdf_with_pages(pages: &[&str]) -> Vec<u8> {
    tutor_system::sample_pdf::pdf_with_pages(pages).unwrap()
}

pub type Recorded = Arc<Mutex<Vec<Value>>>;

/// Serves `reply` with `status` on `POST {path}` and records every JSON body.
pub async fn spawn_json_stub(path: &str, status: StatusCode, reply: Value) -> (String, Recorded) {
    let recorded: Recorded = Arc::new(Mutex::new(Vec::new()));
    let seen = recorded.clone();

    let app = Router::new().route(
        path,
        post(move |Json(body): Json<Value>| {
            let seen = seen.clone();
            let reply = reply.clone();
            async move {
                seen.lock().unwrap().push(body);
                (status, Json(reply))
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), recorded)
}

/// An address nothing is listening on.
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
