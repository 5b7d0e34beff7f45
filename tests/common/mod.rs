//! In-process fake of the data processing service

#![allow(dead_code)]

use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

pub const VALID_PASSWORD: &str = "secret";
pub const ISSUED_TOKEN: &str = "tok-from-server";

/// One `upload-chunk/` request as the server saw it
#[derive(Debug, Clone, PartialEq)]
pub struct ReceivedChunk {
    pub index: u32,
    pub total_chunks: u32,
    pub file_name: String,
    pub size: usize,
}

#[derive(Default)]
pub struct FakeServer {
    /// Chunk index the server rejects with a 500
    pub fail_chunk: Option<u32>,
    /// Whether the final chunk response carries the parsed dataset
    pub dataset_on_final_chunk: bool,
    pub chunks: Mutex<Vec<ReceivedChunk>>,
    pub single_uploads: Mutex<Vec<(String, usize)>>,
    pub authorization: Mutex<Vec<String>>,
}

impl FakeServer {
    pub fn chunks(&self) -> Vec<ReceivedChunk> {
        self.chunks.lock().unwrap().clone()
    }

    pub fn single_uploads(&self) -> Vec<(String, usize)> {
        self.single_uploads.lock().unwrap().clone()
    }

    pub fn authorization(&self) -> Vec<String> {
        self.authorization.lock().unwrap().clone()
    }

    fn record_authorization(&self, headers: &HeaderMap) {
        let value = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        self.authorization.lock().unwrap().push(value);
    }
}

pub fn dataset_body() -> Value {
    json!({
        "data": [
            {"name": "Alice", "age": 30, "joined": "2023-01-05"},
            {"name": "Bob", "age": null, "joined": "2023-02-11"}
        ],
        "data_types": {"name": "object", "age": "Int64", "joined": "datetime64[ns]"}
    })
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["password"] == VALID_PASSWORD {
        Json(json!({"token": ISSUED_TOKEN})).into_response()
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Invalid credentials"})),
        )
            .into_response()
    }
}

async fn register(Json(body): Json<Value>) -> Response {
    if body["username"] == "taken" {
        (StatusCode::BAD_REQUEST, Json(json!({}))).into_response()
    } else {
        Json(json!({"token": ISSUED_TOKEN})).into_response()
    }
}

async fn upload(
    State(server): State<Arc<FakeServer>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    server.record_authorization(&headers);
    if headers.get("authorization").is_none() {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Authentication credentials were not provided."})),
        )
            .into_response();
    }

    while let Some(field) = multipart.next_field().await.unwrap_or(None) {
        if field.name() == Some("file") {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let data = field.bytes().await.unwrap_or_default();
            server
                .single_uploads
                .lock()
                .unwrap()
                .push((file_name, data.len()));
            return Json(dataset_body()).into_response();
        }
    }

    (
        StatusCode::BAD_REQUEST,
        Json(json!({"error": "Invalid request"})),
    )
        .into_response()
}

async fn upload_chunk(
    State(server): State<Arc<FakeServer>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    server.record_authorization(&headers);

    let mut chunk = ReceivedChunk {
        index: u32::MAX,
        total_chunks: 0,
        file_name: String::new(),
        size: 0,
    };
    while let Some(field) = multipart.next_field().await.unwrap_or(None) {
        let name = field.name().unwrap_or_default().to_string();
        let data = field.bytes().await.unwrap_or_default();
        let text = String::from_utf8_lossy(&data).to_string();
        match name.as_str() {
            "file" => chunk.size = data.len(),
            "chunkIndex" => chunk.index = text.parse().unwrap_or(u32::MAX),
            "totalChunks" => chunk.total_chunks = text.parse().unwrap_or(0),
            "fileName" => chunk.file_name = text,
            _ => {}
        }
    }

    let index = chunk.index;
    let is_last = index.checked_add(1) == Some(chunk.total_chunks);
    server.chunks.lock().unwrap().push(chunk);

    if server.fail_chunk == Some(index) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "Chunk rejected"})),
        )
            .into_response();
    }

    if is_last && server.dataset_on_final_chunk {
        Json(dataset_body()).into_response()
    } else {
        Json(json!({"message": format!("Chunk {} received", index)})).into_response()
    }
}

async fn html_page() -> Html<&'static str> {
    Html("<html><body>Not the API</body></html>")
}

/// Start the fake service on an ephemeral port and return its base URL
/// (`http://127.0.0.1:<port>/data_processing/`).
pub async fn spawn(server: Arc<FakeServer>) -> String {
    let app = Router::new()
        .route("/data_processing/login/", post(login))
        .route("/data_processing/register/", post(register))
        .route("/data_processing/upload/", post(upload))
        .route("/data_processing/upload-chunk/", post(upload_chunk))
        .route("/html/login/", post(html_page))
        .route("/html/upload/", post(html_page))
        .layer(DefaultBodyLimit::max(32 * 1024 * 1024))
        .with_state(server);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}/data_processing/", addr)
}

/// Base URL on the same server whose endpoints answer with HTML
pub fn html_base_url(base_url: &str) -> String {
    base_url.replace("/data_processing/", "/html/")
}
