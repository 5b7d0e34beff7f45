//! Integration tests for dataclean
//!
//! HTTPリポジトリとユースケースを、プロセス内の偽サーバーに対して検証する

mod common;

use std::sync::{Arc, Mutex};

use dataclean::adapter::http::ApiClient;
use dataclean::adapter::repositories::file_token_store::FileTokenStore;
use dataclean::adapter::repositories::http_auth_repository::HttpAuthRepository;
use dataclean::adapter::repositories::http_upload_repository::HttpUploadRepository;
use dataclean::application::session_manager::SessionManager;
use dataclean::application::use_cases::authenticate::AuthenticateUseCase;
use dataclean::application::use_cases::upload_file::UploadCoordinator;
use dataclean::domain::entities::selected_file::SelectedFile;
use dataclean::domain::entities::upload_job::MIB;
use dataclean::domain::error::ClientError;
use dataclean::domain::repositories::auth_repository::Credentials;
use dataclean::domain::services::progress::ProgressObserver;
use tempfile::TempDir;

use common::{FakeServer, ReceivedChunk, ISSUED_TOKEN, VALID_PASSWORD};

#[derive(Default)]
struct RecordingObserver {
    values: Mutex<Vec<u8>>,
}

impl RecordingObserver {
    fn values(&self) -> Vec<u8> {
        self.values.lock().unwrap().clone()
    }
}

impl ProgressObserver for RecordingObserver {
    fn on_progress(&self, percent: u8) {
        self.values.lock().unwrap().push(percent);
    }
}

async fn coordinator_for(
    server: Arc<FakeServer>,
) -> (
    UploadCoordinator<HttpUploadRepository>,
    Arc<RecordingObserver>,
) {
    let base_url = common::spawn(server).await;
    let client = Arc::new(ApiClient::new(&base_url).unwrap());
    let observer = Arc::new(RecordingObserver::default());
    let coordinator = UploadCoordinator::new(
        Arc::new(HttpUploadRepository::new(client)),
        observer.clone(),
    );
    (coordinator, observer)
}

fn csv_of_size(name: &str, size: u64) -> SelectedFile {
    SelectedFile::from_bytes(name, "text/csv", vec![b'x'; size as usize])
}

fn assert_non_decreasing(values: &[u8]) {
    assert!(
        values.windows(2).all(|w| w[0] <= w[1]),
        "progress went backwards: {:?}",
        values
    );
}

#[tokio::test]
async fn test_single_shot_upload_publishes_dataset() {
    let server = Arc::new(FakeServer::default());
    let (mut coordinator, observer) = coordinator_for(server.clone()).await;

    coordinator
        .validate_selection(SelectedFile::from_bytes(
            "people.csv",
            "text/csv",
            b"name,age,joined\nAlice,30,2023-01-05\nBob,,2023-02-11\n".to_vec(),
        ))
        .unwrap();

    let outcome = coordinator.upload("abc123").await.unwrap();

    assert_eq!(outcome.requests_sent, 1);
    assert!(outcome.dataset_published);
    assert_eq!(outcome.final_progress, 100);
    assert_eq!(server.single_uploads(), vec![("people.csv".to_string(), 52)]);
    assert!(server.chunks().is_empty());
    assert_eq!(server.authorization(), vec!["Token abc123".to_string()]);

    let dataset = coordinator.dataset().unwrap();
    assert_eq!(dataset.row_count(), 2);
    assert_eq!(dataset.type_of("joined"), Some("datetime64[ns]"));

    let values = observer.values();
    assert_eq!(values.last(), Some(&100));
    assert_non_decreasing(&values);
}

#[tokio::test]
async fn test_single_shot_at_threshold_uses_one_request() {
    let server = Arc::new(FakeServer::default());
    let (mut coordinator, observer) = coordinator_for(server.clone()).await;

    coordinator
        .validate_selection(csv_of_size("edge.csv", 10 * MIB))
        .unwrap();
    coordinator.upload("abc123").await.unwrap();

    assert_eq!(
        server.single_uploads(),
        vec![("edge.csv".to_string(), (10 * MIB) as usize)]
    );
    assert!(server.chunks().is_empty());

    let values = observer.values();
    assert!(values.len() > 1, "expected byte-level progress: {:?}", values);
    assert_non_decreasing(&values);
}

#[tokio::test]
async fn test_chunked_upload_sends_every_chunk_in_order() {
    let server = Arc::new(FakeServer::default());
    let (mut coordinator, observer) = coordinator_for(server.clone()).await;

    coordinator
        .validate_selection(csv_of_size("big.csv", 11 * MIB))
        .unwrap();
    let outcome = coordinator.upload("abc123").await.unwrap();

    let chunk = |index: u32, size: u64| ReceivedChunk {
        index,
        total_chunks: 3,
        file_name: "big.csv".to_string(),
        size: size as usize,
    };
    assert_eq!(
        server.chunks(),
        vec![chunk(0, 5 * MIB), chunk(1, 5 * MIB), chunk(2, MIB)]
    );
    assert!(server.single_uploads().is_empty());
    assert!(server
        .authorization()
        .iter()
        .all(|value| value == "Token abc123"));

    assert_eq!(observer.values(), vec![33, 67, 100]);
    assert_eq!(outcome.requests_sent, 3);
    assert!(!outcome.dataset_published);
    assert!(coordinator.dataset().is_none());
}

#[tokio::test]
async fn test_chunked_upload_publishes_final_dataset() {
    let server = Arc::new(FakeServer {
        dataset_on_final_chunk: true,
        ..FakeServer::default()
    });
    let (mut coordinator, _observer) = coordinator_for(server.clone()).await;

    coordinator
        .validate_selection(csv_of_size("big.csv", 11 * MIB))
        .unwrap();
    let outcome = coordinator.upload("abc123").await.unwrap();

    assert!(outcome.dataset_published);
    assert_eq!(coordinator.dataset().unwrap().row_count(), 2);
}

#[tokio::test]
async fn test_chunk_failure_stops_remaining_chunks() {
    let server = Arc::new(FakeServer {
        fail_chunk: Some(1),
        ..FakeServer::default()
    });
    let (mut coordinator, observer) = coordinator_for(server.clone()).await;

    coordinator
        .validate_selection(csv_of_size("big.csv", 16 * MIB))
        .unwrap();
    let result = coordinator.upload("abc123").await;

    assert_eq!(
        result,
        Err(ClientError::Transport("Chunk rejected".to_string()))
    );
    let indices: Vec<u32> = server.chunks().iter().map(|c| c.index).collect();
    assert_eq!(indices, vec![0, 1]);
    assert_eq!(observer.values(), vec![25]);
    assert_eq!(coordinator.progress(), 25);
}

#[tokio::test]
async fn test_html_response_is_protocol_error() {
    let server = Arc::new(FakeServer::default());
    let base_url = common::spawn(server).await;
    let client = Arc::new(ApiClient::new(&common::html_base_url(&base_url)).unwrap());
    let mut coordinator = UploadCoordinator::new(
        Arc::new(HttpUploadRepository::new(client)),
        Arc::new(RecordingObserver::default()),
    );

    coordinator
        .validate_selection(csv_of_size("small.csv", 16))
        .unwrap();
    let result = coordinator.upload("abc123").await;

    assert!(matches!(result, Err(ClientError::Protocol(_))));
    assert!(coordinator.dataset().is_none());
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let client = Arc::new(ApiClient::new("http://127.0.0.1:9/data_processing/").unwrap());
    let mut coordinator = UploadCoordinator::new(
        Arc::new(HttpUploadRepository::new(client)),
        Arc::new(RecordingObserver::default()),
    );

    coordinator
        .validate_selection(csv_of_size("small.csv", 16))
        .unwrap();
    let result = coordinator.upload("abc123").await;

    assert!(matches!(result, Err(ClientError::Transport(_))));
}

async fn auth_for(
    base_url: &str,
    token_path: &str,
) -> (
    AuthenticateUseCase<HttpAuthRepository, FileTokenStore>,
    Arc<SessionManager<FileTokenStore>>,
) {
    let client = Arc::new(ApiClient::new(base_url).unwrap());
    let store = Arc::new(FileTokenStore::new(token_path));
    let session = Arc::new(SessionManager::new(store));
    session.initialize().await;
    let use_case =
        AuthenticateUseCase::new(Arc::new(HttpAuthRepository::new(client)), session.clone());
    (use_case, session)
}

#[tokio::test]
async fn test_login_persists_token_across_sessions() {
    let server = Arc::new(FakeServer::default());
    let base_url = common::spawn(server).await;
    let temp_dir = TempDir::new().unwrap();
    let token_path = temp_dir.path().join("storage.json");
    let token_path = token_path.to_str().unwrap();

    let (use_case, session) = auth_for(&base_url, token_path).await;
    use_case
        .login(&Credentials::new("alice", VALID_PASSWORD))
        .await
        .unwrap();
    assert_eq!(session.token(), ISSUED_TOKEN);

    // A fresh session reads the token back from storage
    let (_use_case, restored) = auth_for(&base_url, token_path).await;
    assert_eq!(restored.token(), ISSUED_TOKEN);

    use_case.logout().await;
    let (_use_case, restored) = auth_for(&base_url, token_path).await;
    assert!(!restored.is_authenticated());
}

#[tokio::test]
async fn test_login_rejected_uses_server_message() {
    let server = Arc::new(FakeServer::default());
    let base_url = common::spawn(server).await;
    let temp_dir = TempDir::new().unwrap();
    let token_path = temp_dir.path().join("storage.json");

    let (use_case, session) = auth_for(&base_url, token_path.to_str().unwrap()).await;
    let result = use_case.login(&Credentials::new("alice", "wrong")).await;

    assert_eq!(
        result,
        Err(ClientError::Transport("Invalid credentials".to_string()))
    );
    assert!(!session.is_authenticated());
    assert!(!token_path.exists());
}

#[tokio::test]
async fn test_register_failure_without_message_uses_fallback() {
    let server = Arc::new(FakeServer::default());
    let base_url = common::spawn(server).await;
    let temp_dir = TempDir::new().unwrap();
    let token_path = temp_dir.path().join("storage.json");

    let (use_case, _session) = auth_for(&base_url, token_path.to_str().unwrap()).await;
    let result = use_case.register(&Credentials::new("taken", "pw")).await;

    assert_eq!(
        result,
        Err(ClientError::Transport("Registration failed".to_string()))
    );
}

#[tokio::test]
async fn test_login_html_response_is_protocol_error() {
    let server = Arc::new(FakeServer::default());
    let base_url = common::spawn(server).await;
    let temp_dir = TempDir::new().unwrap();
    let token_path = temp_dir.path().join("storage.json");

    let (use_case, _session) = auth_for(
        &common::html_base_url(&base_url),
        token_path.to_str().unwrap(),
    )
    .await;
    let result = use_case
        .login(&Credentials::new("alice", VALID_PASSWORD))
        .await;

    assert!(matches!(result, Err(ClientError::Protocol(_))));
}
