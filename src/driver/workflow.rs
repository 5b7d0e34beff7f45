//! Workflow Orchestration
//!
//! コマンドごとのワークフローのオーケストレーション

use anyhow::Result;
use log::info;

use std::sync::Arc;

use crate::adapter::config::Config;
use crate::adapter::http::ApiClient;
use crate::adapter::local_file::select_local_file;
use crate::adapter::repositories::file_token_store::FileTokenStore;
use crate::adapter::repositories::http_auth_repository::HttpAuthRepository;
use crate::adapter::repositories::http_upload_repository::HttpUploadRepository;
use crate::application::session_manager::SessionManager;
use crate::application::use_cases::authenticate::AuthenticateUseCase;
use crate::application::use_cases::upload_file::UploadCoordinator;
use crate::domain::error::ClientError;
use crate::domain::repositories::auth_repository::Credentials;

use super::cli::Command;
use super::console::{render_table, ConsoleProgress};

pub const LOGIN_HINT: &str = "  Run `dataclean login <username> <password>` to start a session.";

/// Client Workflow
pub struct ClientWorkflow {
    config: Config,
    token_store: Arc<FileTokenStore>,
    session: Arc<SessionManager<FileTokenStore>>,
    auth_use_case: AuthenticateUseCase<HttpAuthRepository, FileTokenStore>,
    upload_repository: Arc<HttpUploadRepository>,
}

impl ClientWorkflow {
    /// Create a new workflow instance with dependency injection.
    /// The stored session token is loaded here.
    pub async fn new(config: Config) -> Result<Self> {
        // Repository implementations
        let token_store = Arc::new(FileTokenStore::new(&config.token_path));
        let client = Arc::new(ApiClient::new(&config.base_url)?);
        let auth_repo = Arc::new(HttpAuthRepository::new(client.clone()));
        let upload_repository = Arc::new(HttpUploadRepository::new(client));

        // Session restored from durable storage
        let session = Arc::new(SessionManager::new(token_store.clone()));
        session.initialize().await;

        let auth_use_case = AuthenticateUseCase::new(auth_repo, session.clone());

        Ok(Self {
            config,
            token_store,
            session,
            auth_use_case,
            upload_repository,
        })
    }

    pub fn session(&self) -> &Arc<SessionManager<FileTokenStore>> {
        &self.session
    }

    /// Execute one command. Errors are reported to the user here;
    /// the return value tells whether the command succeeded.
    pub async fn execute(&self, command: Command) -> bool {
        info!("Running {} command", command_name(&command));

        match self.run(command).await {
            Ok(()) => true,
            Err(e) => {
                println!("✗ {}", e.user_message());
                if e.requires_login() {
                    println!("{}", LOGIN_HINT);
                }
                false
            }
        }
    }

    async fn run(&self, command: Command) -> Result<(), ClientError> {
        match command {
            Command::Register { username, password } => {
                self.auth_use_case
                    .register(&Credentials::new(username.clone(), password))
                    .await?;
                println!("✓ Registered and logged in as {}", username);
            }
            Command::Login { username, password } => {
                self.auth_use_case
                    .login(&Credentials::new(username.clone(), password))
                    .await?;
                println!("✓ Logged in as {}", username);
            }
            Command::Logout => {
                self.auth_use_case.logout().await;
                println!("✓ Logged out");
            }
            Command::Status => self.print_status(),
            Command::Upload { path, rows } => {
                let limit = rows.unwrap_or(self.config.preview_rows);
                self.upload(&path, limit).await?;
            }
        }
        Ok(())
    }

    fn print_status(&self) {
        println!("✓ Server: {}", self.config.base_url);
        if self.session.is_authenticated() {
            println!(
                "✓ Logged in (token stored in {})",
                self.token_store.path().display()
            );
        } else {
            println!("⚠ Not logged in");
        }
    }

    async fn upload(&self, path: &str, limit: usize) -> Result<(), ClientError> {
        let file =
            select_local_file(path).map_err(|e| ClientError::Validation(format!("{:#}", e)))?;

        let mut coordinator =
            UploadCoordinator::new(self.upload_repository.clone(), Arc::new(ConsoleProgress));
        coordinator.validate_selection(file)?;

        if let Some(selected) = coordinator.selected() {
            println!("✓ Selected {} ({} bytes)", selected.name, selected.size);
        }

        let outcome = coordinator.upload(&self.session.token()).await?;
        println!("✓ Upload complete: {}", outcome.describe());

        match coordinator.dataset() {
            Some(dataset) => {
                println!(
                    "✓ {} rows, {} typed columns",
                    dataset.row_count(),
                    dataset.columns().len()
                );
                print!("{}", render_table(dataset, limit));
            }
            None => println!("⚠ The server did not return a parsed dataset for this upload"),
        }

        Ok(())
    }
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Register { .. } => "register",
        Command::Login { .. } => "login",
        Command::Logout => "logout",
        Command::Status => "status",
        Command::Upload { .. } => "upload",
    }
}
