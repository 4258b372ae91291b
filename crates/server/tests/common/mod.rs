//! # Common Test Utilities
//!
//! This module centralizes the setup logic for the `studygen-server`
//! integration tests. The `TestApp` harness spawns the real server on a
//! random port, pointed at an `httpmock` server standing in for the
//! completion API, with a temporary config file and upload directory.

// Allow unused code because this is a test utility module, and not all
// tests use all parts of it.
#![allow(unused)]

use anyhow::Result;
use axum::serve;
use httpmock::MockServer;
use reqwest::Client;
use std::{fs::File, io::Write, net::SocketAddr, path::PathBuf};
use studygen_server::{
    config,
    router,
    state::{build_app_state, AppState},
};
use tempfile::{tempdir, TempDir};
use tokio::{net::TcpListener, task::JoinHandle};

/// A harness for end-to-end testing of the Axum server.
pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub mock_server: MockServer,
    pub upload_dir: PathBuf,
    _config_dir: TempDir,
    _upload_dir: TempDir,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestApp {
    /// Spawns the application server and returns a `TestApp` for it.
    pub async fn spawn() -> Result<Self> {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();

        let mock_server = MockServer::start();
        let config_dir = tempdir()?;
        let upload_tempdir = tempdir()?;
        let upload_dir = upload_tempdir.path().to_path_buf();

        // Short timeouts keep failure-path tests fast.
        let config_path = config_dir.path().join("config.yml");
        let config_content = format!(
            r#"
port: 0
upload_dir: "{}"
extraction_timeout_secs: 5
completion:
  api_url: "{}"
  api_key: "test-api-key"
  model_name: "mock-chat-model"
  timeout_secs: 5
"#,
            upload_dir.display(),
            mock_server.url("/v1/chat"),
        );
        let mut file = File::create(&config_path)?;
        file.write_all(config_content.as_bytes())?;

        let config = config::get_config(config_path.to_str())?;
        let app_state = build_app_state(config).await?;

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let address = format!("http://{addr}");

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
        let server_handle = tokio::spawn(async move {
            let app = router::create_router(app_state);
            let server = serve(listener, app).with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            });
            if let Err(e) = server.await {
                tracing::error!("[TestApp] Server error: {e}");
            }
        });

        // Give the server a moment to become ready.
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        Ok(Self {
            address,
            client: Client::new(),
            mock_server,
            upload_dir,
            _config_dir: config_dir,
            _upload_dir: upload_tempdir,
            _server_handle: server_handle,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    /// Builds a multipart form holding a PDF upload.
    pub fn pdf_form(pdf_data: Vec<u8>, filename: &str) -> reqwest::multipart::Form {
        reqwest::multipart::Form::new().part(
            "file",
            reqwest::multipart::Part::bytes(pdf_data).file_name(filename.to_string()),
        )
    }

    /// Asserts that no uploaded files remain on disk.
    pub fn assert_upload_dir_empty(&self) {
        let remaining: Vec<_> = std::fs::read_dir(&self.upload_dir)
            .expect("upload dir should exist")
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .collect();
        assert!(
            remaining.is_empty(),
            "upload dir should be empty, found: {remaining:?}"
        );
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
