//! Test server wrapper that starts Quarry on a random port

use std::net::SocketAddr;
use std::sync::Arc;

use quarry_config::Config;
use quarry_llm::{CredentialSource, StaticCredentials};
use quarry_server::Server;
use quarry_store::MemoryStore;
use tokio_util::sync::CancellationToken;

/// A running test server instance
pub struct TestServer {
    addr: SocketAddr,
    shutdown: CancellationToken,
    client: reqwest::Client,
}

impl TestServer {
    /// Start with an in-memory store and a test key for every provider
    pub async fn start(config: Config) -> anyhow::Result<Self> {
        let credentials = StaticCredentials::new()
            .with("anthropic", "test-anthropic-key")
            .with("google", "test-google-key")
            .with("openai", "test-openai-key");

        Self::start_with_credentials(config, credentials).await
    }

    /// Start with explicit credentials
    ///
    /// Binds to port 0 for automatic port assignment
    pub async fn start_with_credentials(
        config: Config,
        credentials: impl CredentialSource + 'static,
    ) -> anyhow::Result<Self> {
        let server = Server::with_parts(config, Arc::new(MemoryStore::new()), Arc::new(credentials))?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        tokio::spawn(async move {
            axum::serve(listener, server.into_router())
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        let client = reqwest::Client::new();

        Ok(Self { addr, shutdown, client })
    }

    /// URL of `path` on the running test server
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// Get a reference to the HTTP client
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// `POST /api/extract` with the given content array
    pub async fn extract(&self, content: serde_json::Value) -> reqwest::Response {
        self.client
            .post(self.url("/api/extract"))
            .json(&serde_json::json!({ "content": content }))
            .send()
            .await
            .expect("extract request")
    }

    /// `POST /api/config` with the given password and selection
    pub async fn select(&self, password: &str, provider: &str, model: &str) -> reqwest::Response {
        self.client
            .post(self.url("/api/config"))
            .json(&serde_json::json!({ "password": password, "provider": provider, "model": model }))
            .send()
            .await
            .expect("config request")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
