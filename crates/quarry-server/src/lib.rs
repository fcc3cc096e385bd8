mod cors;
mod error;
mod health;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use quarry_config::Config;
use quarry_llm::{CredentialSource, Dispatcher, EnvCredentials};
use quarry_store::SelectionStore;
use tower_http::trace::TraceLayer;

pub use error::ApiError;

use crate::state::AppState;

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// Credentials come from the process environment and the selection store
    /// from `[store]`.
    ///
    /// # Errors
    ///
    /// Returns an error if a provider override names an unknown provider
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let store = quarry_store::build_store(&config.store);
        Self::with_parts(config, store, Arc::new(EnvCredentials))
    }

    /// Build the server with an explicit selection store and credential source
    ///
    /// # Errors
    ///
    /// Returns an error if a provider override names an unknown provider
    pub fn with_parts(
        config: Config,
        store: Arc<dyn SelectionStore>,
        credentials: Arc<dyn CredentialSource>,
    ) -> anyhow::Result<Self> {
        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

        let dispatcher = Dispatcher::from_config(&config.providers)?;

        let state = AppState::new(dispatcher, store, credentials, config.admin.password().cloned());

        if state.admin_password.is_none() {
            tracing::warn!("admin password not configured, selection changes are disabled");
        }

        let mut app = Router::new();

        if config.server.health.enabled {
            app = app.route(&config.server.health.path, axum::routing::get(health::health));
        }

        app = app.merge(routes::api_router(state));

        app = app.layer(TraceLayer::new_for_http());

        if config.server.cors.enabled {
            app = app.layer(cors::cors_layer(&config.server.cors));
        }

        Ok(Self {
            router: app,
            listen_address,
        })
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
