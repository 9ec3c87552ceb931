//! ServerBuilder for fluent API to build HTTP servers

use super::handlers::AppState;
use super::router::{build_resource_routes, health_routes};
use crate::config::AdminConfig;
use crate::core::service::DataProvider;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builder for the admin REST server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_data_provider(MockDataProvider::new())
///     .with_config(AdminConfig::default())
///     .build()?;
/// ```
pub struct ServerBuilder {
    provider: Option<Arc<dyn DataProvider>>,
    config: AdminConfig,
    custom_routes: Vec<Router>,
    cors: Option<CorsLayer>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder with the default configuration
    pub fn new() -> Self {
        Self {
            provider: None,
            config: AdminConfig::default(),
            custom_routes: Vec::new(),
            cors: None,
        }
    }

    /// Set the data provider (required)
    pub fn with_data_provider(self, provider: impl DataProvider + 'static) -> Self {
        self.with_shared_data_provider(Arc::new(provider))
    }

    /// Set a data provider that is shared with other owners
    pub fn with_shared_data_provider(mut self, provider: Arc<dyn DataProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn with_config(mut self, config: AdminConfig) -> Self {
        self.config = config;
        self
    }

    /// Add custom routes to the server
    ///
    /// Use this for endpoints outside the resource pattern, such as an
    /// authentication flow or a webhook.
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Answer cross-origin requests with the given policy
    pub fn with_cors(mut self, cors: CorsLayer) -> Self {
        self.cors = Some(cors);
        self
    }

    /// Build the final REST router
    pub fn build(self) -> Result<Router> {
        let provider = self
            .provider
            .ok_or_else(|| anyhow::anyhow!("DataProvider is required. Call .with_data_provider()"))?;

        let state = AppState {
            provider,
            config: Arc::new(self.config),
        };

        let mut app = health_routes();
        for custom_router in self.custom_routes {
            app = app.merge(custom_router);
        }
        app = app.merge(build_resource_routes(state));

        Ok(app.layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .option_layer(self.cors),
        ))
    }

    /// Serve the application on the configured address with graceful shutdown
    ///
    /// Handles SIGTERM and SIGINT (Ctrl+C).
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.server.addr();
        let app = self.build()?;
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
