mod handlers;

use crate::config::cli::LocalStorage;
use crate::core::lookup::LookupEngine;
use crate::core::{build_source, ConfigProvider, Storage};
use crate::utils::error::Result;
use crate::utils::validation::validate_socket_addr;
use axum::routing::get;
use axum::Router;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub const LOOKUP_PATH: &str = "/home/unregistered_home_data/";

/// Build the router around a shared, read-only lookup engine.
pub fn router<S: Storage + 'static>(engine: Arc<LookupEngine<S>>) -> Router {
    Router::new()
        .route(LOOKUP_PATH, get(handlers::unregistered_home_data::<S>))
        .route(
            LOOKUP_PATH.trim_end_matches('/'),
            get(handlers::unregistered_home_data::<S>),
        )
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(engine)
}

pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// 依設定建立資料來源、快照儲存與路由
    pub fn new<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        let listen_address = validate_socket_addr("listen_address", config.listen_address())?;

        let source = build_source(config);
        tracing::info!(
            "Using provider '{}' at {}",
            source.name(),
            config.provider_endpoint()
        );

        let mut engine = LookupEngine::new(source);
        if let Some(path) = config.snapshot_path() {
            let storage = LocalStorage::new(path);
            tracing::info!("Saving provider snapshots to {}", storage.base_path().display());
            engine = engine.with_snapshots(storage);
        }

        Ok(Self {
            router: router(Arc::new(engine)),
            listen_address,
        })
    }

    pub fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    pub fn into_router(self) -> Router {
        self.router
    }

    /// Serve until `shutdown` resolves.
    pub async fn serve<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!("🚀 Listening on {}", local_addr);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("Server stopped");
        Ok(())
    }
}
