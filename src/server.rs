//! HTTP サーバー
//!
//! `/api/click` と `/api/stats` を提供し、それ以外のパスは静的ファイルとして配信します。
/// API エラー
pub mod error;
/// `/api/*` のハンドラー
pub mod handlers;
/// 共有状態
pub mod state;

use std::net::SocketAddr;
use std::path::Path;

use axum::Router;
use axum::routing::get;
use thiserror::Error;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use state::AppState;

use crate::config::ServerSettings;
use crate::tracker::{
    ClickStore,
    ClickTracker,
    StoreError,
};

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Failed to open click database: {0}")]
    Store(#[from] StoreError),

    #[error("Invalid listen address: {0}")]
    Address(#[from] std::net::AddrParseError),

    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// ルーターを組み立てる
///
/// `/api/click` は GET と POST の両方を受け付けます。
pub fn router(state: AppState, static_root: &Path) -> Router {
    Router::new()
        .route("/api/click", get(handlers::record_click).post(handlers::record_click))
        .route("/api/stats", get(handlers::stats))
        .fallback_service(ServeDir::new(static_root))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// 設定に従ってサーバーを起動し、終了まで待つ
///
/// # Errors
/// データベースを開けない、またはポートにバインドできない場合
pub async fn serve(settings: &ServerSettings) -> Result<(), ServerError> {
    let store = ClickStore::open(&settings.database_path)?;
    let state = AppState::new(ClickTracker::new(store));
    let app = router(state, &settings.static_root);

    let addr: SocketAddr = format!("{}:{}", settings.host, settings.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;

    tracing::info!("Kids Games server running at http://{}:{}/", local.ip(), local.port());
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    tracing::info!("Server stopped");

    Ok(())
}

/// Ctrl+C で終了
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
