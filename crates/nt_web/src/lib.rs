use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub mod envelope;
pub mod handlers;
pub mod pipeline;
pub mod state;

pub use envelope::Envelope;
pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/health", get(handlers::health))
        .route("/news", post(handlers::personalized_news))
        .route("/callable/news", post(handlers::callable_personalized_news))
        .layer(cors)
        .with_state(Arc::new(state))
}

/// Binds `addr` and serves the app until the process is stopped.
pub async fn serve(state: AppState, addr: &str) -> nt_core::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("🌐 Listening on {}", listener.local_addr()?);
    axum::serve(listener, create_app(state)).await?;
    Ok(())
}

pub mod prelude {
    pub use nt_core::{FinalArticle, Result, Error};
    pub use crate::{AppState, Envelope};
}
