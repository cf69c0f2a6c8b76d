mod config;
mod db;
mod llm;
mod routes;
mod services;
mod state;

use std::sync::Arc;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = config::AppConfig::from_env().expect("invalid server configuration");

    let pool = db::init_pool(&config.database_url, config.db_max_connections)
        .await
        .expect("database init failed");

    match services::session::prune_expired(&pool).await {
        Ok(0) => {}
        Ok(removed) => tracing::info!(removed, "pruned expired sessions"),
        Err(e) => tracing::warn!(error = %e, "session prune failed"),
    }

    let llm = llm::OllamaClient::from_env().expect("invalid LLM configuration");
    tracing::info!(model = llm.model(), "LLM client initialized");

    let state = state::AppState::new(pool, Arc::new(llm), config.cookie_secure).with_static_dir(&config.static_dir);

    let app = routes::app(state, &config);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("failed to bind");

    tracing::info!(port = config.port, "recommender listening");
    axum::serve(listener, app).await.expect("server failed");
}
