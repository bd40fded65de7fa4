use std::sync::Arc;

use axum::http::{header, Method};
use axum::middleware;
use tokio::net::TcpListener;
use tokio::time::{self, MissedTickBehavior};
use tower_http::cors::{Any, CorsLayer};

use backend::shared::config;
use backend::shared::llm::openai_provider::OpenAiProvider;
use backend::usecases::u501_invoice_email::{session_store, LlmEmailGenerator, SessionStore};
use backend::{routes, system};
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u501_invoice_email::InvoiceEmail;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let log_file = system::tracing::initialize()?;
    tracing::info!("Logging to {}", log_file.display());

    let app_config = config::load_config()?;
    let api_key = config::resolve_api_key(&app_config.llm)?;

    let provider = OpenAiProvider::new_with_endpoint(
        app_config.llm.api_base.clone(),
        api_key.expose().to_string(),
        app_config.llm.model.clone(),
        app_config.llm.temperature,
        app_config.llm.max_tokens,
    );
    tracing::info!(
        "{}: model {} at {} (timeout {:?})",
        InvoiceEmail::full_name(),
        provider.model(),
        app_config.llm.api_base,
        app_config.llm.timeout()
    );

    let generator = LlmEmailGenerator::new(Arc::new(provider), app_config.llm.timeout());
    session_store::initialize(SessionStore::new(Arc::new(generator)))?;

    let sessions_config = app_config.sessions.clone();
    tokio::spawn(async move {
        let mut interval = time::interval(sessions_config.cleanup_interval());
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            if let Some(store) = session_store::get_store() {
                store.cleanup_stale_sessions(sessions_config.max_idle());
            }
        }
    });
    tracing::info!(
        "Idle invoice sessions are removed after {} min",
        app_config.sessions.max_idle_minutes
    );

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    let app = routes::configure_routes()
        .layer(middleware::from_fn(system::middleware::request_logger))
        .layer(cors);

    let addr = config::bind_address(&app_config.server)?;

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port {} is already in use. Please ensure no other process is using this port.",
                    addr.port()
                );
            } else {
                tracing::error!("Failed to bind to {}. Error: {}", addr, e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
