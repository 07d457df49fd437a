use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, middleware};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::api::{self, AppState};
use crate::config::{ServerConfig, WeatherProxyConfig};
use crate::nws::NwsClient;
use crate::service::WeatherService;

/// Full application: API under `/api`, frontend at `/` and `/static`
pub fn router(service: WeatherService, server: &ServerConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let static_dir = &server.static_dir;

    Router::new()
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .nest_service("/static", ServeDir::new(static_dir))
        .nest("/api", api::router(AppState { service }))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::GATEWAY_TIMEOUT,
            Duration::from_secs(server.request_timeout_seconds.into()),
        ))
        .layer(middleware::map_response(timeout_detail))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Gives the bare timeout response the same `{"detail": ...}` body as API errors
async fn timeout_detail(response: Response) -> Response {
    if response.status() == StatusCode::GATEWAY_TIMEOUT
        && !response.headers().contains_key(header::CONTENT_TYPE)
    {
        tracing::warn!("Request timed out");
        return (
            StatusCode::GATEWAY_TIMEOUT,
            Json(json!({"detail": "Request timed out"})),
        )
            .into_response();
    }
    response
}

/// Wires the NWS client into the router
pub fn app(config: &WeatherProxyConfig) -> Result<Router> {
    let client = NwsClient::new(&config.upstream).context("Failed to create NWS client")?;
    tracing::debug!("Using NWS API at {}", client.base_url());

    let service = WeatherService::new(Arc::new(client), config.limits.clone());
    Ok(router(service, &config.server))
}

pub async fn run(config: WeatherProxyConfig) -> Result<()> {
    let app = app(&config)?;
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| {
            format!(
                "Invalid listen address {}:{}",
                config.server.host, config.server.port
            )
        })?;

    #[cfg(feature = "tls")]
    if let (Some(cert), Some(key)) = (&config.tls.cert_path, &config.tls.key_path) {
        let tls = axum_server::tls_rustls::RustlsConfig::from_pem_file(cert, key)
            .await
            .context("Failed to load TLS certificate")?;
        tracing::info!("Web server running at https://{}", addr);
        axum_server::bind_rustls(addr, tls)
            .serve(app.into_make_service())
            .await
            .context("HTTPS server failed")?;
        return Ok(());
    }

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Web server running at http://localhost:{}", config.server.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    tracing::info!("Web server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
