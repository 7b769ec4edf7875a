use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde_json::json;

mod config;
mod convert;
mod extract;
mod fetch;
mod models;
mod naming;
mod page;
mod render;

use config::Config;
use convert::convert;
use fetch::ScraperClient;
use models::ConvertRequest;

#[derive(Clone)]
struct AppState {
    client: ScraperClient,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = Config::from_env();
    if config.api_key.is_none() {
        tracing::warn!("SCRAPER_API_KEY is not set; every conversion will fail");
    }

    let client = match ScraperClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("failed to build HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    let listener = match tokio::net::TcpListener::bind(&config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("cannot bind {}: {}", config.bind_addr, e);
            std::process::exit(1);
        }
    };
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("listening on {}", addr);
    }

    if let Err(e) = axum::serve(listener, app(AppState { client })).await {
        tracing::error!("server error: {}", e);
        std::process::exit(1);
    }
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/generate", post(generate))
        .route("/download", post(download))
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

async fn index() -> Html<String> {
    Html(page::form_page("", None))
}

async fn generate(State(state): State<AppState>, Form(req): Form<ConvertRequest>) -> Response {
    match convert(&state.client, &req.url).await {
        Ok(generated) => {
            tracing::info!(file = %generated.file_name, "document ready");
            Html(page::result_page(&req.url, &generated)).into_response()
        }
        Err(e) => {
            tracing::warn!("conversion failed: {}", e);
            (e.status(), Html(page::form_page(&req.url, Some(&e.to_string())))).into_response()
        }
    }
}

async fn download(State(state): State<AppState>, Form(req): Form<ConvertRequest>) -> Response {
    match convert(&state.client, &req.url).await {
        Ok(generated) => {
            let disposition = format!("attachment; filename=\"{}\"", generated.file_name);
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, render::DOCX_MIME.to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                generated.docx,
            )
                .into_response()
        }
        Err(e) => {
            tracing::warn!("download failed: {}", e);
            (e.status(), Json(json!({"detail": e.to_string()}))).into_response()
        }
    }
}
