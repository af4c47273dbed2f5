use axum::{
    body::Body,
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use rust_embed::RustEmbed;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Embed frontend static files (compile-time embed from ./static) / 嵌入前端静态文件
#[derive(RustEmbed)]
#[folder = "static"]
struct FrontendAssets;

mod api;
mod state;

use pokesearch_backend::config;
use pokesearch_backend::quickwit::QuickwitClient;
use state::AppState;

/// Handle embedded static file requests / 处理嵌入的静态文件请求
async fn serve_embedded_file(uri: Uri) -> impl IntoResponse {
    let mut path = uri.path().trim_start_matches('/');
    if path.is_empty() {
        path = "index.html";
    }

    // Try to get requested file / 尝试获取请求的文件
    if let Some(content) = FrontendAssets::get(path) {
        let mime = mime_guess::from_path(path).first_or_octet_stream();
        return Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, mime.as_ref())
            .body(Body::from(content.data.into_owned()))
            .unwrap();
    }

    // Fall back to index.html for unknown paths / 未知路径回退到 index.html
    if let Some(content) = FrontendAssets::get("index.html") {
        return Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, "text/html; charset=utf-8")
            .body(Body::from(content.data.into_owned()))
            .unwrap();
    }

    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .body(Body::from("Not Found"))
        .unwrap()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokesearch_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration / 加载配置
    let app_config = config::load_config().expect("Failed to load configuration");
    tracing::info!(
        "Server will listen on {}:{}",
        app_config.server.host,
        app_config.server.port
    );

    let quickwit = Arc::new(QuickwitClient::new(
        &app_config.quickwit.url,
        app_config.quickwit.timeout_secs,
    )?);

    // Quickwit 不可达时只告警，不阻止启动；前端会显示内联错误
    match quickwit.health().await {
        Ok(true) => tracing::info!("Quickwit is reachable at {}", app_config.quickwit.url),
        Ok(false) => tracing::warn!("Quickwit health check failed at {}", app_config.quickwit.url),
        Err(e) => tracing::warn!(
            "Quickwit is not reachable at {}: {}",
            app_config.quickwit.url,
            e
        ),
    }

    let state = Arc::new(AppState {
        backend: quickwit,
        default_index: app_config.search.default_index.clone(),
        max_hits: app_config.search.max_hits,
    });

    let app = Router::new()
        .route("/api/health", get(api::server::health_check))
        .route("/indexes", get(api::indexes::list_indexes))
        .route("/search", post(api::search::search))
        .route("/ui/indexes", get(api::ui::indexes_fragment))
        .route("/ui/search", post(api::ui::search_fragment))
        // Embedded frontend static files
        .fallback(serve_embedded_file)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let bind_addr = app_config.get_bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("Server running at http://{}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
