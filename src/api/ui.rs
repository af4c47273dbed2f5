//! 服务端渲染的 UI 片段 / Server-rendered UI fragments
//!
//! The page shell fetches these and swaps them into the DOM. Failures here
//! never surface as HTTP errors; they render as inline messages so the page
//! keeps working.

use axum::{extract::State, response::Html, Json};
use std::sync::Arc;

use crate::api::search::SearchRequest;
use crate::state::AppState;
use pokesearch_backend::render;
use pokesearch_backend::search::run_search;

/// GET /ui/indexes - 索引复选框片段
pub async fn indexes_fragment(State(state): State<Arc<AppState>>) -> Html<String> {
    match state.backend.list_indexes().await {
        Ok(indexes) => Html(render::index_checkboxes(&indexes, &state.default_index)),
        Err(e) => {
            tracing::error!("Failed to load indexes: {}", e);
            Html(render::index_error(&e.to_string()))
        }
    }
}

/// POST /ui/search - 结果区片段（计数 + 卡片）
pub async fn search_fragment(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SearchRequest>,
) -> Html<String> {
    let max_hits = req.max_hits.unwrap_or(state.max_hits);

    match run_search(
        state.backend.as_ref(),
        &state.default_index,
        &req.query,
        &req.indexes,
        max_hits,
    )
    .await
    {
        Ok(resp) => Html(render::results_fragment(&resp.hits, resp.num_hits)),
        Err(e) => {
            tracing::error!("Search failed: {}", e);
            Html(render::error_fragment(&e.to_string()))
        }
    }
}
