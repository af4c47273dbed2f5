//! POST /search - 搜索接口
//!
//! Request body `{query, indexes, max_hits}`, response `{results, total}`
//! on success and `{error}` with a 500 on failure. Hits pass through as raw
//! documents.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::api::ErrorBody;
use crate::state::AppState;
use pokesearch_backend::search::run_search;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default)]
    pub indexes: Vec<String>,
    #[serde(default)]
    pub max_hits: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<Value>,
    pub total: u64,
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SearchRequest>,
) -> Response {
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
        Ok(resp) => Json(SearchResponse {
            results: resp.hits,
            total: resp.num_hits,
        })
        .into_response(),
        Err(e) => {
            tracing::error!("Search failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody::new(e.to_string())),
            )
                .into_response()
        }
    }
}
