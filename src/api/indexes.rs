//! GET /indexes - 列出可搜索的索引

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::api::ErrorBody;
use crate::state::AppState;

/// List available indexes as `[{id}, ...]` / 返回索引列表
pub async fn list_indexes(State(state): State<Arc<AppState>>) -> Response {
    match state.backend.list_indexes().await {
        Ok(indexes) => Json(indexes).into_response(),
        Err(e) => {
            tracing::error!("Failed to list indexes: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody::new(e.to_string())),
            )
                .into_response()
        }
    }
}
