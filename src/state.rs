use std::sync::Arc;

use pokesearch_backend::quickwit::SearchBackend;

/// Shared application state / 共享应用状态
pub struct AppState {
    /// The search backend (Quickwit in production, a mock in tests)
    pub backend: Arc<dyn SearchBackend>,
    /// Index checked by default in the UI / 默认选中的索引
    pub default_index: String,
    /// Page size used when a request does not specify one / 默认分页大小
    pub max_hits: u64,
}
