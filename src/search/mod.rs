//! Search dispatch / 搜索调度
//!
//! One user action maps to one backend request: normalize the query, pick
//! the indexes, fire, and hand the hits back untouched.

pub mod query;

use crate::quickwit::{QuickwitSearchResponse, SearchBackend};

/// Run one search against the backend / 执行一次搜索
///
/// An empty trimmed query short-circuits to an empty response without
/// touching the backend. An empty index selection falls back to the
/// configured default index.
pub async fn run_search(
    backend: &dyn SearchBackend,
    default_index: &str,
    raw_query: &str,
    indexes: &[String],
    max_hits: u64,
) -> anyhow::Result<QuickwitSearchResponse> {
    let trimmed = raw_query.trim();
    if trimmed.is_empty() {
        return Ok(QuickwitSearchResponse::default());
    }

    let formatted = query::format_query(trimmed);

    let index_expr = if indexes.is_empty() {
        default_index.to_string()
    } else {
        indexes.join(",")
    };

    tracing::debug!("Search query: {} (indexes: {})", formatted, index_expr);

    backend.search(&index_expr, &formatted, max_hits).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IndexSummary;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Records what reaches the backend / 记录到达后端的请求
    #[derive(Default)]
    struct MockBackend {
        calls: AtomicUsize,
        last: Mutex<Option<(String, String, u64)>>,
        fail: bool,
    }

    #[async_trait]
    impl SearchBackend for MockBackend {
        async fn list_indexes(&self) -> anyhow::Result<Vec<IndexSummary>> {
            Ok(vec![])
        }

        async fn search(
            &self,
            index_expr: &str,
            query: &str,
            max_hits: u64,
        ) -> anyhow::Result<QuickwitSearchResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last.lock().unwrap() =
                Some((index_expr.to_string(), query.to_string(), max_hits));
            if self.fail {
                anyhow::bail!("index not found");
            }
            Ok(QuickwitSearchResponse {
                num_hits: 1,
                hits: vec![serde_json::json!({ "name": "pikachu" })],
                errors: vec![],
            })
        }
    }

    #[tokio::test]
    async fn test_empty_query_sends_no_request() {
        let backend = MockBackend::default();
        let resp = run_search(&backend, "pokemon", "   ", &[], 20).await.unwrap();
        assert_eq!(resp.num_hits, 0);
        assert!(resp.hits.is_empty());
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_selection_defaults_to_pokemon() {
        let backend = MockBackend::default();
        run_search(&backend, "pokemon", "pikachu", &[], 20).await.unwrap();
        let (index_expr, query, max_hits) = backend.last.lock().unwrap().clone().unwrap();
        assert_eq!(index_expr, "pokemon");
        assert_eq!(query, "documents.name:pikachu OR documents._all_text:pikachu");
        assert_eq!(max_hits, 20);
    }

    #[tokio::test]
    async fn test_multiple_indexes_comma_joined() {
        let backend = MockBackend::default();
        let indexes = vec!["pokemon".to_string(), "items".to_string()];
        run_search(&backend, "pokemon", "steel", &indexes, 20).await.unwrap();
        let (index_expr, query, _) = backend.last.lock().unwrap().clone().unwrap();
        assert_eq!(index_expr, "pokemon,items");
        assert_eq!(query, "types:steel");
    }

    #[tokio::test]
    async fn test_backend_error_propagates() {
        let backend = MockBackend {
            fail: true,
            ..MockBackend::default()
        };
        let err = run_search(&backend, "pokemon", "pikachu", &[], 20)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "index not found");
    }
}
