//! Quickwit REST API client / Quickwit REST API 客户端
//!
//! The search backend is an external Quickwit instance reached over HTTP.
//! Only the handful of endpoints the app and the loader need are covered:
//! index listing/creation, ingest, search and health.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use crate::models::IndexSummary;

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Client-side error taxonomy: transport failures, non-success HTTP
/// statuses, and errors reported inside a success body.
#[derive(Debug, thiserror::Error)]
pub enum QuickwitError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("quickwit returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("{0}")]
    Api(String),
}

/// Index metadata as returned by `GET /api/v1/indexes`. Newer Quickwit
/// versions nest the id under `index_config`; older ones kept it flat.
#[derive(Debug, Clone, Deserialize)]
pub struct IndexMetadata {
    #[serde(default)]
    pub index_id: Option<String>,
    #[serde(default)]
    pub index_config: Option<IndexConfigMeta>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IndexConfigMeta {
    #[serde(default)]
    pub index_id: Option<String>,
}

impl IndexMetadata {
    /// The index id, wherever the server put it / 取索引 id
    pub fn id(&self) -> Option<&str> {
        self.index_config
            .as_ref()
            .and_then(|c| c.index_id.as_deref())
            .or(self.index_id.as_deref())
    }

    pub fn summary(&self) -> Option<IndexSummary> {
        self.id().map(|id| IndexSummary { id: id.to_string() })
    }
}

/// Search request body / 搜索请求体
#[derive(Debug, Clone, Serialize)]
pub struct QuickwitSearchRequest {
    pub query: String,
    pub max_hits: u64,
    pub start_offset: u64,
}

/// Search response; hits are raw documents / 搜索响应，hits 为原始文档
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuickwitSearchResponse {
    #[serde(default)]
    pub num_hits: u64,
    #[serde(default)]
    pub hits: Vec<Value>,
    /// Per-split failures Quickwit reports inside a 2xx body / 2xx 响应体内的错误
    #[serde(default)]
    pub errors: Vec<String>,
}

/// The seam between HTTP handlers and the concrete backend, so handlers can
/// be exercised against a mock / 处理器与后端之间的接口
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn list_indexes(&self) -> anyhow::Result<Vec<IndexSummary>>;

    /// `index_expr` may be a comma-joined list of index ids (Quickwit
    /// index-id patterns) / 支持逗号分隔的多索引表达式
    async fn search(
        &self,
        index_expr: &str,
        query: &str,
        max_hits: u64,
    ) -> anyhow::Result<QuickwitSearchResponse>;
}

pub struct QuickwitClient {
    base_url: String,
    client: Client,
}

impl QuickwitClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, QuickwitError> {
        let client = Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    /// Turn a non-success response into an error carrying the body text,
    /// which is where Quickwit puts its message / 非 2xx 时带上响应体
    async fn check(resp: reqwest::Response) -> Result<reqwest::Response, QuickwitError> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(QuickwitError::Status { status, body });
        }
        Ok(resp)
    }

    /// List all indexes / 列出所有索引
    pub async fn list_indexes(&self) -> Result<Vec<IndexMetadata>, QuickwitError> {
        let resp = self.client.get(self.url("/api/v1/indexes")).send().await?;
        let resp = Self::check(resp).await?;
        Ok(resp.json().await?)
    }

    /// Get index metadata; `None` when the index does not exist / 404 返回 None
    pub async fn get_index(&self, index_id: &str) -> Result<Option<IndexMetadata>, QuickwitError> {
        let url = self.url(&format!("/api/v1/indexes/{}", index_id));
        let resp = self.client.get(url).send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let resp = Self::check(resp).await?;
        Ok(Some(resp.json().await?))
    }

    /// Create an index from a JSON index config / 从 JSON 配置创建索引
    pub async fn create_index(&self, index_config: &Value) -> Result<Value, QuickwitError> {
        let resp = self
            .client
            .post(self.url("/api/v1/indexes"))
            .json(index_config)
            .send()
            .await?;
        let resp = Self::check(resp).await?;
        Ok(resp.json().await?)
    }

    /// Ingest documents into an index / 向索引写入文档
    pub async fn ingest(&self, index_id: &str, docs: &[Value]) -> Result<(), QuickwitError> {
        let url = self.url(&format!("/api/v1/{}/ingest", index_id));
        let resp = self
            .client
            .post(url)
            .json(&serde_json::json!({ "documents": docs }))
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }

    /// Search one index or a comma-joined index expression / 搜索
    pub async fn search(
        &self,
        index_expr: &str,
        query: &str,
        max_hits: u64,
    ) -> Result<QuickwitSearchResponse, QuickwitError> {
        let url = self.url(&format!("/api/v1/{}/search", index_expr));
        let body = QuickwitSearchRequest {
            query: query.to_string(),
            max_hits,
            start_offset: 0,
        };

        let resp = self.client.post(url).json(&body).send().await?;
        let resp = Self::check(resp).await?;
        let parsed: QuickwitSearchResponse = resp.json().await?;

        // 即便 2xx，响应体里也可能带错误 / errors can arrive inside a 2xx body
        if !parsed.errors.is_empty() {
            return Err(QuickwitError::Api(parsed.errors.join("; ")));
        }
        Ok(parsed)
    }

    /// Health check / 健康检查
    pub async fn health(&self) -> Result<bool, QuickwitError> {
        let resp = self.client.get(self.url("/health")).send().await?;
        Ok(resp.status().is_success())
    }
}

#[async_trait]
impl SearchBackend for QuickwitClient {
    async fn list_indexes(&self) -> anyhow::Result<Vec<IndexSummary>> {
        let metas = QuickwitClient::list_indexes(self).await?;
        Ok(metas.iter().filter_map(|m| m.summary()).collect())
    }

    async fn search(
        &self,
        index_expr: &str,
        query: &str,
        max_hits: u64,
    ) -> anyhow::Result<QuickwitSearchResponse> {
        Ok(QuickwitClient::search(self, index_expr, query, max_hits).await?)
    }
}
