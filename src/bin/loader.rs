//! Pokémon data loader / Pokémon 数据加载器
//!
//! Fetches Pokémon records from PokeAPI and ingests them into Quickwit.
//! Creates the index from the schema file when it does not exist yet.
//! Configured through config.json plus the `QUICKWIT_URL`, `INDEX_NAME`,
//! `DATA_URL` and `POKEMON` environment variables.

use anyhow::{Context, Result};
use serde_json::Value;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pokesearch_backend::config;
use pokesearch_backend::quickwit::QuickwitClient;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
const MAX_RETRIES: u32 = 3;

/// Load the index schema and make sure it names an index / 加载索引 schema
fn load_schema(path: &str) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read schema file {}", path))?;
    let schema: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse schema file {}", path))?;

    if schema.get("index_id").and_then(|v| v.as_str()).is_none() {
        anyhow::bail!("No index_id found in schema file {}", path);
    }
    Ok(schema)
}

fn schema_index_id(schema: &Value) -> Option<&str> {
    schema.get("index_id").and_then(|v| v.as_str())
}

/// Make sure the target index exists, creating it from the schema when
/// missing / 确保索引存在，缺失时按 schema 创建
///
/// An existing index with a mismatched schema id is used with a warning;
/// creating one from a mismatched schema is refused.
async fn ensure_index(client: &QuickwitClient, schema: &Value, index_name: &str) -> Result<()> {
    let matches = schema_index_id(schema) == Some(index_name);

    if client.get_index(index_name).await?.is_some() {
        if !matches {
            tracing::warn!(
                "Index '{}' exists but schema index_id is {:?}, continuing anyway",
                index_name,
                schema_index_id(schema)
            );
        } else {
            tracing::info!("Using existing index '{}'", index_name);
        }
        return Ok(());
    }

    if !matches {
        anyhow::bail!(
            "Schema index_id {:?} doesn't match configured index '{}', refusing to create",
            schema_index_id(schema),
            index_name
        );
    }

    tracing::info!("Index '{}' doesn't exist, creating...", index_name);
    client.create_index(schema).await?;
    tracing::info!("Successfully created index '{}'", index_name);
    Ok(())
}

/// Fetch one Pokémon; `None` means a 404, i.e. the end of the data set
/// / 抓取单只，404 表示已到数据末尾
async fn fetch_pokemon(http: &reqwest::Client, base_url: &str, id: u32) -> Result<Option<Value>> {
    let url = format!("{}/{}", base_url.trim_end_matches('/'), id);

    let mut attempt = 0;
    loop {
        attempt += 1;

        let error = match http.get(&url).send().await {
            Ok(resp) if resp.status() == reqwest::StatusCode::NOT_FOUND => return Ok(None),
            Ok(resp) if resp.status().is_success() => match resp.json().await {
                Ok(doc) => return Ok(Some(doc)),
                Err(e) => e.to_string(),
            },
            Ok(resp) => format!("server returned {}", resp.status()),
            Err(e) => e.to_string(),
        };

        if attempt >= MAX_RETRIES {
            anyhow::bail!("Failed after {} attempts: {}", MAX_RETRIES, error);
        }

        // 指数退避 / exponential backoff: 1s, 2s, ...
        let wait = 2u64.pow(attempt - 1);
        tracing::warn!("Request failed, retrying in {}s... ({})", wait, error);
        tokio::time::sleep(Duration::from_secs(wait)).await;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokesearch_backend=info,pokesearch_loader=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let app_config = config::load_config().expect("Failed to load configuration");
    let index_name = app_config.search.default_index.clone();

    tracing::info!("Starting Pokemon loader with source: {}", app_config.loader.data_url);
    tracing::info!("Index name: {}", index_name);
    tracing::info!("Destination URL: {}", app_config.quickwit.url);

    let schema = load_schema(&app_config.loader.schema_file)?;
    let client = QuickwitClient::new(&app_config.quickwit.url, app_config.quickwit.timeout_secs)?;

    ensure_index(&client, &schema, &index_name)
        .await
        .context("Failed to prepare index, aborting data load")?;

    let http = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(30))
        .build()?;

    let mut successful_loads = 0u32;

    for pokemon_id in 1..=app_config.loader.pokemon_count {
        match fetch_pokemon(&http, &app_config.loader.data_url, pokemon_id).await {
            Ok(Some(doc)) => {
                let name = doc
                    .get("name")
                    .and_then(|v| v.as_str())
                    .unwrap_or("unknown")
                    .to_string();
                tracing::info!("Processing Pokemon #{}: {}", pokemon_id, name);

                match client.ingest(&index_name, std::slice::from_ref(&doc)).await {
                    Ok(()) => {
                        successful_loads += 1;
                        tracing::info!("Successfully loaded Pokemon #{}", pokemon_id);
                    }
                    Err(e) => tracing::error!("Failed to upload Pokemon #{}: {}", pokemon_id, e),
                }
            }
            Ok(None) => {
                tracing::info!("Pokemon #{} not found - we've reached the end", pokemon_id);
                break;
            }
            Err(e) => {
                tracing::error!("Error processing Pokemon #{}: {}", pokemon_id, e);
                if pokemon_id > 1 {
                    break;
                }
            }
        }

        // Rate limiting - be nice to the API / 限速，别压垮上游
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    tracing::info!("Pokemon loading complete. Loaded {} Pokemon.", successful_loads);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_index_id() {
        let schema = serde_json::json!({ "index_id": "pokemon", "version": "0.8" });
        assert_eq!(schema_index_id(&schema), Some("pokemon"));

        let missing = serde_json::json!({ "version": "0.8" });
        assert_eq!(schema_index_id(&missing), None);
    }
}
