//! Application configuration module / 应用配置模块
//!
//! Manages application configuration loaded from config.json
//! Creates default config file on first run / 首次运行时创建默认配置文件
//!
//! A few keys can be overridden by environment variables so the server and
//! the loader can run in containers without a config file:
//! `QUICKWIT_URL`, `INDEX_NAME`, `DATA_URL`, `POKEMON`.

use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// Global configuration instance / 全局配置实例
static CONFIG: OnceCell<Arc<RwLock<AppConfig>>> = OnceCell::new();

/// Application configuration / 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration / 服务器配置
    pub server: ServerConfig,
    /// Quickwit backend configuration / Quickwit 后端配置
    pub quickwit: QuickwitConfig,
    /// Search configuration / 搜索配置
    pub search: SearchConfig,
    /// Data loader configuration / 数据加载配置
    pub loader: LoaderConfig,
}

/// Server configuration / 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address / 服务器监听地址
    pub host: String,
    /// Server port / 服务器端口
    pub port: u16,
}

/// Quickwit backend configuration / Quickwit 后端配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuickwitConfig {
    /// Base URL of the Quickwit server / Quickwit 服务地址
    pub url: String,
    /// Request timeout in seconds / 请求超时（秒）
    pub timeout_secs: u64,
}

/// Search configuration / 搜索配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Index checked by default in the UI / 默认选中的索引
    pub default_index: String,
    /// Page size sent to the backend / 每次搜索返回的最大条数
    pub max_hits: u64,
}

/// Data loader configuration / 数据加载配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// PokeAPI base URL / PokeAPI 地址
    pub data_url: String,
    /// How many Pokémon to fetch / 抓取数量
    pub pokemon_count: u32,
    /// Index schema file / 索引 schema 文件
    pub schema_file: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            quickwit: QuickwitConfig::default(),
            search: SearchConfig::default(),
            loader: LoaderConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8180,
        }
    }
}

impl Default for QuickwitConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:7280".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_index: "pokemon".to_string(),
            max_hits: 20,
        }
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            data_url: "https://pokeapi.co/api/v2/pokemon".to_string(),
            pokemon_count: 10,
            schema_file: "schema.json".to_string(),
        }
    }
}

impl AppConfig {
    /// Get the server bind address / 获取服务器绑定地址
    pub fn get_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Get the config file path / 获取配置文件路径
fn get_config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("config.json")
}

/// Apply environment overrides / 应用环境变量覆盖
fn apply_env_overrides(config: &mut AppConfig) {
    if let Ok(url) = std::env::var("QUICKWIT_URL") {
        config.quickwit.url = url;
    }
    if let Ok(index) = std::env::var("INDEX_NAME") {
        config.search.default_index = index;
    }
    if let Ok(url) = std::env::var("DATA_URL") {
        config.loader.data_url = url.trim_end_matches('/').to_string();
    }
    if let Ok(count) = std::env::var("POKEMON") {
        match count.parse() {
            Ok(n) => config.loader.pokemon_count = n,
            Err(_) => tracing::warn!("Ignoring invalid POKEMON value: {}", count),
        }
    }
}

/// Load configuration from file, or create default if not exists / 加载配置文件，不存在则创建默认配置
pub fn load_config() -> Result<AppConfig, String> {
    let config_path = get_config_path();

    let mut config = if config_path.exists() {
        // Load existing config / 加载现有配置
        let content = std::fs::read_to_string(&config_path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        let config: AppConfig = serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse config file: {}", e))?;

        tracing::info!("Loaded configuration from {:?}", config_path);
        config
    } else {
        // Create default config / 创建默认配置
        let config = AppConfig::default();
        save_config(&config)?;
        tracing::info!("Created default configuration at {:?}", config_path);
        config
    };

    apply_env_overrides(&mut config);
    Ok(config)
}

/// Save configuration to file / 保存配置到文件
pub fn save_config(config: &AppConfig) -> Result<(), String> {
    let config_path = get_config_path();

    let content = serde_json::to_string_pretty(config)
        .map_err(|e| format!("Failed to serialize config: {}", e))?;

    std::fs::write(&config_path, content)
        .map_err(|e| format!("Failed to write config file: {}", e))?;

    Ok(())
}

/// Get global configuration instance / 获取全局配置实例
pub fn get_config() -> Arc<RwLock<AppConfig>> {
    CONFIG
        .get_or_init(|| {
            let config = load_config().unwrap_or_default();
            Arc::new(RwLock::new(config))
        })
        .clone()
}

/// Get a read-only snapshot of current config / 获取当前配置的只读快照
pub fn config() -> AppConfig {
    get_config().read().clone()
}
