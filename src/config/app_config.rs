//! 应用配置管理
//!
//! 启动时从环境变量（以及可选的 `.env` 文件）读取一次配置，之后只读。

use std::net::SocketAddr;
use thiserror::Error;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// 应用配置结构体
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Gemini API 密钥，缺失时推迟到首次生成调用才报错
    pub api_key: String,

    /// Gemini API 基础 URL
    pub base_url: String,

    /// 模型名称
    pub model: String,

    /// 监听地址
    pub bind_address: SocketAddr,

    /// 允许跨域访问的来源
    pub allowed_origins: Vec<String>,
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8000))
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        // 线上前端
        "https://mcq-generator-chi.vercel.app".to_string(),
        // 本地开发
        "http://localhost:3000".to_string(),
    ]
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            model: default_model(),
            bind_address: default_bind_address(),
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl AppConfig {
    /// 从进程环境加载配置
    pub fn from_env() -> Result<Self, ConfigError> {
        // 测试中不读取 .env，避免污染
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 通过任意键值查找函数构建配置
    ///
    /// 空字符串与未设置等价。
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let bind_address = match get("BIND_ADDRESS") {
            Some(value) => value
                .parse::<SocketAddr>()
                .map_err(|e| ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string()))?,
            None => defaults.bind_address,
        };

        let allowed_origins = match get("CORS_ORIGINS") {
            Some(value) => parse_origins(&value),
            None => defaults.allowed_origins,
        };
        if allowed_origins.is_empty() {
            return Err(ConfigError::InvalidValue(
                "CORS_ORIGINS".to_string(),
                "no origins listed".to_string(),
            ));
        }

        Ok(Self {
            api_key: get("GEMINI_API_KEY").unwrap_or_default(),
            base_url: get("GEMINI_BASE_URL").unwrap_or(defaults.base_url),
            model: get("GEMINI_MODEL").unwrap_or(defaults.model),
            bind_address,
            allowed_origins,
        })
    }
}

/// 解析逗号分隔的来源列表
fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|origin| origin.trim().trim_end_matches('/'))
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
