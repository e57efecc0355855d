//! 生成客户端
//!
//! `GenerationClient` 是同步（阻塞）接口，调用方负责把调用放到工作线程执行。

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, warn};

use super::format::build_gemini_endpoint;
use super::types::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, LlmError, Part};

/// 文本生成能力
pub trait GenerationClient: Send + Sync {
    /// 发起一次生成调用，阻塞直到返回
    fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, LlmError>;
}

/// Gemini 请求载荷
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<Content>,
    generation_config: &'a GenerationConfig,
}

/// Gemini 错误响应
#[derive(Deserialize)]
struct GeminiErrorBody {
    error: GeminiErrorDetail,
}

#[derive(Deserialize)]
struct GeminiErrorDetail {
    message: String,
}

/// Gemini REST 客户端
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    /// 创建新的 Gemini 客户端
    ///
    /// API 密钥为空时仍可创建，首次调用时才报错。
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self, LlmError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(5)
            .build()
            .map_err(LlmError::HttpError)?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into(),
        })
    }
}

impl GenerationClient for GeminiClient {
    fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, LlmError> {
        if self.api_key.is_empty() {
            return Err(LlmError::ConfigError(
                "GEMINI_API_KEY is not configured".to_string(),
            ));
        }

        let endpoint = build_gemini_endpoint(&self.base_url, &request.model);
        let payload = GeminiRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part::text(request.prompt.as_str())],
            }],
            generation_config: &request.config,
        };

        debug!("Gemini API request: endpoint={}, model={}", endpoint, request.model);

        let response = self
            .client
            .post(&endpoint)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()?;

        // 检查状态码
        let status = response.status();
        if !status.is_success() {
            let status_code = status.as_u16();
            let error_text = response.text().unwrap_or_default();
            error!(
                "Gemini API error: status={}, body={}",
                status_code,
                error_text.chars().take(500).collect::<String>()
            );
            return Err(LlmError::ApiError {
                status: status_code,
                message: api_error_message(&error_text),
            });
        }

        let body = response.text()?;
        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;

        if let Some(reason) = parsed
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
        {
            warn!("Gemini blocked the prompt: reason={}", reason);
        }
        for candidate in &parsed.candidates {
            match candidate.finish_reason.as_deref() {
                None | Some("STOP") => {}
                Some(reason) => warn!("Gemini candidate finished early: reason={}", reason),
            }
        }
        if let Some(usage) = &parsed.usage_metadata {
            debug!(
                "Gemini usage: prompt={:?}, candidates={:?}, total={:?}",
                usage.prompt_token_count, usage.candidates_token_count, usage.total_token_count
            );
        }

        Ok(parsed)
    }
}

/// 从错误响应中提取可读信息，解析失败时返回原文
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<GeminiErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}
