//! 选择题生成服务
//!
//! 校验主题、构建提示词、在工作线程中调用生成客户端，并解析返回文本。

use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

use super::mcq_parser::parse_mcqs;
use super::prompt_service::{PromptService, MCQ_GENERATION_CONFIG};
use crate::error::{AppError, AppResult};
use crate::llm::{extract_text, GenerateContentRequest, GenerationClient};
use crate::models::Mcq;
use crate::utils::{generate_request_id, truncate};

/// 选择题生成服务
///
/// 持有进程级共享的生成客户端，可被多个并发请求同时使用。
pub struct McqService {
    generator: Arc<dyn GenerationClient>,
    prompt_service: PromptService,
    model: String,
}

impl McqService {
    /// 创建新的生成服务
    pub fn new(generator: Arc<dyn GenerationClient>, model: impl Into<String>) -> Self {
        Self {
            generator,
            prompt_service: PromptService::new(),
            model: model.into(),
        }
    }

    /// 为给定主题生成选择题
    pub async fn generate(&self, topic: &str) -> AppResult<Vec<Mcq>> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(AppError::InvalidInput("Topic is required".to_string()));
        }

        let request_id = generate_request_id();
        let started = Instant::now();
        info!(
            "MCQ request [{}]: topic={:?}, model={}",
            request_id,
            truncate(topic, 80),
            self.model
        );

        let request = GenerateContentRequest {
            model: self.model.clone(),
            prompt: self.prompt_service.build_mcq_prompt(topic),
            config: MCQ_GENERATION_CONFIG,
        };

        // 生成调用是阻塞的，放到工作线程执行
        let generator = Arc::clone(&self.generator);
        let response = tokio::task::spawn_blocking(move || generator.generate_content(&request))
            .await
            .map_err(|e| {
                error!("MCQ request [{}]: generation worker failed: {}", request_id, e);
                AppError::generation(e)
            })?
            .map_err(|e| {
                error!("MCQ request [{}]: generation failed: {}", request_id, e);
                AppError::generation(e)
            })?;

        let text = extract_text(&response).ok_or_else(|| {
            warn!("MCQ request [{}]: model returned no text", request_id);
            AppError::no_mcqs()
        })?;

        let mcqs = parse_mcqs(&text);
        info!(
            "MCQ request [{}]: parsed {} questions in {} ms",
            request_id,
            mcqs.len(),
            started.elapsed().as_millis()
        );

        Ok(mcqs)
    }
}
