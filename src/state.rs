//! 应用状态管理
//!
//! 定义在请求处理器之间共享的状态。

use std::sync::Arc;

use crate::llm::GenerationClient;
use crate::services::McqService;

/// 应用共享状态
///
/// 生成客户端在启动时创建一次，由此注入到处理器
pub struct AppState {
    /// 选择题生成服务
    pub mcq_service: McqService,
}

impl AppState {
    /// 创建新的应用状态
    pub fn new(generator: Arc<dyn GenerationClient>, model: impl Into<String>) -> Self {
        Self {
            mcq_service: McqService::new(generator, model),
        }
    }
}

/// 创建可共享的应用状态
pub fn create_shared_state(
    generator: Arc<dyn GenerationClient>,
    model: impl Into<String>,
) -> Arc<AppState> {
    Arc::new(AppState::new(generator, model))
}
