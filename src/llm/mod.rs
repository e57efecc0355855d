//! LLM 模块
//!
//! 提供 Gemini 生成客户端及响应文本提取。

mod client;
mod extract;
mod format;
mod types;

pub use client::{GeminiClient, GenerationClient};
pub use extract::extract_text;
pub use types::*;
