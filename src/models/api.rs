//! REST API 请求/响应模型

use serde::{Deserialize, Serialize};

/// 生成请求
#[derive(Debug, Deserialize)]
pub struct TopicRequest {
    pub topic: String,
}

/// 单道选择题
///
/// 缺失的答案或解析序列化为 `null`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mcq {
    /// 题干（含选项，已去除答案与解析行）
    pub question: String,
    /// 正确选项，小写字母 a-d
    pub correct_answer: Option<String>,
    /// 解析
    pub explanation: Option<String>,
}

/// 生成响应
#[derive(Debug, Serialize)]
pub struct McqListResponse {
    pub mcqs: Vec<Mcq>,
}
