//! 响应文本提取
//!
//! 按顺序尝试若干提取策略，第一个得到非空文本的策略胜出。

use super::types::GenerateContentResponse;

/// 文本提取策略
pub type TextExtractor = fn(&GenerateContentResponse) -> Option<String>;

/// 提取策略列表（按优先级排序）
pub const EXTRACTORS: &[TextExtractor] = &[direct_text, candidate_parts_text];

/// 依次应用提取策略，返回第一个非空结果
pub fn extract_text(response: &GenerateContentResponse) -> Option<String> {
    EXTRACTORS
        .iter()
        .find_map(|extract| extract(response).filter(|text| !text.is_empty()))
}

/// 直接文本：第一个候选结果中非思考片段的文本直接拼接
pub fn direct_text(response: &GenerateContentResponse) -> Option<String> {
    let mut found = false;
    let mut text = String::new();
    for part in response.first_parts() {
        if part.thought == Some(true) {
            continue;
        }
        if let Some(t) = &part.text {
            found = true;
            text.push_str(t);
        }
    }
    found.then_some(text)
}

/// 候选片段：第一个候选结果中所有带文本的片段，以单个空格连接后去除首尾空白
pub fn candidate_parts_text(response: &GenerateContentResponse) -> Option<String> {
    let texts: Vec<&str> = response
        .first_parts()
        .iter()
        .filter_map(|part| part.text.as_deref())
        .collect();
    if texts.is_empty() {
        return None;
    }
    Some(texts.join(" ").trim().to_string())
}
