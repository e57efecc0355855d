//! Prompt 构建服务
//!
//! 负责构建选择题生成提示词

use crate::llm::GenerationConfig;

/// 每次生成的题目数量
pub const QUESTION_COUNT: usize = 5;

/// 生成参数：低温度以获得格式稳定的输出
pub const MCQ_GENERATION_CONFIG: GenerationConfig = GenerationConfig {
    temperature: 0.3,
    max_output_tokens: 800,
    top_p: 0.9,
};

/// 提示词中除主题行以外的固定部分
const FORMAT_INSTRUCTIONS: &str = "Each MCQ should have:
- A question
- Four options labeled a, b, c, and d
- The correct answer in the format: Correct Answer: <option letter>
- A short explanation in the format: Explanation: <text>
Separate each MCQ with a clear line like ---.";

/// Prompt 服务
pub struct PromptService;

impl PromptService {
    /// 创建新的 Prompt 服务
    pub fn new() -> Self {
        Self
    }

    /// 构建选择题生成提示词
    ///
    /// `topic` 应已去除首尾空白，会原样嵌入提示词。
    pub fn build_mcq_prompt(&self, topic: &str) -> String {
        format!(
            "Generate {} multiple-choice questions (MCQs) about {}.\n{}",
            QUESTION_COUNT, topic, FORMAT_INSTRUCTIONS
        )
    }
}

impl Default for PromptService {
    fn default() -> Self {
        Self::new()
    }
}
