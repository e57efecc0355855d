//! 选择题文本解析
//!
//! 把模型返回的自由文本切分为题目块，并从每块中提取答案与解析。
//! 解析从不失败：缺少标签行的块照样产出题目，对应字段为空。

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::Mcq;

/// 题目分隔符：连续三个及以上的短横线
static RE_DELIMITER: Lazy<Regex> = Lazy::new(|| Regex::new(r"-{3,}").unwrap());

const ANSWER_LABEL: &str = "correct answer:";
const EXPLANATION_LABEL: &str = "explanation:";

/// 解析完整响应文本，按出现顺序返回题目列表
pub fn parse_mcqs(raw: &str) -> Vec<Mcq> {
    split_blocks(raw).map(parse_block).collect()
}

/// 切分题目块，去除首尾空白并丢弃空块
pub fn split_blocks(raw: &str) -> impl Iterator<Item = &str> {
    RE_DELIMITER
        .split(raw)
        .map(str::trim)
        .filter(|block| !block.is_empty())
}

/// 解析单个题目块
pub fn parse_block(block: &str) -> Mcq {
    let correct_answer = block.lines().find_map(answer_letter);
    let explanation = block.lines().find_map(explanation_text);

    let question = block
        .lines()
        .filter(|line| !is_label_line(line))
        .collect::<Vec<_>>()
        .join("\n");

    Mcq {
        question,
        correct_answer,
        explanation,
    }
}

/// 若行（去除首尾空白后）以 `label` 开头（忽略大小写），返回标签之后的部分
fn strip_label<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let line = line.trim();
    let head = line.get(..label.len())?;
    head.eq_ignore_ascii_case(label).then(|| &line[label.len()..])
}

fn is_label_line(line: &str) -> bool {
    strip_label(line, ANSWER_LABEL).is_some() || strip_label(line, EXPLANATION_LABEL).is_some()
}

/// `Correct Answer: <X>` 中的选项字母，统一为小写
fn answer_letter(line: &str) -> Option<String> {
    let rest = strip_label(line, ANSWER_LABEL)?;
    let letter = rest.trim_start().chars().next()?;
    matches!(letter, 'a'..='d' | 'A'..='D').then(|| letter.to_ascii_lowercase().to_string())
}

/// `Explanation: <text>` 中去除首尾空白的正文
fn explanation_text(line: &str) -> Option<String> {
    let rest = strip_label(line, EXPLANATION_LABEL)?.trim();
    (!rest.is_empty()).then(|| rest.to_string())
}
