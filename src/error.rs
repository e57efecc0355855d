//! 统一错误处理模块
//!
//! 定义应用级错误类型，并实现 axum 的 IntoResponse trait 以便自动转换为 HTTP 响应。
//! 响应体统一为 `{ "detail": ... }`，与前端的错误读取方式一致。

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt::Display;
use thiserror::Error;

/// 模型没有返回可用文本时的固定提示
pub const NO_MCQS_GENERATED: &str = "No MCQs generated";

/// 应用错误枚举
#[derive(Error, Debug)]
pub enum AppError {
    /// 请求参数错误（如主题为空）
    #[error("{0}")]
    InvalidInput(String),

    /// 生成失败：调用异常，或调用成功但没有可用文本
    #[error("{0}")]
    GenerationFailed(String),

    /// 请求体无法解析
    #[error("{0}")]
    UnprocessableEntity(String),
}

impl AppError {
    /// 将底层错误包装为 `Error: <message>` 形式的生成失败
    pub fn generation(err: impl Display) -> Self {
        AppError::GenerationFailed(format!("Error: {}", err))
    }

    /// 模型未返回任何文本
    pub fn no_mcqs() -> Self {
        AppError::GenerationFailed(NO_MCQS_GENERATED.to_string())
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::GenerationFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({
            "detail": self.to_string()
        }));

        (status, body).into_response()
    }
}

/// 便捷类型别名
pub type AppResult<T> = Result<T, AppError>;
