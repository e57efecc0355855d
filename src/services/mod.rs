//! 服务层模块

mod mcq_parser;
mod mcq_service;
mod prompt_service;

pub use mcq_service::McqService;

#[cfg(test)]
pub(crate) use mcq_service::testing;
