/*
 * @Description  : nn 模块的错误类型
 */

use thiserror::Error;

use crate::errors::TensorError;

/// 构建或前向计算模型时可能出现的错误
#[derive(Error, Debug, PartialEq)]
pub enum ModelError {
    #[error("形状不匹配：期望{expected:?}，实际{got:?}（{message}）")]
    ShapeMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
        message: String,
    },
    #[error("维度不匹配：期望{expected}，实际{got}（{message}）")]
    DimensionMismatch {
        expected: usize,
        got: usize,
        message: String,
    },
    #[error("无效配置：{0}")]
    InvalidConfig(String),
    #[error("缺少参数：{0}")]
    MissingParameter(String),
    #[error(transparent)]
    Tensor(#[from] TensorError),
    #[error("配置解析失败：{0}")]
    Config(String),
    #[error("读写失败：{0}")]
    Io(String),
}

impl From<std::io::Error> for ModelError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ModelError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<bincode::Error> for ModelError {
    fn from(err: bincode::Error) -> Self {
        Self::Io(err.to_string())
    }
}
