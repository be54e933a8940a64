use thiserror::Error;
mod ops;
pub use self::ops::*;

#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum TensorError {
    // 数字比较用
    #[error("{value_name}须{operator}{threshold}")]
    ValueMustSatisfyComparison {
        value_name: String,
        operator: ComparisonOperator,
        threshold: usize,
    },
    // 张量二元运算
    #[error(
        "形状不一致，故无法{operator}：第一个张量的形状为{tensor1_shape:?}，第二个张量的形状为{tensor2_shape:?}"
    )]
    OperatorError {
        operator: Operator,
        tensor1_shape: Vec<usize>,
        tensor2_shape: Vec<usize>,
    },
    #[error("{operator}需要{expected}阶张量，实际为{got}阶")]
    RankMismatch {
        operator: Operator,
        expected: usize,
        got: usize,
    },

    #[error("数据长度{data_len}与形状{shape:?}不匹配")]
    DataShapeMismatch { data_len: usize, shape: Vec<usize> },
    #[error("轴{axis}超出张量阶数{rank}")]
    AxisOutOfRange { axis: usize, rank: usize },

    #[error("张量读写失败：{0}")]
    Io(String),
    #[error("张量（反）序列化失败：{0}")]
    Serialization(String),
}

impl From<std::io::Error> for TensorError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<bincode::Error> for TensorError {
    fn from(err: bincode::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
