use crate::errors::{Operator, TensorError};
use crate::tensor::Tensor;

impl Tensor {
    /// 逐元素相除，支持与`try_add`相同的广播规则。
    /// 注意：这里不检查除数为零，遵循 IEEE 754 语义（`x/0`得到±Inf，`0/0`得到NaN），
    /// 由调用方决定是否需要兜底。
    pub fn try_div(&self, other: &Self) -> Result<Self, TensorError> {
        if !self.can_broadcast_with(other) {
            return Err(TensorError::OperatorError {
                operator: Operator::Div,
                tensor1_shape: self.shape().to_vec(),
                tensor2_shape: other.shape().to_vec(),
            });
        }
        Ok(Self {
            data: &self.data / &other.data,
        })
    }
}
