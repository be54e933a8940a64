use ndarray::{Array3, Ix2, Ix3, IxDyn};

use crate::errors::{Operator, TensorError};
use crate::tensor::Tensor;

impl Tensor {
    /// 实现矩阵乘法。只接受2阶张量。
    /// 需要保证前一个张量的列数（col）等于后一个张量的行数（row）。
    pub fn mat_mul(&self, other: &Self) -> Result<Self, TensorError> {
        self.expect_rank(Operator::MatMul, 2)?;
        other.expect_rank(Operator::MatMul, 2)?;
        if self.shape()[1] != other.shape()[0] {
            return Err(self.operator_error(Operator::MatMul, other));
        }
        let self_data = self.as_ix2(Operator::MatMul)?;
        let other_data = other.as_ix2(Operator::MatMul)?;
        Ok(Self::from_array(self_data.dot(&other_data).into_dyn()))
    }

    /// 将最后一维与2阶张量`weights`相乘：`[..., k] @ [k, n] -> [..., n]`。
    /// 前面的维度全部视为批维度，`Linear`层即基于此实现。
    pub fn mat_mul_last(&self, weights: &Self) -> Result<Self, TensorError> {
        weights.expect_rank(Operator::MatMul, 2)?;
        if self.dimension() == 0 {
            return Err(self.operator_error(Operator::MatMul, weights));
        }
        let k = self.shape()[self.dimension() - 1];
        if k != weights.shape()[0] {
            return Err(self.operator_error(Operator::MatMul, weights));
        }
        let n = weights.shape()[1];
        let rows = self.size() / k.max(1);

        // 压平为 [rows, k] 后做一次二维矩阵乘法，再恢复批维度
        let flat = self
            .data
            .as_standard_layout()
            .into_owned()
            .into_shape((rows, k))
            .map_err(|_| self.operator_error(Operator::MatMul, weights))?;
        let product = flat.dot(&weights.as_ix2(Operator::MatMul)?);

        let mut out_shape = self.shape().to_vec();
        if let Some(last) = out_shape.last_mut() {
            *last = n;
        }
        let data = product
            .into_shape(IxDyn(&out_shape))
            .map_err(|_| self.operator_error(Operator::MatMul, weights))?;
        Ok(Self::from_array(data))
    }

    /// 批量矩阵乘法：`[b, n, m] @ [b, m, k] -> [b, n, k]`，对每个批元素分别做矩阵乘法
    pub fn batch_mat_mul(&self, other: &Self) -> Result<Self, TensorError> {
        self.expect_rank(Operator::BatchMatMul, 3)?;
        other.expect_rank(Operator::BatchMatMul, 3)?;
        let (lhs, rhs) = (self.shape(), other.shape());
        if lhs[0] != rhs[0] || lhs[2] != rhs[1] {
            return Err(self.operator_error(Operator::BatchMatMul, other));
        }

        let a = self.as_ix3(Operator::BatchMatMul)?;
        let b = other.as_ix3(Operator::BatchMatMul)?;
        let mut out = Array3::<f32>::zeros((lhs[0], lhs[1], rhs[2]));
        for (mut o, (x, y)) in out
            .outer_iter_mut()
            .zip(a.outer_iter().zip(b.outer_iter()))
        {
            o.assign(&x.dot(&y));
        }
        Ok(Self::from_array(out.into_dyn()))
    }

    pub(crate) fn expect_rank(&self, operator: Operator, rank: usize) -> Result<(), TensorError> {
        if self.dimension() == rank {
            Ok(())
        } else {
            Err(TensorError::RankMismatch {
                operator,
                expected: rank,
                got: self.dimension(),
            })
        }
    }

    pub(crate) fn operator_error(&self, operator: Operator, other: &Self) -> TensorError {
        TensorError::OperatorError {
            operator,
            tensor1_shape: self.shape().to_vec(),
            tensor2_shape: other.shape().to_vec(),
        }
    }

    fn as_ix2(&self, operator: Operator) -> Result<ndarray::ArrayView2<'_, f32>, TensorError> {
        self.data
            .view()
            .into_dimensionality::<Ix2>()
            .map_err(|_| TensorError::RankMismatch {
                operator,
                expected: 2,
                got: self.dimension(),
            })
    }

    fn as_ix3(&self, operator: Operator) -> Result<ndarray::ArrayView3<'_, f32>, TensorError> {
        self.data
            .view()
            .into_dimensionality::<Ix3>()
            .map_err(|_| TensorError::RankMismatch {
                operator,
                expected: 3,
                got: self.dimension(),
            })
    }
}
