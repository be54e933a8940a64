use ndarray::{Axis, Ix2, Ix3, s};
use std::cmp::PartialEq;

use crate::errors::{Operator, TensorError};
use crate::tensor::Tensor;

impl PartialEq for Tensor {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl Tensor {
    /// 对张量中的所有元素求和并返回纯数
    pub fn sum_all(&self) -> f32 {
        self.data.sum()
    }

    /// 沿第`axis`个维度求和，该维度会被消去
    pub fn sum_axis(&self, axis: usize) -> Result<Self, TensorError> {
        if axis >= self.dimension() {
            return Err(TensorError::AxisOutOfRange {
                axis,
                rank: self.dimension(),
            });
        }
        Ok(Self::from_array(self.data.sum_axis(Axis(axis))))
    }

    /// 精确版 GELU：`x * Φ(x) = 0.5 * x * (1 + erf(x / √2))`
    pub fn gelu(&self) -> Self {
        self.map(|x| 0.5 * x * (1.0 + libm::erff(x * std::f32::consts::FRAC_1_SQRT_2)))
    }

    /// 沿最后一维做层归一化：`(x - mean) / sqrt(var + eps) * gamma + beta`。
    /// 方差为有偏估计（除以 n）；`gamma`、`beta`须为长度等于最后一维的1阶张量。
    pub fn layer_norm(&self, gamma: &Self, beta: &Self, eps: f32) -> Result<Self, TensorError> {
        gamma.expect_rank(Operator::LayerNorm, 1)?;
        beta.expect_rank(Operator::LayerNorm, 1)?;
        let width = match self.shape().last() {
            Some(&w) => w,
            None => return Err(self.operator_error(Operator::LayerNorm, gamma)),
        };
        if gamma.size() != width {
            return Err(self.operator_error(Operator::LayerNorm, gamma));
        }
        if beta.size() != width {
            return Err(self.operator_error(Operator::LayerNorm, beta));
        }

        let mut out = self.data.clone();
        let last = Axis(self.dimension() - 1);
        let n = width as f32;
        for mut lane in out.lanes_mut(last) {
            let mean = lane.sum() / n;
            let var = lane.iter().map(|v| (v - mean) * (v - mean)).sum::<f32>() / n;
            let inv_std = 1.0 / (var + eps).sqrt();
            for ((v, g), b) in lane.iter_mut().zip(gamma.data.iter()).zip(beta.data.iter()) {
                *v = (*v - mean) * inv_std * g + b;
            }
        }
        Ok(Self::from_array(out))
    }

    /// 对形状为`[b, n, d]`的张量，将`mask[b, n] == 0`的整行特征置零。
    /// `mask`须为形状`[b, n]`的2阶张量，非零即视为有效。
    pub fn masked_fill_rows(&self, mask: &Self) -> Result<Self, TensorError> {
        self.expect_rank(Operator::MaskedFill, 3)?;
        mask.expect_rank(Operator::MaskedFill, 2)?;
        if self.shape()[..2] != mask.shape()[..] {
            return Err(self.operator_error(Operator::MaskedFill, mask));
        }

        let mask_view = mask
            .data
            .view()
            .into_dimensionality::<Ix2>()
            .map_err(|_| self.operator_error(Operator::MaskedFill, mask))?;
        let mut out = self
            .data
            .clone()
            .into_dimensionality::<Ix3>()
            .map_err(|_| self.operator_error(Operator::MaskedFill, mask))?;
        for ((b, n), &m) in mask_view.indexed_iter() {
            if m == 0.0 {
                out.slice_mut(s![b, n, ..]).fill(0.0);
            }
        }
        Ok(Self::from_array(out.into_dyn()))
    }
}
