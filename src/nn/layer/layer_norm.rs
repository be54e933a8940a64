use super::expect_last_dim;
use crate::nn::{ModelError, Module};
use crate::tensor::Tensor;

/// 层归一化：沿最后一维归一化到零均值、单位方差，再做可学习的逐特征缩放与平移
#[derive(Debug, Clone)]
pub struct LayerNorm {
    /// 缩放参数 [dim]，初始化为全一
    gamma: Tensor,
    /// 平移参数 [dim]，初始化为全零
    beta: Tensor,
    dim: usize,
    eps: f32,
    name: String,
}

impl LayerNorm {
    /// 与 PyTorch `nn.LayerNorm` 默认值一致的数值稳定项
    pub const DEFAULT_EPS: f32 = 1e-5;

    pub fn new(dim: usize, name: &str) -> Self {
        Self {
            gamma: Tensor::ones(&[dim]),
            beta: Tensor::zeros(&[dim]),
            dim,
            eps: Self::DEFAULT_EPS,
            name: name.to_string(),
        }
    }

    pub fn forward(&self, x: &Tensor) -> Result<Tensor, ModelError> {
        expect_last_dim(x, self.dim, &self.name)?;
        Ok(x.layer_norm(&self.gamma, &self.beta, self.eps)?)
    }

    pub const fn dim(&self) -> usize {
        self.dim
    }
}

impl Module for LayerNorm {
    fn named_parameters(&self) -> Vec<(String, &Tensor)> {
        vec![
            (format!("{}_gamma", self.name), &self.gamma),
            (format!("{}_beta", self.name), &self.beta),
        ]
    }

    fn named_parameters_mut(&mut self) -> Vec<(String, &mut Tensor)> {
        vec![
            (format!("{}_gamma", self.name), &mut self.gamma),
            (format!("{}_beta", self.name), &mut self.beta),
        ]
    }
}
