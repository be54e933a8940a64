use rand::Rng;

use crate::tensor::Tensor;

/// 参数初始化方式
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Init {
    /// 正态分布
    Normal { mean: f32, std: f32 },
    /// 均匀分布 [low, high)
    Uniform { low: f32, high: f32 },
}

impl Init {
    /// PyTorch `nn.Linear` 的默认初始化：权重与偏置均为 U(-1/√fan_in, 1/√fan_in)
    pub fn torch_linear(fan_in: usize) -> Self {
        let bound = 1.0 / (fan_in.max(1) as f32).sqrt();
        Self::Uniform {
            low: -bound,
            high: bound,
        }
    }

    /// 生成初始化后的 Tensor（使用指定的 RNG）
    pub fn generate_with_rng<R: Rng + ?Sized>(&self, shape: &[usize], rng: &mut R) -> Tensor {
        match *self {
            Self::Normal { mean, std } => Tensor::normal_with_rng(mean, std, shape, rng),
            Self::Uniform { low, high } => Tensor::uniform_with_rng(low, high, shape, rng),
        }
    }
}
