use rand::Rng;

use crate::nn::config::validate_drop_rate;
use crate::nn::{ForwardMode, ModelError};
use crate::tensor::Tensor;

/// Dropout（inverted dropout）
///
/// 训练模式下每个元素以概率`p`置零，保留下来的元素放大`1/(1-p)`倍，使期望保持不变；
/// 推理模式或`p == 0`时为恒等映射。本层没有可训练参数。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dropout {
    p: f32,
}

impl Dropout {
    /// `p`须在 [0, 1) 内
    pub fn new(p: f32) -> Result<Self, ModelError> {
        validate_drop_rate(p)?;
        Ok(Self { p })
    }

    pub const fn p(&self) -> f32 {
        self.p
    }

    /// 使用线程本地随机数生成器
    pub fn forward(&self, x: &Tensor, mode: ForwardMode) -> Tensor {
        self.forward_with_rng(x, mode, &mut rand::thread_rng())
    }

    /// 使用调用方提供的随机数生成器，便于复现某次训练步
    pub fn forward_with_rng<R: Rng + ?Sized>(
        &self,
        x: &Tensor,
        mode: ForwardMode,
        rng: &mut R,
    ) -> Tensor {
        if !mode.is_train() || self.p == 0.0 {
            return x.clone();
        }
        let (p, scale) = (self.p, 1.0 / (1.0 - self.p));
        x.map(|v| if rng.r#gen::<f32>() < p { 0.0 } else { v * scale })
    }
}
