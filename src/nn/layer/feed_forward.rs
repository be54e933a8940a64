/*
 * @Description  : FeedForward 块 - 层归一化 + 两层全连接 + GELU，带残差连接
 *
 * 公式:
 *   h = GELU(LayerNorm(x) @ W1 + b1)      # [..., dim_h] -> [..., expand * dim_h]
 *   h = Dropout(h)
 *   y = Dropout(h @ W2 + b2) + x          # [..., expand * dim_h] -> [..., dim_h]
 *
 * 残差加的是未归一化的原始输入，因此输出形状与输入形状严格一致。
 */

use rand::Rng;

use super::{Dropout, LayerNorm, Linear, expect_last_dim};
use crate::nn::{ForwardMode, ModelError, Module};
use crate::tensor::Tensor;

/// FeedForward 块
///
/// # 输入/输出形状
/// - 输入：[..., dim_h]
/// - 输出：[..., dim_h]
#[derive(Debug, Clone)]
pub struct FeedForward {
    layer_norm: LayerNorm,
    dense1: Linear,
    dense2: Linear,
    dropout: Dropout,
    dim_h: usize,
    name: String,
}

impl FeedForward {
    /// 创建新的 FeedForward 块
    ///
    /// # 参数
    /// - `dim_h`: 输入/输出宽度
    /// - `expand`: 中间层相对`dim_h`的扩张倍数
    /// - `drop_rate`: Dropout 概率，须在 [0, 1) 内
    /// - `name`: 层名称前缀
    pub fn new<R: Rng + ?Sized>(
        dim_h: usize,
        expand: usize,
        drop_rate: f32,
        name: &str,
        rng: &mut R,
    ) -> Result<Self, ModelError> {
        if dim_h == 0 || expand == 0 {
            return Err(ModelError::InvalidConfig(format!(
                "FeedForward 的 dim_h、expand 均须≥1，实际为 {dim_h}、{expand}"
            )));
        }
        let dropout = Dropout::new(drop_rate)?;
        Ok(Self {
            layer_norm: LayerNorm::new(dim_h, &format!("{name}_layer_norm")),
            dense1: Linear::new(dim_h, expand * dim_h, true, &format!("{name}_dense1"), rng),
            dense2: Linear::new(expand * dim_h, dim_h, true, &format!("{name}_dense2"), rng),
            dropout,
            dim_h,
            name: name.to_string(),
        })
    }

    /// 前向传播
    ///
    /// `mode`为`Train`时两处 Dropout 生效，否则结果只取决于输入与参数。
    pub fn forward(&self, x: &Tensor, mode: ForwardMode) -> Result<Tensor, ModelError> {
        expect_last_dim(x, self.dim_h, &self.name)?;
        let h = self.layer_norm.forward(x)?;
        let h = self.dense1.forward(&h)?.gelu();
        let h = self.dropout.forward(&h, mode);
        let h = self.dense2.forward(&h)?;
        let h = self.dropout.forward(&h, mode);
        Ok(h.try_add(x)?)
    }

    pub const fn dim_h(&self) -> usize {
        self.dim_h
    }

    pub const fn drop_rate(&self) -> f32 {
        self.dropout.p()
    }
}

impl Module for FeedForward {
    fn named_parameters(&self) -> Vec<(String, &Tensor)> {
        [
            self.layer_norm.named_parameters(),
            self.dense1.named_parameters(),
            self.dense2.named_parameters(),
        ]
        .concat()
    }

    fn named_parameters_mut(&mut self) -> Vec<(String, &mut Tensor)> {
        let mut params = self.layer_norm.named_parameters_mut();
        params.extend(self.dense1.named_parameters_mut());
        params.extend(self.dense2.named_parameters_mut());
        params
    }
}
