/*
 * @Description  : Gred 层 - 按图距离掩码重组节点特征，再依次经过 FeedForward 与线性循环单元
 *
 * 公式:
 *   xs[b] = D[b] @ X[b]          # D: [batch, nodes, nodes]，X: [batch, nodes, dim_h]
 *   xs    = FeedForward(xs)
 *   y     = Lru(xs)              # 或任意实现了 SequenceTransform 的序列变换
 *
 * 距离掩码的第 i 行给出节点 i 从各节点汇聚特征时的权重；
 * 它由调用方在每次 forward 时传入，本层既不持有也不修改它。
 */

use rand::Rng;

use super::{FeedForward, Lru, SequenceTransform, expect_last_dim};
use crate::nn::{ForwardMode, GredConfig, ModelError, Module};
use crate::tensor::Tensor;

/// 距离加权重组：`xs[b] = dist_mask[b] @ x[b]`
///
/// # 参数
/// - `x`: 节点特征，形状 [`batch_size`, `nodes`, `dim`]
/// - `dist_mask`: 距离掩码，形状 [`batch_size`, `nodes`, `nodes`]
pub fn distance_mix(x: &Tensor, dist_mask: &Tensor) -> Result<Tensor, ModelError> {
    if x.dimension() != 3 {
        return Err(ModelError::DimensionMismatch {
            expected: 3,
            got: x.dimension(),
            message: "节点特征须为 3D [batch, nodes, dim]".to_string(),
        });
    }
    let (batch, nodes) = (x.shape()[0], x.shape()[1]);
    if dist_mask.shape() != [batch, nodes, nodes] {
        return Err(ModelError::ShapeMismatch {
            expected: vec![batch, nodes, nodes],
            got: dist_mask.shape().to_vec(),
            message: "距离掩码须为 [batch, nodes, nodes]，且与节点特征的 batch、nodes 一致"
                .to_string(),
        });
    }
    Ok(dist_mask.batch_mat_mul(x)?)
}

/// Gred 层
///
/// # 输入/输出形状
/// - 输入：[`batch_size`, `nodes`, `dim_h`] 与距离掩码 [`batch_size`, `nodes`, `nodes`]
/// - 输出：[`batch_size`, `nodes`, `output_dim`]（默认 Lru 下`output_dim == dim_h`）
#[derive(Debug, Clone)]
pub struct Gred<T = Lru> {
    feed_forward: FeedForward,
    transform: T,
    config: GredConfig,
}

impl Gred<Lru> {
    /// 按`config`创建 FeedForward 与 Lru（状态宽度`dim_v`，模型宽度`dim_h`）
    pub fn new<R: Rng + ?Sized>(
        config: &GredConfig,
        name: &str,
        rng: &mut R,
    ) -> Result<Self, ModelError> {
        config.validate()?;
        let lru = Lru::new(
            config.dim_v,
            config.dim_h,
            config.r_min,
            config.r_max,
            config.max_phase,
            &format!("{name}_lru"),
            rng,
        )?;
        Self::with_transform(config, lru, name, rng)
    }
}

impl<T: SequenceTransform + Module> Gred<T> {
    /// 使用自定义的序列变换替代默认的 Lru
    pub fn with_transform<R: Rng + ?Sized>(
        config: &GredConfig,
        transform: T,
        name: &str,
        rng: &mut R,
    ) -> Result<Self, ModelError> {
        config.validate()?;
        let feed_forward = FeedForward::new(
            config.dim_h,
            config.expand,
            config.drop_rate,
            &format!("{name}_mlp"),
            rng,
        )?;
        Ok(Self {
            feed_forward,
            transform,
            config: config.clone(),
        })
    }

    /// 前向传播
    ///
    /// # 参数
    /// - `x`: 节点特征，形状 [`batch_size`, `nodes`, `dim_h`]
    /// - `dist_mask`: 距离掩码，形状 [`batch_size`, `nodes`, `nodes`]
    /// - `mode`: 训练/推理模式，透传给 FeedForward 与序列变换
    pub fn forward(
        &self,
        x: &Tensor,
        dist_mask: &Tensor,
        mode: ForwardMode,
    ) -> Result<Tensor, ModelError> {
        expect_last_dim(x, self.config.dim_h, "Gred")?;
        let xs = distance_mix(x, dist_mask)?;
        let xs = self.feed_forward.forward(&xs, mode)?;
        self.transform.transform(&xs, mode)
    }

    pub const fn config(&self) -> &GredConfig {
        &self.config
    }

    pub fn output_dim(&self) -> usize {
        self.transform.output_dim()
    }

    pub const fn transform(&self) -> &T {
        &self.transform
    }
}

impl<T: Module> Module for Gred<T> {
    fn named_parameters(&self) -> Vec<(String, &Tensor)> {
        [
            self.feed_forward.named_parameters(),
            self.transform.named_parameters(),
        ]
        .concat()
    }

    fn named_parameters_mut(&mut self) -> Vec<(String, &mut Tensor)> {
        let mut params = self.feed_forward.named_parameters_mut();
        params.extend(self.transform.named_parameters_mut());
        params
    }
}
