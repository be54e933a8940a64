/*
 * @Description  : SuperPixel 模型 - 输入投影 + 堆叠的 Gred 层 + 掩码均值池化 + 输出投影
 *
 * 流程（纯固定管线，没有分支状态）:
 *   x = Linear2(GELU(Linear1(features)))             # [batch, nodes, dim_in] -> [batch, nodes, dim_h]
 *   x = Gred_k(x, dist_mask), k = 1..num_layers       # 每层都使用同一个距离掩码
 *   x = where(node_mask, x, 0)
 *   g = sum_nodes(x) / count(node_mask)               # [batch, dim_h]
 *   y = Linear3(g)                                    # [batch, dim_o]
 */

use log::{debug, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::nn::layer::{Gred, Linear, expect_last_dim};
use crate::nn::{EmptyGraphPolicy, ForwardMode, ModelError, Module, SuperPixelConfig};
use crate::tensor::Tensor;

/// 由布尔切片构造节点有效性掩码，`true`记为 1，`false`记为 0
///
/// # 参数
/// - `mask`: 行优先排列的`batch * nodes`个布尔值
pub fn node_mask_from_bools(
    mask: &[bool],
    batch: usize,
    nodes: usize,
) -> Result<Tensor, ModelError> {
    let data = mask
        .iter()
        .map(|&valid| if valid { 1.0 } else { 0.0 })
        .collect::<Vec<_>>();
    Ok(Tensor::try_new(&data, &[batch, nodes])?)
}

/// 掩码均值池化：只在有效节点上对特征取平均
///
/// # 参数
/// - `x`: 节点特征，形状 [`batch_size`, `nodes`, `dim`]
/// - `node_mask`: 节点有效性掩码，形状 [`batch_size`, `nodes`]，非零即有效
/// - `policy`: 某个图没有任何有效节点时的处理方式
///
/// # 返回
/// 形状为 [`batch_size`, `dim`] 的池化结果
pub fn masked_mean_pool(
    x: &Tensor,
    node_mask: &Tensor,
    policy: EmptyGraphPolicy,
) -> Result<Tensor, ModelError> {
    if x.dimension() != 3 {
        return Err(ModelError::DimensionMismatch {
            expected: 3,
            got: x.dimension(),
            message: "池化输入须为 3D [batch, nodes, dim]".to_string(),
        });
    }
    let (batch, nodes) = (x.shape()[0], x.shape()[1]);
    if node_mask.shape() != [batch, nodes] {
        return Err(ModelError::ShapeMismatch {
            expected: vec![batch, nodes],
            got: node_mask.shape().to_vec(),
            message: "节点有效性掩码须为 [batch, nodes]".to_string(),
        });
    }

    let binary_mask = node_mask.map(|m| if m != 0.0 { 1.0 } else { 0.0 });
    let summed = x.masked_fill_rows(&binary_mask)?.sum_axis(1)?;
    let mut counts = binary_mask.sum_axis(1)?.to_vec();

    let empty = counts.iter().filter(|&&c| c == 0.0).count();
    if empty > 0 {
        match policy {
            EmptyGraphPolicy::Propagate => {
                warn!("{empty}个图没有任何有效节点，其池化结果将为非有限值");
            }
            EmptyGraphPolicy::Zeros => {
                debug!("{empty}个图没有任何有效节点，池化结果取零向量");
                // 这些图的特征和已全部被掩码置零，分母换成 1 即得到零向量
                for count in counts.iter_mut().filter(|c| **c == 0.0) {
                    *count = 1.0;
                }
            }
        }
    }

    let counts = Tensor::new(&counts, &[batch, 1]);
    Ok(summed.try_div(&counts)?)
}

/// SuperPixel 图级读出模型
///
/// # 输入/输出形状
/// - 节点特征：[`batch_size`, `nodes`, `dim_in`]
/// - 节点有效性掩码：[`batch_size`, `nodes`]
/// - 距离掩码：[`batch_size`, `nodes`, `nodes`]
/// - 输出：[`batch_size`, `dim_o`]
///
/// # 使用示例
/// ```ignore
/// let config = SuperPixelConfig::new(2, 3, 8, 8);
/// let model = SuperPixel::new(config, 42)?;
/// let y = model.forward(&features, &node_mask, &dist_mask, ForwardMode::Eval)?;
/// ```
#[derive(Debug, Clone)]
pub struct SuperPixel {
    initial_dense1: Linear,
    initial_dense2: Linear,
    gred_layers: Vec<Gred>,
    final_dense: Linear,
    config: SuperPixelConfig,
}

impl SuperPixel {
    /// 以固定种子创建模型，相同种子得到完全相同的初始参数
    pub fn new(config: SuperPixelConfig, seed: u64) -> Result<Self, ModelError> {
        Self::new_with_rng(config, &mut StdRng::seed_from_u64(seed))
    }

    /// 使用调用方提供的随机数生成器创建模型
    pub fn new_with_rng<R: Rng + ?Sized>(
        config: SuperPixelConfig,
        rng: &mut R,
    ) -> Result<Self, ModelError> {
        config.validate()?;
        let dim_h = config.gred.dim_h;

        let initial_dense1 = Linear::new(config.input_dim(), dim_h, true, "initial_dense1", rng);
        let initial_dense2 = Linear::new(dim_h, dim_h, true, "initial_dense2", rng);
        let gred_layers = (0..config.num_layers)
            .map(|i| Gred::new(&config.gred, &format!("gred_{i}"), rng))
            .collect::<Result<Vec<_>, _>>()?;
        // 所有 Gred 层结构相同，取最后一层的输出宽度即可
        let readout_dim = gred_layers
            .last()
            .map_or(dim_h, |layer| layer.output_dim());
        let final_dense = Linear::new(readout_dim, config.dim_o, true, "final_dense", rng);

        let model = Self {
            initial_dense1,
            initial_dense2,
            gred_layers,
            final_dense,
            config,
        };
        debug!(
            "SuperPixel 已创建：{}层 Gred，{}个参数张量，共{}个参数",
            model.gred_layers.len(),
            model.num_params(),
            model.num_elements()
        );
        Ok(model)
    }

    /// 前向传播
    ///
    /// # 参数
    /// - `features`: 节点特征，形状 [`batch_size`, `nodes`, `dim_in`]
    /// - `node_mask`: 节点有效性掩码，形状 [`batch_size`, `nodes`]，非零即有效
    /// - `dist_mask`: 距离掩码，形状 [`batch_size`, `nodes`, `nodes`]
    /// - `mode`: 训练/推理模式
    ///
    /// # 返回
    /// 形状为 [`batch_size`, `dim_o`] 的输出。
    /// 在`EmptyGraphPolicy::Propagate`下，没有有效节点的图对应的输出行为非有限值。
    pub fn forward(
        &self,
        features: &Tensor,
        node_mask: &Tensor,
        dist_mask: &Tensor,
        mode: ForwardMode,
    ) -> Result<Tensor, ModelError> {
        if features.dimension() != 3 {
            return Err(ModelError::DimensionMismatch {
                expected: 3,
                got: features.dimension(),
                message: "SuperPixel.forward 需要 3D 节点特征 [batch, nodes, dim_in]".to_string(),
            });
        }
        expect_last_dim(features, self.config.input_dim(), "SuperPixel")?;

        let x = self.initial_dense1.forward(features)?.gelu();
        let mut x = self.initial_dense2.forward(&x)?;
        for layer in &self.gred_layers {
            x = layer.forward(&x, dist_mask, mode)?;
        }

        let pooled = masked_mean_pool(&x, node_mask, self.config.empty_graph_policy)?;
        self.final_dense.forward(&pooled)
    }

    pub const fn config(&self) -> &SuperPixelConfig {
        &self.config
    }

    pub fn gred_layers(&self) -> &[Gred] {
        &self.gred_layers
    }
}

impl Module for SuperPixel {
    fn named_parameters(&self) -> Vec<(String, &Tensor)> {
        let mut params = self.initial_dense1.named_parameters();
        params.extend(self.initial_dense2.named_parameters());
        for layer in &self.gred_layers {
            params.extend(layer.named_parameters());
        }
        params.extend(self.final_dense.named_parameters());
        params
    }

    fn named_parameters_mut(&mut self) -> Vec<(String, &mut Tensor)> {
        let mut params = self.initial_dense1.named_parameters_mut();
        params.extend(self.initial_dense2.named_parameters_mut());
        for layer in &mut self.gred_layers {
            params.extend(layer.named_parameters_mut());
        }
        params.extend(self.final_dense.named_parameters_mut());
        params
    }
}
