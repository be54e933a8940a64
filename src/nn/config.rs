/*
 * @Description  : GRED 层与 SuperPixel 模型的超参数。所有超参数在构造时确定，模型生命周期内不再变化
 */

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::ModelError;

/// 门控激活变体。
///
/// 该选项被完整地接收、校验和序列化，但前向计算并不依据它分派：
/// FeedForward 固定使用 GELU。保留它只是为了让已有的超参数文件可以原样加载。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GatingVariant {
    #[default]
    #[serde(rename = "full-glu")]
    FullGlu,
    #[serde(rename = "half-glu1")]
    HalfGlu1,
    #[serde(rename = "half-glu2")]
    HalfGlu2,
    #[serde(rename = "none")]
    None,
}

/// 掩码均值池化遇到“没有任何有效节点”的图时的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyGraphPolicy {
    /// 照常除以有效节点数（0），结果为 NaN/Inf 并一路传播到输出
    #[default]
    Propagate,
    /// 池化结果取零向量，再经过输出投影
    Zeros,
}

/// 单个 GRED 层的超参数（堆叠中的每一层共享同一份）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GredConfig {
    /// 线性循环单元的状态宽度
    pub dim_v: usize,
    /// 隐藏宽度
    pub dim_h: usize,
    /// FeedForward 的扩张倍数
    #[serde(default = "default_expand")]
    pub expand: usize,
    /// 特征值模长下界
    #[serde(default)]
    pub r_min: f32,
    /// 特征值模长上界
    #[serde(default = "default_r_max")]
    pub r_max: f32,
    /// 特征值相位上界
    #[serde(default = "default_max_phase")]
    pub max_phase: f32,
    #[serde(default)]
    pub drop_rate: f32,
    #[serde(default)]
    pub act: GatingVariant,
}

const fn default_expand() -> usize {
    1
}

const fn default_r_max() -> f32 {
    1.0
}

const fn default_max_phase() -> f32 {
    6.28
}

impl GredConfig {
    /// 其余超参数取默认值：expand=1，r_min=0，r_max=1，max_phase=6.28，drop_rate=0，act=full-glu
    pub fn new(dim_v: usize, dim_h: usize) -> Self {
        Self {
            dim_v,
            dim_h,
            expand: default_expand(),
            r_min: 0.0,
            r_max: default_r_max(),
            max_phase: default_max_phase(),
            drop_rate: 0.0,
            act: GatingVariant::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if self.dim_v == 0 || self.dim_h == 0 || self.expand == 0 {
            return Err(ModelError::InvalidConfig(format!(
                "dim_v、dim_h、expand 均须≥1，实际为 {}、{}、{}",
                self.dim_v, self.dim_h, self.expand
            )));
        }
        validate_recurrence_bounds(self.r_min, self.r_max, self.max_phase)?;
        validate_drop_rate(self.drop_rate)
    }
}

/// 整个 SuperPixel 模型的超参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuperPixelConfig {
    /// GRED 层的堆叠层数，须≥1
    pub num_layers: usize,
    /// 输出宽度
    pub dim_o: usize,
    /// 节点特征的输入宽度，缺省时与`dim_h`相同
    #[serde(default)]
    pub dim_in: Option<usize>,
    #[serde(flatten)]
    pub gred: GredConfig,
    #[serde(default)]
    pub empty_graph_policy: EmptyGraphPolicy,
}

impl SuperPixelConfig {
    pub fn new(num_layers: usize, dim_o: usize, dim_v: usize, dim_h: usize) -> Self {
        Self {
            num_layers,
            dim_o,
            dim_in: None,
            gred: GredConfig::new(dim_v, dim_h),
            empty_graph_policy: EmptyGraphPolicy::default(),
        }
    }

    pub fn input_dim(&self) -> usize {
        self.dim_in.unwrap_or(self.gred.dim_h)
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if self.num_layers == 0 {
            return Err(ModelError::InvalidConfig(
                "num_layers 须≥1：SuperPixel 至少要有一层 GRED".to_string(),
            ));
        }
        if self.dim_o == 0 || self.input_dim() == 0 {
            return Err(ModelError::InvalidConfig(format!(
                "dim_o、dim_in 均须≥1，实际为 {}、{}",
                self.dim_o,
                self.input_dim()
            )));
        }
        self.gred.validate()
    }

    /// 从 JSON 字符串解析并校验
    pub fn from_json_str(json: &str) -> Result<Self, ModelError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// 从 JSON 文件解析并校验
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String, ModelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// 特征值模长须满足 0 ≤ r_min < r_max ≤ 1，相位上界须为正
pub(crate) fn validate_recurrence_bounds(
    r_min: f32,
    r_max: f32,
    max_phase: f32,
) -> Result<(), ModelError> {
    if !(0.0..1.0).contains(&r_min) || !(r_min < r_max && r_max <= 1.0) {
        return Err(ModelError::InvalidConfig(format!(
            "特征值模长须满足 0 ≤ r_min < r_max ≤ 1，实际 r_min={r_min}，r_max={r_max}"
        )));
    }
    if !(max_phase.is_finite() && max_phase > 0.0) {
        return Err(ModelError::InvalidConfig(format!(
            "max_phase 须为正数，实际为 {max_phase}"
        )));
    }
    Ok(())
}

/// Dropout 概率须在 [0, 1) 内
pub(crate) fn validate_drop_rate(drop_rate: f32) -> Result<(), ModelError> {
    if (0.0..1.0).contains(&drop_rate) {
        Ok(())
    } else {
        Err(ModelError::InvalidConfig(format!(
            "drop_rate 须在 [0, 1) 内，实际为 {drop_rate}"
        )))
    }
}
