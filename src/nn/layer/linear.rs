/*
 * @Description  : Linear (全连接) 层
 */

use rand::Rng;

use super::expect_last_dim;
use crate::nn::{Init, ModelError, Module};
use crate::tensor::Tensor;

/// Linear (全连接) 层
///
/// PyTorch 风格的全连接层：`output = x @ W + b`
///
/// # 输入/输出形状
/// - 输入：[..., in_features]（前面的维度全部视为批维度）
/// - 输出：[..., out_features]
///
/// # 使用示例
/// ```ignore
/// let mut rng = StdRng::seed_from_u64(42);
/// let fc = Linear::new(784, 128, true, "fc1", &mut rng);
/// let h = fc.forward(&x)?.gelu();
/// ```
#[derive(Debug, Clone)]
pub struct Linear {
    /// 权重参数 [in_features, out_features]
    weights: Tensor,
    /// 偏置参数 [out_features]（可选）
    bias: Option<Tensor>,
    in_features: usize,
    out_features: usize,
    /// 层名称（参数名前缀）
    name: String,
}

impl Linear {
    /// 创建新的 Linear 层，权重与偏置均按 PyTorch `nn.Linear` 的默认方式初始化
    ///
    /// # 参数
    /// - `in_features`: 输入特征维度
    /// - `out_features`: 输出特征维度
    /// - `use_bias`: 是否使用偏置
    /// - `name`: 层名称前缀
    /// - `rng`: 随机数生成器（传入固定种子的`StdRng`即可保证可重复性）
    pub fn new<R: Rng + ?Sized>(
        in_features: usize,
        out_features: usize,
        use_bias: bool,
        name: &str,
        rng: &mut R,
    ) -> Self {
        let init = Init::torch_linear(in_features);
        let weights = init.generate_with_rng(&[in_features, out_features], rng);
        let bias = use_bias.then(|| init.generate_with_rng(&[out_features], rng));

        Self {
            weights,
            bias,
            in_features,
            out_features,
            name: name.to_string(),
        }
    }

    /// 前向传播，计算 `x @ W + b`
    ///
    /// # 参数
    /// - `x`: 输入张量，形状 [..., in_features]
    ///
    /// # 返回
    /// 输出张量，形状 [..., out_features]；最后一维不等于`in_features`时返回`ShapeMismatch`
    pub fn forward(&self, x: &Tensor) -> Result<Tensor, ModelError> {
        expect_last_dim(x, self.in_features, &self.name)?;
        let xw = x.mat_mul_last(&self.weights)?;
        match self.bias {
            Some(ref bias) => Ok(xw.try_add(bias)?),
            None => Ok(xw),
        }
    }

    /// 获取输入特征维度
    pub const fn in_features(&self) -> usize {
        self.in_features
    }

    /// 获取输出特征维度
    pub const fn out_features(&self) -> usize {
        self.out_features
    }

    pub const fn weights(&self) -> &Tensor {
        &self.weights
    }

    pub const fn bias(&self) -> Option<&Tensor> {
        self.bias.as_ref()
    }
}

impl Module for Linear {
    fn named_parameters(&self) -> Vec<(String, &Tensor)> {
        let mut params = vec![(format!("{}_W", self.name), &self.weights)];
        if let Some(ref bias) = self.bias {
            params.push((format!("{}_b", self.name), bias));
        }
        params
    }

    fn named_parameters_mut(&mut self) -> Vec<(String, &mut Tensor)> {
        let mut params = vec![(format!("{}_W", self.name), &mut self.weights)];
        if let Some(ref mut bias) = self.bias {
            params.push((format!("{}_b", self.name), bias));
        }
        params
    }
}
