/*
 * @Description  : Module trait 定义
 */

use super::{ModelError, StateDict};
use crate::tensor::Tensor;

/// 模块 trait
///
/// # 设计原则
/// - `forward()` **不是** trait 方法（各层输入个数不同：FeedForward 只吃特征，Gred 还需要距离掩码）
/// - `new()` **不是** trait 方法（参数各异）
/// - 参数名在构造时由层名前缀拼出，如`fc1_W`、`fc1_b`，嵌套模块依次加前缀
/// - 本库只做前向计算，`named_parameters_mut()`留给外部优化器原地更新参数
///
/// # 使用示例
///
/// ```ignore
/// struct Mlp {
///     fc1: Linear,
///     fc2: Linear,
/// }
///
/// impl Module for Mlp {
///     fn named_parameters(&self) -> Vec<(String, &Tensor)> {
///         [self.fc1.named_parameters(), self.fc2.named_parameters()].concat()
///     }
///
///     fn named_parameters_mut(&mut self) -> Vec<(String, &mut Tensor)> {
///         let mut params = self.fc1.named_parameters_mut();
///         params.extend(self.fc2.named_parameters_mut());
///         params
///     }
/// }
/// ```
pub trait Module {
    /// 按固定顺序返回所有可训练参数及其名称
    fn named_parameters(&self) -> Vec<(String, &Tensor)>;

    /// 与`named_parameters()`顺序一致的可变版本
    fn named_parameters_mut(&mut self) -> Vec<(String, &mut Tensor)>;

    /// 参数张量的个数
    fn num_params(&self) -> usize {
        self.named_parameters().len()
    }

    /// 所有参数张量的元素总数
    fn num_elements(&self) -> usize {
        self.named_parameters()
            .iter()
            .map(|(_, tensor)| tensor.size())
            .sum()
    }

    /// 拷贝出当前所有参数
    fn state_dict(&self) -> StateDict {
        let mut state = StateDict::new();
        for (name, tensor) in self.named_parameters() {
            state.insert(name, tensor.clone());
        }
        state
    }

    /// 用`state`中的同名参数覆盖当前参数。
    /// 先校验全部参数（缺失或形状不符即返回错误），全部通过后才写入，因此失败时模型保持原样。
    /// `state`中多余的条目会被忽略。
    fn load_state_dict(&mut self, state: &StateDict) -> Result<(), ModelError> {
        for (name, tensor) in self.named_parameters() {
            let source = state
                .get(&name)
                .ok_or_else(|| ModelError::MissingParameter(name.clone()))?;
            if !source.is_same_shape(tensor) {
                return Err(ModelError::ShapeMismatch {
                    expected: tensor.shape().to_vec(),
                    got: source.shape().to_vec(),
                    message: format!("参数`{name}`的形状与模型不符"),
                });
            }
        }
        for (name, tensor) in self.named_parameters_mut() {
            if let Some(source) = state.get(&name) {
                *tensor = source.clone();
            }
        }
        Ok(())
    }
}
