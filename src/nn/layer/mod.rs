/*
 * @Description  : Layer 模块 - 组合张量运算构建 GRED/SuperPixel 所需的网络结构
 */

mod dropout;
mod feed_forward;
mod gred;
mod layer_norm;
mod linear;
mod lru;

pub use dropout::Dropout;
pub use feed_forward::FeedForward;
pub use gred::{Gred, distance_mix};
pub use layer_norm::LayerNorm;
pub use linear::Linear;
pub use lru::{Lru, SequenceTransform};

/// 检查张量最后一维的宽度，供各层在前向计算入口处复用
pub(crate) fn expect_last_dim(
    x: &crate::tensor::Tensor,
    width: usize,
    layer: &str,
) -> Result<(), super::ModelError> {
    match x.shape().last() {
        Some(&w) if w == width => Ok(()),
        _ => {
            let mut expected = x.shape().to_vec();
            match expected.last_mut() {
                Some(last) => *last = width,
                None => expected.push(width),
            }
            Err(super::ModelError::ShapeMismatch {
                expected,
                got: x.shape().to_vec(),
                message: format!("{layer}的输入最后一维须为{width}"),
            })
        }
    }
}
