/*
 * @Description  : 负责神经网络（neural network）的构建：各层、SuperPixel 模型及其配置与参数存取
 */

mod config;
mod error;
mod init;
pub mod layer;
pub mod model;
mod mode;
mod module;
mod state_dict;

pub use config::{EmptyGraphPolicy, GatingVariant, GredConfig, SuperPixelConfig};
pub use error::ModelError;
pub use init::Init;
pub use layer::{
    Dropout, FeedForward, Gred, LayerNorm, Linear, Lru, SequenceTransform, distance_mix,
};
pub use mode::ForwardMode;
pub use model::{SuperPixel, masked_mean_pool, node_mask_from_bools};
pub use module::Module;
pub use state_dict::StateDict;

#[cfg(test)]
mod tests;
