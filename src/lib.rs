//! # GRED Net
//!
//! `gred_net`用纯rust实现 GRED（按图距离重组节点特征 + 线性循环单元）层，
//! 以及由其堆叠而成的 SuperPixel 图级读出模型。
//! 本库只负责模型的定义与前向计算；训练循环、优化器、数据加载等由外部完成，
//! 外部优化器可通过`nn::Module::named_parameters_mut()`原地更新参数。
//!

pub mod errors;
pub mod nn;
pub mod tensor;
pub mod utils;
