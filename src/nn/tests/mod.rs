use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::tensor::Tensor;

mod layer_feed_forward;
mod layer_lru;

/// 固定种子的随机数生成器，保证测试可重复
fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// 形状为 [batch, nodes, nodes] 的单位距离掩码（每个节点只汇聚自身特征）
fn identity_dist_mask(batch: usize, nodes: usize) -> Tensor {
    let mut data = Vec::with_capacity(batch * nodes * nodes);
    for _ in 0..batch {
        data.extend(Tensor::eyes(nodes).to_vec());
    }
    Tensor::new(&data, &[batch, nodes, nodes])
}
