mod super_pixel;

pub use super_pixel::{SuperPixel, masked_mean_pool, node_mask_from_bools};
