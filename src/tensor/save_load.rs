use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use super::Tensor;
use crate::errors::TensorError;

// 保存和加载张量
impl Tensor {
    /// 将单个Tensor写入本地文件
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), TensorError> {
        let writer = BufWriter::new(File::create(path)?);
        bincode::serialize_into(writer, &self.data)?;
        Ok(())
    }

    /// 从本地文件加载单个Tensor
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TensorError> {
        let reader = BufReader::new(File::open(path)?);
        let data = bincode::deserialize_from(reader)?;
        Ok(Self { data })
    }
}
