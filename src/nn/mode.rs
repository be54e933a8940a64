/*
 * @Description  : 前向计算的 train/eval 模式
 *
 * 模式随每次 forward 调用显式传入，不存放在任何全局或层内部状态中。
 * 目前只有 Dropout 的行为受其影响。
 */

/// 前向计算模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ForwardMode {
    /// 训练模式：Dropout 生效
    Train,
    /// 推理模式（默认）：Dropout 为恒等映射，相同输入与参数必然得到相同输出
    #[default]
    Eval,
}

impl ForwardMode {
    pub const fn is_train(self) -> bool {
        matches!(self, Self::Train)
    }
}
