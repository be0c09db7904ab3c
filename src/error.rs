//! # 错误类型模块
//!
//! 隐写核心的所有失败都以 [`StegoError`] 表示。每次调用都是确定性的，
//! 因此任何错误都是终止性的，不需要重试。

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StegoError {
    /// 载体形状或样本宽度不受支持。
    #[error("Unsupported carrier format: {0}")]
    Format(String),

    /// 即使使用允许的最大位宽，带帧的负载也放不下。
    #[error("Carrier capacity is not sufficient: need {needed} bits, have {available} bits")]
    Capacity { needed: usize, available: usize },

    /// 容量规划与编码器不一致，属于程序逻辑错误。
    #[error("Bit sequence of {len} bits already exceeds the target length of {target} bits")]
    Overflow { len: usize, target: usize },

    /// 在尝试的位宽下没有找到起始标记。
    #[error("No hidden data found: start marker is missing")]
    NotFound,

    /// 找到了起始标记，但没有结束标记 (载体被截断或损坏)。
    #[error("Hidden data is truncated: end marker is missing")]
    Truncated,

    /// 位宽或标记等配置无效。
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, StegoError>;
