//! # 容量规划模块
//!
//! 计算载体在给定位宽下可嵌入的比特数，并协商能容纳负载的最小位宽。
//! 本模块中的函数都是纯函数，没有副作用。

use crate::constants::{MAX_BIT_WIDTH, MIN_BIT_WIDTH};
use crate::error::{Result, StegoError};
use std::fmt;

/// 每个槽位使用的低位数量，取值范围为 `1..=8`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BitWidth(u8);

impl BitWidth {
    pub const MIN: BitWidth = BitWidth(MIN_BIT_WIDTH);
    pub const MAX: BitWidth = BitWidth(MAX_BIT_WIDTH);

    /// 创建一个位宽。
    ///
    /// # Errors
    ///
    /// 如果 `bits` 不在 `1..=8` 范围内，返回 [`StegoError::InvalidConfig`]。
    pub fn new(bits: u8) -> Result<Self> {
        if (MIN_BIT_WIDTH..=MAX_BIT_WIDTH).contains(&bits) {
            Ok(Self(bits))
        } else {
            Err(StegoError::InvalidConfig(format!(
                "bit width must be between {MIN_BIT_WIDTH} and {MAX_BIT_WIDTH}, got {bits}"
            )))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// 按升序遍历所有合法位宽。
    pub fn all() -> impl Iterator<Item = BitWidth> {
        (MIN_BIT_WIDTH..=MAX_BIT_WIDTH).map(BitWidth)
    }
}

impl Default for BitWidth {
    fn default() -> Self {
        Self::MIN
    }
}

impl fmt::Display for BitWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for BitWidth {
    type Error = StegoError;

    fn try_from(bits: u8) -> Result<Self> {
        Self::new(bits)
    }
}

/// 一次隐藏操作的容量规划结果。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityPlan {
    /// 实际使用的位宽。
    pub bit_width: BitWidth,
    /// 该位宽下载体的总容量 (比特)。
    pub capacity_bits: usize,
    /// 带帧负载占用的比特数。
    pub payload_bits: usize,
    /// 需要用填充比特补齐的剩余容量。
    pub spare_bits: usize,
}

impl CapacityPlan {
    fn new(slot_count: usize, bit_width: BitWidth, payload_bits: usize) -> Self {
        let capacity_bits = compute_capacity(slot_count, bit_width);
        Self {
            bit_width,
            capacity_bits,
            payload_bits,
            spare_bits: capacity_bits - payload_bits,
        }
    }
}

pub fn compute_capacity(slot_count: usize, bit_width: BitWidth) -> usize {
    slot_count.saturating_mul(bit_width.get() as usize)
}

/// 协商能容纳 `framed_bits` 比特的最小位宽。
///
/// 返回的位宽 `w` 满足 `slot_count * (w - 1) < framed_bits <= slot_count * w`
/// (当 `framed_bits` 不超过 `slot_count` 时 `w` 为 1)。
///
/// # Errors
///
/// 如果即使位宽为 8 也放不下 (包括 `slot_count` 为 0 的情况)，
/// 返回 [`StegoError::Capacity`]。
pub fn negotiate_bit_width(slot_count: usize, framed_bits: usize) -> Result<BitWidth> {
    let max_bits = compute_capacity(slot_count, BitWidth::MAX);
    if slot_count == 0 || framed_bits > max_bits {
        return Err(StegoError::Capacity {
            needed: framed_bits,
            available: max_bits,
        });
    }

    let required = framed_bits.div_ceil(slot_count).max(MIN_BIT_WIDTH as usize);
    BitWidth::new(required as u8)
}

/// 在首选位宽的基础上规划一次隐藏操作。
///
/// 首选位宽放得下时直接使用；否则在 `auto_widen` 为真时提升到协商出的最小位宽，
/// 选出的位宽永远不会低于首选位宽。
///
/// # Errors
///
/// * `auto_widen` 为假且首选位宽放不下时，返回 [`StegoError::Capacity`]。
/// * 任何位宽都放不下时，返回 [`StegoError::Capacity`]。
pub fn plan(
    slot_count: usize,
    framed_bits: usize,
    preferred: BitWidth,
    auto_widen: bool,
) -> Result<CapacityPlan> {
    let preferred_bits = compute_capacity(slot_count, preferred);
    if framed_bits <= preferred_bits {
        return Ok(CapacityPlan::new(slot_count, preferred, framed_bits));
    }

    if !auto_widen {
        return Err(StegoError::Capacity {
            needed: framed_bits,
            available: preferred_bits,
        });
    }

    let negotiated = negotiate_bit_width(slot_count, framed_bits)?;
    Ok(CapacityPlan::new(
        slot_count,
        negotiated.max(preferred),
        framed_bits,
    ))
}
