//! # 载体模块
//!
//! 把音频样本和图像像素统一抽象为比特通道 ([`BitLane`])：
//! 一串有序的槽位，每个槽位暴露载体元素的 `bit_width` 个低位。

pub mod audio;
pub mod picture;

pub use audio::AudioCarrier;
pub use picture::ImageCarrier;

use crate::bitstream::pack_bits;
use crate::capacity::BitWidth;
use crate::error::{Result, StegoError};

/// 槽位内比特的排列顺序。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotOrder {
    /// 槽位的第一个比特写入最高的那一位 (音频)。
    MsbFirst,
    /// 槽位的第 k 个比特写入从最低位数起的第 k 位 (图像)。
    LsbFirst,
}

impl SlotOrder {
    /// 槽位内第 `index` 个比特对应的位移量。
    fn shift(self, bit_width: BitWidth, index: u8) -> u8 {
        match self {
            SlotOrder::MsbFirst => bit_width.get() - 1 - index,
            SlotOrder::LsbFirst => index,
        }
    }
}

/// 可按槽位读写低位的载体。
///
/// 写入总是返回一个新载体，原载体保持不变。
pub trait BitLane: Sized {
    /// 槽位数量，即载体元素的数量。
    fn slot_count(&self) -> usize;

    /// 把 `bits` 依次写入各槽位，比特用尽后其余元素保持不变。
    ///
    /// # Errors
    ///
    /// `bits` 超过 `slot_count * bit_width` 时返回 [`StegoError::Capacity`]。
    fn embed(&self, bit_width: BitWidth, bits: &[bool]) -> Result<Self>;

    /// 按槽位顺序逐个产出前 `slot_count` 个槽位的低位。
    fn read_bits(
        &self,
        bit_width: BitWidth,
        slot_count: usize,
    ) -> impl Iterator<Item = bool> + '_;

    /// 依次读取前 `slot_count` 个槽位的低位。
    fn extract(&self, bit_width: BitWidth, slot_count: usize) -> Vec<bool> {
        self.read_bits(bit_width, slot_count).collect()
    }

    /// 读取前 `slot_count` 个槽位并直接按最高位优先组装成字节，
    /// 不为每个比特单独分配存储。
    fn extract_bytes(&self, bit_width: BitWidth, slot_count: usize) -> Vec<u8> {
        pack_bits(self.read_bits(bit_width, slot_count))
    }
}

/// 检查比特序列能否写入 `slot_count` 个槽位。
pub(crate) fn ensure_fits(slot_count: usize, bit_width: BitWidth, bits: &[bool]) -> Result<()> {
    let available = crate::capacity::compute_capacity(slot_count, bit_width);
    if bits.len() > available {
        return Err(StegoError::Capacity {
            needed: bits.len(),
            available,
        });
    }
    Ok(())
}

/// 把一个槽位的比特写入 `byte` 的低位：先清空目标位，再按位或入新值。
/// `bits` 可以少于 `bit_width`，缺少的位保持原值。
pub(crate) fn write_slot(byte: u8, bit_width: BitWidth, order: SlotOrder, bits: &[bool]) -> u8 {
    let (mask, value) = bits
        .iter()
        .take(bit_width.get() as usize)
        .enumerate()
        .fold((0u8, 0u8), |(mask, value), (index, &bit)| {
            let shift = order.shift(bit_width, index as u8);
            (mask | (1u8 << shift), value | (u8::from(bit) << shift))
        });
    (byte & !mask) | value
}

/// 按槽位顺序读出 `byte` 的 `bit_width` 个低位。
pub(crate) fn read_slot(
    byte: u8,
    bit_width: BitWidth,
    order: SlotOrder,
) -> impl Iterator<Item = bool> {
    (0..bit_width.get()).map(move |index| (byte >> order.shift(bit_width, index)) & 1 == 1)
}
