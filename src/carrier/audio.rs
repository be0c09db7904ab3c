//! 音频载体：把 PCM 样本按顺序映射为比特通道，槽位内最高位优先。

use super::{BitLane, SlotOrder, ensure_fits, read_slot, write_slot};
use crate::capacity::BitWidth;
use crate::error::{Result, StegoError};

/// 已解码到内存中的 PCM 样本。
///
/// `raw` 为交错存放的原始样本字节，2 字节样本按小端序存放，
/// 因此每个样本的低位都位于其第一个字节中。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioCarrier {
    channel_count: u16,
    frame_count: usize,
    sample_width: usize,
    raw: Vec<u8>,
}

impl AudioCarrier {
    /// 创建音频载体。
    ///
    /// # Errors
    ///
    /// 如果发生以下任一情况，将返回 [`StegoError::Format`]：
    /// * 样本宽度不是 1 或 2 字节。
    /// * `raw` 的长度不等于 `channel_count * frame_count * sample_width`。
    pub fn new(
        channel_count: u16,
        frame_count: usize,
        sample_width: usize,
        raw: Vec<u8>,
    ) -> Result<Self> {
        if !(1..=2).contains(&sample_width) {
            return Err(StegoError::Format(format!(
                "sample width must be 1 or 2 bytes, got {sample_width}"
            )));
        }

        let expected = (channel_count as usize)
            .checked_mul(frame_count)
            .and_then(|samples| samples.checked_mul(sample_width));
        if expected != Some(raw.len()) {
            return Err(StegoError::Format(format!(
                "expected {channel_count} channels x {frame_count} frames x {sample_width} bytes, got {} bytes",
                raw.len()
            )));
        }

        Ok(Self {
            channel_count,
            frame_count,
            sample_width,
            raw,
        })
    }

    /// 由 8 位无符号样本创建载体。
    pub fn from_u8_samples(channel_count: u16, samples: Vec<u8>) -> Result<Self> {
        let frame_count = frames_for(channel_count, samples.len())?;
        Self::new(channel_count, frame_count, 1, samples)
    }

    /// 由 16 位有符号样本创建载体。
    pub fn from_i16_samples(channel_count: u16, samples: &[i16]) -> Result<Self> {
        let frame_count = frames_for(channel_count, samples.len())?;
        let raw = samples.iter().flat_map(|s| s.to_le_bytes()).collect();
        Self::new(channel_count, frame_count, 2, raw)
    }

    pub fn channel_count(&self) -> u16 {
        self.channel_count
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn sample_width(&self) -> usize {
        self.sample_width
    }

    pub fn sample_count(&self) -> usize {
        self.raw.len() / self.sample_width
    }

    pub fn raw_bytes(&self) -> &[u8] {
        &self.raw
    }

    pub fn into_raw_bytes(self) -> Vec<u8> {
        self.raw
    }

    /// 以 16 位有符号样本读出全部数据；8 位样本会被拒绝。
    pub fn to_i16_samples(&self) -> Result<Vec<i16>> {
        if self.sample_width != 2 {
            return Err(StegoError::Format(format!(
                "cannot read {}-byte samples as 16-bit",
                self.sample_width
            )));
        }
        Ok(self
            .raw
            .chunks_exact(2)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
            .collect())
    }

    /// 第 `index` 个样本最低字节的位置。
    fn low_byte(&self, index: usize) -> usize {
        index * self.sample_width
    }
}

fn frames_for(channel_count: u16, sample_count: usize) -> Result<usize> {
    if channel_count == 0 || !sample_count.is_multiple_of(channel_count as usize) {
        return Err(StegoError::Format(format!(
            "{sample_count} samples cannot be split into {channel_count} channels"
        )));
    }
    Ok(sample_count / channel_count as usize)
}

impl BitLane for AudioCarrier {
    fn slot_count(&self) -> usize {
        self.sample_count()
    }

    fn embed(&self, bit_width: BitWidth, bits: &[bool]) -> Result<Self> {
        ensure_fits(self.slot_count(), bit_width, bits)?;

        let mut stego = self.clone();
        for (index, slot_bits) in bits.chunks(bit_width.get() as usize).enumerate() {
            let at = self.low_byte(index);
            stego.raw[at] = write_slot(stego.raw[at], bit_width, SlotOrder::MsbFirst, slot_bits);
        }
        Ok(stego)
    }

    fn read_bits(
        &self,
        bit_width: BitWidth,
        slot_count: usize,
    ) -> impl Iterator<Item = bool> + '_ {
        self.raw
            .iter()
            .step_by(self.sample_width)
            .take(slot_count)
            .flat_map(move |&byte| read_slot(byte, bit_width, SlotOrder::MsbFirst))
    }
}
