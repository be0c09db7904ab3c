//! 图像载体：按行、列、通道 (R, G, B) 的顺序把像素矩阵映射为比特通道。
//! 槽位的第 k 个比特写入通道值从最低位数起的第 k 位。

use super::{BitLane, SlotOrder, ensure_fits, read_slot, write_slot};
use crate::capacity::BitWidth;
use crate::constants::CHANNELS_PER_PIXEL;
use crate::error::{Result, StegoError};

/// 按行优先存放的 RGB 像素矩阵。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCarrier {
    width: u32,
    height: u32,
    pixels: Vec<[u8; CHANNELS_PER_PIXEL]>,
}

impl ImageCarrier {
    /// 创建图像载体。
    ///
    /// # Errors
    ///
    /// 像素数量不等于 `width * height` 时返回 [`StegoError::Format`]。
    pub fn new(width: u32, height: u32, pixels: Vec<[u8; CHANNELS_PER_PIXEL]>) -> Result<Self> {
        let expected = (width as usize).checked_mul(height as usize);
        if expected != Some(pixels.len()) {
            return Err(StegoError::Format(format!(
                "expected {width}x{height} pixels, got {}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// 由交错存放的 RGB 字节创建载体。
    pub fn from_rgb_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        if !bytes.len().is_multiple_of(CHANNELS_PER_PIXEL) {
            return Err(StegoError::Format(format!(
                "{} bytes do not form whole RGB pixels",
                bytes.len()
            )));
        }
        let pixels = bytes
            .chunks_exact(CHANNELS_PER_PIXEL)
            .map(|rgb| [rgb[0], rgb[1], rgb[2]])
            .collect();
        Self::new(width, height, pixels)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// 第 `(row, col)` 个像素。
    pub fn pixel(&self, row: u32, col: u32) -> Option<[u8; CHANNELS_PER_PIXEL]> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.pixels
            .get(row as usize * self.width as usize + col as usize)
            .copied()
    }

    /// 通道值总数，即槽位数量。
    pub fn channel_count(&self) -> usize {
        self.pixels.len() * CHANNELS_PER_PIXEL
    }

    pub fn into_rgb_bytes(self) -> Vec<u8> {
        self.pixels.into_iter().flatten().collect()
    }

    /// 计算两幅图像的均方根差，通道差值先归一化到 `[0, 1]`。
    ///
    /// # Errors
    ///
    /// 两幅图像尺寸不同时返回 [`StegoError::Format`]。
    pub fn rms_difference(&self, other: &ImageCarrier) -> Result<f64> {
        if (self.width, self.height) != (other.width, other.height) {
            return Err(StegoError::Format(format!(
                "cannot compare {}x{} with {}x{}",
                self.width, self.height, other.width, other.height
            )));
        }

        let count = self.channel_count();
        if count == 0 {
            return Ok(0.0);
        }

        let sum: f64 = self
            .channels()
            .zip(other.channels())
            .map(|(a, b)| {
                let diff = (a as f64 - b as f64) / 255.0;
                diff * diff
            })
            .sum();
        Ok((sum / count as f64).sqrt())
    }

    fn channels(&self) -> impl Iterator<Item = u8> + '_ {
        self.pixels.iter().flatten().copied()
    }
}

impl BitLane for ImageCarrier {
    fn slot_count(&self) -> usize {
        self.channel_count()
    }

    fn embed(&self, bit_width: BitWidth, bits: &[bool]) -> Result<Self> {
        ensure_fits(self.slot_count(), bit_width, bits)?;

        let mut stego = self.clone();
        let channels = stego.pixels.iter_mut().flat_map(|pixel| pixel.iter_mut());
        for (channel, slot_bits) in channels.zip(bits.chunks(bit_width.get() as usize)) {
            *channel = write_slot(*channel, bit_width, SlotOrder::LsbFirst, slot_bits);
        }
        Ok(stego)
    }

    fn read_bits(
        &self,
        bit_width: BitWidth,
        slot_count: usize,
    ) -> impl Iterator<Item = bool> + '_ {
        self.channels()
            .take(slot_count)
            .flat_map(move |channel| read_slot(channel, bit_width, SlotOrder::LsbFirst))
    }
}
