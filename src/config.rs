//! # 配置模块
//!
//! 帧标记与隐藏选项都通过参数显式传递，没有隐藏的全局状态。

use crate::capacity::BitWidth;
use crate::constants::{AUDIO_MARKER, IMAGE_MARKER};
use crate::error::{Result, StegoError};

/// 包裹负载的帧标记。
///
/// 标记通过朴素的子串搜索定位，如果负载内容本身包含标记字节，
/// 恢复时可能提前结束或误匹配。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker(Vec<u8>);

impl Marker {
    /// 创建一个标记。
    ///
    /// # Errors
    ///
    /// 空标记无法界定负载，返回 [`StegoError::InvalidConfig`]。
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(StegoError::InvalidConfig(
                "marker must not be empty".to_string(),
            ));
        }
        Ok(Self(bytes))
    }

    pub fn audio_default() -> Self {
        Self(AUDIO_MARKER.to_vec())
    }

    pub fn image_default() -> Self {
        Self(IMAGE_MARKER.to_vec())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// 隐藏操作的选项。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HideOptions {
    /// 负载前后的帧标记。
    pub marker: Marker,
    /// 首选位宽。
    pub bit_width: BitWidth,
    /// 首选位宽放不下时是否自动提升位宽。
    pub auto_widen: bool,
}

impl HideOptions {
    pub fn new(marker: Marker) -> Self {
        Self {
            marker,
            bit_width: BitWidth::default(),
            auto_widen: true,
        }
    }

    pub fn with_bit_width(mut self, bit_width: BitWidth) -> Self {
        self.bit_width = bit_width;
        self
    }

    pub fn with_auto_widen(mut self, auto_widen: bool) -> Self {
        self.auto_widen = auto_widen;
        self
    }
}

impl Default for HideOptions {
    fn default() -> Self {
        Self::new(Marker::audio_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_marker_is_rejected() {
        assert!(matches!(
            Marker::new(Vec::new()),
            Err(StegoError::InvalidConfig(_))
        ));
        assert_eq!(Marker::new("END").unwrap().as_bytes(), b"END");
    }

    #[test]
    fn defaults_match_carrier_kinds() {
        assert_eq!(Marker::audio_default().len(), 35);
        assert_eq!(Marker::image_default().as_bytes(), b"BUFFER");

        let options = HideOptions::default();
        assert_eq!(options.bit_width, BitWidth::MIN);
        assert!(options.auto_widen);
    }
}
