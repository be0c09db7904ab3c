//! # 位宽探测模块
//!
//! 按升序尝试位宽 1..=8，返回第一个能取出完整带帧负载的位宽。
//! 探测只依赖标记子串匹配，载体内容恰好拼出标记时可能误判。

use crate::bitstream::extract_until_marker;
use crate::capacity::BitWidth;
use crate::carrier::BitLane;
use crate::config::Marker;

/// 单次或整体探测的结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    Found { bit_width: BitWidth, payload: Vec<u8> },
    NotFound,
}

impl Detection {
    pub fn is_found(&self) -> bool {
        matches!(self, Detection::Found { .. })
    }

    pub fn bit_width(&self) -> Option<BitWidth> {
        match self {
            Detection::Found { bit_width, .. } => Some(*bit_width),
            Detection::NotFound => None,
        }
    }
}

/// 在指定位宽下读取整个载体并查找带帧负载。
///
/// 缺少起始标记或结束标记都视为该位宽下未找到。
pub fn attempt<L: BitLane>(carrier: &L, bit_width: BitWidth, marker: &Marker) -> Detection {
    let bytes = carrier.extract_bytes(bit_width, carrier.slot_count());
    match extract_until_marker(&bytes, marker) {
        Ok(payload) => Detection::Found { bit_width, payload },
        Err(_) => Detection::NotFound,
    }
}

/// 依次尝试位宽 1..=8，返回最小的匹配位宽。
pub fn detect<L: BitLane>(carrier: &L, marker: &Marker) -> Detection {
    BitWidth::all()
        .map(|bit_width| attempt(carrier, bit_width, marker))
        .find(Detection::is_found)
        .unwrap_or(Detection::NotFound)
}
