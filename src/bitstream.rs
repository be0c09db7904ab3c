//! # 比特流编解码模块
//!
//! 负责字节与比特之间的转换、帧标记包裹、填充比特补齐，
//! 以及从解码出的字节流中取回带帧的负载。
//!
//! 比特序列以 `Vec<bool>` 表示，每个字节按最高位优先展开。

use crate::config::Marker;
use crate::error::{Result, StegoError};
use rand::{Rng, RngCore};

/// 用标记包裹负载：`marker ‖ payload ‖ marker`。
pub fn frame(payload: &[u8], marker: &Marker) -> Vec<u8> {
    let marker = marker.as_bytes();
    let mut framed = Vec::with_capacity(payload.len() + 2 * marker.len());
    framed.extend_from_slice(marker);
    framed.extend_from_slice(payload);
    framed.extend_from_slice(marker);
    framed
}

pub fn to_bits(bytes: &[u8]) -> Vec<bool> {
    bytes
        .iter()
        .flat_map(|&byte| (0..8).rev().map(move |shift| (byte >> shift) & 1 == 1))
        .collect()
}

/// 用填充源产生的伪随机比特把序列补齐到 `target_len`。
///
/// 长度已经等于 `target_len` 的序列原样返回。
///
/// # Errors
///
/// 序列已经超过 `target_len` 时返回 [`StegoError::Overflow`]，
/// 说明容量规划与编码结果不一致。
pub fn pad_with_filler<R: RngCore>(
    mut bits: Vec<bool>,
    target_len: usize,
    filler: &mut R,
) -> Result<Vec<bool>> {
    if bits.len() > target_len {
        return Err(StegoError::Overflow {
            len: bits.len(),
            target: target_len,
        });
    }

    let missing = target_len - bits.len();
    bits.reserve_exact(missing);
    bits.extend((0..missing).map(|_| filler.random::<bool>()));
    Ok(bits)
}

/// 每 8 个比特按最高位优先组成一个字节，末尾不足 8 位的比特被丢弃。
pub fn from_bits(bits: &[bool]) -> Vec<u8> {
    pack_bits(bits.iter().copied())
}

/// 与 [`from_bits`] 相同，但逐个消费比特，适合直接接在载体读取之后。
pub fn pack_bits(bits: impl IntoIterator<Item = bool>) -> Vec<u8> {
    let bits = bits.into_iter();
    let mut bytes = Vec::with_capacity(bits.size_hint().0 / 8);
    let mut current = 0u8;
    let mut filled = 0;
    for bit in bits {
        current = (current << 1) | u8::from(bit);
        filled += 1;
        if filled == 8 {
            bytes.push(current);
            current = 0;
            filled = 0;
        }
    }
    bytes
}

/// 取出第一个标记与其后下一个标记之间的字节。
///
/// # Errors
///
/// * 没有起始标记时返回 [`StegoError::NotFound`]。
/// * 有起始标记但其后没有结束标记时返回 [`StegoError::Truncated`]。
pub fn extract_until_marker(stream: &[u8], marker: &Marker) -> Result<Vec<u8>> {
    let needle = marker.as_bytes();
    let start = find(stream, needle).ok_or(StegoError::NotFound)? + needle.len();
    let len = find(&stream[start..], needle).ok_or(StegoError::Truncated)?;
    Ok(stream[start..start + len].to_vec())
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
