//! # 隐写核心模块
//!
//! 把容量规划、比特流编解码和载体比特通道组合成隐藏、恢复与探测三个入口。
//! 这些函数对任何实现了 [`BitLane`] 的载体都适用，输入载体从不被修改。

use crate::bitstream::{extract_until_marker, frame, pad_with_filler, to_bits};
use crate::capacity::{self, BitWidth, CapacityPlan, compute_capacity};
use crate::carrier::BitLane;
use crate::config::{HideOptions, Marker};
use crate::detector::{self, Detection};
use crate::error::Result;
use rand::RngCore;

/// 隐藏操作的结果：新的载体以及实际采用的容量规划。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hidden<L> {
    pub carrier: L,
    pub plan: CapacityPlan,
}

/// 某个位宽下载体的容量。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidthCapacity {
    pub bit_width: BitWidth,
    /// 总容量 (字节)。
    pub capacity_bytes: usize,
    /// 扣除两个标记后可容纳的最大负载 (字节)。
    pub max_payload_bytes: usize,
}

/// 把负载隐藏到载体中，填充比特取自线程本地随机数生成器。
///
/// # Errors
///
/// 见 [`hide_with_filler`]。
pub fn hide<L: BitLane>(carrier: &L, payload: &[u8], options: &HideOptions) -> Result<Hidden<L>> {
    hide_with_filler(carrier, payload, options, &mut rand::rng())
}

/// 把负载隐藏到载体中。
///
/// 负载先被标记包裹，再按容量规划选出的位宽写满整个载体：
/// 带帧负载之后的剩余容量用 `filler` 产生的比特填充。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 带帧负载放不下 ([`StegoError::Capacity`](crate::error::StegoError::Capacity))。
/// * 编码结果超过规划容量 ([`StegoError::Overflow`](crate::error::StegoError::Overflow))。
pub fn hide_with_filler<L, R>(
    carrier: &L,
    payload: &[u8],
    options: &HideOptions,
    filler: &mut R,
) -> Result<Hidden<L>>
where
    L: BitLane,
    R: RngCore,
{
    let framed = to_bits(&frame(payload, &options.marker));
    let plan = capacity::plan(
        carrier.slot_count(),
        framed.len(),
        options.bit_width,
        options.auto_widen,
    )?;

    let bits = pad_with_filler(framed, plan.capacity_bits, filler)?;
    let carrier = carrier.embed(plan.bit_width, &bits)?;
    Ok(Hidden { carrier, plan })
}

/// 以指定位宽从载体中恢复负载。
///
/// # Errors
///
/// * 没有起始标记时返回 [`StegoError::NotFound`](crate::error::StegoError::NotFound)。
/// * 没有结束标记时返回 [`StegoError::Truncated`](crate::error::StegoError::Truncated)。
pub fn recover<L: BitLane>(carrier: &L, bit_width: BitWidth, marker: &Marker) -> Result<Vec<u8>> {
    let bytes = carrier.extract_bytes(bit_width, carrier.slot_count());
    extract_until_marker(&bytes, marker)
}

/// 自动探测位宽并恢复负载。
pub fn detect<L: BitLane>(carrier: &L, marker: &Marker) -> Detection {
    detector::detect(carrier, marker)
}

/// 列出每个位宽下的容量以及扣除帧标记后可容纳的最大负载。
pub fn capacity_report<L: BitLane>(carrier: &L, marker: &Marker) -> Vec<WidthCapacity> {
    let overhead = 2 * marker.len();
    BitWidth::all()
        .map(|bit_width| {
            let capacity_bytes = compute_capacity(carrier.slot_count(), bit_width) / 8;
            WidthCapacity {
                bit_width,
                capacity_bytes,
                max_payload_bytes: capacity_bytes.saturating_sub(overhead),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carrier::{AudioCarrier, ImageCarrier};
    use crate::error::StegoError;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn width(bits: u8) -> BitWidth {
        BitWidth::new(bits).unwrap()
    }

    fn noisy_audio(samples: usize, seed: u64) -> AudioCarrier {
        let mut rng = StdRng::seed_from_u64(seed);
        let samples: Vec<i16> = (0..samples).map(|_| rng.random()).collect();
        AudioCarrier::from_i16_samples(1, &samples).unwrap()
    }

    fn noisy_image(width: u32, height: u32, seed: u64) -> ImageCarrier {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut bytes = vec![0u8; (width * height * 3) as usize];
        rng.fill_bytes(&mut bytes);
        ImageCarrier::from_rgb_bytes(width, height, &bytes).unwrap()
    }

    #[test]
    fn audio_round_trip_at_every_width() {
        let carrier = noisy_audio(2048, 1);
        let mut rng = StdRng::seed_from_u64(2);
        for bits in 1..=8 {
            let options = HideOptions::default()
                .with_bit_width(width(bits))
                .with_auto_widen(false);
            let hidden = hide_with_filler(&carrier, b"round trip", &options, &mut rng).unwrap();
            assert_eq!(hidden.plan.bit_width, width(bits));
            let payload = recover(&hidden.carrier, width(bits), &options.marker).unwrap();
            assert_eq!(payload, b"round trip");
        }
    }

    #[test]
    fn image_round_trip_with_binary_payload() {
        let carrier = noisy_image(16, 16, 3);
        let payload: Vec<u8> = (0..200u8).map(|b| b.wrapping_mul(7)).collect();
        let options = HideOptions::new(Marker::image_default()).with_bit_width(width(2));
        let hidden = hide(&carrier, &payload, &options).unwrap();
        let recovered = recover(&hidden.carrier, hidden.plan.bit_width, &options.marker).unwrap();
        assert_eq!(recovered, payload);
        assert_eq!(hidden.carrier.width(), 16);
        assert_eq!(hidden.carrier.height(), 16);
    }

    #[test]
    fn hide_writes_the_whole_capacity() {
        let carrier = AudioCarrier::from_u8_samples(1, vec![0; 4096]).unwrap();
        let mut rng = StdRng::seed_from_u64(4);
        let hidden = hide_with_filler(&carrier, b"x", &HideOptions::default(), &mut rng).unwrap();
        assert_eq!(hidden.plan.capacity_bits, 4096);
        assert_eq!(hidden.plan.payload_bits, (35 * 2 + 1) * 8);
        assert_eq!(
            hidden.plan.spare_bits,
            hidden.plan.capacity_bits - hidden.plan.payload_bits
        );
        // 填充比特落在载体尾部
        let tail = &hidden.carrier.raw_bytes()[hidden.plan.payload_bits..];
        assert!(tail.iter().any(|&sample| sample & 1 == 1));
    }

    #[test]
    fn scenario_ten_seconds_of_mono_audio() {
        let carrier = AudioCarrier::from_i16_samples(1, &vec![0i16; 441_000]).unwrap();
        let report = capacity_report(&carrier, &Marker::audio_default());
        assert_eq!(report[0].capacity_bytes, 55_125);

        let secret = b"twenty byte secret!!";
        let mut rng = StdRng::seed_from_u64(5);
        let hidden = hide_with_filler(&carrier, secret, &HideOptions::default(), &mut rng).unwrap();
        assert_eq!(hidden.plan.bit_width, width(1));
        assert_eq!(hidden.plan.payload_bits, 90 * 8);
        assert_eq!(hidden.plan.spare_bits, 441_000 - 720);
        assert_eq!(
            recover(&hidden.carrier, width(1), &Marker::audio_default()).unwrap(),
            secret
        );
    }

    #[test]
    fn scenario_four_by_four_image_at_fixed_width() {
        let carrier = noisy_image(4, 4, 6);
        let marker = Marker::new("##").unwrap();
        let options = HideOptions::new(marker).with_auto_widen(false);

        assert!(hide(&carrier, b"ok", &options).is_ok());
        assert_eq!(
            hide(&carrier, b"too", &options),
            Err(StegoError::Capacity {
                needed: 56,
                available: 48
            })
        );
    }

    #[test]
    fn preferred_width_is_widened_when_needed() {
        let carrier = noisy_image(4, 4, 7);
        let options = HideOptions::new(Marker::new("##").unwrap());
        let hidden = hide(&carrier, b"widen me", &options).unwrap();
        // 带帧后 12 字节共 96 比特，分布在 48 个槽位上
        assert_eq!(hidden.plan.bit_width, width(2));
        assert_eq!(
            recover(&hidden.carrier, width(2), &options.marker).unwrap(),
            b"widen me"
        );
    }

    #[test]
    fn capacity_boundary_at_width_eight() {
        let carrier = noisy_audio(64, 8);
        let marker = Marker::new("|").unwrap();
        let options = HideOptions::new(marker.clone());

        let exact = vec![b'a'; 62];
        let hidden = hide(&carrier, &exact, &options).unwrap();
        assert_eq!(hidden.plan.bit_width, BitWidth::MAX);
        assert_eq!(hidden.plan.spare_bits, 0);
        assert_eq!(recover(&hidden.carrier, BitWidth::MAX, &marker).unwrap(), exact);

        assert_eq!(
            hide(&carrier, &[b'a'; 63], &options),
            Err(StegoError::Capacity {
                needed: 520,
                available: 512
            })
        );
    }

    #[test]
    fn detect_finds_the_embedding_width() {
        let carrier = noisy_audio(4096, 9);
        for bits in 1..=8 {
            let options = HideOptions::default()
                .with_bit_width(width(bits))
                .with_auto_widen(false);
            let hidden = hide(&carrier, b"detect me", &options).unwrap();
            assert_eq!(
                detect(&hidden.carrier, &options.marker),
                Detection::Found {
                    bit_width: width(bits),
                    payload: b"detect me".to_vec()
                }
            );
        }
    }

    #[test]
    fn clean_carrier_has_nothing_at_any_width() {
        let carrier = noisy_image(32, 32, 10);
        let marker = Marker::audio_default();
        for bit_width in BitWidth::all() {
            assert_eq!(recover(&carrier, bit_width, &marker), Err(StegoError::NotFound));
        }
        assert_eq!(detect(&carrier, &marker), Detection::NotFound);
    }

    #[test]
    fn carrier_cut_before_end_marker_is_truncated() {
        let carrier = AudioCarrier::from_u8_samples(1, vec![0; 2000]).unwrap();
        let mut rng = StdRng::seed_from_u64(12);
        let hidden =
            hide_with_filler(&carrier, b"hello", &HideOptions::default(), &mut rng).unwrap();

        // 起始标记和负载共 40 字节，只保留 50 字节，结束标记被截断
        let cut =
            AudioCarrier::from_u8_samples(1, hidden.carrier.raw_bytes()[..400].to_vec()).unwrap();
        let marker = Marker::audio_default();
        assert_eq!(recover(&cut, BitWidth::MIN, &marker), Err(StegoError::Truncated));
        assert_eq!(detect(&cut, &marker), Detection::NotFound);
    }

    #[test]
    fn capacity_report_subtracts_marker_overhead() {
        let carrier = noisy_image(4, 4, 11);
        let report = capacity_report(&carrier, &Marker::image_default());
        assert_eq!(report.len(), 8);
        assert_eq!(report[0].capacity_bytes, 6);
        assert_eq!(report[0].max_payload_bytes, 0);
        assert_eq!(report[7].capacity_bytes, 48);
        assert_eq!(report[7].max_payload_bytes, 36);
    }
}
