//! # 媒体文件读写模块
//!
//! 在 WAV / 图像文件与内存中的载体之间转换。WAV 文件由 `hound` 读写
//! (8 位或 16 位整数 PCM)，图像由 `image` 读写并统一转换为 RGB8。

use crate::carrier::{AudioCarrier, ImageCarrier};
use crate::config::Marker;
use anyhow::{Context, Result, bail};
use colored::Colorize;
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::path::Path;

/// 载体种类，由文件扩展名决定。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarrierKind {
    Audio,
    Image,
}

impl CarrierKind {
    /// 根据文件扩展名判断载体种类。
    ///
    /// # Errors
    ///
    /// 扩展名缺失或不受支持时返回错误。
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "wav" => Ok(CarrierKind::Audio),
            "png" | "bmp" | "tiff" | "tif" | "webp" | "qoi" => Ok(CarrierKind::Image),
            _ => bail!(
                "Unsupported carrier file extension: {}. \nSupported: wav, png, bmp, tiff, webp, qoi",
                path.to_string_lossy().red().bold()
            ),
        }
    }

    pub fn default_marker(self) -> Marker {
        match self {
            CarrierKind::Audio => Marker::audio_default(),
            CarrierKind::Image => Marker::image_default(),
        }
    }
}

/// 从 WAV 文件中读出的音频载体及其原始参数。
#[derive(Debug, Clone)]
pub struct WavCarrier {
    pub spec: WavSpec,
    pub carrier: AudioCarrier,
}

impl WavCarrier {
    pub fn duration_secs(&self) -> f64 {
        self.carrier.frame_count() as f64 / self.spec.sample_rate as f64
    }
}

pub fn read_wav(path: &Path) -> Result<WavCarrier> {
    let mut reader = WavReader::open(path).with_context(|| {
        format!(
            "Unable to read WAV file: {}",
            path.to_string_lossy().red().bold()
        )
    })?;
    let spec = reader.spec();

    if spec.sample_format != SampleFormat::Int {
        bail!(
            "Unsupported WAV sample format in {}: only integer PCM can carry hidden data",
            path.to_string_lossy().red().bold()
        );
    }

    let carrier = match spec.bits_per_sample {
        8 => {
            // 8 位 WAV 样本以无符号形式存储，hound 读出时减去了 128
            let samples = reader
                .samples::<i8>()
                .map(|s| s.map(|s| (s as u8) ^ 0x80))
                .collect::<Result<Vec<u8>, _>>()
                .context("Failed to decode 8-bit WAV samples")?;
            AudioCarrier::from_u8_samples(spec.channels, samples)?
        }
        16 => {
            let samples = reader
                .samples::<i16>()
                .collect::<Result<Vec<i16>, _>>()
                .context("Failed to decode 16-bit WAV samples")?;
            AudioCarrier::from_i16_samples(spec.channels, &samples)?
        }
        bits => bail!(
            "Sample width must be 1 or 2 bytes, {} has {} bits per sample",
            path.to_string_lossy().red().bold(),
            bits
        ),
    };

    Ok(WavCarrier { spec, carrier })
}

pub fn write_wav(path: &Path, spec: WavSpec, carrier: AudioCarrier) -> Result<()> {
    let mut writer = WavWriter::create(path, spec).with_context(|| {
        format!(
            "Unable to create WAV file: {}",
            path.to_string_lossy().red().bold()
        )
    })?;

    match carrier.sample_width() {
        1 => {
            for byte in carrier.into_raw_bytes() {
                writer.write_sample((byte ^ 0x80) as i8)?;
            }
        }
        _ => {
            for sample in carrier.to_i16_samples()? {
                writer.write_sample(sample)?;
            }
        }
    }

    writer.finalize().with_context(|| {
        format!(
            "Unable to finish WAV file: {}",
            path.to_string_lossy().red().bold()
        )
    })?;
    Ok(())
}

pub fn read_image(path: &Path) -> Result<ImageCarrier> {
    let picture = image::open(path)
        .with_context(|| {
            format!(
                "Unable to read image file: {}",
                path.to_string_lossy().red().bold()
            )
        })?
        .to_rgb8();
    let (width, height) = picture.dimensions();
    Ok(ImageCarrier::from_rgb_bytes(width, height, picture.as_raw())?)
}

pub fn write_image(path: &Path, carrier: ImageCarrier) -> Result<()> {
    let (width, height) = (carrier.width(), carrier.height());
    let picture = image::RgbImage::from_raw(width, height, carrier.into_rgb_bytes())
        .context("Pixel buffer does not match the image dimensions")?;
    picture.save(path).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            path.to_string_lossy().red().bold()
        )
    })?;
    Ok(())
}
