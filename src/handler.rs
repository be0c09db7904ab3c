//! # 命令处理逻辑模块
//!
//! 包含处理各个子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用核心隐写算法以及向用户报告结果。

use crate::capacity::{BitWidth, CapacityPlan};
use crate::carrier::BitLane;
use crate::cli::{CompareArgs, DetectArgs, HideArgs, InfoArgs, RecoverArgs};
use crate::config::{HideOptions, Marker};
use crate::constants::{DOCTORED_PREFIX, RECOVERED_PREFIX};
use crate::detector::Detection;
use crate::error::StegoError;
use crate::media::{self, CarrierKind};
use crate::steganography::{self, Hidden, WidthCapacity};
use anyhow::{Context, Result, anyhow};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

/// 处理 'Hide' 命令的执行逻辑。
///
/// 负责读取载体和待隐藏的文件、规划位宽、调用隐写核心函数，
/// 最后将结果写入目标文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径与位宽选项的 `HideArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 载体扩展名不受支持，或目标文件已存在且未指定 `--force`。
/// * 无法读取载体或待隐藏的文件。
/// * 载体没有足够的空间来隐藏内容。
/// * 无法写入到目标文件。
pub fn handle_hide(args: HideArgs) -> Result<()> {
    let kind = CarrierKind::from_path(&args.carrier)?;
    let dest = args
        .dest
        .clone()
        .unwrap_or_else(|| sibling_path(&args.carrier, doctored_name(&args.carrier)));
    ensure_writable(&dest, args.force)?;

    let text = fs::read(&args.text).with_context(|| {
        format!(
            "Unable to read text file: {}",
            args.text.to_string_lossy().red().bold()
        )
    })?;

    let options = HideOptions::new(resolve_marker(kind, args.marker.as_deref())?)
        .with_bit_width(BitWidth::new(args.bits)?)
        .with_auto_widen(!args.fixed_width);

    let plan = match kind {
        CarrierKind::Audio => {
            let wav = media::read_wav(&args.carrier)?;
            let hidden = hide_in(&wav.carrier, &text, &options)?;
            media::write_wav(&dest, wav.spec, hidden.carrier)?;
            hidden.plan
        }
        CarrierKind::Image => {
            let picture = media::read_image(&args.carrier)?;
            let hidden = hide_in(&picture, &text, &options)?;
            media::write_image(&dest, hidden.carrier)?;
            hidden.plan
        }
    };

    report_plan(&plan, options.bit_width);
    println!(
        "The text has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Recover' 命令的执行逻辑。
///
/// 负责读取经过隐写的载体、以指定位宽恢复隐藏的数据，
/// 最后将恢复的内容写入目标文件。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取载体文件。
/// * 在该位宽下找不到完整的隐藏数据。
/// * 无法写入到目标文件。
pub fn handle_recover(args: RecoverArgs) -> Result<()> {
    let kind = CarrierKind::from_path(&args.carrier)?;
    let output = args
        .text
        .clone()
        .unwrap_or_else(|| sibling_path(&args.carrier, recovered_name(&args.carrier)));
    ensure_writable(&output, args.force)?;

    let marker = resolve_marker(kind, args.marker.as_deref())?;
    let bit_width = BitWidth::new(args.bits)?;

    let recovered = match kind {
        CarrierKind::Audio => {
            steganography::recover(&media::read_wav(&args.carrier)?.carrier, bit_width, &marker)
        }
        CarrierKind::Image => {
            steganography::recover(&media::read_image(&args.carrier)?, bit_width, &marker)
        }
    }
    .with_context(|| {
        format!(
            "Failed to recover hidden data from '{}' using {} LSB. \nThe carrier may not contain a hidden message or is corrupted.",
            args.carrier.to_string_lossy().red().bold(),
            bit_width.to_string().red().bold()
        )
    })?;

    write_output(&output, &recovered)?;
    println!(
        "The text has been successfully recovered and saved: {}",
        output.to_string_lossy().green().bold()
    );
    Ok(())
}

/// 处理 'Detect' 命令的执行逻辑。
///
/// 依次尝试所有位宽，报告第一个找到隐藏数据的位宽；
/// 如果提供了输出路径，同时保存恢复的数据。
///
/// 返回探测结果，便于调用方进一步处理。
pub fn handle_detect(args: DetectArgs) -> Result<Detection> {
    let kind = CarrierKind::from_path(&args.carrier)?;
    if let Some(output) = &args.text {
        ensure_writable(output, args.force)?;
    }
    let marker = resolve_marker(kind, args.marker.as_deref())?;

    let detection = match kind {
        CarrierKind::Audio => {
            steganography::detect(&media::read_wav(&args.carrier)?.carrier, &marker)
        }
        CarrierKind::Image => steganography::detect(&media::read_image(&args.carrier)?, &marker),
    };

    match &detection {
        Detection::Found { bit_width, payload } => {
            println!(
                "Hidden data was detected in {} using {} LSB ({} bytes).",
                args.carrier.to_string_lossy().green().bold(),
                bit_width.to_string().green().bold(),
                payload.len()
            );
            if let Some(output) = &args.text {
                write_output(output, payload)?;
                println!(
                    "The text has been successfully recovered and saved: {}",
                    output.to_string_lossy().green().bold()
                );
            }
        }
        Detection::NotFound => {
            println!(
                "Nothing found in {}.",
                args.carrier.to_string_lossy().yellow()
            );
        }
    }

    Ok(detection)
}

/// 处理 'Info' 命令的执行逻辑：打印载体参数以及每个位宽下的容量。
pub fn handle_info(args: InfoArgs) -> Result<Vec<WidthCapacity>> {
    let kind = CarrierKind::from_path(&args.carrier)?;
    let marker = resolve_marker(kind, args.marker.as_deref())?;

    let report = match kind {
        CarrierKind::Audio => {
            let wav = media::read_wav(&args.carrier)?;
            println!("Number of channels: {}", wav.spec.channels);
            println!("Sampling frequency: {} Hz", wav.spec.sample_rate);
            println!("Number of audio frames: {}", wav.carrier.frame_count());
            println!("Sample width in bytes: {}", wav.carrier.sample_width());
            println!("Duration: {:.2} s", wav.duration_secs());
            steganography::capacity_report(&wav.carrier, &marker)
        }
        CarrierKind::Image => {
            let picture = media::read_image(&args.carrier)?;
            println!("Dimensions: {}x{}", picture.width(), picture.height());
            println!("Channel values: {}", picture.channel_count());
            steganography::capacity_report(&picture, &marker)
        }
    };

    for entry in &report {
        println!(
            "{} LSB: {} bytes available, up to {} bytes of payload",
            entry.bit_width,
            entry.capacity_bytes.to_string().green().bold(),
            entry.max_payload_bytes.to_string().green().bold()
        );
    }

    Ok(report)
}

/// 处理 'Compare' 命令的执行逻辑：计算两幅图像之间的均方根差。
pub fn handle_compare(args: CompareArgs) -> Result<f64> {
    let original = media::read_image(&args.original)?;
    let modified = media::read_image(&args.modified)?;

    let rms = original.rms_difference(&modified).with_context(|| {
        format!(
            "Unable to compare {} with {}",
            args.original.to_string_lossy().red().bold(),
            args.modified.to_string_lossy().red().bold()
        )
    })?;

    println!("Root mean square is: {}", rms.to_string().green().bold());
    Ok(rms)
}

fn hide_in<L: BitLane>(carrier: &L, text: &[u8], options: &HideOptions) -> Result<Hidden<L>> {
    steganography::hide(carrier, text, options).map_err(|err| match err {
        StegoError::Capacity { needed, available } => anyhow!(
            "Not enough space in the carrier to hide the text. \nRequired: {} bits, Available: {} bits",
            needed.to_string().red().bold(),
            available.to_string().green().bold()
        ),
        other => anyhow::Error::new(other).context("Failed to hide the text in the carrier."),
    })
}

fn report_plan(plan: &CapacityPlan, preferred: BitWidth) {
    if plan.bit_width > preferred {
        println!(
            "{}",
            format!(
                "The carrier is too small for {preferred} LSB, using {} LSB instead.",
                plan.bit_width
            )
            .yellow()
        );
    }
    println!(
        "Used {} LSB: {} of {} bits carry the framed text, {} filler bits.",
        plan.bit_width.to_string().green().bold(),
        plan.payload_bits,
        plan.capacity_bits,
        plan.spare_bits
    );
}

fn resolve_marker(kind: CarrierKind, custom: Option<&str>) -> Result<Marker> {
    match custom {
        Some(marker) => Ok(Marker::new(marker)?),
        None => Ok(kind.default_marker()),
    }
}

fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}

fn write_output(path: &Path, data: &[u8]) -> Result<()> {
    fs::write(path, data).with_context(|| {
        format!(
            "Unable to write to target text file: {}",
            path.to_string_lossy().red().bold()
        )
    })
}

fn sibling_path(carrier: &Path, name: String) -> PathBuf {
    match carrier.parent() {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}

fn doctored_name(carrier: &Path) -> String {
    let name = carrier
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{DOCTORED_PREFIX}{name}")
}

fn recovered_name(carrier: &Path) -> String {
    let stem = carrier
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{RECOVERED_PREFIX}{stem}.txt")
}
