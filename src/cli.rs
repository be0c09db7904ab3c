//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use clap::Parser;
use std::path::PathBuf;

/// 一款基于 LSB (最低有效位) 隐写术的命令行工具，用于在 WAV 音频或无损格式图像 (如 PNG, BMP) 中隐藏、恢复或探测数据。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于 LSB (最低有效位) 隐写术的命令行工具，用于在 WAV 音频或无损格式图像 (如 PNG, BMP) 中隐藏、恢复或探测数据。"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 在 WAV 音频或无损格式图像中隐藏文件内容。
    Hide(HideArgs),

    /// 以指定位宽从载体中恢复隐藏的数据。
    Recover(RecoverArgs),

    /// 自动探测载体使用的位宽并恢复隐藏的数据。
    Detect(DetectArgs),

    /// 显示载体参数以及各位宽下的容量。
    Info(InfoArgs),

    /// 计算两幅图像之间的均方根差。
    Compare(CompareArgs),
}

/// 'hide' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct HideArgs {
    /// 用于隐写的载体文件路径 (WAV, PNG, BMP 等)。
    #[arg(short, long)]
    pub carrier: PathBuf,

    /// 要隐藏的内容的文件路径。
    #[arg(short, long)]
    pub text: PathBuf,

    /// 隐写完成后保存结果的输出路径，默认为载体旁的 `doctored_<文件名>`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 首选的 LSB 位宽 (1-8)。
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=8))]
    pub bits: u8,

    /// 首选位宽放不下时直接失败，而不是自动提升位宽。
    #[arg(long)]
    pub fixed_width: bool,

    /// 覆盖默认的帧标记。
    #[arg(short, long)]
    pub marker: Option<String>,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}

/// 'recover' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct RecoverArgs {
    /// 已隐藏数据的载体文件路径。
    #[arg(short, long)]
    pub carrier: PathBuf,

    /// 恢复数据后保存的输出路径，默认为载体旁的 `recovered_<文件名>.txt`。
    #[arg(short, long)]
    pub text: Option<PathBuf>,

    /// 隐藏时使用的 LSB 位宽 (1-8)。
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=8))]
    pub bits: u8,

    /// 覆盖默认的帧标记。
    #[arg(short, long)]
    pub marker: Option<String>,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}

/// 'detect' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct DetectArgs {
    /// 需要探测的载体文件路径。
    #[arg(short, long)]
    pub carrier: PathBuf,

    /// 探测成功时保存数据的输出路径；不提供则只报告结果。
    #[arg(short, long)]
    pub text: Option<PathBuf>,

    /// 覆盖默认的帧标记。
    #[arg(short, long)]
    pub marker: Option<String>,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}

/// 'info' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// 载体文件路径。
    #[arg(short, long)]
    pub carrier: PathBuf,

    /// 覆盖默认的帧标记 (影响可容纳的最大负载)。
    #[arg(short, long)]
    pub marker: Option<String>,
}

/// 'compare' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct CompareArgs {
    /// 原始图像路径。
    #[arg(short, long)]
    pub original: PathBuf,

    /// 隐写后的图像路径。
    #[arg(short, long)]
    pub modified: PathBuf,
}
