//! # lsb_stego 库
//!
//! 本库包含 LSB 隐写工具的核心逻辑：容量规划、比特流编解码、
//! 音频与图像两种比特通道，以及位宽探测。

// 声明库包含的所有模块。

pub mod bitstream;
pub mod capacity;
pub mod carrier;
pub mod cli;
pub mod config;
pub mod constants;
pub mod detector;
pub mod error;
pub mod handler;
pub mod media;
pub mod steganography;

pub use capacity::{BitWidth, CapacityPlan};
pub use carrier::{AudioCarrier, BitLane, ImageCarrier};
pub use config::{HideOptions, Marker};
pub use detector::Detection;
pub use error::StegoError;
