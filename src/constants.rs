/// 音频载体的默认帧标记。
/// 隐藏与恢复时必须使用同一个标记。
pub const AUDIO_MARKER: &[u8] = b"2qlmRnoPQkreX45Qmt93dr86AfAG68Awd78";

/// 图像载体的默认帧标记。
pub const IMAGE_MARKER: &[u8] = b"BUFFER";

/// 每个槽位可使用的最小位宽。
pub const MIN_BIT_WIDTH: u8 = 1;

/// 每个槽位可使用的最大位宽。
/// 字节样本与颜色通道只有 8 位；16 位样本也只使用低 8 位。
pub const MAX_BIT_WIDTH: u8 = 8;

/// 每个像素的颜色通道数 (R, G, B)。
pub const CHANNELS_PER_PIXEL: usize = 3;

/// 未指定输出路径时，隐写结果文件名的前缀。
pub const DOCTORED_PREFIX: &str = "doctored_";

/// 未指定输出路径时，恢复文本文件名的前缀。
pub const RECOVERED_PREFIX: &str = "recovered_";
