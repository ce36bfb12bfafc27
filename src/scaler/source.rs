//! # 数据模型与中间结果
//!
//! ## 设计思路
//!
//! 将“调用方请求”和“流水线中间结果”解耦：
//! - `ScaleRequest` 表示调用方给出的外框约束
//! - `InputContainer` / `PrimaryImageHandle` 表示已读取但未解码的输入
//! - `SourceImage` 表示解码后的原始栅格
//! - `EncodedOutput` 表示已编码、等待写盘的输出
//!
//! 所有实体只在一次流水线运行内存活，按所有权顺序传递后即释放。

use std::path::PathBuf;

use image::{DynamicImage, ImageFormat};

use super::OutputCodec;

/// 宽高对（像素）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// 任一边为 0 即视为零面积。
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn pixels(self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// 调用方请求的外框约束。
///
/// `None` 表示该轴不受约束；`Some(0)` 是合法但退化的约束（比例为 0）。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScaleRequest {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl ScaleRequest {
    pub const fn new(width: Option<u32>, height: Option<u32>) -> Self {
        Self { width, height }
    }

    /// 不做任何约束（输出保持原尺寸）。
    pub const fn unconstrained() -> Self {
        Self {
            width: None,
            height: None,
        }
    }

    /// 命令行语义：`0` 与未提供都表示不约束。
    pub fn from_cli(width: u32, height: u32) -> Self {
        Self {
            width: (width > 0).then_some(width),
            height: (height > 0).then_some(height),
        }
    }
}

/// 打开阶段输出：输入容器的原始字节与识别出的格式。
pub(crate) struct InputContainer {
    pub(crate) path: PathBuf,
    pub(crate) bytes: Vec<u8>,
    pub(crate) format: ImageFormat,
}

/// 容器中主图像的句柄，借用输入容器的字节。
pub(crate) struct PrimaryImageHandle<'a> {
    pub(crate) bytes: &'a [u8],
    pub(crate) format: ImageFormat,
    /// 头信息中声明的尺寸。
    pub(crate) declared: Dimensions,
}

/// 解码阶段输出：原始栅格与其原生尺寸。
pub(crate) struct SourceImage {
    pub(crate) native: Dimensions,
    pub(crate) raster: DynamicImage,
}

/// 编码阶段输出：已编码字节，写盘后释放。
pub(crate) struct EncodedOutput {
    pub(crate) codec: OutputCodec,
    pub(crate) bytes: Vec<u8>,
}

/// 一次成功运行的摘要。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaleSummary {
    pub input_format: ImageFormat,
    pub native: Dimensions,
    pub output: Dimensions,
    pub codec: OutputCodec,
    pub bytes_written: u64,
}
