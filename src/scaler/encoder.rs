//! # 编码与写出模块
//!
//! ## 设计思路
//!
//! 输出容器与输入容器完全独立：每次运行新建一个 `OutputContainer`，
//! 编码结果先落在内存缓冲中，只有编码完整成功后才触碰文件系统。
//! 因此编码失败时不会留下半成品文件。
//!
//! PNG 不支持浮点采样：HDR/EXR/浮点 TIFF 解码出的浮点栅格在编码前
//! 转换为 16 位整数栅格（保留 alpha 通道与否取决于源栅格）。

use std::borrow::Cow;
use std::io::Cursor;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::{ColorType, DynamicImage};

use super::source::EncodedOutput;
use super::{ImageError, ImageScaler, OutputCodec};

/// 可写的输出容器上下文。
pub(crate) struct OutputContainer {
    codec: OutputCodec,
    buffer: Cursor<Vec<u8>>,
}

impl OutputContainer {
    pub(crate) fn new(codec: OutputCodec) -> Self {
        Self {
            codec,
            buffer: Cursor::new(Vec::new()),
        }
    }

    /// 用固定编码器把栅格编码进容器。
    pub(crate) fn encode_image(mut self, raster: &DynamicImage) -> Result<EncodedOutput, ImageError> {
        let result = match self.codec {
            OutputCodec::Png => {
                let encoder = PngEncoder::new_with_quality(
                    &mut self.buffer,
                    CompressionType::Default,
                    PngFilter::Adaptive,
                );
                png_compatible(raster).write_with_encoder(encoder)
            }
            OutputCodec::Jpeg { quality } => {
                if !(1..=100).contains(&quality) {
                    return Err(ImageError::Encode(format!(
                        "JPEG 质量必须在 1~100 之间，当前为 {}",
                        quality
                    )));
                }
                let encoder = JpegEncoder::new_with_quality(&mut self.buffer, quality);
                raster.write_with_encoder(encoder)
            }
        };

        result.map_err(|e| {
            ImageError::Encode(format!(
                "{} 编码失败（像素格式 {:?}）：{}",
                self.codec.as_str(),
                raster.color(),
                e
            ))
        })?;

        Ok(EncodedOutput {
            codec: self.codec,
            bytes: self.buffer.into_inner(),
        })
    }
}

/// 浮点栅格转为 16 位整数栅格，其余原样借用。
fn png_compatible(raster: &DynamicImage) -> Cow<'_, DynamicImage> {
    match raster.color() {
        ColorType::Rgb32F => {
            log::debug!("浮点栅格转换为 Rgb16 以便 PNG 编码");
            Cow::Owned(DynamicImage::ImageRgb16(raster.to_rgb16()))
        }
        ColorType::Rgba32F => {
            log::debug!("浮点栅格转换为 Rgba16 以便 PNG 编码");
            Cow::Owned(DynamicImage::ImageRgba16(raster.to_rgba16()))
        }
        _ => Cow::Borrowed(raster),
    }
}

impl ImageScaler {
    /// 将已编码的容器写入目标路径。
    pub(super) fn write_output(
        &self,
        encoded: &EncodedOutput,
        path: &Path,
    ) -> Result<u64, ImageError> {
        std::fs::write(path, &encoded.bytes).map_err(|e| {
            ImageError::OutputWrite(format!("{}：{}", path.display(), e))
        })?;

        log::debug!(
            "💾 已写出 {} 容器 - 路径: {} 大小: {}KB",
            encoded.codec.as_str(),
            path.display(),
            encoded.bytes.len() / 1024
        );

        Ok(encoded.bytes.len() as u64)
    }
}
