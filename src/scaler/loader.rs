//! # 加载与校验模块
//!
//! ## 设计思路
//!
//! 负责流水线前两步：打开输入容器、定位主图像。
//! 在“尽可能早”的阶段执行输入校验，尽快失败，减少不必要的内存与 CPU 消耗。
//!
//! ## 实现思路
//!
//! - 文件：存在性 + metadata 体积限制 + 读取。
//! - 签名：`infer` 识别出非图片类型时直接拒绝，再用 `image::guess_format` 确定容器格式；
//!   没有魔数的格式（如 TGA）退回到按扩展名识别。
//! - 主图像：只读取头信息中的宽高，并按像素/内存上限快速拒绝。
//!   多帧容器（GIF/APNG/WebP 动图）以第一帧为主图像。

use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, ImageReader};

use super::source::{Dimensions, InputContainer, PrimaryImageHandle};
use super::{ImageConfig, ImageError, ImageScaler};

impl ImageScaler {
    /// 打开并识别输入容器。
    pub(super) fn open_container(
        &self,
        path: &Path,
        config: &ImageConfig,
    ) -> Result<InputContainer, ImageError> {
        log::info!("📁 开始读取输入图片 - 路径: {}", path.display());

        if !path.exists() {
            return Err(ImageError::InputOpen(format!("文件不存在：{}", path.display())));
        }

        let metadata = std::fs::metadata(path)
            .map_err(|e| ImageError::InputOpen(format!("无法读取文件信息：{}", e)))?;

        if !metadata.is_file() {
            return Err(ImageError::InputOpen(format!("不是普通文件：{}", path.display())));
        }

        if metadata.len() > config.max_file_size {
            return Err(ImageError::ResourceLimit(format!(
                "文件过大：{:.2} MB（限制：{:.2} MB）",
                metadata.len() as f64 / 1024.0 / 1024.0,
                config.max_file_size as f64 / 1024.0 / 1024.0
            )));
        }

        let bytes = std::fs::read(path)
            .map_err(|e| ImageError::InputOpen(format!("无法读取图片文件：{}", e)))?;
        Self::validate_image_signature(&bytes)?;

        let format = Self::detect_format(path, &bytes)?;

        log::debug!(
            "容器识别完成 - 格式: {:?} 大小: {}KB",
            format,
            bytes.len() / 1024
        );

        Ok(InputContainer {
            path: path.to_path_buf(),
            bytes,
            format,
        })
    }

    /// 定位容器中的主图像。
    ///
    /// 仅解析头信息，在完整解码前做像素与内存限制检查。
    pub(super) fn primary_image_handle<'a>(
        &self,
        container: &'a InputContainer,
        config: &ImageConfig,
    ) -> Result<PrimaryImageHandle<'a>, ImageError> {
        let reader = ImageReader::with_format(Cursor::new(container.bytes.as_slice()), container.format);
        let (width, height) = reader.into_dimensions().map_err(|e| {
            ImageError::NoPrimaryImage(format!(
                "无法读取主图像尺寸（{}）：{}",
                container.path.display(),
                e
            ))
        })?;

        let declared = Dimensions::new(width, height);
        if declared.is_empty() {
            return Err(ImageError::NoPrimaryImage(format!(
                "主图像尺寸无效：{}（{}）",
                declared,
                container.path.display()
            )));
        }

        Self::validate_pixel_limits(config, declared)?;
        Self::validate_decoded_memory_limits(config, declared)?;

        Ok(PrimaryImageHandle {
            bytes: &container.bytes,
            format: container.format,
            declared,
        })
    }

    /// 识别容器格式：优先看魔数，识别不出时再看扩展名。
    fn detect_format(path: &Path, bytes: &[u8]) -> Result<ImageFormat, ImageError> {
        match image::guess_format(bytes) {
            Ok(format) => Ok(format),
            Err(sniff_err) => ImageFormat::from_path(path).map_err(|_| {
                ImageError::InputOpen(format!("不支持的图片容器格式：{}", sniff_err))
            }),
        }
    }

    /// 基于文件签名的快速校验。
    ///
    /// `infer` 无法识别时交给 `image::guess_format` 继续判断（例如部分 TIFF/ICO 变体）。
    fn validate_image_signature(bytes: &[u8]) -> Result<(), ImageError> {
        if bytes.is_empty() {
            return Err(ImageError::InputOpen("图片内容为空".to_string()));
        }

        if let Some(kind) = infer::get(bytes) {
            if kind.matcher_type() != infer::MatcherType::Image {
                return Err(ImageError::InputOpen(format!(
                    "文件签名不是图片类型：{}",
                    kind.mime_type()
                )));
            }
        }

        Ok(())
    }

    /// 校验像素数量是否超过配置上限。
    pub(super) fn validate_pixel_limits(
        config: &ImageConfig,
        dimensions: Dimensions,
    ) -> Result<(), ImageError> {
        let pixels = dimensions.pixels();
        if pixels > config.max_decoded_pixels {
            return Err(ImageError::ResourceLimit(format!(
                "图片像素过大：{} 像素（限制：{} 像素）",
                pixels, config.max_decoded_pixels
            )));
        }

        Ok(())
    }

    pub(super) fn validate_decoded_memory_limits(
        config: &ImageConfig,
        dimensions: Dimensions,
    ) -> Result<(), ImageError> {
        let estimated = dimensions
            .pixels()
            .checked_mul(4)
            .ok_or_else(|| ImageError::ResourceLimit("图片解码内存估算溢出".to_string()))?;

        if estimated > config.max_decoded_bytes {
            return Err(ImageError::ResourceLimit(format!(
                "图片解码预计内存过大：{:.2} MB（限制：{:.2} MB）",
                estimated as f64 / 1024.0 / 1024.0,
                config.max_decoded_bytes as f64 / 1024.0 / 1024.0
            )));
        }

        Ok(())
    }
}
