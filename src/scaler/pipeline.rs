//! # 解码与缩放模块
//!
//! ## 设计思路
//!
//! 将“主图像句柄 → 栅格 → 缩放后栅格”的过程集中管理，并在关键节点增加资源上限控制。
//! 解码保持解码器给出的自然像素格式，不做色彩空间转换。
//!
//! ## 实现思路
//!
//! 1. 带 `image::Limits` 的完整解码（分配上限来自配置）
//! 2. 以解码结果为准复核像素上限
//! 3. 目标尺寸等于原尺寸时直接透传
//! 4. `fast_image_resize` 缩放，失败时回退 `image::resize_exact`

use fast_image_resize as fr;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageReader, Limits};
use std::io::Cursor;

use super::source::{Dimensions, PrimaryImageHandle, SourceImage};
use super::{ImageConfig, ImageError, ImageScaler};

impl ImageScaler {
    /// 将主图像解码为原始栅格。
    pub(super) fn decode_primary(
        &self,
        handle: PrimaryImageHandle<'_>,
        config: &ImageConfig,
    ) -> Result<SourceImage, ImageError> {
        let mut limits = Limits::default();
        limits.max_alloc = Some(config.max_decoded_bytes);

        let mut reader = ImageReader::with_format(Cursor::new(handle.bytes), handle.format);
        reader.limits(limits);

        let raster = reader.decode().map_err(|e| match e {
            image::ImageError::Limits(limit) => {
                ImageError::ResourceLimit(format!("解码超出内存限制：{}", limit))
            }
            other => ImageError::Decode(format!("图片解码失败：{}", other)),
        })?;

        let (width, height) = raster.dimensions();
        let native = Dimensions::new(width, height);
        if native.is_empty() {
            return Err(ImageError::Decode(format!("解码结果尺寸无效：{}", native)));
        }
        Self::validate_pixel_limits(config, native)?;

        if native != handle.declared {
            log::warn!(
                "⚠️ 解码尺寸与头信息不一致：头信息 {} 解码 {}",
                handle.declared,
                native
            );
        }

        log::info!(
            "✅ 图片解码成功 - 格式: {:?} 尺寸: {} 像素格式: {:?}",
            handle.format,
            native,
            raster.color()
        );

        Ok(SourceImage { native, raster })
    }

    /// 按目标尺寸生成缩放后的栅格。
    ///
    /// 目标尺寸与原尺寸相同时不做重采样。
    pub(super) fn scale_raster(
        &self,
        source: SourceImage,
        target: Dimensions,
        config: &ImageConfig,
    ) -> Result<DynamicImage, ImageError> {
        if target.is_empty() {
            return Err(ImageError::Scale(format!("缩放目标尺寸无效：{}", target)));
        }

        if target == source.native {
            log::debug!("目标尺寸与原尺寸一致（{}），跳过重采样", target);
            return Ok(source.raster);
        }

        log::info!(
            "🧩 缩放：{} -> {}（filter={:?}）",
            source.native,
            target,
            config.resize_filter
        );

        match Self::resize_with_fast_image_resize(&source.raster, target, config.resize_filter) {
            Ok(resized) => Ok(resized),
            Err(err) => {
                log::warn!(
                    "⚠️ fast_image_resize 缩放失败，回退 image::resize_exact：{}",
                    err
                );
                let resized = source
                    .raster
                    .resize_exact(target.width, target.height, config.resize_filter);
                if resized.dimensions() != (target.width, target.height) {
                    return Err(ImageError::Scale(format!(
                        "回退缩放输出尺寸异常：{}x{}",
                        resized.width(),
                        resized.height()
                    )));
                }
                Ok(resized)
            }
        }
    }

    fn resize_with_fast_image_resize(
        image: &DynamicImage,
        target: Dimensions,
        filter: FilterType,
    ) -> Result<DynamicImage, ImageError> {
        let mut dst_image = DynamicImage::new(target.width, target.height, image.color());

        let mut resizer = fr::Resizer::new();
        let options = fr::ResizeOptions::new().resize_alg(Self::to_fast_alg(filter));

        resizer
            .resize(image, &mut dst_image, Some(&options))
            .map_err(|e| ImageError::Scale(format!("fast_image_resize 执行失败：{}", e)))?;

        Ok(dst_image)
    }

    fn to_fast_alg(filter: FilterType) -> fr::ResizeAlg {
        match filter {
            FilterType::Nearest => fr::ResizeAlg::Nearest,
            FilterType::Triangle => fr::ResizeAlg::Convolution(fr::FilterType::Bilinear),
            FilterType::CatmullRom => fr::ResizeAlg::Convolution(fr::FilterType::CatmullRom),
            FilterType::Gaussian => fr::ResizeAlg::Convolution(fr::FilterType::Mitchell),
            FilterType::Lanczos3 => fr::ResizeAlg::Convolution(fr::FilterType::Lanczos3),
        }
    }
}
