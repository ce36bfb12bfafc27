//! # 核心编排模块
//!
//! ## 设计思路
//!
//! `ImageScaler` 只负责流程编排，各阶段的具体行为分散在 `loader/pipeline/encoder`。
//! 处理链路固定为：
//! 1. 打开输入容器
//! 2. 定位主图像
//! 3. 解码为栅格并读取原生尺寸
//! 4. 计算目标尺寸
//! 5. 缩放
//! 6. 新建输出容器并编码
//! 7. 写出文件
//!
//! ## 实现思路
//!
//! - 每一步返回 `Result`，`?` 在第一个失败处短路，后续步骤不会执行。
//! - 编码完成前不触碰输出路径，失败时不会留下输出文件。
//! - 记录 `open/decode/scale/encode/write/total` 阶段耗时，便于性能诊断。

use std::path::Path;
use std::time::Instant;

use super::dimensions::resolve;
use super::encoder::OutputContainer;
use super::source::{ScaleRequest, ScaleSummary};
use super::{ImageConfig, ImageError};

/// 图片缩放器。
///
/// 持有本次运行的配置，单次调用 `run` 完成一张图的完整处理。
pub struct ImageScaler {
    config: ImageConfig,
}

impl ImageScaler {
    /// 根据配置创建缩放器。
    pub fn new(config: ImageConfig) -> Self {
        Self { config }
    }

    /// 处理主入口：读取输入、按外框缩放并写出新容器。
    ///
    /// # 示例
    /// ```rust,no_run
    /// use image_scale::scaler::{ImageConfig, ImageScaler, ScaleRequest};
    /// use std::path::Path;
    ///
    /// let scaler = ImageScaler::new(ImageConfig::default());
    /// let summary = scaler.run(
    ///     Path::new("photo.jpg"),
    ///     Path::new("thumb.png"),
    ///     ScaleRequest::new(Some(960), None),
    /// )?;
    /// println!("{} -> {}", summary.native, summary.output);
    /// # Ok::<(), image_scale::scaler::ImageError>(())
    /// ```
    pub fn run(
        &self,
        input: &Path,
        output: &Path,
        request: ScaleRequest,
    ) -> Result<ScaleSummary, ImageError> {
        let config = &self.config;
        let total_start = Instant::now();

        let open_start = Instant::now();
        let container = self.open_container(input, config)?;
        let handle = self.primary_image_handle(&container, config)?;
        let open_elapsed = open_start.elapsed();

        let input_format = handle.format;

        let decode_start = Instant::now();
        let source = self.decode_primary(handle, config)?;
        let decode_elapsed = decode_start.elapsed();

        let native = source.native;
        let target = resolve(native, request);
        log::info!(
            "📐 尺寸决策：原始 {} 请求 {:?}x{:?} -> 目标 {}",
            native,
            request.width,
            request.height,
            target
        );

        if target.is_empty() {
            return Err(ImageError::InvalidArgument(format!(
                "缩放结果为零面积：{}（原始 {}，请求宽 {:?} 高 {:?}）",
                target, native, request.width, request.height
            )));
        }

        let scale_start = Instant::now();
        let scaled = self.scale_raster(source, target, config)?;
        let scale_elapsed = scale_start.elapsed();

        let encode_start = Instant::now();
        let encoded = OutputContainer::new(config.output_codec).encode_image(&scaled)?;
        drop(scaled);
        let encode_elapsed = encode_start.elapsed();

        let write_start = Instant::now();
        let bytes_written = self.write_output(&encoded, output)?;
        let write_elapsed = write_start.elapsed();

        let total_elapsed = total_start.elapsed();
        log::info!(
            "✅ 图片缩放完成 - open={}ms decode={}ms scale={}ms encode={}ms write={}ms total={}ms",
            open_elapsed.as_millis(),
            decode_elapsed.as_millis(),
            scale_elapsed.as_millis(),
            encode_elapsed.as_millis(),
            write_elapsed.as_millis(),
            total_elapsed.as_millis()
        );

        Ok(ScaleSummary {
            input_format,
            native,
            output: target,
            codec: encoded.codec,
            bytes_written,
        })
    }
}
