//! # 配置模块
//!
//! ## 设计思路
//!
//! 将所有“可调策略”集中到 `ImageConfig`，保证运行时行为可观测、可调整、可测试。
//! 缩放档位（quality / balanced / speed）作为高层语义，映射到具体的重采样滤镜。
//!
//! ## 实现思路
//!
//! - `Default` 提供生产可用的平衡配置。
//! - `ScaleProfile` 负责档位字符串解析与反向输出。
//! - `ConfigOverrides` 从 JSON 文件读取可覆盖字段，未出现的字段保持默认值。
//! - 输出编码器（`OutputCodec`）只能通过代码设置，命令行不暴露。

use std::fs;
use std::path::Path;

use image::imageops::FilterType;
use serde::Deserialize;

use super::ImageError;

/// 缩放流水线配置。
///
/// 字段覆盖了读取、解码、重采样与编码四个阶段。
#[derive(Debug, Clone)]
pub struct ImageConfig {
    /// 读取输入文件时允许的最大文件体积（字节）。
    pub max_file_size: u64,
    /// 解码后的像素上限（`width * height`）。
    pub max_decoded_pixels: u64,
    /// 解码阶段允许的预计内存上限（按 RGBA 估算，字节）。
    pub max_decoded_bytes: u64,
    /// 重采样滤镜策略。
    pub resize_filter: FilterType,
    /// 输出容器使用的固定编码器。
    pub output_codec: OutputCodec,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            max_file_size: 50 * 1024 * 1024,
            max_decoded_pixels: 40_000_000,
            max_decoded_bytes: 160 * 1024 * 1024,
            resize_filter: FilterType::CatmullRom,
            output_codec: OutputCodec::Png,
        }
    }
}

/// 输出编码器选择。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputCodec {
    /// 无损 PNG。
    Png,
    /// 有损 JPEG，`quality` 取值 1~100。
    Jpeg { quality: u8 },
}

impl OutputCodec {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg { .. } => "jpeg",
        }
    }
}

/// 缩放档位（面向用户语义）。
///
/// - `Quality`：Lanczos3，尽量保真
/// - `Balanced`：CatmullRom，质量与速度平衡
/// - `Speed`：最近邻，优先速度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleProfile {
    Quality,
    Balanced,
    Speed,
}

impl ScaleProfile {
    /// 从外部字符串解析档位。
    ///
    /// # 示例
    /// ```rust
    /// use image_scale::scaler::ScaleProfile;
    ///
    /// let p = ScaleProfile::from_str("Balanced")?;
    /// assert_eq!(p.as_str(), "balanced");
    /// # Ok::<(), image_scale::scaler::ImageError>(())
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(profile: &str) -> Result<Self, ImageError> {
        match profile.trim().to_lowercase().as_str() {
            "quality" => Ok(Self::Quality),
            "balanced" => Ok(Self::Balanced),
            "speed" => Ok(Self::Speed),
            other => Err(ImageError::InvalidArgument(format!(
                "未知缩放档位：{}（可选：quality / balanced / speed）",
                other
            ))),
        }
    }

    /// 将档位输出为稳定字符串。
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Quality => "quality",
            Self::Balanced => "balanced",
            Self::Speed => "speed",
        }
    }
}

impl ImageConfig {
    /// 应用指定档位到实际滤镜。
    pub fn apply_profile(&mut self, profile: ScaleProfile) {
        self.resize_filter = match profile {
            ScaleProfile::Quality => FilterType::Lanczos3,
            ScaleProfile::Balanced => FilterType::CatmullRom,
            ScaleProfile::Speed => FilterType::Nearest,
        };
    }

    /// 基于当前滤镜反推档位，用于日志展示。
    pub fn infer_profile(&self) -> ScaleProfile {
        match self.resize_filter {
            FilterType::Lanczos3 | FilterType::Gaussian => ScaleProfile::Quality,
            FilterType::Nearest => ScaleProfile::Speed,
            FilterType::CatmullRom | FilterType::Triangle => ScaleProfile::Balanced,
        }
    }

    /// 合并 JSON 覆盖项。
    ///
    /// 覆盖项中的档位同样生效，命令行档位应在此之后再应用。
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) -> Result<(), ImageError> {
        if let Some(max_file_size) = overrides.max_file_size {
            self.max_file_size = max_file_size;
        }
        if let Some(max_decoded_pixels) = overrides.max_decoded_pixels {
            self.max_decoded_pixels = max_decoded_pixels;
        }
        if let Some(max_decoded_bytes) = overrides.max_decoded_bytes {
            self.max_decoded_bytes = max_decoded_bytes;
        }
        if let Some(profile) = overrides.profile.as_deref() {
            self.apply_profile(ScaleProfile::from_str(profile)?);
        }
        Ok(())
    }
}

/// JSON 配置文件中允许出现的覆盖项。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverrides {
    #[serde(default)]
    pub max_file_size: Option<u64>,
    #[serde(default)]
    pub max_decoded_pixels: Option<u64>,
    #[serde(default)]
    pub max_decoded_bytes: Option<u64>,
    #[serde(default)]
    pub profile: Option<String>,
}

impl ConfigOverrides {
    /// 从 JSON 文本解析覆盖项。
    pub fn from_json(content: &str) -> Result<Self, String> {
        serde_json::from_str(content).map_err(|e| format!("解析配置文件失败: {}", e))
    }

    /// 读取并解析 JSON 配置文件。
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("读取配置文件失败（{}）: {}", path.display(), e))?;
        Self::from_json(&content)
    }
}
