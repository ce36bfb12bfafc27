//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 使用单一错误枚举承载缩放流水线中的所有失败点，每个分支对应流水线中的一个阶段。
//! 通过 `thiserror` 保持人类可读错误，同时让调用侧可按分支匹配（例如映射退出码）。

/// 缩放流水线统一错误类型。
///
/// 每个分支携带来自失败协作方（容器读取、解码器、缩放器、编码器、文件系统）的可读信息。
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("无法打开输入文件：{0}")]
    InputOpen(String),

    #[error("容器中没有主图像：{0}")]
    NoPrimaryImage(String),

    #[error("解码错误：{0}")]
    Decode(String),

    #[error("缩放错误：{0}")]
    Scale(String),

    #[error("编码错误：{0}")]
    Encode(String),

    #[error("写入输出文件失败：{0}")]
    OutputWrite(String),

    #[error("参数错误：{0}")]
    InvalidArgument(String),

    #[error("资源限制：{0}")]
    ResourceLimit(String),
}

impl ImageError {
    /// 稳定的错误类别名，用于日志字段。
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InputOpen(_) => "input_open",
            Self::NoPrimaryImage(_) => "no_primary_image",
            Self::Decode(_) => "decode",
            Self::Scale(_) => "scale",
            Self::Encode(_) => "encode",
            Self::OutputWrite(_) => "output_write",
            Self::InvalidArgument(_) => "invalid_argument",
            Self::ResourceLimit(_) => "resource_limit",
        }
    }
}
