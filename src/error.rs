//! 应用级错误类型模块
//!
//! # 设计思路
//!
//! `AppError` 汇总命令行入口可能遇到的失败：配置文件问题与缩放流水线错误。
//! 每个分支映射到一个独立的非零退出码，脚本调用方可以据此区分失败原因。
//!
//! 用法错误（缺少位置参数、`--help`）不经过这里，由 `cli` 打印用法后以 0 退出。

use crate::scaler::ImageError;

/// 应用级统一错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 配置文件读取或解析失败
    #[error("配置错误: {0}")]
    Config(String),

    /// 缩放流水线错误（打开 / 解码 / 缩放 / 编码 / 写出）
    #[error("{0}")]
    Image(#[from] ImageError),
}

impl AppError {
    /// 进程退出码。
    ///
    /// | 退出码 | 含义 |
    /// |------|------|
    /// | 2 | 无法打开输入 |
    /// | 3 | 无主图像 |
    /// | 4 | 解码失败 |
    /// | 5 | 缩放失败 |
    /// | 6 | 编码失败 |
    /// | 7 | 写出失败 |
    /// | 8 | 零面积目标等参数错误 |
    /// | 9 | 超出资源限制 |
    /// | 10 | 配置错误 |
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Image(ImageError::InputOpen(_)) => 2,
            Self::Image(ImageError::NoPrimaryImage(_)) => 3,
            Self::Image(ImageError::Decode(_)) => 4,
            Self::Image(ImageError::Scale(_)) => 5,
            Self::Image(ImageError::Encode(_)) => 6,
            Self::Image(ImageError::OutputWrite(_)) => 7,
            Self::Image(ImageError::InvalidArgument(_)) => 8,
            Self::Image(ImageError::ResourceLimit(_)) => 9,
            Self::Config(_) => 10,
        }
    }

    /// 日志用的错误类别。
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Image(err) => err.kind(),
        }
    }
}
