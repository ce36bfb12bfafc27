//! # image-scale — 库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  main.rs   日志初始化 · 退出码                             │
//! │     ↓                                                    │
//! │  cli        clap 参数解析 · 配置合并 (CliAction)           │
//! │     ↓                                                    │
//! │  scaler     打开 → 主图像 → 解码 → 尺寸决策 → 缩放          │
//! │             → 编码 → 写出 (Result<_, ImageError>)         │
//! │     ↓                                                    │
//! │  error      AppError → 退出码                             │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 应用级错误 `AppError` 与退出码映射 |
//! | [`cli`] | 命令行解析、用法文本、配置文件合并 |
//! | [`scaler`] | 尺寸决策与缩放流水线 |

pub mod cli;
pub mod error;
pub mod scaler;

use crate::cli::RunOptions;
use crate::error::AppError;
use crate::scaler::{ImageScaler, ScaleSummary};

/// 按命令行参数执行一次完整缩放。
pub fn run(options: &RunOptions) -> Result<ScaleSummary, AppError> {
    let config = cli::build_config(options)?;
    log::info!(
        "⚙️ 缩放档位：{}（filter={:?}, codec={}）",
        config.infer_profile().as_str(),
        config.resize_filter,
        config.output_codec.as_str()
    );

    let scaler = ImageScaler::new(config);
    let summary = scaler.run(&options.input, &options.output, options.request)?;
    Ok(summary)
}
