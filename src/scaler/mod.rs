//! # 图片缩放模块（scaler）
//!
//! ## 设计思路
//!
//! 该模块将“打开容器 → 定位主图像 → 解码 → 尺寸决策 → 缩放 → 编码 → 写出”
//! 按职责拆分为多个子模块，避免单文件膨胀与耦合。
//!
//! - `dimensions`：纯函数尺寸决策，不做 I/O
//! - `handler`：编排整条处理流水线
//! - `loader`：负责文件读取、签名识别与主图像定位
//! - `pipeline`：负责解码、像素限制、缩放
//! - `encoder`：负责输出容器、编码与写盘
//! - `config/error/source`：配置、错误、中间数据模型
//!
//! ## 调用链
//!
//! ```text
//! main.rs / cli.rs（参数解析、配置合并）
//!    ↓
//! handler.rs（统一编排 + 阶段耗时日志）
//!    ├─ loader.rs（打开容器 + 主图像头信息 + 体积/像素限制）
//!    ├─ pipeline.rs（解码 + 缩放）
//!    │    └─ dimensions.rs（目标尺寸）
//!    └─ encoder.rs（输出容器 + 编码 + 写出）
//!    ↓
//! 返回 ImageError 给调用方
//! ```

mod config;
mod dimensions;
mod encoder;
mod error;
mod handler;
mod loader;
mod pipeline;
mod source;

pub use config::{ConfigOverrides, ImageConfig, OutputCodec, ScaleProfile};
pub use dimensions::resolve;
pub use error::ImageError;
pub use handler::ImageScaler;
pub use source::{Dimensions, ScaleRequest, ScaleSummary};
