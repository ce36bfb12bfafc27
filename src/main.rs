//! # image-scale — 命令行入口
//!
//! 本文件仅负责日志初始化、分发 `CliAction` 与退出码。
//! 业务逻辑分布在各子模块中，详见 `lib.rs` 架构文档。

use std::process::ExitCode;

use image_scale::cli::{self, CliAction};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let options = match cli::parse_args(std::env::args_os()) {
        CliAction::Run(options) => options,
        CliAction::Usage(text) => {
            eprintln!("{}", text.trim_end());
            return ExitCode::SUCCESS;
        }
        CliAction::Version(text) => {
            println!("{}", text.trim_end());
            return ExitCode::SUCCESS;
        }
    };

    match image_scale::run(&options) {
        Ok(summary) => {
            log::info!(
                "输出 {} -> {}（{} 字节，{}）",
                summary.native,
                summary.output,
                summary.bytes_written,
                summary.codec.as_str()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::debug!("缩放失败 - kind={} exit={}", err.kind(), err.exit_code());
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
