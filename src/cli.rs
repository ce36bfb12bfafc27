//! # 命令行入口适配
//!
//! 只做参数解析与配置合并，不包含业务逻辑。
//!
//! 解析结果是一个 `CliAction`，由 `main` 决定输出位置与退出码：
//! 用法/帮助输出到 stderr 并以 0 退出，版本信息输出到 stdout。

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{ArgAction, CommandFactory, Parser, error::ErrorKind};

use crate::error::AppError;
use crate::scaler::{ConfigOverrides, ImageConfig, ScaleProfile, ScaleRequest};

const HELP_TEMPLATE: &str = "\
{name} {version}
------------------------------------
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}";

/// 等比缩放图片并写出为新的 PNG 文件（只缩小，不放大）。
#[derive(Debug, Parser)]
#[command(
    name = "image-scale",
    version,
    disable_help_flag = true,
    help_template = HELP_TEMPLATE
)]
struct CliArgs {
    /// 输入图片路径
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// 输出图片路径
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// 输出宽度上限（0 表示不限制）
    #[arg(short = 'W', long, value_name = "WIDTH", default_value_t = 0)]
    width: u32,

    /// 输出高度上限（0 表示不限制）
    #[arg(short = 'H', long, value_name = "HEIGHT", default_value_t = 0)]
    height: u32,

    /// 缩放档位：quality / balanced / speed
    #[arg(short = 'p', long, value_name = "PROFILE", value_parser = parse_profile)]
    profile: Option<ScaleProfile>,

    /// JSON 配置文件（资源上限与档位）
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// 显示帮助
    #[allow(dead_code)]
    #[arg(short = 'h', long, action = ArgAction::Help)]
    help: Option<bool>,
}

fn parse_profile(value: &str) -> Result<ScaleProfile, String> {
    ScaleProfile::from_str(value).map_err(|e| e.to_string())
}

/// 一次缩放运行所需的全部参数。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub request: ScaleRequest,
    pub profile: Option<ScaleProfile>,
    pub config_path: Option<PathBuf>,
}

/// 命令行解析结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliAction {
    /// 执行缩放。
    Run(RunOptions),
    /// 打印到 stderr 的用法或参数错误信息。
    Usage(String),
    /// 打印到 stdout 的版本信息。
    Version(String),
}

/// 完整用法文本。
pub fn usage() -> String {
    CliArgs::command().render_help().to_string()
}

/// 解析命令行参数（第一个元素为程序名）。
pub fn parse_args<I, T>(args: I) -> CliAction
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let parsed = match CliArgs::try_parse_from(args) {
        Ok(parsed) => parsed,
        Err(err) => {
            return match err.kind() {
                ErrorKind::DisplayVersion => CliAction::Version(err.to_string()),
                ErrorKind::DisplayHelp => CliAction::Usage(err.to_string()),
                _ => CliAction::Usage(format!("{}\n{}", err, usage())),
            };
        }
    };

    let (Some(input), Some(output)) = (parsed.input, parsed.output) else {
        return CliAction::Usage(usage());
    };

    CliAction::Run(RunOptions {
        input,
        output,
        request: ScaleRequest::from_cli(parsed.width, parsed.height),
        profile: parsed.profile,
        config_path: parsed.config,
    })
}

/// 合并默认配置、JSON 配置文件与命令行档位。
///
/// 命令行档位优先于配置文件中的档位。
pub fn build_config(options: &RunOptions) -> Result<ImageConfig, AppError> {
    let mut config = ImageConfig::default();

    if let Some(path) = options.config_path.as_deref() {
        let overrides = ConfigOverrides::load(path).map_err(AppError::Config)?;
        config
            .apply_overrides(&overrides)
            .map_err(|e| AppError::Config(e.to_string()))?;
        log::debug!("已加载配置文件: {}", path.display());
    }

    if let Some(profile) = options.profile {
        config.apply_profile(profile);
    }

    Ok(config)
}
