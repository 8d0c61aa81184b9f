// src/cli.rs

use clap::{Parser, ValueEnum, command, crate_version};

/// 定义日志输出级别
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(
    version = crate_version!(),
    about,
    long_about = None,
    arg_required_else_help = true,
    disable_help_flag = true,
    disable_version_flag = true,
)]
#[command(group(
    clap::ArgGroup::new("mode")
        .required(true)
        .args(&["list_courses", "course", "key_help"]),
))]
pub struct Cli {
    // --- 运行模式 (Mode) ---
    /// 列出当前账户可访问的全部课程
    #[arg(short, long, action = clap::ArgAction::SetTrue, help_heading = "Mode")]
    pub list_courses: bool,
    /// 扫描指定 ID 的课程，列出其中引用的全部文件
    #[arg(short, long, value_name = "ID", help_heading = "Mode")]
    pub course: Option<u64>,
    /// 显示如何获取 Canvas API Key 的指南并退出
    #[arg(long, action = clap::ArgAction::SetTrue, help_heading = "Mode")]
    pub key_help: bool,

    // --- 连接选项 (Options) ---
    /// Canvas 站点地址，例如 https://canvas.example.edu (原样使用，不要带末尾斜杠)
    #[arg(long, value_name = "URL", help_heading = "Options")]
    pub url: Option<String>,
    /// 提供 API Key，优先级最高
    #[arg(long, value_name = "KEY", help_heading = "Options")]
    pub api_key: Option<String>,
    /// 将 --api-key 提供的值保存到本地配置文件
    #[arg(long, action = clap::ArgAction::SetTrue, requires = "api_key", help_heading = "Options")]
    pub save_key: bool,

    // --- 通用选项 (General) ---
    /// 显示此帮助信息并退出
    #[arg(short = 'h', long, action = clap::ArgAction::Help, global = true, help_heading = "General")]
    _help: Option<bool>,
    /// 显示版本信息并退出
    #[arg(short = 'V', long, action = clap::ArgAction::Version, global = true, help_heading = "General")]
    _version: Option<bool>,
    /// (隐藏参数) 设置日志文件的输出级别，用于调试
    #[arg(long, value_enum, default_value_t = LogLevel::Off, global = true, hide = true)]
    pub log_level: LogLevel,
}
