// src/main.rs

use cansync::{
    cli::{Cli, LogLevel},
    constants,
    error::AppError,
    run_from_cli, symbols,
};
use clap::{CommandFactory, FromArgMatches};
use colored::*;
use log::{error, info, warn};
use std::{env, sync::Arc};

/// 日志文件位于配置目录下；没有主目录或无法写入时改用临时目录
fn open_log_file() -> Option<std::fs::File> {
    let app_name = clap::crate_name!();
    let primary = dirs::home_dir()
        .map(|home| home.join(constants::CONFIG_DIR_NAME))
        .unwrap_or_else(|| env::temp_dir().join(app_name))
        .join(constants::LOG_FILE_NAME);

    let opened = primary
        .parent()
        .map_or(Ok(()), std::fs::create_dir_all)
        .and_then(|_| fern::log_file(&primary));
    match opened {
        Ok(file) => Some(file),
        Err(e) => {
            let fallback = env::temp_dir().join(format!(
                "{}-{}",
                app_name,
                constants::LOG_FALLBACK_FILE_NAME
            ));
            eprintln!("警告: 日志文件 {:?} 不可用 ({})，改写入 {:?}", primary, e, fallback);
            fern::log_file(&fallback)
                .inspect_err(|e| eprintln!("警告: 备用日志文件同样不可用 ({})，本次不记录日志", e))
                .ok()
        }
    }
}

fn init_logger(level: LogLevel) {
    if level == LogLevel::Off {
        return;
    }
    let Some(file) = open_log_file() else {
        return;
    };

    let dispatch = fern::Dispatch::new()
        .level(level.into())
        .level_for("reqwest", log::LevelFilter::Warn)
        .level_for("hyper_util", log::LevelFilter::Warn)
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} {:<5} {} - {}",
                chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .chain(file);
    if let Err(e) = dispatch.apply() {
        eprintln!("警告: 日志初始化失败: {}", e);
    }
}

#[tokio::main]
async fn main() {
    // 为 Windows 终端启用 ANSI 颜色支持
    #[cfg(windows)]
    {
        colored::control::set_virtual_terminal(true).ok();
    }

    let after_help = format!(
        "示例:\n  # 列出所有课程\n  {bin} --url https://canvas.example.edu --api-key <KEY> -l\n\n  # 扫描课程中引用的文件\n  {bin} -c 12345\n\n  # 获取 API Key 帮助\n  {bin} --key-help",
        bin = clap::crate_name!()
    );
    let cmd = Cli::command()
        .override_usage(format!("{} <MODE> [OPTIONS]", clap::crate_name!()))
        .after_help(after_help);
    let args = match Cli::from_arg_matches(&cmd.get_matches()) {
        Ok(args) => Arc::new(args),
        Err(e) => e.exit(),
    };
    init_logger(args.log_level);

    // 放弃遍历即停止后续请求，无需额外清理
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("用户通过 Ctrl+C 中断程序。");
            println!("\n{} 用户中断程序。", *symbols::WARN);
            std::process::exit(130);
        }
    });

    if let Err(e) = run_from_cli(args).await {
        match e {
            AppError::TokenInvalid | AppError::TokenMissing => {
                error!("程序因 API Key 问题退出: {}", e);
                eprintln!("\n{} {}", *symbols::ERROR, format!("{}", e).red());
                eprintln!(
                    "{} 请使用 --key-help 命令查看如何获取 API Key。",
                    *symbols::INFO
                );
            }
            AppError::ConfigMissing(_) => {
                error!("程序因配置缺失退出: {}", e);
                eprintln!("\n{} {}", *symbols::ERROR, format!("{}", e).red());
                eprintln!(
                    "{} 请通过 --url 或环境变量 {} 提供 Canvas 站点地址。",
                    *symbols::INFO,
                    constants::ENV_URL
                );
            }
            _ => {
                error!("程序执行出错: {}", e);
                eprintln!("\n{} {}", *symbols::ERROR, format!("程序执行出错: {}", e).red());
            }
        }
        std::process::exit(1);
    }
    info!("程序正常退出。");
}
