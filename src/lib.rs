// src/lib.rs

pub mod canvas;
pub mod cli;
pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod scanner;
pub mod symbols;
pub mod ui;
pub mod utils;
pub mod workflows;

use crate::{canvas::Canvas, cli::Cli, config::AppConfig, error::AppResult};
use colored::*;
use log::{debug, info};
use std::sync::Arc;

/// 库的公共入口点，由 `main.rs` 调用
pub async fn run_from_cli(args: Arc<Cli>) -> AppResult<()> {
    debug!("CLI 参数: {:?}", args);
    if args.key_help {
        ui::box_message(
            "获取 Canvas API Key 指南",
            constants::HELP_KEY_GUIDE
                .lines()
                .collect::<Vec<_>>()
                .as_slice(),
            |s| s.cyan(),
        );
        println!(
            "\n{} 安全提醒: API Key 等同于你的账户密码，请妥善保管，不要分享给他人。",
            *symbols::INFO
        );
        return Ok(());
    }

    if args.save_key
        && let Some(key) = args.api_key.as_deref()
    {
        config::token::save_api_key(key)?;
    }

    let config = Arc::new(AppConfig::new(&args)?);
    debug!("加载的应用配置: url={}, per_page={}", config.url, config.per_page);

    let canvas = Canvas::new(config)?;

    if args.list_courses {
        workflows::run_list_courses(&canvas).await?;
    } else if let Some(course_id) = args.course {
        workflows::run_scan_course(&canvas, course_id).await?;
    }

    info!("任务完成");
    Ok(())
}
