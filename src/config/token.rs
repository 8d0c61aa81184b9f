// src/config/token.rs

use crate::{
    config::ExternalConfig,
    constants,
    error::{AppError, AppResult},
};
use anyhow::{Context, anyhow};
use log::{debug, info};
use std::{fs, path::PathBuf};

pub(super) fn get_config_path() -> AppResult<PathBuf> {
    let path = dirs::home_dir()
        .ok_or_else(|| AppError::Other(anyhow!("无法获取用户主目录")))?
        .join(constants::CONFIG_DIR_NAME)
        .join(constants::CONFIG_FILE_NAME);
    Ok(path)
}

pub(crate) fn load_or_create_external_config() -> AppResult<ExternalConfig> {
    let config_path = get_config_path()?;
    if config_path.is_file() {
        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("读取配置文件 '{}' 失败", config_path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("解析配置文件 '{}' 失败", config_path.display()))
            .map_err(AppError::from)
    } else {
        info!("配置文件 {:?} 不存在，将创建默认配置。", config_path);
        let config = ExternalConfig::default_app_config();

        if let Some(dir) = config_path.parent() {
            fs::create_dir_all(dir)?;
        }

        let json_content = serde_json::to_string_pretty(&config)?;
        fs::write(&config_path, json_content)?;

        Ok(config)
    }
}

pub fn save_api_key(api_key: &str) -> AppResult<()> {
    if api_key.is_empty() {
        return Ok(());
    }

    let config_path = get_config_path()?;
    let mut config = load_or_create_external_config()?;

    config.api_key = Some(api_key.to_string());

    let json_content = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, json_content)
        .with_context(|| format!("保存 API Key 到 '{}' 失败", config_path.display()))?;

    info!("用户已将 API Key 保存至配置文件: {}", config_path.display());
    println!(
        "{} API Key 已成功保存至: {}",
        *crate::symbols::INFO,
        config_path.display()
    );

    Ok(())
}

/// 依次尝试命令行参数、环境变量、配置文件，返回第一个非空值及其来源
fn resolve_first(
    cli_value: Option<&str>,
    env_value: Option<String>,
    env_label: &str,
    file_value: Option<String>,
) -> Option<(String, String)> {
    if let Some(value) = cli_value && !value.is_empty() {
        debug!("使用来自命令行参数的值");
        return Some((value.to_string(), "命令行参数".to_string()));
    }
    if let Some(value) = env_value && !value.is_empty() {
        debug!("使用来自环境变量 {} 的值", env_label);
        return Some((value, format!("环境变量 ({})", env_label)));
    }
    if let Some(value) = file_value && !value.is_empty() {
        debug!("使用来自本地配置文件的值");
        return Some((value, "本地配置文件".to_string()));
    }
    None
}

pub fn resolve_url(cli_url: Option<&str>, file_url: Option<String>) -> Option<(String, String)> {
    resolve_first(
        cli_url,
        std::env::var(constants::ENV_URL).ok(),
        constants::ENV_URL,
        file_url,
    )
}

pub fn resolve_api_key(
    cli_key: Option<&str>,
    file_key: Option<String>,
) -> Option<(String, String)> {
    let resolved = resolve_first(
        cli_key,
        std::env::var(constants::ENV_API_KEY).ok(),
        constants::ENV_API_KEY,
        file_key,
    );
    if resolved.is_none() {
        debug!("未在任何位置找到可用的 API Key");
    }
    resolved
}
