// src/config.rs

pub mod token;

use self::token::{load_or_create_external_config, resolve_api_key, resolve_url};
use crate::{
    cli::Cli,
    constants,
    error::{AppError, AppResult},
};
use log::info;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NetworkConfig {
    pub connect_timeout_secs: Option<u64>,
    pub timeout_secs: Option<u64>,
    /// 列表接口每页返回的条目数
    pub per_page: Option<u32>,
}

/// 配置文件 `~/.cansync/config.json` 的内容
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ExternalConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default)]
    pub network: NetworkConfig,
}

impl ExternalConfig {
    pub(crate) fn default_app_config() -> Self {
        Self {
            url: None,
            api_key: None,
            network: NetworkConfig {
                connect_timeout_secs: Some(constants::DEFAULT_CONNECT_TIMEOUT_SECS),
                timeout_secs: Some(constants::DEFAULT_TIMEOUT_SECS),
                per_page: Some(constants::DEFAULT_PER_PAGE),
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Canvas 站点根地址，按原样使用，不做任何规范化
    pub url: String,
    pub api_key: String,
    pub user_agent: String,
    pub connect_timeout: Duration,
    pub timeout: Duration,
    pub per_page: u32,
}

impl AppConfig {
    pub fn new(args: &Cli) -> AppResult<Self> {
        let external_config = load_or_create_external_config()?;

        let (url, url_source) = resolve_url(args.url.as_deref(), external_config.url.clone())
            .ok_or(AppError::ConfigMissing("url"))?;
        info!("从 {} 加载 Canvas 地址: {}", url_source, url);

        let (api_key, key_source) =
            resolve_api_key(args.api_key.as_deref(), external_config.api_key.clone())
                .ok_or(AppError::TokenMissing)?;
        info!("从 {} 加载 API Key", key_source);

        Ok(Self::from_parts(url, api_key, &external_config.network))
    }

    pub fn from_parts(url: String, api_key: String, network: &NetworkConfig) -> Self {
        Self {
            url,
            api_key,
            user_agent: constants::USER_AGENT.into(),
            connect_timeout: Duration::from_secs(
                network
                    .connect_timeout_secs
                    .unwrap_or(constants::DEFAULT_CONNECT_TIMEOUT_SECS),
            ),
            timeout: Duration::from_secs(
                network.timeout_secs.unwrap_or(constants::DEFAULT_TIMEOUT_SECS),
            ),
            per_page: network.per_page.unwrap_or(constants::DEFAULT_PER_PAGE),
        }
    }
}

#[cfg(feature = "testing")]
impl Default for AppConfig {
    fn default() -> Self {
        Self {
            url: "https://lms.example.com".to_string(),
            api_key: "test-key".to_string(),
            user_agent: "test-agent/1.0".to_string(),
            connect_timeout: Duration::from_secs(5),
            timeout: Duration::from_secs(15),
            per_page: 10,
        }
    }
}
