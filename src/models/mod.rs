// src/models/mod.rs

pub mod api;

use self::api::RawModuleItem;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use self::api::{Course, File, Module, Page};

/// 课程的简要信息，用于列出课程而不遍历其内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseInfo {
    pub name: String,
    pub id: u64,
}

/// 模块条目的种类，在 API 边界处一次性判定
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleItemKind {
    /// 指向课程页面的条目，携带页面的 url 标识 (slug) 及可能存在的通用 URL
    PageLink { page_url: String, url: Option<String> },
    /// 携带通用 URL 的条目，是否指向课程文件由扫描器再判断
    FileLink { url: String },
    /// 测验、文本标题等暂不支持的条目
    Other,
}

impl ModuleItemKind {
    pub fn page_url(&self) -> Option<&str> {
        match self {
            ModuleItemKind::PageLink { page_url, .. } => Some(page_url),
            _ => None,
        }
    }

    /// 条目携带的通用 URL，页面条目也可能有
    pub fn url(&self) -> Option<&str> {
        match self {
            ModuleItemKind::PageLink { url, .. } => url.as_deref(),
            ModuleItemKind::FileLink { url } => Some(url),
            ModuleItemKind::Other => None,
        }
    }
}

/// 反序列化永远不会失败：形态异常的条目被归为 [`ModuleItemKind::Other`]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "Value")]
pub struct ModuleItem {
    pub id: u64,
    pub title: String,
    /// Canvas 原始的类型标签，仅用于日志
    pub item_type: String,
    pub kind: ModuleItemKind,
}

impl From<RawModuleItem> for ModuleItem {
    fn from(raw: RawModuleItem) -> Self {
        let kind = match (raw.page_url, raw.url) {
            (Some(page_url), url) => ModuleItemKind::PageLink { page_url, url },
            (None, Some(url)) => ModuleItemKind::FileLink { url },
            (None, None) => ModuleItemKind::Other,
        };
        Self {
            id: raw.id,
            title: raw.title.unwrap_or_default(),
            item_type: raw.item_type.unwrap_or_default(),
            kind,
        }
    }
}

impl From<Value> for ModuleItem {
    fn from(value: Value) -> Self {
        let raw = serde_json::from_value::<RawModuleItem>(value).unwrap_or_else(|e| {
            debug!("无法识别的模块条目，按其他条目处理: {}", e);
            RawModuleItem::default()
        });
        raw.into()
    }
}
