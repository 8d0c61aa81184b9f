// src/models/api.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

// --- 课程 (Course) ---

/// 对于因日期限制无法访问的课程，Canvas 只返回 `id`，其余字段可能缺失
#[derive(Deserialize, Debug, Clone)]
pub struct Course {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub course_code: String,
}

// --- 模块 (Module) ---

#[derive(Deserialize, Debug, Clone)]
pub struct Module {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub position: Option<u32>,
    #[serde(default)]
    pub items_count: Option<u32>,
}

/// 模块条目的原始形态，字段是否存在决定了条目的种类
///
/// 所有字段都可缺失；类型不符的字段按缺失处理，不影响同一页中的其他条目。
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct RawModuleItem {
    #[serde(deserialize_with = "lenient_u64")]
    pub id: u64,
    #[serde(deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(rename = "type", deserialize_with = "lenient_string")]
    pub item_type: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub page_url: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub url: Option<String>,
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().map(str::to_string))
}

fn lenient_u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_u64().unwrap_or_default())
}

// --- 页面 (Page) ---

#[derive(Deserialize, Debug, Clone)]
pub struct Page {
    pub page_id: u64,
    #[serde(default)]
    pub url: String,
    pub title: String,
    /// 字段缺失与显式的 `null` 都反序列化为 `None`
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

// --- 文件 (File) ---

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct File {
    pub id: u64,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub filename: String,
    /// 实际下载地址 (带验证参数)
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(rename = "content-type", default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}
