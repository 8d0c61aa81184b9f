// src/scanner/utils.rs

use log::warn;
use regex::Regex;

/// 课程文件链接 `{base_url}/courses/{course_id}/files/{file_id}` 的匹配规则
///
/// `base_url` 按原样拼入规则 (不补斜杠、不统一协议)，其中的正则元字符会被转义，
/// 因此只会字面匹配配置中的地址。
#[derive(Debug, Clone)]
pub struct FileUrlPattern {
    regex: Regex,
}

impl FileUrlPattern {
    pub fn new(base_url: &str, course_id: u64) -> Result<Self, regex::Error> {
        let pattern = format!(
            r"{}/courses/{}/files/([0-9]+)",
            regex::escape(base_url),
            course_id
        );
        Ok(Self {
            regex: Regex::new(&pattern)?,
        })
    }

    /// 仅当链接以规则开头时返回文件 ID
    pub fn match_start(&self, url: &str) -> Option<u64> {
        self.regex
            .captures(url)
            .filter(|caps| caps.get(0).is_some_and(|m| m.start() == 0))
            .and_then(|caps| caps.get(1))
            .and_then(|m| parse_file_id(m.as_str()))
    }

    /// 按出现顺序返回文本中所有不重叠匹配的文件 ID，重复的链接会重复出现
    pub fn find_all<'t>(&'t self, text: &'t str) -> impl Iterator<Item = u64> + 't {
        self.regex
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .filter_map(|m| parse_file_id(m.as_str()))
    }
}

fn parse_file_id(digits: &str) -> Option<u64> {
    match digits.parse::<u64>() {
        Ok(id) => Some(id),
        Err(e) => {
            warn!("文件 ID '{}' 超出范围，跳过: {}", digits, e);
            None
        }
    }
}
