// src/scanner/page.rs

use super::{FileUrlPattern, ModuleScanner, Scanner};
use crate::{
    client::{ApiStream, boxed},
    models::{File, Page},
};
use async_stream::try_stream;
use log::debug;

/// 课程页面，正文中可能引用若干课程文件
// TODO: 支持正文中的内嵌图片
#[derive(Debug)]
pub struct PageScanner<'a> {
    pub page: Page,
    parent: &'a ModuleScanner<'a>,
    name: String,
    id: u64,
}

impl<'a> Scanner<'a> for PageScanner<'a> {
    type Remote = Page;
    type Parent = ModuleScanner<'a>;

    fn load(page: Page, parent: &'a ModuleScanner<'a>) -> Self {
        Self {
            name: page.title.clone(),
            id: page.page_id,
            page,
            parent,
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> u64 {
        self.id
    }

    fn parent(&self) -> &'a ModuleScanner<'a> {
        self.parent
    }
}

impl<'a> PageScanner<'a> {
    /// 页面没有正文字段，或正文为 null
    pub fn is_empty(&self) -> bool {
        let empty = self.page.body.is_none();
        if empty {
            debug!("页面 '{}' ({}) 没有正文", self.name, self.id);
        }
        empty
    }

    /// 正文中引用的全部本课程文件，按出现顺序，不去重
    pub fn files(&self) -> ApiStream<'_, File> {
        boxed(try_stream! {
            if !self.is_empty() {
                let body = self.page.body.as_deref().unwrap_or_default();
                let course = self.parent.parent();
                let canvas = course.parent();
                let pattern = FileUrlPattern::new(canvas.url(), course.id())?;
                let file_ids: Vec<u64> = pattern.find_all(body).collect();
                debug!("页面 '{}' 中找到 {} 个文件链接", self.name, file_ids.len());
                for file_id in file_ids {
                    yield canvas.get_file(file_id).await?;
                }
            }
        })
    }
}
