// src/scanner/module.rs

use super::{CourseScanner, FileUrlPattern, PageScanner, Scanner};
use crate::{
    client::{ApiStream, boxed},
    models::{File, Module, ModuleItemKind},
};
use async_stream::try_stream;
use log::{debug, trace};

/// 提供页面与附件的模块
// TODO: 支持测验 (Quiz) 条目
#[derive(Debug)]
pub struct ModuleScanner<'a> {
    pub module: Module,
    parent: &'a CourseScanner<'a>,
    name: String,
    id: u64,
}

impl<'a> Scanner<'a> for ModuleScanner<'a> {
    type Remote = Module;
    type Parent = CourseScanner<'a>;

    fn load(module: Module, parent: &'a CourseScanner<'a>) -> Self {
        Self {
            name: module.name.clone(),
            id: module.id,
            module,
            parent,
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> u64 {
        self.id
    }

    fn parent(&self) -> &'a CourseScanner<'a> {
        self.parent
    }
}

impl<'a> ModuleScanner<'a> {
    /// 模块中链接到课程页面的条目，每个条目额外请求一次页面内容
    pub fn pages(&self) -> ApiStream<'_, PageScanner<'_>> {
        boxed(try_stream! {
            let course = self.parent;
            let api = course.parent().api();
            for await item in api.list_module_items(course.id(), self.id) {
                let item = item?;
                match &item.kind {
                    ModuleItemKind::PageLink { page_url, .. } => {
                        debug!("模块 '{}' 中的页面条目: {}", self.name, page_url);
                        let page = api.get_page(course.id(), page_url).await?;
                        yield PageScanner::load(page, self);
                    }
                    _ => trace!("跳过非页面条目 '{}' ({})", item.title, item.item_type),
                }
            }
        })
    }

    /// 模块中直接指向本课程文件的条目
    pub fn attachments(&self) -> ApiStream<'_, File> {
        boxed(try_stream! {
            let course = self.parent;
            let canvas = course.parent();
            let pattern = FileUrlPattern::new(canvas.url(), course.id())?;
            for await item in canvas.api().list_module_items(course.id(), self.id) {
                let item = item?;
                let Some(url) = item.kind.url() else {
                    continue;
                };
                match pattern.match_start(url) {
                    Some(file_id) => {
                        debug!("模块 '{}' 中的文件条目: {}", self.name, file_id);
                        yield canvas.get_file(file_id).await?;
                    }
                    None => trace!("链接 '{}' 不是本课程的文件，跳过", url),
                }
            }
        })
    }
}
