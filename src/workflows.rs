// src/workflows.rs

use crate::{
    canvas::Canvas,
    error::AppResult,
    scanner::Scanner,
    symbols, ui,
};
use colored::*;
use futures::TryStreamExt;
use log::{debug, info};

/// 一次课程扫描的统计结果
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanSummary {
    pub modules: usize,
    pub pages: usize,
    pub page_files: usize,
    pub attachments: usize,
}

impl ScanSummary {
    pub fn files(&self) -> usize {
        self.page_files + self.attachments
    }
}

/// 运行课程列表模式 (--list-courses)
pub async fn run_list_courses(canvas: &Canvas) -> AppResult<usize> {
    ui::print_header("可访问的课程");
    let mut count = 0;
    let mut courses = canvas.get_courses_info();
    while let Some(info) = courses.try_next().await? {
        count += 1;
        println!("  {:>8}  {}", info.id.to_string().yellow(), info.name);
    }
    if count == 0 {
        println!("{} 当前账户没有可访问的课程。", *symbols::WARN);
    }
    info!("共列出 {} 门课程", count);
    Ok(count)
}

/// 运行课程扫描模式 (--course)：依次遍历模块、页面与附件，打印找到的每个文件
pub async fn run_scan_course(canvas: &Canvas, course_id: u64) -> AppResult<ScanSummary> {
    let course = canvas.get_course(course_id).await?;
    ui::print_header(&format!("{} [{}]", course.name(), course.code));

    let mut summary = ScanSummary::default();
    let mut modules = course.modules();
    while let Some(module) = modules.try_next().await? {
        summary.modules += 1;
        ui::print_sub_header(module.name());

        let mut pages = module.pages();
        while let Some(page) = pages.try_next().await? {
            summary.pages += 1;
            ui::print_page(page.name(), 2);
            let mut files = page.files();
            while let Some(file) = files.try_next().await? {
                summary.page_files += 1;
                ui::print_file(&file, 6);
            }
        }

        let mut attachments = module.attachments();
        while let Some(file) = attachments.try_next().await? {
            summary.attachments += 1;
            ui::print_file(&file, 2);
        }
        debug!("模块 '{}' 扫描完成，累计 {:?}", module.name(), summary);
    }

    println!(
        "\n{} 共 {} 个模块、{} 个页面，找到 {} 个文件引用。",
        *symbols::INFO,
        summary.modules,
        summary.pages,
        summary.files().to_string().green()
    );
    info!("课程 {} 扫描完成: {:?}", course_id, summary);
    Ok(summary)
}
