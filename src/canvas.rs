// src/canvas.rs

use crate::{
    client::{ApiStream, CanvasApi, CanvasHttpClient},
    config::AppConfig,
    error::AppResult,
    models::{CourseInfo, File},
    scanner::{CourseScanner, Scanner},
};
use futures::{StreamExt, TryStreamExt};
use log::debug;
use std::{fmt, sync::Arc};

/// 对 Canvas 接口的精简封装，只暴露扫描器需要的操作，并持有站点根地址
pub struct Canvas {
    url: String,
    api: Arc<dyn CanvasApi>,
}

impl Canvas {
    pub fn new(config: Arc<AppConfig>) -> AppResult<Self> {
        let url = config.url.clone();
        let api = Arc::new(CanvasHttpClient::new(config)?);
        Ok(Self::with_api(url, api))
    }

    /// 使用任意的接口实现构造，`url` 必须与接口返回的链接所用的地址一致
    pub fn with_api(url: impl Into<String>, api: Arc<dyn CanvasApi>) -> Self {
        Self {
            url: url.into(),
            api,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn api(&self) -> &dyn CanvasApi {
        self.api.as_ref()
    }

    pub async fn get_file(&self, file_id: u64) -> AppResult<File> {
        self.api.get_file(file_id).await
    }

    pub async fn get_course(&self, course_id: u64) -> AppResult<CourseScanner<'_>> {
        debug!("加载课程 {}", course_id);
        let course = self.api.get_course(course_id).await?;
        Ok(CourseScanner::load(course, self))
    }

    pub fn get_courses_info(&self) -> ApiStream<'_, CourseInfo> {
        self.api
            .list_courses()
            .map_ok(|course| CourseInfo {
                name: course.name,
                id: course.id,
            })
            .boxed()
    }
}

impl fmt::Debug for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Canvas")
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}
