// src/scanner/course.rs

use super::{ModuleScanner, Scanner};
use crate::{
    canvas::Canvas,
    client::{ApiStream, boxed},
    models::Course,
    utils,
};
use async_stream::try_stream;
use log::debug;

/// 提供模块列表的课程
#[derive(Debug)]
pub struct CourseScanner<'a> {
    pub code: String,
    pub course: Course,
    parent: &'a Canvas,
    name: String,
    id: u64,
}

impl<'a> Scanner<'a> for CourseScanner<'a> {
    type Remote = Course;
    type Parent = Canvas;

    fn load(course: Course, canvas: &'a Canvas) -> Self {
        Self {
            code: course.course_code.clone(),
            name: utils::better_course_name(&course.name),
            id: course.id,
            course,
            parent: canvas,
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> u64 {
        self.id
    }

    fn parent(&self) -> &'a Canvas {
        self.parent
    }
}

impl<'a> CourseScanner<'a> {
    /// 每次调用都会重新请求模块列表
    pub fn modules(&self) -> ApiStream<'_, ModuleScanner<'_>> {
        boxed(try_stream! {
            debug!("列出课程 '{}' ({}) 的模块", self.name, self.id);
            for await module in self.parent.api().list_modules(self.id) {
                yield ModuleScanner::load(module?, self);
            }
        })
    }
}
