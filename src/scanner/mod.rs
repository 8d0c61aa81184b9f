// src/scanner/mod.rs

pub mod course;
pub mod module;
pub mod page;
mod utils;

pub use self::{
    course::CourseScanner, module::ModuleScanner, page::PageScanner, utils::FileUrlPattern,
};

/// 对单个远程节点 (课程/模块/页面) 的只读惰性视图
///
/// 构造时不发出任何请求；父节点引用在构造后不再改变。
pub trait Scanner<'a>: Sized {
    /// 被包装的远程对象
    type Remote;
    /// 上一级节点，仅借用，不拥有
    type Parent;

    fn load(remote: Self::Remote, parent: &'a Self::Parent) -> Self;
    fn name(&self) -> &str;
    fn id(&self) -> u64;
    fn parent(&self) -> &'a Self::Parent;
}
