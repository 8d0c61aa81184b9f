// tests/scanner_test.rs

use async_stream::try_stream;
use async_trait::async_trait;
use cansync::{
    canvas::Canvas,
    client::{ApiStream, CanvasApi, boxed},
    error::{AppError, AppResult},
    models::{Course, CourseInfo, File, Module, ModuleItem, Page},
    scanner::{ModuleScanner, PageScanner, Scanner},
};
use futures::{StreamExt, TryStreamExt};
use serde_json::{Value, json};
use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

const BASE: &str = "https://lms.example.com";
const COURSE_ID: u64 = 55;
const MODULE_ID: u64 = 7;

#[derive(Default)]
struct CallCounters {
    get_course: AtomicUsize,
    list_modules: AtomicUsize,
    list_module_items: AtomicUsize,
    get_page: AtomicUsize,
    get_file: AtomicUsize,
}

/// 内存中的 Canvas，记录每类请求的次数
#[derive(Default)]
struct FakeCanvas {
    courses: Vec<Course>,
    modules: HashMap<u64, Vec<Module>>,
    items: HashMap<u64, Vec<ModuleItem>>,
    pages: HashMap<String, Page>,
    fail_modules: bool,
    calls: CallCounters,
}

fn from_json<T: serde::de::DeserializeOwned>(value: Value) -> T {
    serde_json::from_value(value).expect("测试数据格式错误")
}

impl FakeCanvas {
    fn new() -> Self {
        Self {
            courses: vec![
                from_json(json!({ "id": COURSE_ID, "name": "Intro  to   Rust", "course_code": "RS101" })),
                from_json(json!({ "id": 56, "name": "Other Course", "course_code": "OT200" })),
            ],
            modules: HashMap::from([(
                COURSE_ID,
                vec![from_json(json!({ "id": MODULE_ID, "name": "Week 1" }))],
            )]),
            ..Default::default()
        }
    }

    fn with_items(mut self, items: Vec<Value>) -> Self {
        self.items
            .insert(MODULE_ID, items.into_iter().map(from_json).collect());
        self
    }

    fn with_page(mut self, page: Value) -> Self {
        let page: Page = from_json(page);
        self.pages.insert(page.url.clone(), page);
        self
    }

    fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CanvasApi for FakeCanvas {
    async fn get_course(&self, course_id: u64) -> AppResult<Course> {
        self.calls.get_course.fetch_add(1, Ordering::SeqCst);
        self.courses
            .iter()
            .find(|c| c.id == course_id)
            .cloned()
            .ok_or_else(|| AppError::UserInputError(format!("course {} not found", course_id)))
    }

    fn list_courses(&self) -> ApiStream<'_, Course> {
        futures::stream::iter(self.courses.clone().into_iter().map(Ok)).boxed()
    }

    fn list_modules(&self, course_id: u64) -> ApiStream<'_, Module> {
        boxed(try_stream! {
            self.calls.list_modules.fetch_add(1, Ordering::SeqCst);
            if self.fail_modules {
                Err::<(), _>(AppError::TokenInvalid)?;
            }
            for module in self.modules.get(&course_id).cloned().unwrap_or_default() {
                yield module;
            }
        })
    }

    fn list_module_items(&self, _course_id: u64, module_id: u64) -> ApiStream<'_, ModuleItem> {
        boxed(try_stream! {
            self.calls.list_module_items.fetch_add(1, Ordering::SeqCst);
            for item in self.items.get(&module_id).cloned().unwrap_or_default() {
                yield item;
            }
        })
    }

    async fn get_page(&self, _course_id: u64, page_url: &str) -> AppResult<Page> {
        self.calls.get_page.fetch_add(1, Ordering::SeqCst);
        self.pages
            .get(page_url)
            .cloned()
            .ok_or_else(|| AppError::UserInputError(format!("page {} not found", page_url)))
    }

    async fn get_file(&self, file_id: u64) -> AppResult<File> {
        self.calls.get_file.fetch_add(1, Ordering::SeqCst);
        Ok(from_json(json!({
            "id": file_id,
            "display_name": format!("file-{}.pdf", file_id),
            "filename": format!("file-{}.pdf", file_id),
            "size": 1024
        })))
    }
}

fn canvas_with(fake: &Arc<FakeCanvas>) -> Canvas {
    Canvas::with_api(BASE, fake.clone())
}

fn file_url(course_id: u64, file_id: u64) -> String {
    format!("{}/courses/{}/files/{}", BASE, course_id, file_id)
}

#[tokio::test]
async fn test_load_preserves_parent_identity() -> AppResult<()> {
    let fake = Arc::new(
        FakeCanvas::new()
            .with_items(vec![json!({ "id": 1, "title": "Intro", "type": "Page", "page_url": "intro" })])
            .with_page(json!({ "page_id": 11, "url": "intro", "title": "Intro", "body": "hi" })),
    );
    let canvas = canvas_with(&fake);

    let course = canvas.get_course(COURSE_ID).await?;
    assert!(std::ptr::eq(course.parent(), &canvas));
    assert_eq!(course.id(), COURSE_ID);
    assert_eq!(course.name(), "Intro to Rust");
    assert_eq!(course.code, "RS101");

    let modules: Vec<ModuleScanner> = course.modules().try_collect().await?;
    assert_eq!(modules.len(), 1);
    assert!(std::ptr::eq(modules[0].parent(), &course));
    assert_eq!(modules[0].name(), "Week 1");

    let pages: Vec<PageScanner> = modules[0].pages().try_collect().await?;
    assert_eq!(pages.len(), 1);
    assert!(std::ptr::eq(pages[0].parent(), &modules[0]));
    assert_eq!((pages[0].name(), pages[0].id()), ("Intro", 11));
    Ok(())
}

#[tokio::test]
async fn test_traversals_are_restartable() -> AppResult<()> {
    let fake = Arc::new(
        FakeCanvas::new()
            .with_items(vec![
                json!({ "id": 1, "title": "Notes", "type": "Page", "page_url": "notes" }),
                json!({ "id": 2, "title": "Slides", "type": "File", "url": file_url(COURSE_ID, 901) }),
            ])
            .with_page(json!({
                "page_id": 12,
                "url": "notes",
                "title": "Notes",
                "body": format!(r#"<a href="{}">a</a>"#, file_url(COURSE_ID, 902))
            })),
    );
    let canvas = canvas_with(&fake);
    let course = canvas.get_course(COURSE_ID).await?;

    let first: Vec<u64> = course.modules().map_ok(|m| m.id()).try_collect().await?;
    let second: Vec<u64> = course.modules().map_ok(|m| m.id()).try_collect().await?;
    assert_eq!(first, vec![MODULE_ID]);
    assert_eq!(first, second);
    assert_eq!(FakeCanvas::count(&fake.calls.list_modules), 2);

    let modules: Vec<ModuleScanner> = course.modules().try_collect().await?;
    let module = &modules[0];

    let pages_a: Vec<u64> = module.pages().map_ok(|p| p.id()).try_collect().await?;
    let pages_b: Vec<u64> = module.pages().map_ok(|p| p.id()).try_collect().await?;
    assert_eq!(pages_a, vec![12]);
    assert_eq!(pages_a, pages_b);
    assert_eq!(FakeCanvas::count(&fake.calls.get_page), 2);

    let files_a: Vec<u64> = module.attachments().map_ok(|f| f.id).try_collect().await?;
    let files_b: Vec<u64> = module.attachments().map_ok(|f| f.id).try_collect().await?;
    assert_eq!(files_a, vec![901]);
    assert_eq!(files_a, files_b);
    // 两次 pages() 与两次 attachments() 各自重新列出条目
    assert_eq!(FakeCanvas::count(&fake.calls.list_module_items), 4);

    let pages: Vec<PageScanner> = module.pages().try_collect().await?;
    let body_a: Vec<u64> = pages[0].files().map_ok(|f| f.id).try_collect().await?;
    let body_b: Vec<u64> = pages[0].files().map_ok(|f| f.id).try_collect().await?;
    assert_eq!(body_a, vec![902]);
    assert_eq!(body_a, body_b);
    // 两次附件 + 两次正文，每次都重新解析文件
    assert_eq!(FakeCanvas::count(&fake.calls.get_file), 4);
    Ok(())
}

#[tokio::test]
async fn test_attachments_match_only_files_of_this_course() -> AppResult<()> {
    let fake = Arc::new(FakeCanvas::new().with_items(vec![
        json!({ "id": 1, "title": "Ours", "type": "File", "url": file_url(COURSE_ID, 901) }),
        json!({ "id": 2, "title": "Theirs", "type": "File", "url": file_url(56, 901) }),
        json!({ "id": 3, "title": "Docs", "type": "ExternalUrl", "url": "https://docs.rs/regex" }),
    ]));
    let canvas = canvas_with(&fake);
    let course = canvas.get_course(COURSE_ID).await?;
    let modules: Vec<ModuleScanner> = course.modules().try_collect().await?;

    let files: Vec<File> = modules[0].attachments().try_collect().await?;
    assert_eq!(files.iter().map(|f| f.id).collect::<Vec<_>>(), vec![901]);
    assert_eq!(files[0].display_name, "file-901.pdf");
    assert_eq!(FakeCanvas::count(&fake.calls.get_file), 1);
    Ok(())
}

#[tokio::test]
async fn test_page_files_follow_body_order_without_dedup() -> AppResult<()> {
    let body = format!(
        "see file 901 and also file 902 at {} and {}",
        file_url(COURSE_ID, 901),
        file_url(COURSE_ID, 902)
    );
    let repeated = format!(
        "{} then {} again {}",
        file_url(COURSE_ID, 901),
        file_url(56, 903),
        file_url(COURSE_ID, 901)
    );
    let fake = Arc::new(
        FakeCanvas::new()
            .with_items(vec![
                json!({ "id": 1, "title": "A", "type": "Page", "page_url": "a" }),
                json!({ "id": 2, "title": "B", "type": "Page", "page_url": "b" }),
            ])
            .with_page(json!({ "page_id": 21, "url": "a", "title": "A", "body": body }))
            .with_page(json!({ "page_id": 22, "url": "b", "title": "B", "body": repeated })),
    );
    let canvas = canvas_with(&fake);
    let course = canvas.get_course(COURSE_ID).await?;
    let modules: Vec<ModuleScanner> = course.modules().try_collect().await?;
    let pages: Vec<PageScanner> = modules[0].pages().try_collect().await?;

    let a: Vec<u64> = pages[0].files().map_ok(|f| f.id).try_collect().await?;
    assert_eq!(a, vec![901, 902]);

    let b: Vec<u64> = pages[1].files().map_ok(|f| f.id).try_collect().await?;
    assert_eq!(b, vec![901, 901]);
    Ok(())
}

#[tokio::test]
async fn test_page_empty_flag() -> AppResult<()> {
    let fake = Arc::new(
        FakeCanvas::new()
            .with_items(vec![
                json!({ "id": 1, "page_url": "missing" }),
                json!({ "id": 2, "page_url": "null" }),
                json!({ "id": 3, "page_url": "blank" }),
                json!({ "id": 4, "page_url": "text" }),
            ])
            .with_page(json!({ "page_id": 1, "url": "missing", "title": "no body field" }))
            .with_page(json!({ "page_id": 2, "url": "null", "title": "null body", "body": null }))
            .with_page(json!({ "page_id": 3, "url": "blank", "title": "blank body", "body": "" }))
            .with_page(json!({ "page_id": 4, "url": "text", "title": "text body", "body": "nothing here" })),
    );
    let canvas = canvas_with(&fake);
    let course = canvas.get_course(COURSE_ID).await?;
    let modules: Vec<ModuleScanner> = course.modules().try_collect().await?;
    let pages: Vec<PageScanner> = modules[0].pages().try_collect().await?;

    let flags: Vec<bool> = pages.iter().map(|p| p.is_empty()).collect();
    assert_eq!(flags, vec![true, true, false, false]);

    for page in &pages {
        assert_eq!(page.files().count().await, 0);
    }
    assert_eq!(FakeCanvas::count(&fake.calls.get_file), 0);
    Ok(())
}

#[tokio::test]
async fn test_items_without_links_are_excluded() -> AppResult<()> {
    let fake = Arc::new(FakeCanvas::new().with_items(vec![
        json!({ "id": 1, "title": "Section A", "type": "SubHeader" }),
        json!({ "id": 2, "title": "Quiz 1", "type": "Quiz", "content_id": 99 }),
    ]));
    let canvas = canvas_with(&fake);
    let course = canvas.get_course(COURSE_ID).await?;
    let modules: Vec<ModuleScanner> = course.modules().try_collect().await?;

    assert_eq!(modules[0].pages().count().await, 0);
    assert_eq!(modules[0].attachments().count().await, 0);
    assert_eq!(FakeCanvas::count(&fake.calls.get_page), 0);
    assert_eq!(FakeCanvas::count(&fake.calls.get_file), 0);
    Ok(())
}

#[tokio::test]
async fn test_single_module_end_to_end_in_either_order() -> AppResult<()> {
    let fake = Arc::new(
        FakeCanvas::new()
            .with_items(vec![
                json!({ "id": 1, "title": "Reading", "type": "Page", "page_url": "reading" }),
                json!({ "id": 2, "title": "Handout", "type": "File", "url": file_url(COURSE_ID, 901) }),
            ])
            .with_page(json!({ "page_id": 31, "url": "reading", "title": "Reading", "body": "plain" })),
    );
    let canvas = canvas_with(&fake);
    let course = canvas.get_course(COURSE_ID).await?;
    let modules: Vec<ModuleScanner> = course.modules().try_collect().await?;
    let module = &modules[0];

    let files_first: Vec<File> = module.attachments().try_collect().await?;
    let pages_second: Vec<PageScanner> = module.pages().try_collect().await?;
    let pages_first: Vec<PageScanner> = module.pages().try_collect().await?;
    let files_second: Vec<File> = module.attachments().try_collect().await?;

    for (pages, files) in [(&pages_first, &files_first), (&pages_second, &files_second)] {
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].id(), 31);
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].id, 901);
    }
    Ok(())
}

#[tokio::test]
async fn test_remote_errors_propagate() {
    let mut fake = FakeCanvas::new();
    fake.fail_modules = true;
    let fake = Arc::new(fake);
    let canvas = canvas_with(&fake);
    let course = canvas.get_course(COURSE_ID).await.unwrap();

    let result: AppResult<Vec<ModuleScanner>> = course.modules().try_collect().await;
    assert!(matches!(result, Err(AppError::TokenInvalid)));

    assert!(canvas.get_course(999).await.is_err());
}

#[tokio::test]
async fn test_abandoning_iteration_stops_fetching() -> AppResult<()> {
    let fake = Arc::new(FakeCanvas::new().with_items(
        (1..=3)
            .map(|i| json!({ "id": i, "type": "File", "url": file_url(COURSE_ID, 900 + i) }))
            .collect(),
    ));
    let canvas = canvas_with(&fake);
    let course = canvas.get_course(COURSE_ID).await?;
    let modules: Vec<ModuleScanner> = course.modules().try_collect().await?;

    // 构造流本身不发出请求
    let mut attachments = modules[0].attachments();
    assert_eq!(FakeCanvas::count(&fake.calls.list_module_items), 0);

    let first = attachments.try_next().await?.map(|f| f.id);
    assert_eq!(first, Some(901));
    drop(attachments);
    assert_eq!(FakeCanvas::count(&fake.calls.get_file), 1);
    Ok(())
}

#[tokio::test]
async fn test_courses_info_lists_name_and_id() -> AppResult<()> {
    let fake = Arc::new(FakeCanvas::new());
    let canvas = canvas_with(&fake);

    let infos: Vec<CourseInfo> = canvas.get_courses_info().try_collect().await?;
    assert_eq!(
        infos,
        vec![
            CourseInfo { name: "Intro  to   Rust".into(), id: COURSE_ID },
            CourseInfo { name: "Other Course".into(), id: 56 },
        ]
    );
    assert_eq!(FakeCanvas::count(&fake.calls.get_course), 0);
    Ok(())
}

#[tokio::test]
async fn test_page_item_url_is_also_checked_for_files() -> AppResult<()> {
    let fake = Arc::new(
        FakeCanvas::new()
            .with_items(vec![
                // 页面条目的 url 是页面 API 地址，不是文件
                json!({
                    "id": 1,
                    "type": "Page",
                    "page_url": "syllabus",
                    "url": format!("{}/api/v1/courses/{}/pages/syllabus", BASE, COURSE_ID)
                }),
                // 同时带有 page_url 与文件地址的条目两边都算
                json!({ "id": 2, "type": "Page", "page_url": "handout", "url": file_url(COURSE_ID, 905) }),
            ])
            .with_page(json!({ "page_id": 21, "url": "syllabus", "title": "Syllabus", "body": null }))
            .with_page(json!({ "page_id": 22, "url": "handout", "title": "Handout", "body": "" })),
    );
    let canvas = canvas_with(&fake);
    let course = canvas.get_course(COURSE_ID).await?;
    let modules: Vec<ModuleScanner> = course.modules().try_collect().await?;

    let pages: Vec<u64> = modules[0].pages().map_ok(|p| p.id()).try_collect().await?;
    assert_eq!(pages, vec![21, 22]);

    let files: Vec<u64> = modules[0].attachments().map_ok(|f| f.id).try_collect().await?;
    assert_eq!(files, vec![905]);
    Ok(())
}

#[tokio::test]
async fn test_malformed_items_are_skipped() -> AppResult<()> {
    let fake = Arc::new(FakeCanvas::new().with_items(vec![
        json!({ "title": "Heading", "type": "SubHeader" }),
        json!({ "id": 2, "page_url": 17, "url": false }),
        json!({ "id": 3, "type": "File", "url": file_url(COURSE_ID, 901) }),
    ]));
    let canvas = canvas_with(&fake);
    let course = canvas.get_course(COURSE_ID).await?;
    let modules: Vec<ModuleScanner> = course.modules().try_collect().await?;

    assert_eq!(modules[0].pages().count().await, 0);
    let files: Vec<u64> = modules[0].attachments().map_ok(|f| f.id).try_collect().await?;
    assert_eq!(files, vec![901]);
    assert_eq!(FakeCanvas::count(&fake.calls.get_page), 0);
    Ok(())
}
