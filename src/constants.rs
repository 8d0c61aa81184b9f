// src/constants.rs

pub const UI_WIDTH: usize = 88;
pub const CONFIG_DIR_NAME: &str = concat!(".", clap::crate_name!());
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const LOG_FILE_NAME: &str = "cansync.log";
pub const LOG_FALLBACK_FILE_NAME: &str = "fallback.log";
pub const USER_AGENT: &str = concat!(clap::crate_name!(), "/", clap::crate_version!());
pub const DEFAULT_PER_PAGE: u32 = 50;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

pub const ENV_URL: &str = "CANVAS_URL";
pub const ENV_API_KEY: &str = "CANVAS_API_KEY";

pub const HELP_KEY_GUIDE: &str = r#"
1. 使用浏览器登录你所在学校的 Canvas 站点。
2. 点击左侧导航栏的 "Account" (账户)，进入 "Settings" (设置)。
3. 在 "Approved Integrations" (已批准的集成) 一栏中点击
   "+ New Access Token" (新建访问令牌)。
4. 填写用途 (例如 cansync)，过期时间可以留空，然后点击 "Generate Token"。
5. 复制生成的令牌，通过 --api-key 传入，或设置环境变量 CANVAS_API_KEY。
   配合 --save-key 可将其保存到本地配置文件。"#;

/// Canvas REST API 路径模板，`{name}` 为占位符
pub mod api {
    pub const COURSES: &str = "{base}/api/v1/courses";
    pub const COURSE: &str = "{base}/api/v1/courses/{course_id}";
    pub const MODULES: &str = "{base}/api/v1/courses/{course_id}/modules";
    pub const MODULE_ITEMS: &str = "{base}/api/v1/courses/{course_id}/modules/{module_id}/items";
    pub const PAGES: &str = "{base}/api/v1/courses/{course_id}/pages";
    pub const FILE: &str = "{base}/api/v1/files/{file_id}";
}
