// src/client.rs

use crate::{
    config::AppConfig,
    constants::api as endpoints,
    error::*,
    models::{Course, File, Module, ModuleItem, Page},
};
use async_stream::try_stream;
use async_trait::async_trait;
use futures::stream::{BoxStream, Stream};
use log::{debug, trace};
use regex::Regex;
use reqwest::{
    Response, StatusCode,
    header::{AUTHORIZATION, HeaderMap, HeaderValue, LINK},
};
use serde::de::DeserializeOwned;
use std::sync::{Arc, LazyLock};
use url::Url;

static NEXT_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<([^>]+)>\s*;\s*rel="next""#).unwrap());

/// 惰性的远程结果序列，每次拉取都可能触发一次网络请求
pub type ApiStream<'a, T> = BoxStream<'a, AppResult<T>>;

pub fn boxed<'a, T>(stream: impl Stream<Item = AppResult<T>> + Send + 'a) -> ApiStream<'a, T> {
    Box::pin(stream)
}

/// 扫描器所依赖的 Canvas 接口
///
/// 列表类方法返回惰性流：请求在首次拉取时才发出，分页在消费过程中逐页获取。
#[async_trait]
pub trait CanvasApi: Send + Sync {
    async fn get_course(&self, course_id: u64) -> AppResult<Course>;
    fn list_courses(&self) -> ApiStream<'_, Course>;
    fn list_modules(&self, course_id: u64) -> ApiStream<'_, Module>;
    fn list_module_items(&self, course_id: u64, module_id: u64) -> ApiStream<'_, ModuleItem>;
    async fn get_page(&self, course_id: u64, page_url: &str) -> AppResult<Page>;
    async fn get_file(&self, file_id: u64) -> AppResult<File>;
}

/// 用命名参数替换模板中的 `{key}` 占位符
pub fn render_template(template: &str, params: &[(&str, &str)]) -> String {
    let mut url = template.to_string();
    for (key, val) in params {
        url = url.replace(&format!("{{{}}}", key), val);
    }
    url
}

/// 从 `Link` 响应头中找出 `rel="next"` 的地址
pub fn next_page_url(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(LINK)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|value| {
            NEXT_LINK_RE
                .captures(value)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string())
        })
}

/// 将页面标识作为单个路径段追加，`?`、`#`、`/` 等字符会被转义
pub fn page_endpoint(pages_url: &str, page_url: &str) -> AppResult<Url> {
    let mut url = Url::parse(pages_url)?;
    url.path_segments_mut()
        .map_err(|_| AppError::UserInputError(format!("无效的 Canvas 地址: {}", pages_url)))?
        .push(page_url);
    Ok(url)
}

pub struct CanvasHttpClient {
    client: reqwest::Client,
    config: Arc<AppConfig>,
}

impl CanvasHttpClient {
    pub fn new(config: Arc<AppConfig>) -> AppResult<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|_| AppError::UserInputError("API Key 含有非法字符".to_string()))?;
        auth.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .build()?;

        Ok(Self { client, config })
    }

    pub fn base_url(&self) -> &str {
        &self.config.url
    }

    pub async fn get(&self, url: &str) -> AppResult<Response> {
        trace!("GET {}", url);
        let res = self.client.get(url).send().await?;
        if res.status() == StatusCode::UNAUTHORIZED || res.status() == StatusCode::FORBIDDEN {
            return Err(AppError::TokenInvalid);
        }
        Ok(res.error_for_status()?)
    }

    async fn parse_json<T: DeserializeOwned>(url: &str, res: Response) -> AppResult<T> {
        let text = res.text().await?;
        serde_json::from_str(&text).map_err(|source| AppError::ApiParseFailed {
            url: url.to_string(),
            source,
        })
    }

    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        url_template: &str,
        params: &[(&str, &str)],
    ) -> AppResult<T> {
        let url = self.render(url_template, params);
        self.fetch_json_at(&url).await
    }

    async fn fetch_json_at<T: DeserializeOwned>(&self, url: &str) -> AppResult<T> {
        let res = self.get(url).await?;
        Self::parse_json(url, res).await
    }

    /// 逐页获取列表接口，直到响应中不再有下一页链接
    pub fn fetch_paginated<'a, T>(
        &'a self,
        url_template: &str,
        params: &[(&str, &str)],
    ) -> ApiStream<'a, T>
    where
        T: DeserializeOwned + Send + 'a,
    {
        let first = self.render(url_template, params);
        let per_page = self.config.per_page.to_string();
        boxed(try_stream! {
            let mut first_url = Url::parse(&first)?;
            first_url.query_pairs_mut().append_pair("per_page", &per_page);

            let mut next = Some(first_url.to_string());
            let mut page_no = 0usize;
            while let Some(url) = next.take() {
                page_no += 1;
                let res = self.get(&url).await?;
                next = next_page_url(res.headers());
                let items: Vec<T> = Self::parse_json(&url, res).await?;
                debug!("第 {} 页 '{}' 返回 {} 条记录", page_no, url, items.len());
                for item in items {
                    yield item;
                }
            }
        })
    }

    fn render(&self, url_template: &str, params: &[(&str, &str)]) -> String {
        let mut all = Vec::with_capacity(params.len() + 1);
        all.push(("base", self.config.url.as_str()));
        all.extend_from_slice(params);
        render_template(url_template, &all)
    }
}

#[async_trait]
impl CanvasApi for CanvasHttpClient {
    async fn get_course(&self, course_id: u64) -> AppResult<Course> {
        let course_id = course_id.to_string();
        self.fetch_json(endpoints::COURSE, &[("course_id", course_id.as_str())])
            .await
    }

    fn list_courses(&self) -> ApiStream<'_, Course> {
        self.fetch_paginated(endpoints::COURSES, &[])
    }

    fn list_modules(&self, course_id: u64) -> ApiStream<'_, Module> {
        let course_id = course_id.to_string();
        self.fetch_paginated(endpoints::MODULES, &[("course_id", course_id.as_str())])
    }

    fn list_module_items(&self, course_id: u64, module_id: u64) -> ApiStream<'_, ModuleItem> {
        let (course_id, module_id) = (course_id.to_string(), module_id.to_string());
        self.fetch_paginated(
            endpoints::MODULE_ITEMS,
            &[
                ("course_id", course_id.as_str()),
                ("module_id", module_id.as_str()),
            ],
        )
    }

    async fn get_page(&self, course_id: u64, page_url: &str) -> AppResult<Page> {
        let course_id = course_id.to_string();
        let url = page_endpoint(
            &self.render(endpoints::PAGES, &[("course_id", course_id.as_str())]),
            page_url,
        )?;
        self.fetch_json_at(url.as_str()).await
    }

    async fn get_file(&self, file_id: u64) -> AppResult<File> {
        let file_id = file_id.to_string();
        self.fetch_json(endpoints::FILE, &[("file_id", file_id.as_str())])
            .await
    }
}
