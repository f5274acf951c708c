use std::fmt;
use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::protocol::HttpMethod;

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::collections::HashMap;

// =========================================================
// 文件句柄抽象
// =========================================================

/// 用户选择的待上传文件
///
/// 浏览器端由 `web_sys::File` 的包装实现，测试中使用内存文件。
pub trait SelectedFile: Clone {
    fn name(&self) -> String;

    /// 字节数
    fn size(&self) -> u64;

    /// MIME 类型，浏览器无法识别时为 `None`
    fn mime_type(&self) -> Option<String>;

    /// 本地预览地址
    fn preview_url(&self) -> Option<String> {
        None
    }

    /// 释放 `preview_url` 生成的地址
    fn release_preview(&self, _url: &str) {}
}

// =========================================================
// 请求体
// =========================================================

#[derive(Debug, Clone)]
pub enum Part<F> {
    Text { name: &'static str, value: String },
    File { name: &'static str, file: F },
}

/// multipart/form-data 请求体，保持字段追加顺序
#[derive(Debug, Clone)]
pub struct MultipartForm<F> {
    parts: Vec<Part<F>>,
}

impl<F> MultipartForm<F> {
    pub fn new() -> Self {
        Self { parts: Vec::new() }
    }

    pub fn text(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.parts.push(Part::Text {
            name,
            value: value.into(),
        });
        self
    }

    pub fn file(mut self, name: &'static str, file: F) -> Self {
        self.parts.push(Part::File { name, file });
        self
    }

    pub fn parts(&self) -> &[Part<F>] {
        &self.parts
    }

    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|p| match p {
            Part::Text { name: n, value } if *n == name => Some(value.as_str()),
            _ => None,
        })
    }

    pub fn file_value(&self, name: &str) -> Option<&F> {
        self.parts.iter().find_map(|p| match p {
            Part::File { name: n, file } if *n == name => Some(file),
            _ => None,
        })
    }

    pub fn field_names(&self) -> Vec<&'static str> {
        self.parts
            .iter()
            .map(|p| match p {
                Part::Text { name, .. } | Part::File { name, .. } => *name,
            })
            .collect()
    }
}

impl<F> Default for MultipartForm<F> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub enum RequestBody<F> {
    Empty,
    Json(String),
    Multipart(MultipartForm<F>),
}

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

/// 通用 HTTP 请求结构
#[derive(Debug, Clone)]
pub struct HttpRequest<F> {
    pub url: String,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody<F>,
    /// 超过该时限即按失败处理
    pub timeout: Option<Duration>,
}

impl<F> HttpRequest<F> {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: Vec::new(),
            body: RequestBody::Empty,
            timeout: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_json(self, body: &impl serde::Serialize) -> Result<Self, serde_json::Error> {
        let json = serde_json::to_string(body)?;
        let mut req = self.with_header("Content-Type", "application/json");
        req.body = RequestBody::Json(json);
        Ok(req)
    }

    /// Content-Type 由传输层根据 multipart 边界自动生成
    pub fn with_multipart(mut self, form: MultipartForm<F>) -> Self {
        self.body = RequestBody::Multipart(form);
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

/// 通用 HTTP 响应结构
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// 传输层错误
#[derive(Debug, Clone, PartialEq)]
pub enum TransportError {
    /// 请求构建失败
    RequestBuildFailed(String),
    /// 网络请求失败
    Network(String),
    /// 超时
    Timeout,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::RequestBuildFailed(msg) => write!(f, "request build failed: {}", msg),
            TransportError::Network(msg) => write!(f, "network error: {}", msg),
            TransportError::Timeout => write!(f, "request timed out"),
        }
    }
}

impl std::error::Error for TransportError {}

/// HTTP 传输特性 (Trait)
///
/// (?Send) 是因为浏览器环境下的 `JsFuture` 等类型不是 Send 的。
#[async_trait::async_trait(?Send)]
pub trait HttpTransport {
    type File: SelectedFile;

    async fn send(&self, req: HttpRequest<Self::File>) -> Result<HttpResponse, TransportError>;
}

// =========================================================
// 测试工具: MemoryFile / MockTransport
// =========================================================

#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryFile {
    pub name: String,
    pub size: u64,
    pub mime: Option<String>,
}

#[cfg(test)]
impl MemoryFile {
    pub fn new(name: &str, size: u64, mime: &str) -> Self {
        Self {
            name: name.to_string(),
            size,
            mime: Some(mime.to_string()),
        }
    }

    pub fn audio(size: u64) -> Self {
        Self::new("track.mp3", size, "audio/mpeg")
    }

    pub fn image(size: u64) -> Self {
        Self::new("cover.png", size, "image/png")
    }
}

#[cfg(test)]
impl SelectedFile for MemoryFile {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn mime_type(&self) -> Option<String> {
        self.mime.clone()
    }

    fn preview_url(&self) -> Option<String> {
        Some(format!("blob:{}", self.name))
    }
}

#[cfg(test)]
pub struct MockTransport {
    // (METHOD URL) -> 响应
    responses: RefCell<HashMap<String, Result<HttpResponse, TransportError>>>,
    // 记录发出的请求
    pub requests: RefCell<Vec<HttpRequest<MemoryFile>>>,
}

#[cfg(test)]
impl MockTransport {
    pub fn new() -> Self {
        Self {
            responses: RefCell::new(HashMap::new()),
            requests: RefCell::new(Vec::new()),
        }
    }

    fn key(method: HttpMethod, url: &str) -> String {
        format!("{} {}", method.as_str(), url)
    }

    pub fn mock_response(&self, method: HttpMethod, url: &str, status: u16, body: serde_json::Value) {
        self.responses.borrow_mut().insert(
            Self::key(method, url),
            Ok(HttpResponse {
                status,
                body: body.to_string(),
            }),
        );
    }

    pub fn mock_failure(&self, method: HttpMethod, url: &str, error: TransportError) {
        self.responses
            .borrow_mut()
            .insert(Self::key(method, url), Err(error));
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn count_for(&self, method: HttpMethod, url: &str) -> usize {
        self.requests
            .borrow()
            .iter()
            .filter(|r| r.method == method && r.url == url)
            .count()
    }
}

#[cfg(test)]
#[async_trait::async_trait(?Send)]
impl HttpTransport for MockTransport {
    type File = MemoryFile;

    async fn send(&self, req: HttpRequest<MemoryFile>) -> Result<HttpResponse, TransportError> {
        let key = Self::key(req.method, &req.url);
        self.requests.borrow_mut().push(req);

        match self.responses.borrow().get(&key) {
            Some(resp) => resp.clone(),
            None => Ok(HttpResponse {
                status: 404,
                body: "Not Found".to_string(),
            }),
        }
    }
}
