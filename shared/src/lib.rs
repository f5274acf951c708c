//! Sonique 管理后台的平台无关层
//!
//! 这里的代码不依赖 DOM，既能编译到 `wasm32` 供前端使用，
//! 也能在本机直接运行测试：
//! - `models` / `protocol`: 领域模型与远端 API 契约
//! - `transport` / `api`: HTTP 传输抽象与 API 客户端
//! - `session` / `route` / `nav`: 会话、路由守卫与导航外壳
//! - `cache` / `form`: 列表缓存与表单提交控制器

#[macro_use]
pub mod log;

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod form;
pub mod models;
pub mod nav;
pub mod notify;
pub mod protocol;
pub mod route;
pub mod session;
pub mod transport;

pub use api::AdminApi;
pub use cache::{CacheRead, CacheState, CachedCollection};
pub use config::AdminConfig;
pub use error::{AdminError, AdminErrorKind, AdminResult};
pub use models::{Album, Author, Resource, ResourceKind, Song};
pub use notify::{Notification, NotificationKind, Notify};
pub use route::{AdminRoute, GuardDecision};
pub use session::{Session, SessionStore};
pub use transport::{HttpTransport, SelectedFile};
