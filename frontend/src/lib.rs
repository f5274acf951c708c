//! Sonique 管理后台前端
//!
//! 采用 Context-Driven 的架构：
//! - `web::router`: 路由服务（守卫规则来自共享层）
//! - `auth`: 认证状态
//! - `toast`: 提示框
//! - `components`: UI 组件层
//!
//! 业务逻辑（缓存、表单校验、API 调用）都在 `sonique_admin_shared` 中，
//! 这里只负责把它们接到信号与 DOM 上。

mod auth;
mod components {
    mod icons;
    pub mod login;
    pub mod not_found;
    pub mod resource_list;
    pub mod shell;
    pub mod upload;
}
mod toast;

use leptos::prelude::*;
use sonique_admin_shared::nav::NavShell;
use sonique_admin_shared::{AdminApi, AdminConfig, AdminRoute, log_info};

use crate::auth::AuthContext;
use crate::components::login::LoginPage;
use crate::components::not_found::NotFoundPage;
use crate::components::resource_list::{AlbumListPage, AuthorListPage, SongListPage};
use crate::components::shell::AdminShell;
use crate::components::upload::{AddAlbumPage, AddAuthorPage, AddSongPage};
use crate::toast::{ToastOutlet, Toaster};

// 原生 Web API 封装模块
pub(crate) mod web {
    mod file;
    mod http;
    pub mod router;
    mod storage;

    pub use file::{BrowserFile, clear_input};
    pub use http::FetchTransport;
    pub use storage::BrowserStorage;
}

use web::FetchTransport;
use web::router::{Router, RouterOutlet};

pub(crate) type Api = AdminApi<FetchTransport>;

pub(crate) fn use_api() -> Api {
    expect_context::<Api>()
}

fn protected_page(route: AdminRoute) -> AnyView {
    match route {
        AdminRoute::AddSong => view! { <AddSongPage /> }.into_any(),
        AdminRoute::ListSongs => view! { <SongListPage /> }.into_any(),
        AdminRoute::AddAlbum => view! { <AddAlbumPage /> }.into_any(),
        AdminRoute::ListAlbums => view! { <AlbumListPage /> }.into_any(),
        AdminRoute::AddAuthor => view! { <AddAuthorPage /> }.into_any(),
        AdminRoute::ListAuthors => view! { <AuthorListPage /> }.into_any(),
        AdminRoute::Login | AdminRoute::NotFound => view! { <NotFoundPage /> }.into_any(),
    }
}

/// 路由匹配函数
///
/// 受保护页面统一包在导航外壳中。
fn route_matcher(route: AdminRoute) -> AnyView {
    match route {
        AdminRoute::Login => view! { <LoginPage /> }.into_any(),
        AdminRoute::NotFound => view! { <NotFoundPage /> }.into_any(),
        protected => view! { <AdminShell>{protected_page(protected)}</AdminShell> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    let config = AdminConfig::from_env();
    log_info!("Sonique admin using API {}", config.api_base_url);
    provide_context(AdminApi::new(config, FetchTransport));

    let toaster = Toaster::new();
    provide_context(toaster);

    let auth = AuthContext::new();
    provide_context(auth);

    // 导航外壳状态跨页面保留
    provide_context(RwSignal::new(NavShell::default()));

    let is_authenticated = auth.is_authenticated_signal();

    view! {
        <Router is_authenticated=is_authenticated>
            <RouterOutlet matcher=route_matcher />
        </Router>
        <ToastOutlet />
    }
}
