//! 认证模块
//!
//! 令牌保存在 LocalStorage 中，`Session` 每次读取都直接访问存储。
//! 这里只额外维护一个修订号信号：登录、登出后递增，
//! 让依赖认证状态的视图与路由服务重新读取存储。

use leptos::prelude::*;
use sonique_admin_shared::session::{self, Session};
use sonique_admin_shared::AdminResult;

use crate::Api;
use crate::web::BrowserStorage;

/// 认证上下文
#[derive(Clone, Copy)]
pub struct AuthContext {
    revision: RwSignal<u64>,
}

impl AuthContext {
    pub fn new() -> Self {
        Self {
            revision: RwSignal::new(0),
        }
    }

    pub fn session(&self) -> Session<BrowserStorage> {
        Session::new(BrowserStorage)
    }

    /// 认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let revision = self.revision;
        Signal::derive(move || {
            revision.track();
            Session::new(BrowserStorage).is_authenticated()
        })
    }

    /// 存储被修改后通知订阅者
    pub fn refresh(&self) {
        self.revision.update(|r| *r += 1);
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    expect_context::<AuthContext>()
}

/// 登录并保存会话
///
/// 成功后刷新认证信号，路由服务会把用户从登录页带到首页。
pub async fn login(ctx: AuthContext, api: &Api, email: &str, password: &str) -> AdminResult<()> {
    let result = session::login(api, &ctx.session(), email, password).await;
    if result.is_ok() {
        ctx.refresh();
    }
    result
}

