//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由、其属性以及会话守卫。

use std::fmt::Display;

use crate::session::{Session, SessionStore};

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AdminRoute {
    /// 上传歌曲 (首页)
    #[default]
    AddSong,
    ListSongs,
    AddAlbum,
    ListAlbums,
    AddAuthor,
    ListAuthors,
    /// 登录页面 (公开)
    Login,
    /// 页面未找到
    NotFound,
}

impl AdminRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        let path = match path.trim_end_matches('/') {
            "" => "/",
            p => p,
        };
        match path {
            "/" => Self::AddSong,
            "/list/song" => Self::ListSongs,
            "/add/album" => Self::AddAlbum,
            "/list/album" => Self::ListAlbums,
            "/add/author" => Self::AddAuthor,
            "/list/author" => Self::ListAuthors,
            "/user/login" => Self::Login,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::AddSong => "/",
            Self::ListSongs => "/list/song",
            Self::AddAlbum => "/add/album",
            Self::ListAlbums => "/list/album",
            Self::AddAuthor => "/add/author",
            Self::ListAuthors => "/list/author",
            Self::Login => "/user/login",
            Self::NotFound => "/404",
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Self::Login | Self::NotFound)
    }

    /// 定义已认证用户是否应该离开此路由（如登录页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login)
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 获取认证成功时的重定向目标（从登录页）
    pub fn auth_success_redirect() -> Self {
        Self::AddSong
    }
}

impl Display for AdminRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

/// 守卫结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Render(AdminRoute),
    Redirect(AdminRoute),
}

impl GuardDecision {
    /// 最终落地的路由
    pub fn route(&self) -> AdminRoute {
        match self {
            GuardDecision::Render(r) | GuardDecision::Redirect(r) => *r,
        }
    }
}

/// 会话守卫
///
/// 每次评估都重新读取存储中的令牌。
pub fn guard<S: SessionStore>(target: AdminRoute, session: &Session<S>) -> GuardDecision {
    guard_with(target, session.is_authenticated())
}

/// 以已知的认证状态执行守卫
pub fn guard_with(target: AdminRoute, is_authenticated: bool) -> GuardDecision {
    if target.requires_auth() && !is_authenticated {
        return GuardDecision::Redirect(AdminRoute::auth_failure_redirect());
    }
    if target.should_redirect_when_authenticated() && is_authenticated {
        return GuardDecision::Redirect(AdminRoute::auth_success_redirect());
    }
    GuardDecision::Render(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{MemoryStore, TOKEN_KEY};

    const PROTECTED: [&str; 6] = [
        "/",
        "/list/song",
        "/add/album",
        "/list/album",
        "/add/author",
        "/list/author",
    ];

    #[test]
    fn paths_round_trip() {
        for path in PROTECTED.iter().chain(["/user/login"].iter()) {
            assert_eq!(AdminRoute::from_path(path).to_path(), *path);
        }
        assert_eq!(AdminRoute::from_path("/list/song/"), AdminRoute::ListSongs);
        assert_eq!(AdminRoute::from_path(""), AdminRoute::AddSong);
        assert_eq!(AdminRoute::from_path("/nope"), AdminRoute::NotFound);
    }

    #[test]
    fn protected_paths_redirect_without_token() {
        let session = Session::new(MemoryStore::new());
        for path in PROTECTED {
            let decision = guard(AdminRoute::from_path(path), &session);
            assert_eq!(decision, GuardDecision::Redirect(AdminRoute::Login), "{}", path);
        }
    }

    #[test]
    fn any_non_empty_token_renders() {
        let store = MemoryStore::new();
        store.set(TOKEN_KEY, "x");
        let session = Session::new(store);
        for path in PROTECTED {
            let route = AdminRoute::from_path(path);
            assert_eq!(guard(route, &session), GuardDecision::Render(route));
        }
    }

    #[test]
    fn whitespace_token_still_counts() {
        let store = MemoryStore::new();
        store.set(TOKEN_KEY, " ");
        let session = Session::new(store);
        assert_eq!(
            guard(AdminRoute::ListSongs, &session),
            GuardDecision::Render(AdminRoute::ListSongs)
        );
    }

    #[test]
    fn public_routes() {
        let anonymous = Session::new(MemoryStore::new());
        assert_eq!(
            guard(AdminRoute::Login, &anonymous),
            GuardDecision::Render(AdminRoute::Login)
        );
        assert_eq!(
            guard(AdminRoute::NotFound, &anonymous),
            GuardDecision::Render(AdminRoute::NotFound)
        );
        assert_eq!(
            guard_with(AdminRoute::Login, true),
            GuardDecision::Redirect(AdminRoute::AddSong)
        );
    }
}
