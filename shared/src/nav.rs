//! 导航外壳模型
//!
//! 侧边栏链接由静态路由表与认证状态推导，
//! 另外只保存当前路由、侧边栏开合以及登出确认状态。

use crate::route::AdminRoute;
use crate::session::{Session, SessionStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub route: AdminRoute,
}

pub const NAV_ITEMS: [NavItem; 6] = [
    NavItem {
        label: "Add Song",
        route: AdminRoute::AddSong,
    },
    NavItem {
        label: "List Song",
        route: AdminRoute::ListSongs,
    },
    NavItem {
        label: "Add Album",
        route: AdminRoute::AddAlbum,
    },
    NavItem {
        label: "List Album",
        route: AdminRoute::ListAlbums,
    },
    NavItem {
        label: "Add Author",
        route: AdminRoute::AddAuthor,
    },
    NavItem {
        label: "List Author",
        route: AdminRoute::ListAuthors,
    },
];

/// 渲染用的链接
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub item: NavItem,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogoutState {
    #[default]
    Idle,
    ConfirmingLogout,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NavShell {
    active: AdminRoute,
    sidebar_open: bool,
    logout: LogoutState,
}

impl NavShell {
    pub fn new(active: AdminRoute) -> Self {
        Self {
            active,
            ..Self::default()
        }
    }

    pub fn active(&self) -> AdminRoute {
        self.active
    }

    pub fn set_active(&mut self, route: AdminRoute) {
        self.active = route;
    }

    /// 未认证时不展示任何链接
    pub fn links(&self, is_authenticated: bool) -> Vec<NavLink> {
        if !is_authenticated {
            return Vec::new();
        }
        NAV_ITEMS
            .iter()
            .map(|item| NavLink {
                item: *item,
                active: item.route == self.active,
            })
            .collect()
    }

    pub fn sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    pub fn logout_state(&self) -> LogoutState {
        self.logout
    }

    pub fn request_logout(&mut self) {
        self.logout = LogoutState::ConfirmingLogout;
    }

    pub fn cancel_logout(&mut self) {
        self.logout = LogoutState::Idle;
    }

    /// 确认登出：清除会话并返回登录页路由
    ///
    /// 未处于确认状态时不做任何事。
    pub fn confirm_logout<S: SessionStore>(&mut self, session: &Session<S>) -> Option<AdminRoute> {
        if self.logout != LogoutState::ConfirmingLogout {
            return None;
        }
        session.sign_out();
        self.logout = LogoutState::Idle;
        self.sidebar_open = false;
        self.active = AdminRoute::Login;
        Some(AdminRoute::Login)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::{GuardDecision, guard};
    use crate::session::{MemoryStore, TOKEN_KEY, USER_KEY};

    fn signed_in() -> (MemoryStore, Session<MemoryStore>) {
        let store = MemoryStore::new();
        let session = Session::new(store.clone());
        session.sign_in("tok", &serde_json::json!({ "name": "root" }));
        (store, session)
    }

    #[test]
    fn exactly_one_link_is_active() {
        let shell = NavShell::new(AdminRoute::ListAlbums);
        let links = shell.links(true);
        assert_eq!(links.len(), NAV_ITEMS.len());
        let active: Vec<_> = links.iter().filter(|l| l.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].item.label, "List Album");
    }

    #[test]
    fn no_links_when_signed_out() {
        assert!(NavShell::new(AdminRoute::AddSong).links(false).is_empty());
    }

    #[test]
    fn sidebar_toggles() {
        let mut shell = NavShell::default();
        assert!(!shell.sidebar_open());
        shell.toggle_sidebar();
        assert!(shell.sidebar_open());
        shell.toggle_sidebar();
        assert!(!shell.sidebar_open());
    }

    #[test]
    fn logout_needs_confirmation() {
        let (store, session) = signed_in();
        let mut shell = NavShell::new(AdminRoute::AddSong);

        assert_eq!(shell.confirm_logout(&session), None);
        assert!(session.is_authenticated());

        shell.request_logout();
        shell.cancel_logout();
        assert_eq!(shell.logout_state(), LogoutState::Idle);
        assert_eq!(shell.confirm_logout(&session), None);
        assert!(store.get(TOKEN_KEY).is_some());
    }

    #[test]
    fn confirmed_logout_clears_session_and_guards_routes() {
        let (store, session) = signed_in();
        let mut shell = NavShell::new(AdminRoute::ListSongs);

        shell.request_logout();
        assert_eq!(shell.logout_state(), LogoutState::ConfirmingLogout);
        assert_eq!(shell.confirm_logout(&session), Some(AdminRoute::Login));
        assert_eq!(shell.logout_state(), LogoutState::Idle);

        assert_eq!(store.get(TOKEN_KEY), None);
        assert_eq!(store.get(USER_KEY), None);
        for item in NAV_ITEMS {
            assert_eq!(
                guard(item.route, &session),
                GuardDecision::Redirect(AdminRoute::Login)
            );
        }
    }
}
