//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，所有对 window.history 的操作都集中在此模块。
//! 导航流程："请求 -> 守卫 -> 写入 History -> 更新信号"。
//! 守卫规则本身定义在共享层的 `route::guard_with`。

use leptos::prelude::*;
use sonique_admin_shared::route::{AdminRoute, GuardDecision, guard_with};
use sonique_admin_shared::log_info;
use wasm_bindgen::prelude::*;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 重定向使用 replaceState，避免后退时回到被拒绝的地址
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 路由器服务
///
/// 通过注入认证检查信号实现与认证系统的解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AdminRoute>,
    set_route: WriteSignal<AdminRoute>,
    is_authenticated: Signal<bool>,
}

impl RouterService {
    fn new(is_authenticated: Signal<bool>) -> Self {
        // 首次加载同样经过守卫
        let requested = AdminRoute::from_path(&current_path());
        let initial = match guard_with(requested, is_authenticated.get_untracked()) {
            GuardDecision::Render(route) => route,
            GuardDecision::Redirect(route) => {
                log_info!("[Router] {} -> {}", requested, route);
                replace_history_state(route.to_path());
                route
            }
        };
        let (current_route, set_route) = signal(initial);

        Self {
            current_route,
            set_route,
            is_authenticated,
        }
    }

    pub fn current_route(&self) -> ReadSignal<AdminRoute> {
        self.current_route
    }

    /// **核心方法：导航与守卫**
    pub fn navigate(&self, route: AdminRoute) {
        self.navigate_to_route(route, true);
    }

    fn navigate_to_route(&self, target: AdminRoute, use_push: bool) {
        let decision = guard_with(target, self.is_authenticated.get_untracked());
        let route = decision.route();

        if let GuardDecision::Redirect(_) = decision {
            log_info!("[Router] Access to {} redirected to {}", target, route);
        }

        // 被拒绝的目标不进入历史记录
        if use_push && decision == GuardDecision::Render(route) {
            push_history_state(route.to_path());
        } else {
            replace_history_state(route.to_path());
        }
        self.set_route.set(route);
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let router = *self;

        let closure = Closure::<dyn Fn()>::new(move || {
            let target = AdminRoute::from_path(&current_path());
            router.navigate_to_route(target, false);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 认证状态变化时重新评估当前路由
    fn setup_auth_redirect(&self) {
        let router = *self;

        Effect::new(move |_| {
            let is_auth = router.is_authenticated.get();
            let route = router.current_route.get_untracked();

            if let GuardDecision::Redirect(target) = guard_with(route, is_auth) {
                log_info!(
                    "[Router] Auth state changed (authenticated: {}), redirecting to {}.",
                    is_auth,
                    target
                );
                push_history_state(target.to_path());
                router.set_route.set(target);
            }
        });
    }
}

fn provide_router(is_authenticated: Signal<bool>) -> RouterService {
    let router = RouterService::new(is_authenticated);

    router.init_popstate_listener();
    router.setup_auth_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    expect_context::<RouterService>()
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
#[component]
pub fn Router(
    /// 认证状态信号
    is_authenticated: Signal<bool>,
    children: Children,
) -> impl IntoView {
    provide_router(is_authenticated);

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AdminRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || matcher(router.current_route().get())
}

/// 站内链接，点击时走路由服务而不是整页跳转
#[component]
pub fn Link(
    route: AdminRoute,
    class: Signal<String>,
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let on_click = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        router.navigate(route);
    };

    view! {
        <a href=route.to_path() class=move || class.get() on:click=on_click>
            {children()}
        </a>
    }
}
