//! 导航外壳
//!
//! 受保护页面共用的侧边栏与顶栏。登出需要二次确认。

use leptos::prelude::*;
use sonique_admin_shared::nav::{LogoutState, NavShell};
use sonique_admin_shared::route::AdminRoute;

use crate::auth::use_auth;
use crate::components::icons::*;
use crate::web::router::{Link, use_router};

fn nav_icon(route: AdminRoute) -> AnyView {
    match route {
        AdminRoute::AddSong | AdminRoute::AddAlbum | AdminRoute::AddAuthor => {
            view! { <Plus attr:class="h-4 w-4" /> }.into_any()
        }
        _ => view! { <ListIcon attr:class="h-4 w-4" /> }.into_any(),
    }
}

#[component]
pub fn AdminShell(children: Children) -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let shell = expect_context::<RwSignal<NavShell>>();
    let is_authenticated = auth.is_authenticated_signal();

    // 当前路由决定高亮项
    Effect::new(move |_| {
        let route = router.current_route().get();
        shell.update(|s| s.set_active(route));
    });

    let links = move || shell.with(|s| s.links(is_authenticated.get()));
    let confirming = move || shell.with(|s| s.logout_state() == LogoutState::ConfirmingLogout);

    let on_confirm_logout = move |_| {
        let redirected = shell
            .try_update(|s| s.confirm_logout(&auth.session()))
            .flatten();
        if redirected.is_some() {
            auth.refresh();
        }
    };

    view! {
        <div class="drawer lg:drawer-open min-h-screen bg-base-200">
            <input
                id="admin-drawer"
                type="checkbox"
                class="drawer-toggle"
                prop:checked=move || shell.with(|s| s.sidebar_open())
                on:change=move |_| shell.update(|s| s.toggle_sidebar())
            />

            <div class="drawer-content flex flex-col">
                <div class="navbar bg-base-100 shadow">
                    <div class="flex-none lg:hidden">
                        <label for="admin-drawer" class="btn btn-square btn-ghost">
                            <Menu attr:class="h-5 w-5" />
                        </label>
                    </div>
                    <div class="flex-1 gap-2">
                        <Music attr:class="text-primary h-6 w-6" />
                        <span class="text-xl font-bold">"Sonique Admin"</span>
                    </div>
                    <div class="flex-none">
                        <button
                            class="btn btn-outline btn-error btn-sm gap-2"
                            on:click=move |_| shell.update(|s| s.request_logout())
                        >
                            <LogOut attr:class="h-4 w-4" /> "Logout"
                        </button>
                    </div>
                </div>

                <main class="p-4 md:p-8">{children()}</main>
            </div>

            <div class="drawer-side">
                <label for="admin-drawer" aria-label="close sidebar" class="drawer-overlay"></label>
                <ul class="menu bg-base-100 min-h-full w-64 p-4 gap-1">
                    <For
                        each=links
                        key=|link| (link.item.route, link.active)
                        children=move |link| {
                            let route = link.item.route;
                            let class = if link.active { "active" } else { "" };
                            view! {
                                <li>
                                    <Link route=route class=Signal::derive(move || class.to_string())>
                                        {nav_icon(route)}
                                        {link.item.label}
                                    </Link>
                                </li>
                            }
                        }
                    />
                </ul>
            </div>

            <Show when=confirming>
                <div class="modal modal-open">
                    <div class="modal-box">
                        <h3 class="font-bold text-lg">"Confirm logout"</h3>
                        <p class="py-4">"Are you sure you want to log out?"</p>
                        <div class="modal-action">
                            <button
                                class="btn btn-ghost"
                                on:click=move |_| shell.update(|s| s.cancel_logout())
                            >
                                "Cancel"
                            </button>
                            <button class="btn btn-error" on:click=on_confirm_logout>
                                "Logout"
                            </button>
                        </div>
                    </div>
                </div>
            </Show>
        </div>
    }
}
