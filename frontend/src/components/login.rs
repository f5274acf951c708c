use leptos::prelude::*;
use leptos::task::spawn_local;
use sonique_admin_shared::form::LoginForm;

use crate::auth::{login, use_auth};
use crate::components::icons::ShieldCheck;
use crate::toast::use_toaster;
use crate::use_api;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let api = use_api();
    let toaster = use_toaster();

    let form = RwSignal::new(LoginForm::new());
    let is_submitting = move || form.with(|f| f.state().is_submitting());

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();

        let Some((email, password)) = form.try_update(|f| f.prepare(&toaster)).flatten() else {
            return;
        };

        let api = api.clone();
        spawn_local(async move {
            let result = login(auth, &api, &email, &password).await;
            // 登录成功后路由服务会切走本页，表单可能已被释放
            form.try_update(|f| f.finish(result, &toaster));
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <ShieldCheck attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"Sonique Admin"</h1>
                        <p class="text-base-content/70">"Sign in to manage the catalog"</p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="admin@sonique.io"
                                on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                                prop:value=move || form.with(|f| f.email.clone())
                                class="input input-bordered"
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
                                prop:value=move || form.with(|f| f.password.clone())
                                class="input input-bordered"
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=is_submitting>
                                {move || if is_submitting() {
                                    view! { <span class="loading loading-spinner"></span> "Signing in..." }.into_any()
                                } else {
                                    "Login".into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
