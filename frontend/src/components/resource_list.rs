//! 资源列表页
//!
//! 每个列表页挂载时创建自己的 `CachedCollection`，离开页面即丢弃，
//! 再次进入会重新拉取。删除成功后只移除对应行，不重新拉取。

use leptos::prelude::*;
use leptos::task::spawn_local;
use sonique_admin_shared::cache::edit_placeholder;
use sonique_admin_shared::error::GENERIC_MESSAGE;
use sonique_admin_shared::{
    Album, Author, CacheRead, CachedCollection, Notification, Notify, Resource, Song,
};

use crate::auth::use_auth;
use crate::components::icons::{Pencil, Trash2};
use crate::toast::use_toaster;
use crate::use_api;

fn confirm_delete(name: &str) -> bool {
    web_sys::window()
        .and_then(|w| {
            w.confirm_with_message(&format!("Are you sure you want to delete {}?", name))
                .ok()
        })
        .unwrap_or(false)
}

fn thumbnail(src: Option<String>) -> AnyView {
    match src {
        Some(src) => view! {
            <div class="avatar">
                <div class="mask mask-squircle h-12 w-12">
                    <img src=src alt="" />
                </div>
            </div>
        }
        .into_any(),
        None => view! { <div class="h-12 w-12 rounded-box bg-base-300"></div> }.into_any(),
    }
}

/// 通用资源表格
///
/// `row` 渲染数据列，操作列（编辑 / 删除）由这里统一追加。
fn resource_table<R>(
    title: &'static str,
    headers: &'static [&'static str],
    row: fn(&R) -> AnyView,
) -> impl IntoView
where
    R: Resource + Send + Sync,
{
    let api = use_api();
    let toaster = use_toaster();
    let is_authenticated = use_auth().is_authenticated_signal();

    let cache = RwSignal::new(CachedCollection::<R>::new());

    if let Some(CacheRead::Fetch) = cache.try_update(|c| c.begin()) {
        let api = api.clone();
        spawn_local(async move {
            let result = api.list::<R>().await;
            // 页面已卸载时信号不可用，响应直接丢弃
            if let Some(Some(err)) = cache.try_update(|c| c.complete(result)) {
                toaster.notify(Notification::error(err.user_message(GENERIC_MESSAGE)));
            }
        });
    }

    // 登出时清空缓存
    Effect::new(move |_| {
        if !is_authenticated.get() {
            cache.update(|c| c.reset());
        }
    });

    let on_delete = move |id: String, name: String| {
        if !confirm_delete(&name) {
            return;
        }
        let api = api.clone();
        spawn_local(async move {
            let result = api.delete::<R>(&id).await;
            if let Some(note) = cache.try_update(|c| c.apply_delete(&id, &name, &result)) {
                toaster.notify(note);
            }
        });
    };

    let is_loading = move || cache.with(|c| c.is_loading());
    let is_empty = move || cache.with(|c| c.is_populated() && c.items().is_empty());
    let columns = headers.len() + 1;

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body p-0">
                <div class="p-6 pb-2">
                    <h3 class="card-title">{title}</h3>
                </div>

                <div class="overflow-x-auto w-full">
                    <table class="table table-zebra w-full">
                        <thead>
                            <tr>
                                {headers.iter().map(|h| view! { <th>{*h}</th> }).collect_view()}
                                <th class="text-right">"Actions"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <Show when=is_loading>
                                <tr>
                                    <td colspan=columns class="text-center py-8 text-base-content/50">
                                        <span class="loading loading-spinner loading-md"></span> " Loading..."
                                    </td>
                                </tr>
                            </Show>
                            <Show when=is_empty>
                                <tr>
                                    <td colspan=columns class="text-center py-8 text-base-content/50">
                                        "Nothing here yet."
                                    </td>
                                </tr>
                            </Show>
                            <For
                                each=move || cache.with(|c| c.items().to_vec())
                                key=|item| item.id().to_string()
                                children=move |item| {
                                    let id = item.id().to_string();
                                    let name = item.display_name().to_string();
                                    let edit_name = name.clone();
                                    let on_delete = on_delete.clone();
                                    view! {
                                        <tr>
                                            {row(&item)}
                                            <td>
                                                <div class="flex justify-end gap-1">
                                                    <button
                                                        class="btn btn-ghost btn-sm btn-square"
                                                        title="Edit"
                                                        on:click=move |_| toaster.notify(edit_placeholder(&edit_name))
                                                    >
                                                        <Pencil attr:class="h-4 w-4" />
                                                    </button>
                                                    <button
                                                        class="btn btn-ghost btn-sm btn-square text-error"
                                                        title="Delete"
                                                        on:click=move |_| on_delete(id.clone(), name.clone())
                                                    >
                                                        <Trash2 attr:class="h-4 w-4" />
                                                    </button>
                                                </div>
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn SongListPage() -> impl IntoView {
    resource_table::<Song>(
        "All Songs",
        &["Image", "Name", "Album", "Author", "Language"],
        |song| {
            view! {
                <td>{thumbnail(song.image_url.clone())}</td>
                <td class="font-bold">{song.name.clone()}</td>
                <td>{song.album.clone()}</td>
                <td>{song.author.clone()}</td>
                <td><span class="badge badge-ghost">{song.language.clone()}</span></td>
            }
            .into_any()
        },
    )
}

#[component]
pub fn AlbumListPage() -> impl IntoView {
    resource_table::<Album>("All Albums", &["Image", "Name", "Description"], |album| {
        view! {
            <td>{thumbnail(album.image_url.clone())}</td>
            <td class="font-bold">{album.name.clone()}</td>
            <td class="text-base-content/70">{album.description.clone().unwrap_or_default()}</td>
        }
        .into_any()
    })
}

#[component]
pub fn AuthorListPage() -> impl IntoView {
    resource_table::<Author>("All Authors", &["Image", "Name"], |author| {
        view! {
            <td>{thumbnail(author.image_url.clone())}</td>
            <td class="font-bold">{author.name.clone()}</td>
        }
        .into_any()
    })
}
