//! 上传表单
//!
//! 三种表单共用同一套字段渲染与提交流程，具体字段见各子模块。
//! 表单状态持有 `web_sys::File`，因此信号使用 `LocalStorage` 存储。

mod album_form;
mod author_form;
mod song_form;

pub use album_form::AddAlbumPage;
pub use author_form::AddAuthorPage;
pub use song_form::AddSongPage;

use leptos::html::Input;
use leptos::prelude::*;
use leptos::task::spawn_local;
use sonique_admin_shared::form::{EntityForm, FormController, NONE_OPTION, SubmissionState, ValidationError};
use sonique_admin_shared::{Notification, Notify};

use crate::{Api, use_api};
use crate::toast::Toaster;
use crate::web::{BrowserFile, clear_input};

pub(crate) type Controller<F> = RwSignal<FormController<F>, LocalStorage>;

pub(crate) fn new_controller<F: EntityForm + 'static>(form: F) -> Controller<F> {
    RwSignal::new_local(FormController::new(form))
}

/// 校验后发出创建请求；校验失败或正在提交时不发请求
pub(crate) fn submit<F>(controller: Controller<F>, api: Api, toaster: Toaster)
where
    F: EntityForm<File = BrowserFile> + 'static,
{
    let max = api.config().max_image_bytes;
    let Some(payload) = controller.try_update(|c| c.prepare(max, &toaster)).flatten() else {
        return;
    };

    spawn_local(async move {
        let result = api.create::<F::Resource>(payload).await;
        controller.try_update(|c| c.finish(result, &toaster));
    });
}

/// 提交成功后清空文件输入框
///
/// 文件输入框无法通过属性绑定回写，只能在成功的那一刻手动清空。
pub(crate) fn clear_files_on_success<F>(controller: Controller<F>, inputs: Vec<NodeRef<Input>>)
where
    F: EntityForm + 'static,
{
    let succeeded =
        Memo::new(move |_| controller.with(|c| *c.state() == SubmissionState::Succeeded));

    Effect::new(move |_| {
        if succeeded.get() {
            for input in &inputs {
                if let Some(el) = input.get_untracked() {
                    el.set_value("");
                }
            }
        }
    });
}

pub(crate) fn text_field<F: EntityForm + 'static>(
    controller: Controller<F>,
    id: &'static str,
    label: &'static str,
    placeholder: &'static str,
    get: fn(&F) -> String,
    set: fn(&mut F, String),
) -> impl IntoView {
    view! {
        <div class="form-control">
            <label class="label" for=id>
                <span class="label-text">{label}</span>
            </label>
            <input
                id=id
                type="text"
                placeholder=placeholder
                class="input input-bordered w-full"
                prop:value=move || controller.with(|c| get(c.form()))
                on:input=move |ev| controller.update(|c| set(c.form_mut(), event_target_value(&ev)))
            />
        </div>
    }
}

/// 下拉框，首项固定为 "None"
pub(crate) fn select_field<F: EntityForm + 'static>(
    controller: Controller<F>,
    id: &'static str,
    label: &'static str,
    options: Signal<Vec<String>>,
    get: fn(&F) -> String,
    set: fn(&mut F, String),
) -> impl IntoView {
    let current = move || controller.with(|c| get(c.form()));

    view! {
        <div class="form-control">
            <label class="label" for=id>
                <span class="label-text">{label}</span>
            </label>
            <select
                id=id
                class="select select-bordered w-full"
                prop:value=current
                on:change=move |ev| controller.update(|c| set(c.form_mut(), event_target_value(&ev)))
            >
                <option value=NONE_OPTION>{NONE_OPTION}</option>
                <For
                    each=move || options.get()
                    key=|name| name.clone()
                    children=move |name| {
                        let selected = {
                            let name = name.clone();
                            move || current() == name
                        };
                        view! { <option value=name.clone() selected=selected>{name.clone()}</option> }
                    }
                />
            </select>
        </div>
    }
}

/// 文件输入框
///
/// 选择被拒绝时提示原因并清空输入框，表单中保留之前的选择。
#[allow(clippy::too_many_arguments)]
pub(crate) fn file_field<F: EntityForm + 'static>(
    controller: Controller<F>,
    toaster: Toaster,
    id: &'static str,
    label: &'static str,
    accept: &'static str,
    node_ref: NodeRef<Input>,
    select: fn(&mut F, BrowserFile, u64) -> Result<(), ValidationError>,
    preview: fn(&F) -> Option<String>,
) -> impl IntoView {
    let max = use_api().config().max_image_bytes;

    let on_change = move |ev: leptos::ev::Event| {
        let Some(file) = BrowserFile::from_event(&ev) else {
            return;
        };
        if let Some(Err(e)) = controller.try_update(|c| select(c.form_mut(), file, max)) {
            toaster.notify(Notification::error(e.to_string()));
            clear_input(&ev);
        }
    };

    view! {
        <div class="form-control">
            <label class="label" for=id>
                <span class="label-text">{label}</span>
            </label>
            <input
                id=id
                type="file"
                accept=accept
                node_ref=node_ref
                class="file-input file-input-bordered w-full"
                on:change=on_change
            />
            {move || {
                controller
                    .with(|c| preview(c.form()))
                    .map(|src| {
                        view! {
                            <img src=src alt="preview" class="mt-3 h-32 w-32 object-cover rounded-box shadow" />
                        }
                    })
            }}
        </div>
    }
}

pub(crate) fn submit_button<F: EntityForm + 'static>(
    controller: Controller<F>,
    label: &'static str,
) -> impl IntoView {
    let is_submitting = move || controller.with(|c| c.state().is_submitting());

    view! {
        <div class="form-control mt-6">
            <button type="submit" class="btn btn-primary" disabled=is_submitting>
                {move || if is_submitting() {
                    view! { <span class="loading loading-spinner"></span> "Submitting..." }.into_any()
                } else {
                    label.into_any()
                }}
            </button>
        </div>
    }
}
