use leptos::html::Input;
use leptos::prelude::*;
use sonique_admin_shared::form::AlbumForm;

use super::{clear_files_on_success, file_field, new_controller, submit, submit_button, text_field};
use crate::components::icons::Disc;
use crate::toast::use_toaster;
use crate::use_api;
use crate::web::BrowserFile;

type Form = AlbumForm<BrowserFile>;

#[component]
pub fn AddAlbumPage() -> impl IntoView {
    let api = use_api();
    let toaster = use_toaster();
    let controller = new_controller(Form::new());

    let image_input = NodeRef::<Input>::new();
    clear_files_on_success(controller, vec![image_input]);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        submit(controller, api.clone(), toaster);
    };

    view! {
        <div class="card bg-base-100 shadow-xl max-w-xl">
            <form class="card-body" on:submit=on_submit>
                <h2 class="card-title gap-2">
                    <Disc attr:class="h-5 w-5 text-primary" /> "Add Album"
                </h2>

                {file_field(
                    controller,
                    toaster,
                    "album_image",
                    "Album image",
                    "image/*",
                    image_input,
                    |f: &mut Form, file, max| f.select_image(file, max),
                    |f: &Form| f.image().preview().map(str::to_string),
                )}
                {text_field(
                    controller,
                    "album_name",
                    "Album name",
                    "Type here",
                    |f: &Form| f.name.clone(),
                    |f: &mut Form, v| f.name = v,
                )}

                {submit_button(controller, "Add Album")}
            </form>
        </div>
    }
}
