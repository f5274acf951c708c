use leptos::html::Input;
use leptos::prelude::*;
use leptos::task::spawn_local;
use sonique_admin_shared::form::{LANGUAGES, NONE_OPTION, SongForm, SongFormOptions, load_song_form_options};

use super::{clear_files_on_success, file_field, new_controller, select_field, submit, submit_button, text_field};
use crate::components::icons::Music;
use crate::toast::use_toaster;
use crate::use_api;
use crate::web::BrowserFile;

type Form = SongForm<BrowserFile>;

#[component]
pub fn AddSongPage() -> impl IntoView {
    let api = use_api();
    let toaster = use_toaster();
    let controller = new_controller(Form::new());

    // 作者与专辑下拉选项，挂载时加载一次
    let options = RwSignal::new(SongFormOptions::default());
    {
        let api = api.clone();
        spawn_local(async move {
            let loaded = load_song_form_options(&api).await;
            options.try_set(loaded);
        });
    }
    let authors = Signal::derive(move || options.with(|o| o.authors.clone()));
    let albums = Signal::derive(move || options.with(|o| o.albums.clone()));
    let languages = Signal::derive(|| {
        LANGUAGES
            .iter()
            .filter(|l| **l != NONE_OPTION)
            .map(|l| l.to_string())
            .collect::<Vec<_>>()
    });

    let song_input = NodeRef::<Input>::new();
    let image_input = NodeRef::<Input>::new();
    clear_files_on_success(controller, vec![song_input, image_input]);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        submit(controller, api.clone(), toaster);
    };

    view! {
        <div class="card bg-base-100 shadow-xl max-w-3xl">
            <form class="card-body" on:submit=on_submit>
                <h2 class="card-title gap-2">
                    <Music attr:class="h-5 w-5 text-primary" /> "Add Song"
                </h2>

                <div class="grid md:grid-cols-2 gap-4">
                    {file_field(
                        controller,
                        toaster,
                        "song_file",
                        "Song file",
                        "audio/*",
                        song_input,
                        |f: &mut Form, file, _| f.select_song_file(file),
                        |_: &Form| None,
                    )}
                    {file_field(
                        controller,
                        toaster,
                        "song_image",
                        "Cover image",
                        "image/*",
                        image_input,
                        |f: &mut Form, file, max| f.select_image(file, max),
                        |f: &Form| f.image().preview().map(str::to_string),
                    )}
                </div>

                {text_field(
                    controller,
                    "song_name",
                    "Song name",
                    "Type here",
                    |f: &Form| f.name.clone(),
                    |f: &mut Form, v| f.name = v,
                )}
                {text_field(
                    controller,
                    "song_description",
                    "Song description",
                    "Type here",
                    |f: &Form| f.description.clone(),
                    |f: &mut Form, v| f.description = v,
                )}

                <div class="grid md:grid-cols-3 gap-4">
                    {select_field(
                        controller,
                        "song_author",
                        "Author",
                        authors,
                        |f: &Form| f.author.clone(),
                        |f: &mut Form, v| f.author = v,
                    )}
                    {select_field(
                        controller,
                        "song_language",
                        "Language",
                        languages,
                        |f: &Form| f.language.clone(),
                        |f: &mut Form, v| f.language = v,
                    )}
                    {select_field(
                        controller,
                        "song_album",
                        "Album",
                        albums,
                        |f: &Form| f.album.clone(),
                        |f: &mut Form, v| f.album = v,
                    )}
                </div>

                {submit_button(controller, "Add Song")}
            </form>
        </div>
    }
}
