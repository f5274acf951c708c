use leptos::prelude::*;
use sonique_admin_shared::AdminRoute;

use crate::web::router::Link;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <div class="text-center">
                <h1 class="text-6xl font-bold text-error">"404"</h1>
                <p class="text-xl mt-4">"Page not found"</p>
                <Link route=AdminRoute::AddSong class=Signal::derive(|| "btn btn-primary mt-6".to_string())>
                    "Back to home"
                </Link>
            </div>
        </div>
    }
}
