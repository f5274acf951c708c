use leptos::prelude::*;
use sonique_admin_frontend::App;
use sonique_admin_shared::log_info;

// lol_alloc 作为全局分配器，减小 WASM 体积
#[cfg(target_arch = "wasm32")]
use lol_alloc::{AssumeSingleThreaded, FreeListAllocator};

#[cfg(target_arch = "wasm32")]
#[global_allocator]
static ALLOCATOR: AssumeSingleThreaded<FreeListAllocator> =
    unsafe { AssumeSingleThreaded::new(FreeListAllocator::new()) };

pub fn main() {
    console_error_panic_hook::set_once();
    log_info!("Mounting Sonique admin");
    mount_to_body(App);
}
