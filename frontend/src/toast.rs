//! 提示框
//!
//! 每条提示展示 3 秒后自动移除，可同时存在多条。

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use sonique_admin_shared::{Notification, NotificationKind, Notify};

const TOAST_MILLIS: u32 = 3_000;

#[derive(Clone, Copy)]
pub struct Toaster {
    toasts: RwSignal<Vec<(u64, Notification)>>,
    next_id: StoredValue<u64>,
}

impl Toaster {
    pub fn new() -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(0),
        }
    }

    fn dismiss(&self, id: u64) {
        self.toasts.try_update(|list| list.retain(|(i, _)| *i != id));
    }
}

impl Default for Toaster {
    fn default() -> Self {
        Self::new()
    }
}

impl Notify for Toaster {
    fn notify(&self, notification: Notification) {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);
        self.toasts.update(|list| list.push((id, notification)));

        let toaster = *self;
        Timeout::new(TOAST_MILLIS, move || toaster.dismiss(id)).forget();
    }
}

pub fn use_toaster() -> Toaster {
    expect_context::<Toaster>()
}

fn alert_class(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Success => "alert alert-success shadow-lg",
        NotificationKind::Error => "alert alert-error shadow-lg",
        NotificationKind::Info => "alert alert-info shadow-lg",
    }
}

/// 提示出口，放在应用根部
#[component]
pub fn ToastOutlet() -> impl IntoView {
    let toaster = use_toaster();

    view! {
        <div class="toast toast-top toast-end z-50">
            <For
                each=move || toaster.toasts.get()
                key=|(id, _)| *id
                children=move |(_, note)| {
                    view! {
                        <div class=alert_class(note.kind)>
                            <span>{note.message}</span>
                        </div>
                    }
                }
            />
        </div>
    }
}
