//! Transient notifications for fetch failures. Every page reports through the
//! same stack so errors are never dropped silently.

use leptos::*;

#[cfg(target_arch = "wasm32")]
const NOTICE_TTL_MS: u32 = 6_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoticeList {
    next_id: u64,
    items: Vec<Notice>,
}

impl NoticeList {
    /// Adds a notice unless the same text is already on screen.
    pub fn push(&mut self, message: impl Into<String>) -> Option<u64> {
        let message = message.into();
        if self.items.iter().any(|notice| notice.message == message) {
            return None;
        }
        self.next_id += 1;
        self.items.push(Notice {
            id: self.next_id,
            message,
        });
        Some(self.next_id)
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|notice| notice.id != id);
    }

    pub fn items(&self) -> &[Notice] {
        &self.items
    }
}

#[derive(Clone, Copy)]
pub struct Notices {
    list: RwSignal<NoticeList>,
}

impl Notices {
    pub fn error(&self, message: impl Into<String>) {
        let message = message.into();
        log::warn!("{}", message);
        let mut id = None;
        self.list.update(|list| id = list.push(message));
        if let Some(id) = id {
            self.expire(id);
        }
    }

    pub fn dismiss(&self, id: u64) {
        self.list.update(|list| list.dismiss(id));
    }

    pub fn items(&self) -> Vec<Notice> {
        self.list.with(|list| list.items().to_vec())
    }

    #[cfg(target_arch = "wasm32")]
    fn expire(&self, id: u64) {
        let list = self.list;
        gloo_timers::callback::Timeout::new(NOTICE_TTL_MS, move || {
            let _ = list.try_update(|list| list.dismiss(id));
        })
        .forget();
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn expire(&self, _id: u64) {}
}

pub fn provide_notices() -> Notices {
    let notices = Notices {
        list: create_rw_signal(NoticeList::default()),
    };
    provide_context(notices);
    notices
}

pub fn use_notices() -> Notices {
    use_context::<Notices>().unwrap_or_else(provide_notices)
}

#[component]
pub fn NoticeStack() -> impl IntoView {
    let notices = use_notices();
    let items = move || notices.items();
    view! {
        <div class="fixed top-4 right-4 z-[80] space-y-2" role="status">
            <For each=items key=|notice| notice.id let:notice>
                <div class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded shadow flex items-start gap-3">
                    <span class="text-sm">{notice.message.clone()}</span>
                    <button
                        type="button"
                        aria-label="Dismiss"
                        class="text-sm opacity-75 hover:opacity-100"
                        on:click=move |_| notices.dismiss(notice.id)
                    >
                        "✕"
                    </button>
                </div>
            </For>
        </div>
    }
}
