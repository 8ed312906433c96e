use crate::{
    components::{guard::LOGIN_ROUTE, notice::NoticeStack},
    state::auth::{use_auth, use_logout},
    utils::storage::redirect,
};
use leptos::*;

#[component]
pub fn Header() -> impl IntoView {
    let (session, _) = use_auth();
    let logout = use_logout();
    let username = move || session.with(|s| s.username.clone());
    let role_label = move || {
        if session.with(|s| s.is_admin()) {
            "Administrator"
        } else {
            "Employee"
        }
    };
    let on_logout = move |_| {
        logout.call(());
        redirect(LOGIN_ROUTE);
    };

    view! {
        <header class="bg-surface-elevated shadow-sm border-b border-border">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between items-center h-16">
                    <h1 class="text-xl font-semibold text-fg">"MotorPH Employee Management"</h1>
                    <Show when=move || session.with(|s| s.is_authenticated())>
                        <div class="flex items-center gap-3">
                            <span class="text-sm text-fg-muted">
                                {username} " (" {role_label} ")"
                            </span>
                            <button
                                on:click=on_logout
                                class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover"
                            >
                                "Logout"
                            </button>
                        </div>
                    </Show>
                </div>
            </div>
        </header>
    }
}

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-surface">
            <Header/>
            <main class="max-w-7xl mx-auto py-6 sm:px-6 lg:px-8">
                {children()}
            </main>
            <NoticeStack/>
        </div>
    }
}

#[component]
pub fn LoadingSpinner(#[prop(optional, into)] label: Option<String>) -> impl IntoView {
    view! {
        <div class="flex justify-center items-center gap-2 p-8">
            <div class="animate-spin rounded-full h-8 w-8 border-b-2 border-action-primary-bg"></div>
            {label.map(|text| view! { <span class="text-sm text-fg-muted">{text}</span> })}
        </div>
    }
}
