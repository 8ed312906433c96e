use crate::{api::ApiError, components::error::InlineErrorMessage};
use leptos::{ev::SubmitEvent, *};

#[component]
pub fn LoginForm(
    username: RwSignal<String>,
    password: RwSignal<String>,
    #[prop(into)] error: Signal<Option<ApiError>>,
    #[prop(into)] pending: Signal<bool>,
    on_submit: Callback<SubmitEvent>,
) -> impl IntoView {
    view! {
        <div class="min-h-screen flex items-center justify-center bg-surface py-12 px-4 sm:px-6 lg:px-8">
            <div class="max-w-md w-full space-y-8">
                <div>
                    <h2 class="mt-6 text-center text-3xl font-extrabold text-fg">
                        "Sign in to MotorPH"
                    </h2>
                    <p class="mt-2 text-center text-sm text-fg-muted">
                        "Employee Management System"
                    </p>
                </div>
                <form class="mt-8 space-y-6" on:submit=move |ev| on_submit.call(ev)>
                    <div class="rounded-md shadow-sm -space-y-px">
                        <div>
                            <label for="username" class="sr-only">"Username"</label>
                            <input
                                id="username"
                                name="username"
                                type="text"
                                autocomplete="username"
                                class="appearance-none rounded-none relative block w-full px-3 py-2 border border-border rounded-t-md focus:outline-none sm:text-sm"
                                placeholder="Username (employee number)"
                                prop:value=move || username.get()
                                on:input=move |ev| username.set(event_target_value(&ev))
                            />
                        </div>
                        <div>
                            <label for="password" class="sr-only">"Password"</label>
                            <input
                                id="password"
                                name="password"
                                type="password"
                                autocomplete="current-password"
                                class="appearance-none rounded-none relative block w-full px-3 py-2 border border-border rounded-b-md focus:outline-none sm:text-sm"
                                placeholder="Password"
                                prop:value=move || password.get()
                                on:input=move |ev| password.set(event_target_value(&ev))
                            />
                        </div>
                    </div>

                    <InlineErrorMessage error=error />

                    <button
                        type="submit"
                        disabled=move || pending.get()
                        class="w-full flex justify-center py-2 px-4 text-sm font-medium rounded-md bg-action-primary-bg text-action-primary-text hover:bg-action-primary-bg-hover disabled:opacity-50"
                    >
                        {move || if pending.get() { "Signing in..." } else { "Login" }}
                    </button>
                </form>
            </div>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn form_renders_fields_and_error() {
        let html = render_to_string(move || {
            let username = create_rw_signal("10001".to_string());
            let password = create_rw_signal(String::new());
            let error = create_rw_signal(Some(ApiError::validation("Password is required")));
            view! {
                <LoginForm
                    username=username
                    password=password
                    error=error
                    pending=Signal::derive(|| false)
                    on_submit=Callback::new(|_| {})
                />
            }
        });
        assert!(html.contains("Sign in to MotorPH"));
        assert!(html.contains("Password is required"));
        assert!(html.contains("Login"));
    }
}
