use crate::api::ApiError;
use leptos::*;

#[component]
pub fn InlineErrorMessage(#[prop(into)] error: Signal<Option<ApiError>>) -> impl IntoView {
    view! {
        <Show when=move || error.get().is_some() fallback=|| ()>
            <div class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded space-y-1 my-2">
                <div class="font-bold">{move || error.get().map(|e| e.error).unwrap_or_default()}</div>
                {move || error.get().and_then(|e| {
                    let code = e.code;
                    (!code.is_empty() && code != "UNKNOWN" && code != "VALIDATION_ERROR").then(|| {
                        let status = e.status.map(|s| format!(" ({})", s)).unwrap_or_default();
                        view! { <div class="text-xs opacity-75">{"Code: "}{code}{status}</div> }
                    })
                })}
            </div>
        </Show>
    }
}
