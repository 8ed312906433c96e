use leptos::*;

/// Runs `f` inside a fresh reactive runtime that is disposed afterwards.
pub fn with_runtime<T>(f: impl FnOnce() -> T) -> T {
    let runtime = create_runtime();
    let result = f();
    runtime.dispose();
    result
}

/// Server-renders a view. Resources are not loaded, so pages render their
/// loading branch unless data is seeded up front.
pub fn render_to_string<F, N>(view: F) -> String
where
    F: FnOnce() -> N + 'static,
    N: IntoView + 'static,
{
    leptos_reactive::suppress_resource_load(true);
    let html = with_runtime(|| view().into_view().render_to_string().to_string());
    leptos_reactive::suppress_resource_load(false);
    html
}

/// Like [`with_runtime`] for code that creates resources: their fetchers are
/// never polled, so no executor is needed.
pub fn with_idle_resources<T>(f: impl FnOnce() -> T) -> T {
    leptos_reactive::suppress_resource_load(true);
    let result = with_runtime(f);
    leptos_reactive::suppress_resource_load(false);
    result
}
