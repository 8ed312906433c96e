//! Browser globals. Only meaningful on wasm; host builds never reach the
//! `web_sys` calls.

use web_sys::{Storage, Window};

pub fn window() -> Result<Window, String> {
    web_sys::window().ok_or_else(|| "Browser window is not available".to_string())
}

pub fn local_storage() -> Result<Storage, String> {
    window()?
        .local_storage()
        .map_err(|_| "Access to localStorage was denied".to_string())?
        .ok_or_else(|| "localStorage is not available".to_string())
}

/// Full page navigation, used by guards and after login.
#[cfg(target_arch = "wasm32")]
pub fn redirect(path: &str) {
    let result = window().and_then(|w| {
        w.location()
            .set_href(path)
            .map_err(|_| format!("Failed to navigate to {}", path))
    });
    if let Err(err) = result {
        log::warn!("{}", err);
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn redirect(path: &str) {
    log::debug!("Skipping navigation to {} outside the browser", path);
}
