use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 100_000;
/// Fetched data counts as fresh for this long.
pub const DEFAULT_STALE_TIME_SECS: i64 = 5 * 60;
pub const DEFAULT_RETRY: u32 = 1;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub api_base_url: Option<String>,
    pub request_timeout_ms: Option<u64>,
}

static RUNTIME_CONFIG: OnceLock<RuntimeConfig> = OnceLock::new();

#[cfg(target_arch = "wasm32")]
mod source {
    use super::RuntimeConfig;

    fn read_global(name: &str) -> Option<js_sys::Object> {
        let w = web_sys::window()?;
        let any = js_sys::Reflect::get(&w, &name.into()).ok()?;
        if any.is_undefined() || any.is_null() {
            return None;
        }
        Some(js_sys::Object::from(any))
    }

    fn read_field(obj: &js_sys::Object, keys: [&str; 2]) -> Option<wasm_bindgen::JsValue> {
        keys.iter()
            .filter_map(|key| js_sys::Reflect::get(obj, &(*key).into()).ok())
            .find(|v| !v.is_undefined() && !v.is_null())
    }

    fn from_global(name: &str) -> Option<RuntimeConfig> {
        // window.__MOTORPH_ENV = { API_BASE_URL: "...", REQUEST_TIMEOUT_MS: 30000 }
        let obj = read_global(name)?;
        let api_base_url =
            read_field(&obj, ["API_BASE_URL", "api_base_url"]).and_then(|v| v.as_string());
        let request_timeout_ms = read_field(&obj, ["REQUEST_TIMEOUT_MS", "request_timeout_ms"])
            .and_then(|v| v.as_f64())
            .map(|ms| ms as u64);
        if api_base_url.is_none() && request_timeout_ms.is_none() {
            return None;
        }
        Some(RuntimeConfig {
            api_base_url,
            request_timeout_ms,
        })
    }

    pub fn snapshot_from_globals() -> Option<RuntimeConfig> {
        from_global("__MOTORPH_ENV").or_else(|| from_global("__MOTORPH_CONFIG"))
    }

    pub async fn fetch_runtime_config() -> Option<RuntimeConfig> {
        let resp = reqwest::get("./config.json").await.ok()?;
        if !resp.status().is_success() {
            return None;
        }
        resp.json::<RuntimeConfig>().await.ok()
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod source {
    use super::RuntimeConfig;

    pub fn snapshot_from_globals() -> Option<RuntimeConfig> {
        let api_base_url = std::env::var("MOTORPH_API_BASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty());
        let request_timeout_ms = std::env::var("MOTORPH_REQUEST_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.trim().parse().ok());
        if api_base_url.is_none() && request_timeout_ms.is_none() {
            return None;
        }
        Some(RuntimeConfig {
            api_base_url,
            request_timeout_ms,
        })
    }

    pub async fn fetch_runtime_config() -> Option<RuntimeConfig> {
        None
    }
}

fn cache_config(cfg: RuntimeConfig) -> RuntimeConfig {
    RUNTIME_CONFIG.get_or_init(|| cfg).clone()
}

pub async fn await_runtime_config() -> RuntimeConfig {
    if let Some(cached) = RUNTIME_CONFIG.get() {
        return cached.clone();
    }
    if let Some(existing) = source::snapshot_from_globals() {
        return cache_config(existing);
    }
    if let Some(cfg) = source::fetch_runtime_config().await {
        return cache_config(cfg);
    }
    cache_config(RuntimeConfig::default())
}

pub async fn await_api_base_url() -> String {
    api_base_url_from(&await_runtime_config().await)
}

fn api_base_url_from(cfg: &RuntimeConfig) -> String {
    cfg.api_base_url
        .as_deref()
        .map(|url| url.trim_end_matches('/').to_string())
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
}

/// Timeout for every outbound request. Falls back to the default until the
/// runtime config has been resolved.
pub fn request_timeout() -> Duration {
    let ms = RUNTIME_CONFIG
        .get()
        .and_then(|cfg| cfg.request_timeout_ms)
        .filter(|ms| *ms > 0)
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS);
    Duration::from_millis(ms)
}

pub async fn init() {
    let cfg = await_runtime_config().await;
    log::info!("API base URL: {}", api_base_url_from(&cfg));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_defaults_and_trims_trailing_slash() {
        assert_eq!(
            api_base_url_from(&RuntimeConfig::default()),
            DEFAULT_API_BASE_URL
        );
        let cfg = RuntimeConfig {
            api_base_url: Some("https://payroll.example.com/".into()),
            request_timeout_ms: None,
        };
        assert_eq!(api_base_url_from(&cfg), "https://payroll.example.com");
    }

    #[test]
    fn request_timeout_is_never_zero() {
        assert!(request_timeout() > Duration::ZERO);
    }
}
