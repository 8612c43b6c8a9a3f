//! Runtime configuration, resolved once per session.
//!
//! A deployment can inject `window.__HRDESK_ENV` (env.js) or
//! `window.__HRDESK_CONFIG`, or serve a `config.json` next to the bundle;
//! either source may carry the API base URL and the display time zone.

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use chrono_tz::Tz;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub api_base_url: Option<String>,
    pub time_zone: Option<String>,
}

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";

static API_BASE_URL: OnceLock<String> = OnceLock::new();
static TIME_ZONE: OnceLock<String> = OnceLock::new();

fn cache_base_url(value: &str) -> String {
    let value = value.to_string();
    let _ = API_BASE_URL.set(value.clone());
    value
}

#[cfg(target_arch = "wasm32")]
fn cache_time_zone(value: &str) {
    let _ = TIME_ZONE.set(value.to_string());
}

pub fn current_time_zone() -> Tz {
    TIME_ZONE
        .get()
        .and_then(|name| name.parse().ok())
        .unwrap_or(Tz::UTC)
}

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::*;

    fn read_global(name: &str, keys: &[&str]) -> Option<String> {
        let window = web_sys::window()?;
        let any = js_sys::Reflect::get(&window, &name.into()).ok()?;
        if any.is_undefined() || any.is_null() {
            return None;
        }
        let obj = js_sys::Object::from(any);
        for key in keys {
            if let Ok(value) = js_sys::Reflect::get(&obj, &(*key).into()) {
                if let Some(value) = value.as_string() {
                    return Some(value);
                }
            }
        }
        None
    }

    fn base_url_from_globals() -> Option<String> {
        read_global("__HRDESK_ENV", &["API_BASE_URL", "api_base_url"])
            .or_else(|| read_global("__HRDESK_CONFIG", &["api_base_url", "API_BASE_URL"]))
    }

    fn time_zone_from_globals() -> Option<String> {
        read_global("__HRDESK_ENV", &["TIME_ZONE", "time_zone"])
            .or_else(|| read_global("__HRDESK_CONFIG", &["time_zone", "TIME_ZONE"]))
    }

    async fn fetch_runtime_config() -> Option<RuntimeConfig> {
        let origin = web_sys::window()?.location().origin().ok()?;
        let resp = reqwest::get(format!("{}/config.json", origin)).await.ok()?;
        if !resp.status().is_success() {
            return None;
        }
        resp.json::<RuntimeConfig>().await.ok()
    }

    pub async fn await_api_base_url() -> String {
        if let Some(cached) = API_BASE_URL.get() {
            return cached.clone();
        }
        if let Some(tz) = time_zone_from_globals() {
            cache_time_zone(&tz);
        }
        if let Some(existing) = base_url_from_globals() {
            return cache_base_url(&existing);
        }
        if let Some(cfg) = fetch_runtime_config().await {
            if let Some(tz) = &cfg.time_zone {
                cache_time_zone(tz);
            }
            if let Some(url) = cfg.api_base_url {
                return cache_base_url(&url);
            }
        }
        cache_base_url(DEFAULT_API_BASE_URL)
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::await_api_base_url;

#[cfg(not(target_arch = "wasm32"))]
pub async fn await_api_base_url() -> String {
    match API_BASE_URL.get() {
        Some(cached) => cached.clone(),
        None => cache_base_url(DEFAULT_API_BASE_URL),
    }
}

pub async fn init() {
    let _ = await_api_base_url().await;
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn time_zone_defaults_to_utc() {
        assert_eq!(current_time_zone(), Tz::UTC);
    }

    #[tokio::test]
    async fn base_url_falls_back_to_default_and_sticks() {
        let first = await_api_base_url().await;
        assert_eq!(first, DEFAULT_API_BASE_URL);
        assert_eq!(await_api_base_url().await, first);
    }
}
