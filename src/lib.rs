//! Presentation logic for the HRDesk browser client.
//!
//! The view shell owns markup, routing and the login flow; this crate owns
//! everything behind it: the typed backend facade, the leave date-conflict
//! detector, form and filter state, per-page view models and the session
//! context the shell provides to them.

pub mod api;
pub mod config;
pub mod pages;
pub mod state;
pub mod utils;

#[cfg(all(test, not(target_arch = "wasm32")))]
pub(crate) mod test_support;

/// One-time browser bootstrap: panic hook, console logging and the runtime
/// config load. The shell calls this before mounting anything.
#[cfg(target_arch = "wasm32")]
pub fn init() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    wasm_bindgen_futures::spawn_local(async {
        config::init().await;
        log::info!("runtime config initialized");
    });
}
