use std::future::Future;

/// Runs `f` inside a fresh Leptos reactive runtime.
pub fn with_runtime<T>(f: impl FnOnce() -> T) -> T {
    let runtime = leptos::create_runtime();
    let result = f();
    runtime.dispose();
    result
}

/// Runs an async test on a current-thread tokio runtime inside a
/// `LocalSet`; Leptos dispatches actions via `spawn_local` on native
/// builds, which needs one.
pub fn with_local_runtime_async<F, Fut>(f: F)
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = ()>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");
    let local = tokio::task::LocalSet::new();
    local.block_on(&runtime, f());
}
