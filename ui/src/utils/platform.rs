//! Platform Helpers
//!
//! The legacy SDK completes its work on a background task and reports back
//! through a callback. In the browser that task is a `spawn_local` future on
//! the single JS event loop; natively it is a tokio task that may run on any
//! worker thread.

use std::future::Future;

/// Run `future` detached from the caller.
#[cfg(target_arch = "wasm32")]
pub fn spawn_background<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(future);
}

/// Run `future` detached from the caller.
///
/// Must be called from inside a tokio runtime.
#[cfg(not(target_arch = "wasm32"))]
pub fn spawn_background<F>(future: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(future);
}

/// Short platform label used in startup logging
pub fn platform_name() -> &'static str {
    if cfg!(target_arch = "wasm32") {
        "browser"
    } else {
        "native"
    }
}
