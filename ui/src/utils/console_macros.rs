/// Macros for timestamped console logging.
///
/// On `wasm32` these wrap gloo_console and prefix every line with
/// `js_sys::Date::now()`. Everywhere else they forward to `tracing`, so the
/// same call sites work in native tests without touching JS bindings.
#[macro_export]
macro_rules! console_info {
    ($fmt:expr) => {
        $crate::console_info!("{}", $fmt)
    };
    ($fmt:expr, $($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        gloo_console::info!(format!("[{}] {}", js_sys::Date::now(), format!($fmt, $($arg)*)));
        #[cfg(not(target_arch = "wasm32"))]
        tracing::info!($fmt, $($arg)*);
    }};
}

#[macro_export]
macro_rules! console_warn {
    ($fmt:expr) => {
        $crate::console_warn!("{}", $fmt)
    };
    ($fmt:expr, $($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        gloo_console::warn!(format!("[{}] {}", js_sys::Date::now(), format!($fmt, $($arg)*)));
        #[cfg(not(target_arch = "wasm32"))]
        tracing::warn!($fmt, $($arg)*);
    }};
}

#[macro_export]
macro_rules! console_error {
    ($fmt:expr) => {
        $crate::console_error!("{}", $fmt)
    };
    ($fmt:expr, $($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        gloo_console::error!(format!("[{}] {}", js_sys::Date::now(), format!($fmt, $($arg)*)));
        #[cfg(not(target_arch = "wasm32"))]
        tracing::error!($fmt, $($arg)*);
    }};
}

#[macro_export]
macro_rules! console_debug {
    ($fmt:expr) => {
        $crate::console_debug!("{}", $fmt)
    };
    ($fmt:expr, $($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        gloo_console::debug!(format!("[{}] {}", js_sys::Date::now(), format!($fmt, $($arg)*)));
        #[cfg(not(target_arch = "wasm32"))]
        tracing::debug!($fmt, $($arg)*);
    }};
}
