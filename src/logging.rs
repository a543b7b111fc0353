/// Conditional logging module for development builds
///
/// The `log!` macro provides informational console logging that is compiled out
/// in production (release) builds by default. Missing-data warnings go through
/// `warning!`, which is always emitted.
///
/// Logging is enabled when either:
/// - Building in debug mode (`cfg(debug_assertions)`)
/// - The `console_logging` feature is explicitly enabled
///
/// On `wasm32` both macros write to the browser console. Native builds (tests,
/// benches) write to stderr instead, since the console bindings are only
/// callable from inside a browser.
///
/// # Examples
///
/// ```rust
/// use stadium_map::logging::{log, warning};
///
/// log!("Rendering {} markers", 12);
/// warning!("Club {} has no stadium", "fcx");
/// ```
/// Conditionally log to console in development builds
#[macro_export]
macro_rules! log {
    ($($arg:expr),+ $(,)?) => {
        #[cfg(any(debug_assertions, feature = "console_logging"))]
        {
            $crate::logging::write_log(&format!($($arg),+));
        }
    };
}

/// Log a warning about degraded data, in every build profile
#[macro_export]
macro_rules! warning {
    ($($arg:expr),+ $(,)?) => {
        $crate::logging::write_warning(&format!($($arg),+));
    };
}

pub use log;
pub use warning;

#[doc(hidden)]
pub fn write_log(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&message.into());

    #[cfg(not(target_arch = "wasm32"))]
    eprintln!("{message}");
}

#[doc(hidden)]
pub fn write_warning(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&message.into());

    #[cfg(not(target_arch = "wasm32"))]
    eprintln!("warning: {message}");
}
