//! Detects whether the browser can decode AVIF, WebP and JPEG XL images.
//!
//! Every requested format is probed in parallel by decoding a tiny embedded
//! sample image with the browser's own decoder. A failed decode means the
//! format is unsupported. Once all probes have settled, the callback is
//! called exactly once with a [`DetectionResult`].
//!
//! ```no_run
//! # #[cfg(target_family = "wasm")]
//! web_image_support::detect(|result| {
//! 	if result.avif() == Some(true) {
//! 		// Serve AVIF.
//! 	}
//! });
//! ```
//!
//! [`detect_default()`] additionally marks the page's `<body>` with
//! `has-<format>` or `no-<format>` classes, so stylesheets can pick image
//! sources accordingly.
//!
//! # Global Bindings
//!
//! Scripts that don't import the module can opt in to
//! `detectImageFormats()` and `detectImageFormatsDefault()` on a global
//! object by calling [`install_global_bindings()`]. Nothing is defined until
//! then.
//!
//! # Notes
//!
//! There is no timeout: a decode that never settles stalls its detection
//! run forever.
//!
//! If every format is disabled, the callback is called before
//! [`DetectionConfig::detect()`] returns.
//!
//! Detection is only available on `wasm32-unknown-unknown`. The data types
//! are available on all targets.

#[cfg_attr(
	not(all(target_family = "wasm", target_os = "unknown")),
	allow(dead_code)
)]
mod aggregate;
mod config;
mod format;
#[cfg_attr(
	not(all(target_family = "wasm", target_os = "unknown")),
	allow(dead_code)
)]
mod future;
#[cfg_attr(
	not(all(target_family = "wasm", target_os = "unknown")),
	allow(dead_code)
)]
mod result;
#[cfg(all(target_family = "wasm", target_os = "unknown"))]
mod web;

pub use self::config::DetectionConfig;
pub use self::format::ImageFormat;
#[cfg(all(target_family = "wasm", target_os = "unknown"))]
pub use self::future::DetectionFuture;
pub use self::result::DetectionResult;
#[cfg(all(target_family = "wasm", target_os = "unknown"))]
pub use self::web::{
	apply_format_classes, class_name, detect, detect_async, detect_default,
	install_global_bindings, StyleError,
};
