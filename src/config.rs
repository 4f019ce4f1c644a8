//! Detection configuration.

use std::time::Duration;

use crate::ImageFormat;
#[cfg(all(target_family = "wasm", target_os = "unknown"))]
use crate::{web, DetectionFuture, DetectionResult};

/// Selects which formats to probe and how long to wait before probing.
///
/// Follows the builder pattern of [`std::thread::Builder`]: configure, then
/// start detection with [`detect()`](Self::detect) or
/// [`detect_async()`](Self::detect_async).
///
/// ```
/// # use std::time::Duration;
/// # use web_image_support::{DetectionConfig, ImageFormat};
/// let config = DetectionConfig::new()
/// 	.webp(false)
/// 	.delay(Duration::from_millis(50));
///
/// assert!(config.is_enabled(ImageFormat::Avif));
/// assert!(!config.is_enabled(ImageFormat::WebP));
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[must_use = "does nothing until detection is started"]
pub struct DetectionConfig {
	/// Probe AVIF.
	avif: bool,
	/// Probe WebP.
	webp: bool,
	/// Probe JPEG XL.
	jxl: bool,
	/// Uniform delay before each probe starts.
	delay: Duration,
}

impl Default for DetectionConfig {
	fn default() -> Self {
		Self::new()
	}
}

impl DetectionConfig {
	/// All formats enabled, no delay.
	pub const fn new() -> Self {
		Self {
			avif: true,
			webp: true,
			jxl: true,
			delay: Duration::ZERO,
		}
	}

	/// All formats disabled, no delay.
	pub const fn none() -> Self {
		Self {
			avif: false,
			webp: false,
			jxl: false,
			delay: Duration::ZERO,
		}
	}

	/// Enables or disables probing AVIF.
	pub const fn avif(mut self, enabled: bool) -> Self {
		self.avif = enabled;
		self
	}

	/// Enables or disables probing WebP.
	pub const fn webp(mut self, enabled: bool) -> Self {
		self.webp = enabled;
		self
	}

	/// Enables or disables probing JPEG XL.
	pub const fn jxl(mut self, enabled: bool) -> Self {
		self.jxl = enabled;
		self
	}

	/// Enables or disables probing `format`.
	pub const fn format(self, format: ImageFormat, enabled: bool) -> Self {
		match format {
			ImageFormat::Avif => self.avif(enabled),
			ImageFormat::WebP => self.webp(enabled),
			ImageFormat::Jxl => self.jxl(enabled),
		}
	}

	/// Sets the delay applied before every enabled probe.
	///
	/// The delay is rounded up to whole milliseconds and capped at
	/// [`i32::MAX`] milliseconds, the range of `setTimeout()`. If no timer can
	/// be scheduled, every enabled format is reported as unsupported.
	pub const fn delay(mut self, delay: Duration) -> Self {
		self.delay = delay;
		self
	}

	/// Returns `true` if `format` will be probed.
	#[must_use]
	pub const fn is_enabled(&self, format: ImageFormat) -> bool {
		match format {
			ImageFormat::Avif => self.avif,
			ImageFormat::WebP => self.webp,
			ImageFormat::Jxl => self.jxl,
		}
	}

	/// Returns the configured delay.
	#[must_use]
	pub const fn probe_delay(&self) -> Duration {
		self.delay
	}

	/// Iterates over the formats that will be probed.
	pub fn enabled(self) -> impl Iterator<Item = ImageFormat> {
		ImageFormat::ALL
			.into_iter()
			.filter(move |format| self.is_enabled(*format))
	}

	/// Starts detection with this configuration.
	///
	/// `callback` is called exactly once with the combined result.
	///
	/// # Notes
	///
	/// If every format is disabled, `callback` is called before this
	/// function returns.
	#[cfg(all(target_family = "wasm", target_os = "unknown"))]
	pub fn detect<F>(self, callback: F)
	where
		F: 'static + FnOnce(DetectionResult),
	{
		web::detect_internal(self, callback);
	}

	/// Async version of [`DetectionConfig::detect()`].
	#[cfg(all(target_family = "wasm", target_os = "unknown"))]
	pub fn detect_async(self) -> DetectionFuture {
		let (future, sender) = DetectionFuture::new();
		web::detect_internal(self, move |result| sender.send(result));
		future
	}
}
