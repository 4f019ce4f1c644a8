//! Outcome of a detection run.

use std::time::Duration;

use crate::ImageFormat;

/// Combined result of a detection run.
///
/// A format that was not probed is reported as [`None`].
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct DetectionResult {
	/// AVIF verdict.
	avif: Option<bool>,
	/// WebP verdict.
	webp: Option<bool>,
	/// JPEG XL verdict.
	jxl: Option<bool>,
	/// Longest elapsed time observed by any settled probe.
	elapsed: Duration,
}

impl DetectionResult {
	/// A result with every format unknown and no elapsed time.
	#[must_use]
	pub const fn unknown() -> Self {
		Self {
			avif: None,
			webp: None,
			jxl: None,
			elapsed: Duration::ZERO,
		}
	}

	/// Returns a copy with the verdict for `format` set.
	///
	/// Useful to restore a previously stored result.
	#[must_use]
	pub fn with_verdict(mut self, format: ImageFormat, supported: bool) -> Self {
		*self.slot_mut(format) = Some(supported);
		self
	}

	/// Returns a copy with the elapsed time set.
	#[must_use]
	pub const fn with_elapsed(mut self, elapsed: Duration) -> Self {
		self.elapsed = elapsed;
		self
	}

	/// AVIF verdict, [`None`] if not probed.
	#[must_use]
	pub const fn avif(&self) -> Option<bool> {
		self.avif
	}

	/// WebP verdict, [`None`] if not probed.
	#[must_use]
	pub const fn webp(&self) -> Option<bool> {
		self.webp
	}

	/// JPEG XL verdict, [`None`] if not probed.
	#[must_use]
	pub const fn jxl(&self) -> Option<bool> {
		self.jxl
	}

	/// Verdict for `format`, [`None`] if not probed.
	#[must_use]
	pub const fn get(&self, format: ImageFormat) -> Option<bool> {
		match format {
			ImageFormat::Avif => self.avif,
			ImageFormat::WebP => self.webp,
			ImageFormat::Jxl => self.jxl,
		}
	}

	/// Time from the start of detection until the last probe settled.
	#[must_use]
	pub const fn elapsed(&self) -> Duration {
		self.elapsed
	}

	/// Records a verdict.
	///
	/// Returns `false` if `format` already had one, in which case it is kept.
	pub(crate) fn settle(&mut self, format: ImageFormat, supported: bool) -> bool {
		let slot = self.slot_mut(format);

		if slot.is_some() {
			return false;
		}

		*slot = Some(supported);
		true
	}

	/// Raises `elapsed` to `elapsed` if it is larger.
	pub(crate) fn observe(&mut self, elapsed: Duration) {
		self.elapsed = self.elapsed.max(elapsed);
	}

	/// Mutable access to the verdict of `format`.
	fn slot_mut(&mut self, format: ImageFormat) -> &mut Option<bool> {
		match format {
			ImageFormat::Avif => &mut self.avif,
			ImageFormat::WebP => &mut self.webp,
			ImageFormat::Jxl => &mut self.jxl,
		}
	}
}
