//! Collects probe outcomes and fires the completion callback once.

use std::cell::RefCell;
use std::fmt::{self, Debug, Formatter};
use std::rc::Rc;
use std::time::Duration;

use web_time::Instant;

use crate::{DetectionConfig, DetectionResult, ImageFormat};

/// Completion callback.
type Callback = Box<dyn FnOnce(DetectionResult)>;

/// Shared handle to the state of one detection run.
///
/// Every probe holds a clone and reports to it through
/// [`settle()`](Self::settle) exactly once, including probes for disabled
/// formats.
#[derive(Clone)]
pub(crate) struct Aggregator(Rc<Inner>);

/// Shared state of [`Aggregator`].
struct Inner {
	/// Which formats have to settle before completion.
	config: DetectionConfig,
	/// Start of detection.
	start: Instant,
	/// Result being assembled.
	result: RefCell<DetectionResult>,
	/// Taken when fired.
	callback: RefCell<Option<Callback>>,
}

impl Debug for Aggregator {
	fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
		formatter
			.debug_struct("Aggregator")
			.field("config", &self.0.config)
			.field("start", &self.0.start)
			.field("result", &self.0.result)
			.field("fired", &self.0.callback.borrow().is_none())
			.finish()
	}
}

impl Aggregator {
	/// Starts the clock for a new detection run.
	pub(crate) fn new<F>(config: DetectionConfig, callback: F) -> Self
	where
		F: 'static + FnOnce(DetectionResult),
	{
		Self(Rc::new(Inner {
			config,
			start: Instant::now(),
			result: RefCell::new(DetectionResult::unknown()),
			callback: RefCell::new(Some(Box::new(callback))),
		}))
	}

	/// Reports that the probe for `format` has settled.
	///
	/// `supported` is [`None`] for formats that were not requested. Returns
	/// `true` if this call fired the callback.
	pub(crate) fn settle(&self, format: ImageFormat, supported: Option<bool>) -> bool {
		self.settle_at(format, supported, self.0.start.elapsed())
	}

	/// [`settle()`](Self::settle) with an explicit elapsed time.
	fn settle_at(&self, format: ImageFormat, supported: Option<bool>, elapsed: Duration) -> bool {
		let result = {
			let mut result = self.0.result.borrow_mut();

			if let Some(supported) = supported {
				if self.0.config.is_enabled(format) {
					let first = result.settle(format, supported);
					debug_assert!(first, "{format} probe settled more than once");
				}
			}

			result.observe(elapsed);

			if !self
				.0
				.config
				.enabled()
				.all(|format| result.get(format).is_some())
			{
				return false;
			}

			*result
		};

		// Released before calling out, the callback may start a new run.
		let callback = self.0.callback.borrow_mut().take();

		if let Some(callback) = callback {
			callback(result);
			true
		} else {
			false
		}
	}
}
