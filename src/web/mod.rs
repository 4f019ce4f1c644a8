//! Detection in a browser window or worker.

mod bindings;
mod global;
mod js;
mod probe;
mod style;

pub use self::bindings::install_global_bindings;
use self::probe::Probe;
pub use self::style::{apply_format_classes, class_name, detect_default, StyleError};
use crate::aggregate::Aggregator;
use crate::{DetectionConfig, DetectionFuture, DetectionResult, ImageFormat};

/// Detects support for all formats without delay.
///
/// Shorthand for [`DetectionConfig::new().detect(callback)`](DetectionConfig::detect).
pub fn detect<F>(callback: F)
where
	F: 'static + FnOnce(DetectionResult),
{
	DetectionConfig::new().detect(callback);
}

/// Async version of [`detect()`].
pub fn detect_async() -> DetectionFuture {
	DetectionConfig::new().detect_async()
}

/// Implementation for [`DetectionConfig::detect()`].
pub(crate) fn detect_internal<F>(config: DetectionConfig, callback: F)
where
	F: 'static + FnOnce(DetectionResult),
{
	let aggregator = Aggregator::new(config, callback);

	for format in ImageFormat::ALL {
		if config.is_enabled(format) {
			let probe = Probe::new(format, config.probe_delay());
			let aggregator = aggregator.clone();

			wasm_bindgen_futures::spawn_local(async move {
				let supported = probe.await;
				aggregator.settle(format, Some(supported));
			});
		} else {
			aggregator.settle(format, None);
		}
	}
}
