//! Opt-in JS bindings on a global object.

use std::time::Duration;

use js_sys::{Error, Function, Object, Reflect, TypeError};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{console, Document};

use super::style;
use crate::{DetectionConfig, DetectionResult, ImageFormat};

/// Defines `detectImageFormats(callback, config?)` and
/// `detectImageFormatsDefault(document?)` on `global`, for use by scripts
/// that don't import the module.
///
/// `config` is an object with optional `avif`, `webp` and `jxl` flags and a
/// `delay` in milliseconds. Omitted flags are enabled, a missing or invalid
/// `delay` is `0`. `callback` receives `{ avif, webp, jxl, time }`, where
/// formats that were not probed are `null` and `time` is in milliseconds.
///
/// Exported to JS as `installGlobalBindings()`.
///
/// # Errors
///
/// If defining the properties on `global` failed, e.g. when it is frozen.
#[wasm_bindgen(js_name = installGlobalBindings)]
pub fn install_global_bindings(global: &Object) -> Result<(), JsValue> {
	let detect = Closure::<dyn Fn(JsValue, JsValue) -> Result<(), JsValue>>::new(detect_js);
	Reflect::set(global, &"detectImageFormats".into(), &detect.into_js_value())?;

	let detect_default = Closure::<dyn Fn(JsValue) -> Result<(), JsValue>>::new(detect_default_js);
	Reflect::set(
		global,
		&"detectImageFormatsDefault".into(),
		&detect_default.into_js_value(),
	)?;

	Ok(())
}

/// `detectImageFormats(callback, config?)`.
fn detect_js(callback: JsValue, config: JsValue) -> Result<(), JsValue> {
	let callback: Function = callback
		.dyn_into()
		.map_err(|_| TypeError::new("`callback` is not a function"))?;

	config_from_js(&config).detect(move |result| {
		if let Err(error) = callback.call1(&JsValue::UNDEFINED, &result_to_js(&result)) {
			console::error_2(&"image format detection callback threw:".into(), &error);
		}
	});

	Ok(())
}

/// `detectImageFormatsDefault(document?)`.
fn detect_default_js(document: JsValue) -> Result<(), JsValue> {
	let document = if document.is_undefined() || document.is_null() {
		None
	} else {
		Some(
			document
				.dyn_into::<Document>()
				.map_err(|_| TypeError::new("`document` is not a `Document`"))?,
		)
	};

	style::detect_default(document).map_err(|error| Error::new(&error.to_string()).into())
}

/// Reads a [`DetectionConfig`] from a JS object.
///
/// Anything that is not usable falls back to the default.
fn config_from_js(value: &JsValue) -> DetectionConfig {
	let mut config = DetectionConfig::new();

	if !value.is_object() {
		return config;
	}

	for format in ImageFormat::ALL {
		if let Ok(enabled) = Reflect::get(value, &format.name().into()) {
			if let Some(enabled) = enabled.as_bool() {
				config = config.format(format, enabled);
			}
		}
	}

	if let Some(delay) = Reflect::get(value, &"delay".into())
		.ok()
		.and_then(|delay| delay.as_f64())
	{
		if delay.is_finite() && delay > 0. {
			let millis = delay.min(f64::from(i32::MAX));
			config = config.delay(Duration::from_secs_f64(millis / 1000.));
		}
	}

	config
}

/// Converts a [`DetectionResult`] into `{ avif, webp, jxl, time }`.
fn result_to_js(result: &DetectionResult) -> Object {
	let object = Object::new();

	for format in ImageFormat::ALL {
		let verdict = result.get(format).map_or(JsValue::NULL, JsValue::from_bool);
		Reflect::set(&object, &format.name().into(), &verdict)
			.expect("setting a property on a plain `Object` is not expected to fail");
	}

	let time = JsValue::from_f64(result.elapsed().as_secs_f64() * 1000.);
	Reflect::set(&object, &"time".into(), &time)
		.expect("setting a property on a plain `Object` is not expected to fail");

	object
}
