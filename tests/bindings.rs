//! Tests the opt-in global bindings.

#![cfg(target_family = "wasm")]

mod util;

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Function, Object, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::wasm_bindgen_test;

use self::util::Flag;

wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

fn installed() -> Object {
	let global = Object::new();
	web_image_support::install_global_bindings(&global).unwrap();
	global
}

fn function(global: &Object, name: &str) -> Function {
	Reflect::get(global, &name.into())
		.unwrap()
		.dyn_into()
		.unwrap()
}

fn get(object: &JsValue, key: &str) -> JsValue {
	Reflect::get(object, &key.into()).unwrap()
}

/// Calls `detectImageFormats()` with `config` and waits for the result.
async fn detect(config: &JsValue) -> JsValue {
	let detect = function(&installed(), "detectImageFormats");
	let result = Rc::new(RefCell::new(None));
	let flag = Flag::new();

	let callback = Closure::<dyn FnMut(JsValue)>::new({
		let result = Rc::clone(&result);
		let flag = flag.clone();
		move |value| {
			*result.borrow_mut() = Some(value);
			flag.signal();
		}
	});

	detect
		.call2(&JsValue::UNDEFINED, callback.as_ref(), config)
		.unwrap();
	flag.await;

	let result = result.borrow_mut().take().unwrap();
	result
}

#[wasm_bindgen_test]
fn nothing_defined_before_install() {
	let global = Object::new();
	assert!(get(&global, "detectImageFormats").is_undefined());

	let global = installed();
	assert!(get(&global, "detectImageFormats").is_function());
	assert!(get(&global, "detectImageFormatsDefault").is_function());
}

#[wasm_bindgen_test]
async fn partial_config() {
	let config = Object::new();
	Reflect::set(&config, &"avif".into(), &true.into()).unwrap();
	Reflect::set(&config, &"webp".into(), &false.into()).unwrap();
	Reflect::set(&config, &"jxl".into(), &true.into()).unwrap();

	let result = detect(&config).await;

	assert!(get(&result, "avif").as_bool().is_some());
	assert!(get(&result, "webp").is_null());
	assert!(get(&result, "jxl").as_bool().is_some());
	assert!(get(&result, "time").as_f64().unwrap() >= 0.);
}

#[wasm_bindgen_test]
async fn missing_config_enables_all() {
	let result = detect(&JsValue::UNDEFINED).await;

	for name in ["avif", "webp", "jxl"] {
		assert!(get(&result, name).as_bool().is_some(), "{name} has no verdict");
	}
}

#[wasm_bindgen_test]
async fn all_disabled() {
	let config = Object::new();

	for name in ["avif", "webp", "jxl"] {
		Reflect::set(&config, &name.into(), &false.into()).unwrap();
	}

	let result = detect(&config).await;

	for name in ["avif", "webp", "jxl"] {
		assert!(get(&result, name).is_null(), "{name} was probed");
	}
}

#[wasm_bindgen_test]
async fn malformed_delay_is_ignored() {
	let config = Object::new();
	Reflect::set(&config, &"delay".into(), &"soon".into()).unwrap();
	Reflect::set(&config, &"avif".into(), &false.into()).unwrap();
	Reflect::set(&config, &"jxl".into(), &false.into()).unwrap();

	let result = detect(&config).await;

	assert!(get(&result, "webp").as_bool().is_some());
	assert!(get(&result, "time").as_f64().unwrap() < 1000.);
}

#[wasm_bindgen_test]
async fn delay_in_milliseconds() {
	let config = Object::new();
	Reflect::set(&config, &"delay".into(), &150.into()).unwrap();

	let result = detect(&config).await;

	assert!(get(&result, "time").as_f64().unwrap() >= 150.);
}

#[wasm_bindgen_test]
async fn fractional_delay_is_rounded_up() {
	let config = Object::new();
	Reflect::set(&config, &"delay".into(), &1.5.into()).unwrap();
	Reflect::set(&config, &"avif".into(), &false.into()).unwrap();
	Reflect::set(&config, &"jxl".into(), &false.into()).unwrap();

	let result = detect(&config).await;

	assert!(get(&result, "time").as_f64().unwrap() >= 1.5);
}

#[wasm_bindgen_test]
async fn non_boolean_flags_stay_enabled() {
	let config = Object::new();
	Reflect::set(&config, &"avif".into(), &0.into()).unwrap();
	Reflect::set(&config, &"webp".into(), &JsValue::NULL).unwrap();
	Reflect::set(&config, &"jxl".into(), &"".into()).unwrap();

	let result = detect(&config).await;

	for name in ["avif", "webp", "jxl"] {
		assert!(get(&result, name).as_bool().is_some(), "{name} has no verdict");
	}
}

#[wasm_bindgen_test]
fn non_function_callback_throws() {
	let detect = function(&installed(), "detectImageFormats");
	let error = detect
		.call1(&JsValue::UNDEFINED, &"callback".into())
		.unwrap_err();

	assert!(error.is_instance_of::<js_sys::TypeError>());
}

#[wasm_bindgen_test]
async fn default_marks_document() {
	let document = util::document();
	let detect_default = function(&installed(), "detectImageFormatsDefault");

	detect_default
		.call1(&JsValue::UNDEFINED, &document)
		.unwrap();

	let body = document.body().unwrap();

	while body.class_list().length() < 3 {
		util::sleep(util::SETTLE_DURATION).await;
	}
}

#[wasm_bindgen_test]
fn default_rejects_non_document() {
	let detect_default = function(&installed(), "detectImageFormatsDefault");

	detect_default
		.call1(&JsValue::UNDEFINED, &Object::new())
		.unwrap_err();
}
