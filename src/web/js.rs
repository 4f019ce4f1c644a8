//! Bindings to the JS API.

use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::JsValue;

#[wasm_bindgen]
extern "C" {
	/// Global object, used to determine its type.
	pub(super) type GlobalExt;

	#[wasm_bindgen(method, getter, js_name = Window)]
	pub(super) fn window(this: &GlobalExt) -> JsValue;

	#[wasm_bindgen(method, getter, js_name = WorkerGlobalScope)]
	pub(super) fn worker_global_scope(this: &GlobalExt) -> JsValue;
}
