//! Global context probes run in.

use js_sys::Function;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Window, WorkerGlobalScope};

use super::js::GlobalExt;

/// Global context.
pub(super) enum Global {
	/// [`Window`].
	Window(Window),
	/// [`WorkerGlobalScope`].
	Worker(WorkerGlobalScope),
}

thread_local! {
	/// [`Global`] of this thread, [`None`] in worklets.
	pub(super) static GLOBAL: Option<Global> = {
		let global: GlobalExt = js_sys::global().unchecked_into();

		if !global.window().is_undefined() {
			Some(Global::Window(global.unchecked_into()))
		} else if !global.worker_global_scope().is_undefined() {
			Some(Global::Worker(global.unchecked_into()))
		} else {
			None
		}
	};
}

impl Global {
	/// Calls `handler` after `timeout` milliseconds.
	pub(super) fn set_timeout(&self, handler: &Function, timeout: i32) -> Result<i32, JsValue> {
		match self {
			Self::Window(window) => {
				window.set_timeout_with_callback_and_timeout_and_arguments_0(handler, timeout)
			}
			Self::Worker(worker) => {
				worker.set_timeout_with_callback_and_timeout_and_arguments_0(handler, timeout)
			}
		}
	}
}
