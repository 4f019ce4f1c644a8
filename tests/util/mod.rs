#![allow(dead_code)]

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{ready, Context, Poll};
use std::time::Duration;

use futures_util::task::AtomicWaker;
use futures_util::FutureExt;
use js_sys::Promise;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Window, WorkerGlobalScope};

/// Grace period to observe a callback being called more than once.
pub const SETTLE_DURATION: Duration = Duration::from_millis(250);

pub fn window() -> Window {
	js_sys::global().unchecked_into()
}

/// Creates a detached HTML document with an empty `<body>`.
pub fn document() -> Document {
	window()
		.document()
		.unwrap()
		.implementation()
		.unwrap()
		.create_html_document_with_title("test")
		.unwrap()
}

pub struct Sleep(JsFuture);

impl Future for Sleep {
	type Output = ();

	fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
		ready!(self.0.poll_unpin(cx)).unwrap();
		Poll::Ready(())
	}
}

pub fn sleep(duration: Duration) -> Sleep {
	let future = JsFuture::from(Promise::new(&mut |resolve, _| {
		let duration = duration.as_millis().try_into().unwrap();

		let global = js_sys::global();

		if global.is_instance_of::<Window>() {
			global
				.unchecked_into::<Window>()
				.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, duration)
		} else {
			global
				.unchecked_into::<WorkerGlobalScope>()
				.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, duration)
		}
		.unwrap();
	}));

	Sleep(future)
}

/// Replaces `setTimeout()` on the global object with a function that throws
/// until the returned guard is dropped.
pub fn break_set_timeout() -> SetTimeoutGuard {
	let global = js_sys::global();
	let original = js_sys::Reflect::get(&global, &"setTimeout".into()).unwrap();
	let broken = js_sys::Function::new_no_args("throw new Error('timers disabled')");
	js_sys::Reflect::set(&global, &"setTimeout".into(), &broken).unwrap();

	SetTimeoutGuard(original)
}

pub struct SetTimeoutGuard(JsValue);

impl Drop for SetTimeoutGuard {
	fn drop(&mut self) {
		js_sys::Reflect::set(&js_sys::global(), &"setTimeout".into(), &self.0).unwrap();
	}
}

struct Inner {
	waker: AtomicWaker,
	set: AtomicBool,
}

#[derive(Clone)]
pub struct Flag(Arc<Inner>);

impl Flag {
	pub fn new() -> Self {
		Self(Arc::new(Inner {
			waker: AtomicWaker::new(),
			set: AtomicBool::new(false),
		}))
	}

	pub fn signal(&self) {
		self.0.set.store(true, Ordering::Relaxed);
		self.0.waker.wake();
	}
}

impl Future for Flag {
	type Output = ();

	fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
		if self.0.set.load(Ordering::Relaxed) {
			return Poll::Ready(());
		}

		self.0.waker.register(cx.waker());

		if self.0.set.load(Ordering::Relaxed) {
			Poll::Ready(())
		} else {
			Poll::Pending
		}
	}
}
