//! Implementation of [`DetectionFuture`].

use std::cell::{Cell, RefCell};
use std::fmt::{self, Debug, Formatter};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

use crate::DetectionResult;

/// Waits for a detection run to complete.
#[must_use = "does nothing if not polled"]
pub struct DetectionFuture(Option<Rc<Shared>>);

/// Completes the paired [`DetectionFuture`].
pub(crate) struct Sender(Rc<Shared>);

/// State shared between [`DetectionFuture`] and [`Sender`].
#[derive(Debug, Default)]
struct Shared {
	/// Registered by the last pending poll.
	waker: RefCell<Option<Waker>>,
	/// Delivered result.
	result: Cell<Option<DetectionResult>>,
}

impl Debug for DetectionFuture {
	fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
		formatter
			.debug_tuple("DetectionFuture")
			.field(&self.0.as_ref().map(|shared| shared.result.get()))
			.finish()
	}
}

impl DetectionFuture {
	/// Creates a pending [`DetectionFuture`] and the [`Sender`] completing it.
	pub(crate) fn new() -> (Self, Sender) {
		let shared = Rc::new(Shared::default());
		(Self(Some(Rc::clone(&shared))), Sender(shared))
	}

	/// Returns the result if detection has already completed.
	///
	/// # Panics
	///
	/// If called after returning the result, either from here or by polling.
	#[allow(clippy::wrong_self_convention)]
	#[track_caller]
	pub fn into_inner(&mut self) -> Option<DetectionResult> {
		let result = self.0.as_ref().expect("polled after `Ready`").result.take();

		if result.is_some() {
			self.0.take();
		}

		result
	}
}

impl Future for DetectionFuture {
	type Output = DetectionResult;

	#[track_caller]
	fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
		let shared = self.0.as_ref().expect("polled after `Ready`");

		// Short-circuit.
		if let Some(result) = shared.result.take() {
			self.0.take();
			return Poll::Ready(result);
		}

		*shared.waker.borrow_mut() = Some(cx.waker().clone());

		if let Some(result) = shared.result.take() {
			self.0.take();
			Poll::Ready(result)
		} else {
			Poll::Pending
		}
	}
}

impl Sender {
	/// Delivers `result` and wakes the [`DetectionFuture`].
	pub(crate) fn send(self, result: DetectionResult) {
		self.0.result.set(Some(result));

		if let Some(waker) = self.0.waker.borrow_mut().take() {
			waker.wake();
		}
	}
}
