//! Implementation of [`Probe`].

use std::future::Future;
use std::ops::Deref;
use std::pin::Pin;
use std::task::{ready, Context, Poll};
use std::time::Duration;

use js_sys::{Array, Promise, Uint8Array};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{console, Blob, BlobPropertyBag, HtmlImageElement, ImageBitmap, Url};

use super::global::{Global, GLOBAL};
use crate::ImageFormat;

/// Checks if a single format can be decoded.
///
/// Waits for the configured delay, then decodes the embedded sample of the
/// format. Resolves to `true` if decoding succeeded.
#[derive(Debug)]
#[must_use = "does nothing if not polled"]
pub(super) struct Probe {
	/// Format being probed.
	format: ImageFormat,
	/// [`None`] after completion.
	state: Option<State>,
}

/// State of [`Probe`].
#[derive(Debug)]
enum State {
	/// Waiting for the delay to pass.
	Delay(JsFuture),
	/// Waiting for the platform to decode the sample.
	Decode {
		/// [`Future`].
		future: JsFuture,
		/// Kept alive until decoding settles.
		source: Source,
	},
	/// Verdict known without decoding.
	Ready(bool),
}

/// What the sample is being decoded with.
#[derive(Debug)]
enum Source {
	/// Used [`HTMLImageElement.decode()`](https://developer.mozilla.org/en-US/docs/Web/API/HTMLImageElement/decode).
	Image {
		/// Image element decoding the sample.
		_image: HtmlImageElement,
		/// Revoked when dropped.
		_url: ObjectUrl,
	},
	/// Used [`createImageBitmap()`](https://developer.mozilla.org/en-US/docs/Web/API/createImageBitmap).
	Bitmap,
}

impl Probe {
	/// Starts probing `format` after `delay`.
	///
	/// Without a working timer the format is reported unsupported.
	pub(super) fn new(format: ImageFormat, delay: Duration) -> Self {
		let state = sleep(delay).map_or(State::Ready(false), State::Delay);

		Self {
			format,
			state: Some(state),
		}
	}
}

impl Future for Probe {
	type Output = bool;

	fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
		let this = self.get_mut();

		loop {
			match this.state.as_mut().expect("`Probe` polled after completion") {
				State::Delay(future) => {
					ready!(Pin::new(future).poll(cx))
						.expect("unexpected failure in `setTimeout` `Promise`");
					this.state = Some(State::decode(this.format));
				}
				State::Decode { future, source } => {
					let supported = match ready!(Pin::new(future).poll(cx)) {
						Ok(value) => {
							if let Source::Bitmap = source {
								value.unchecked_into::<ImageBitmap>().close();
							}

							true
						}
						Err(_) => false,
					};

					this.state.take();
					return Poll::Ready(supported);
				}
				State::Ready(supported) => {
					let supported = *supported;
					this.state.take();
					return Poll::Ready(supported);
				}
			}
		}
	}
}

impl State {
	/// Starts decoding the sample of `format`.
	///
	/// Failing to even start decoding counts as unsupported.
	fn decode(format: ImageFormat) -> Self {
		GLOBAL.with(|global| {
			let Some(global) = global else {
				return Self::Ready(false);
			};

			match Self::decode_with(global, format) {
				Ok(state) => state,
				Err(error) => {
					console::warn_1(
						&format!("could not start decoding {format} sample: {error:?}").into(),
					);
					Self::Ready(false)
				}
			}
		})
	}

	/// Implementation for [`State::decode()`].
	fn decode_with(global: &Global, format: ImageFormat) -> Result<Self, JsValue> {
		let blob = sample_blob(format)?;

		match global {
			Global::Window(_) => {
				let url = ObjectUrl::new(&blob)?;
				let image = HtmlImageElement::new()?;
				image.set_src(&url);
				let future = JsFuture::from(image.decode());

				Ok(Self::Decode {
					future,
					source: Source::Image {
						_image: image,
						_url: url,
					},
				})
			}
			// Workers have no `HTMLImageElement`.
			Global::Worker(worker) => {
				let future = JsFuture::from(worker.create_image_bitmap_with_blob(&blob)?);

				Ok(Self::Decode {
					future,
					source: Source::Bitmap,
				})
			}
		}
	}
}

/// Wraps the sample of `format` in a [`Blob`] of its MIME type.
fn sample_blob(format: ImageFormat) -> Result<Blob, JsValue> {
	let bytes = Uint8Array::from(format.sample());
	let property = BlobPropertyBag::new();
	property.set_type(format.mime_type());

	Blob::new_with_u8_array_sequence_and_options(&Array::of1(&bytes), &property)
}

/// Resolves after `delay`, rounded up to whole milliseconds.
///
/// Returns [`None`] if no timer is available.
fn sleep(delay: Duration) -> Option<JsFuture> {
	let timeout = i32::try_from(timeout_millis(delay)).unwrap_or(i32::MAX);

	GLOBAL.with(|global| {
		let global = global.as_ref()?;
		let mut result = Ok(0);
		let future = JsFuture::from(Promise::new(&mut |resolve, _| {
			result = global.set_timeout(&resolve, timeout);
		}));

		match result {
			Ok(_) => Some(future),
			Err(error) => {
				console::warn_1(&format!("`setTimeout` failed: {error:?}").into());
				None
			}
		}
	})
}

/// Whole milliseconds covering at least `delay`.
fn timeout_millis(delay: Duration) -> u128 {
	(delay.as_nanos() + 999_999) / 1_000_000
}

/// Object URL pointing to a [`Blob`].
#[derive(Debug)]
struct ObjectUrl(String);

impl ObjectUrl {
	/// Creates an object URL for `blob`.
	fn new(blob: &Blob) -> Result<Self, JsValue> {
		Url::create_object_url_with_blob(blob).map(Self)
	}
}

impl Deref for ObjectUrl {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl Drop for ObjectUrl {
	fn drop(&mut self) {
		if let Err(error) = Url::revoke_object_url(&self.0) {
			console::warn_1(&format!("sample `Url` could not be deallocated: {error:?}").into());
		}
	}
}
