//! Marks a page with CSS classes reflecting format support.

use std::error::Error;
use std::fmt::{self, Display, Formatter};

use wasm_bindgen::JsValue;
use web_sys::{console, Document, Element};

use super::global::{Global, GLOBAL};
use crate::{DetectionConfig, DetectionResult, ImageFormat};

/// Detects all formats and marks the `<body>` of `document` with the
/// classes returned by [`class_name()`].
///
/// Uses the document of the current window if `document` is [`None`].
///
/// # Errors
///
/// If `document` is [`None`] and there is no window, e.g. in a worker.
///
/// A missing `<body>` or failure to modify its classes once detection
/// completes is logged to the console.
pub fn detect_default(document: Option<Document>) -> Result<(), StyleError> {
	let document = match document {
		Some(document) => document,
		None => GLOBAL
			.with(|global| match global {
				Some(Global::Window(window)) => window.document(),
				Some(Global::Worker(_)) | None => None,
			})
			.ok_or(StyleError::NoDocument)?,
	};

	DetectionConfig::new().detect(move |result| {
		let applied = document
			.body()
			.ok_or(StyleError::NoBody)
			.and_then(|body| apply_format_classes(&body, &result));

		if let Err(error) = applied {
			console::warn_1(&format!("could not mark image format support: {error}").into());
		}
	});

	Ok(())
}

/// Adds the class returned by [`class_name()`] to `element` for every format
/// with a known verdict in `result`, removing the opposite class.
///
/// Formats without a verdict leave `element` untouched.
///
/// # Errors
///
/// If modifying the class list of `element` failed.
pub fn apply_format_classes(element: &Element, result: &DetectionResult) -> Result<(), StyleError> {
	let class_list = element.class_list();

	for format in ImageFormat::ALL {
		if let Some(supported) = result.get(format) {
			class_list
				.remove_1(&class_name(format, !supported))
				.and_then(|()| class_list.add_1(&class_name(format, supported)))
				.map_err(StyleError::class_list)?;
		}
	}

	Ok(())
}

/// Marker class for `format`: `has-<format>` if `supported`, otherwise
/// `no-<format>`.
#[must_use]
pub fn class_name(format: ImageFormat, supported: bool) -> String {
	let prefix = if supported { "has" } else { "no" };
	format!("{prefix}-{}", format.name())
}

/// Error returned by [`detect_default()`] and [`apply_format_classes()`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StyleError {
	/// No [`Document`] was passed and none is available.
	NoDocument,
	/// The [`Document`] has no `<body>`.
	NoBody,
	/// Modifying the class list failed.
	ClassList(String),
}

impl StyleError {
	/// Wraps a JS exception thrown by `DOMTokenList`.
	fn class_list(error: JsValue) -> Self {
		Self::ClassList(format!("{error:?}"))
	}
}

impl Display for StyleError {
	fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Self::NoDocument => write!(formatter, "no `Document` available"),
			Self::NoBody => write!(formatter, "`Document` has no body"),
			Self::ClassList(error) => write!(formatter, "failed to modify class list: {error}"),
		}
	}
}

impl Error for StyleError {}
