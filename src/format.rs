//! Image formats that can be probed and their embedded samples.

use std::fmt::{self, Display, Formatter};

/// An image format whose decoding support can be detected.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ImageFormat {
	/// [AVIF](https://aomediacodec.github.io/av1-avif/).
	Avif,
	/// [WebP](https://developers.google.com/speed/webp).
	WebP,
	/// [JPEG XL](https://jpeg.org/jpegxl/).
	Jxl,
}

impl ImageFormat {
	/// All formats, in the order they are probed.
	pub const ALL: [Self; 3] = [Self::Avif, Self::WebP, Self::Jxl];

	/// Short lowercase name, as used in CSS marker classes and JS result
	/// objects.
	#[must_use]
	pub const fn name(self) -> &'static str {
		match self {
			Self::Avif => "avif",
			Self::WebP => "webp",
			Self::Jxl => "jxl",
		}
	}

	/// MIME type of the format.
	#[must_use]
	pub const fn mime_type(self) -> &'static str {
		match self {
			Self::Avif => "image/avif",
			Self::WebP => "image/webp",
			Self::Jxl => "image/jxl",
		}
	}

	/// A minimal valid 1×1 image encoded in this format.
	#[must_use]
	pub const fn sample(self) -> &'static [u8] {
		match self {
			Self::Avif => include_bytes!("samples/pixel.avif"),
			Self::WebP => include_bytes!("samples/pixel.webp"),
			Self::Jxl => include_bytes!("samples/pixel.jxl"),
		}
	}
}

impl Display for ImageFormat {
	fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
		formatter.write_str(match self {
			Self::Avif => "AVIF",
			Self::WebP => "WebP",
			Self::Jxl => "JPEG XL",
		})
	}
}
