use std::{error::Error as StdError, path::PathBuf};

use crate::pixel::Bounds;

pub enum Error {
	Config(&'static str),
	EmptyPath,
	NotFound { path: PathBuf, source: std::io::Error },
	IsDirectory(PathBuf),
	UnsupportedType { extension: String, allowed: Vec<String> },
	Io(std::io::Error),
	Decode(DecodeError),
	OutOfBounds { x: i64, y: i64, bounds: Bounds },
}


/// Failures while turning a byte stream into a raster.
pub enum DecodeError {
	UnsupportedFormat,
	Animated,
	Png(png::DecodingError),
	Image(image::ImageError),
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Error::Io(err)
	}
}

impl From<DecodeError> for Error {
	fn from(err: DecodeError) -> Self {
		Error::Decode(err)
	}
}

impl From<png::DecodingError> for Error {
	fn from(err: png::DecodingError) -> Self {
		match err {
			png::DecodingError::IoError(io_err) => Error::Io(io_err),
			_ => Error::Decode(DecodeError::Png(err)),
		}
	}
}

impl From<image::ImageError> for Error {
	fn from(err: image::ImageError) -> Self {
		match err {
			image::ImageError::IoError(io_err) => Error::Io(io_err),
			err => Error::Decode(DecodeError::Image(err)),
		}
	}
}

impl StdError for Error {
	fn source(&self) -> Option<&(dyn StdError + 'static)> {
		match self {
			Error::NotFound { source, .. } => Some(source),
			Error::Io(err) => Some(err),
			Error::Decode(DecodeError::Png(err)) => Some(err),
			Error::Decode(DecodeError::Image(err)) => Some(err),
			_ => None,
		}
	}
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Error::Config(msg) => write!(f, "invalid arguments: {}", msg),
			Error::EmptyPath => write!(f, "no file path provided"),
			Error::NotFound { path, source } => write!(f, "cannot access {}: {}", path.display(), source),
			Error::IsDirectory(path) => write!(f, "expected file path but directory path was provided: {}", path.display()),
			Error::UnsupportedType { extension, allowed } => {
				write!(f, "file type {} is not one of the supported types: [{}]", extension, allowed.join(", "))
			},
			Error::Io(err) => write!(f, "I/O error: {}", err),
			Error::Decode(err) => write!(f, "{}", err),
			Error::OutOfBounds { x, y, bounds } => write!(f, "coordinates ({}, {}) are out of image bounds {}", x, y, bounds),
		}
	}
}

impl std::fmt::Display for DecodeError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			DecodeError::UnsupportedFormat => write!(f, "unsupported image format"),
			DecodeError::Animated => write!(f, "animated images are not supported"),
			DecodeError::Png(err) => write!(f, "PNG decoding error: {}", err),
			DecodeError::Image(err) => write!(f, "decoding error: {}", err),
		}
	}
}

impl std::fmt::Debug for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		std::fmt::Display::fmt(self, f)
	}
}

impl std::fmt::Debug for DecodeError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		std::fmt::Display::fmt(self, f)
	}
}
