use std::io::{BufRead, Seek};

use image::{
	ColorType, ExtendedColorType, ImageDecoder, ImageError, ImageFormat, ImageResult, Limits,
	error::{DecodingError, LimitError, LimitErrorKind, ParameterError, ParameterErrorKind, UnsupportedError, UnsupportedErrorKind},
};

use crate::error::{DecodeError, Error};


/// PNG decoder over the `png` crate that keeps 16-bit samples.
///
/// Header and colour-type failures come back as this crate's `Error` (`DecodeError::Png` for
/// malformed streams) rather than being folded into an `ImageError` the way
/// `image::codecs::png::PngDecoder` reports them. Animation is read off the header `Info`.
pub struct PngDecoder<R: BufRead + Seek> {
	color_type: ColorType,
	reader: png::Reader<R>,
}


impl<R: BufRead + Seek> PngDecoder<R> {
	pub fn new(r: R) -> Result<PngDecoder<R>, Error> {
		let limits = Limits::default();
		limits.check_support(&image::LimitSupport::default())?;

		let max_bytes = usize::try_from(limits.max_alloc.unwrap_or(u64::MAX)).unwrap_or(usize::MAX);
		let mut decoder = png::Decoder::new_with_limits(r, png::Limits { bytes: max_bytes });

		let info = decoder.read_header_info()?;
		limits.check_dimensions(info.width, info.height)?;

		// EXPAND widens palettes and bpc < 8 to 8 bpc, but leaves 16 bpc alone.
		decoder.set_transformations(png::Transformations::EXPAND);
		let reader = decoder.read_info()?;
		let color_type = match reader.output_color_type() {
			(png::ColorType::Grayscale, png::BitDepth::Eight) => ColorType::L8,
			(png::ColorType::Grayscale, png::BitDepth::Sixteen) => ColorType::L16,
			(png::ColorType::GrayscaleAlpha, png::BitDepth::Eight) => ColorType::La8,
			(png::ColorType::GrayscaleAlpha, png::BitDepth::Sixteen) => ColorType::La16,
			(png::ColorType::Rgb, png::BitDepth::Eight) => ColorType::Rgb8,
			(png::ColorType::Rgb, png::BitDepth::Sixteen) => ColorType::Rgb16,
			(png::ColorType::Rgba, png::BitDepth::Eight) => ColorType::Rgba8,
			(png::ColorType::Rgba, png::BitDepth::Sixteen) => ColorType::Rgba16,
			(png::ColorType::Indexed, bits) => return Err(unsupported_color(ExtendedColorType::Unknown(bits as u8))),
			(color, bits) => return Err(unsupported_color(low_depth_color(color, bits))),
		};

		Ok(PngDecoder { color_type, reader })
	}

	/// Returns if the image contains an animation.
	///
	/// Only the default image would be reported by a pixel lookup, and whether that image
	/// is part of the animation is up to the file, so callers reject these outright.
	pub fn is_animated(&self) -> bool {
		self.reader.info().is_animated()
	}
}


impl<R: BufRead + Seek> ImageDecoder for PngDecoder<R> {
	fn dimensions(&self) -> (u32, u32) {
		self.reader.info().size()
	}

	fn color_type(&self) -> ColorType {
		self.color_type
	}

	fn icc_profile(&mut self) -> ImageResult<Option<Vec<u8>>> {
		Ok(self.reader.info().icc_profile.as_ref().map(|x| x.to_vec()))
	}

	fn read_image(mut self, buf: &mut [u8]) -> ImageResult<()> {
		use byteorder_lite::{BigEndian, ByteOrder, NativeEndian};

		assert_eq!(u64::try_from(buf.len()), Ok(self.total_bytes()));
		self.reader.next_frame(buf).map_err(error_from_png)?;

		// PNG samples are big endian; `read_image` must hand back native endianness.
		match self.color_type.bytes_per_pixel() / self.color_type.channel_count() {
			1 => (),
			2 => buf.chunks_exact_mut(2).for_each(|c| {
				let v = BigEndian::read_u16(c);
				NativeEndian::write_u16(c, v);
			}),
			_ => unreachable!(),
		}
		Ok(())
	}

	fn read_image_boxed(self: Box<Self>, buf: &mut [u8]) -> ImageResult<()> {
		(*self).read_image(buf)
	}

	fn set_limits(&mut self, limits: Limits) -> ImageResult<()> {
		limits.check_support(&image::LimitSupport::default())?;
		let (width, height) = self.reader.info().size();
		limits.check_dimensions(width, height)
	}
}


fn low_depth_color(color: png::ColorType, bits: png::BitDepth) -> ExtendedColorType {
	match (color, bits) {
		(png::ColorType::Grayscale, png::BitDepth::One) => ExtendedColorType::L1,
		(png::ColorType::Grayscale, png::BitDepth::Two) => ExtendedColorType::L2,
		(png::ColorType::Grayscale, png::BitDepth::Four) => ExtendedColorType::L4,
		(png::ColorType::GrayscaleAlpha, png::BitDepth::One) => ExtendedColorType::La1,
		(png::ColorType::GrayscaleAlpha, png::BitDepth::Two) => ExtendedColorType::La2,
		(png::ColorType::GrayscaleAlpha, png::BitDepth::Four) => ExtendedColorType::La4,
		(png::ColorType::Rgb, png::BitDepth::One) => ExtendedColorType::Rgb1,
		(png::ColorType::Rgb, png::BitDepth::Two) => ExtendedColorType::Rgb2,
		(png::ColorType::Rgb, png::BitDepth::Four) => ExtendedColorType::Rgb4,
		(png::ColorType::Rgba, png::BitDepth::One) => ExtendedColorType::Rgba1,
		(png::ColorType::Rgba, png::BitDepth::Two) => ExtendedColorType::Rgba2,
		(png::ColorType::Rgba, png::BitDepth::Four) => ExtendedColorType::Rgba4,
		(_, bits) => ExtendedColorType::Unknown(bits as u8),
	}
}


fn unsupported_color(ect: ExtendedColorType) -> Error {
	Error::Decode(DecodeError::Image(ImageError::Unsupported(UnsupportedError::from_format_and_kind(
		ImageFormat::Png.into(),
		UnsupportedErrorKind::Color(ect),
	))))
}


fn error_from_png(err: png::DecodingError) -> ImageError {
	match err {
		png::DecodingError::IoError(err) => ImageError::IoError(err),
		err @ png::DecodingError::Format(_) => ImageError::Decoding(DecodingError::new(ImageFormat::Png.into(), err)),
		err @ png::DecodingError::Parameter(_) => ImageError::Parameter(ParameterError::from_kind(ParameterErrorKind::Generic(err.to_string()))),
		png::DecodingError::LimitsExceeded => ImageError::Limits(LimitError::from_kind(LimitErrorKind::InsufficientMemory)),
	}
}
