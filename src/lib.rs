mod cli;
mod error;
mod pixel;
mod png_decoder;
mod report;
mod validate;

use std::{
	fs::File,
	io::{BufRead, BufReader, Read, Seek},
	path::Path,
};

use image::{DynamicImage, ImageFormat, guess_format};

pub use crate::{
	cli::{Args, Config, normalize_flags},
	error::{DecodeError, Error},
	pixel::{Bounds, Color, alpha_to_float, get_pixel, validate_pixel_coords},
	report::format_report,
	validate::{SUPPORTED_EXTENSIONS, validate_filepath, validate_filetype},
};
use crate::png_decoder::PngDecoder;


/// Decodes a PNG or JPEG stream, choosing the codec from the leading magic bytes.
pub fn load_image_from_reader<R: BufRead + Seek>(mut reader: R) -> Result<(ImageFormat, DynamicImage), Error> {
	// Guess format
	let mut header = Vec::with_capacity(16);
	reader.by_ref().take(16).read_to_end(&mut header)?;
	reader.rewind()?;
	let Ok(format) = guess_format(&header) else {
		return Err(DecodeError::UnsupportedFormat.into());
	};

	let img = match format {
		ImageFormat::Png => {
			let decoder = PngDecoder::new(reader)?;
			if decoder.is_animated() {
				return Err(DecodeError::Animated.into());
			}
			DynamicImage::from_decoder(decoder)?
		},
		ImageFormat::Jpeg => {
			let decoder = image::codecs::jpeg::JpegDecoder::new(reader)?;
			DynamicImage::from_decoder(decoder)?
		},
		other => {
			log::debug!("sniffed {:?}, which is not a registered format", other);
			return Err(DecodeError::UnsupportedFormat.into());
		},
	};

	log::debug!("decoded {:?} image, {}x{} {:?}", format, img.width(), img.height(), img.color());
	Ok((format, img))
}


/// Validates `path` and decodes the image it names.
///
/// The extension is only a gate: the codec is still picked from the file contents.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<(ImageFormat, DynamicImage), Error> {
	let path = path.as_ref();
	validate_filetype(path, SUPPORTED_EXTENSIONS)?;
	validate_filepath(path)?;

	let file = File::open(path)?;
	let reader = BufReader::new(file);

	load_image_from_reader(reader)
}


/// Runs the whole lookup for one `Config` and returns the line to print.
pub fn probe(config: &Config) -> Result<String, Error> {
	let (_, img) = load_image(&config.image_path)?;
	let color = get_pixel(&img, config.x, config.y)?;

	Ok(format_report(config.x, config.y, color, config.alpha_as_float))
}
