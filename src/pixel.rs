use image::{DynamicImage, GenericImageView, Pixel, Rgba};

use crate::error::Error;


/// Addressable pixel range of a raster, half-open on the max side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
	pub min_x: i64,
	pub min_y: i64,
	pub max_x: i64,
	pub max_y: i64,
}

impl Bounds {
	pub fn of(image: &DynamicImage) -> Bounds {
		let (width, height) = image.dimensions();
		Bounds {
			min_x: 0,
			min_y: 0,
			max_x: i64::from(width),
			max_y: i64::from(height),
		}
	}

	pub fn contains(&self, x: i64, y: i64) -> bool {
		(self.min_x..self.max_x).contains(&x) && (self.min_y..self.max_y).contains(&y)
	}
}

impl std::fmt::Display for Bounds {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "[{}, {}) x [{}, {})", self.min_x, self.max_x, self.min_y, self.max_y)
	}
}


/// Straight-alpha colour, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: u8,
}

impl Color {
	pub fn alpha_f64(&self) -> f64 {
		alpha_to_float(self.a)
	}
}

impl From<Rgba<u8>> for Color {
	fn from(Rgba([r, g, b, a]): Rgba<u8>) -> Self {
		Color { r, g, b, a }
	}
}

impl From<Rgba<u16>> for Color {
	fn from(Rgba([r, g, b, a]): Rgba<u16>) -> Self {
		Color {
			r: narrow(r),
			g: narrow(g),
			b: narrow(b),
			a: narrow(a),
		}
	}
}


pub fn alpha_to_float(alpha: u8) -> f64 {
	f64::from(alpha) / 255.0
}


/// Maps 0..=65535 onto 0..=255 by integer division, so only 65535 maps to 255.
fn narrow(v: u16) -> u8 {
	(v / 257) as u8
}


pub fn validate_pixel_coords(image: &DynamicImage, x: i64, y: i64) -> Result<(), Error> {
	let bounds = Bounds::of(image);
	if !bounds.contains(x, y) {
		return Err(Error::OutOfBounds { x, y, bounds });
	}
	Ok(())
}


/// Reads the pixel at `(x, y)` as straight-alpha RGBA8.
///
/// `image` keeps alpha unassociated for every sample type, so the only conversion needed is
/// the bit depth. 16-bit buffers are narrowed here; anything else goes through `image`'s
/// own RGBA8 conversion.
pub fn get_pixel(image: &DynamicImage, x: i64, y: i64) -> Result<Color, Error> {
	validate_pixel_coords(image, x, y)?;
	// In bounds, so both fit in u32.
	let (x, y) = (x as u32, y as u32);

	let color: Color = match image {
		DynamicImage::ImageLuma16(buf) => buf.get_pixel(x, y).to_rgba().into(),
		DynamicImage::ImageLumaA16(buf) => buf.get_pixel(x, y).to_rgba().into(),
		DynamicImage::ImageRgb16(buf) => buf.get_pixel(x, y).to_rgba().into(),
		DynamicImage::ImageRgba16(buf) => (*buf.get_pixel(x, y)).into(),
		_ => image.get_pixel(x, y).into(),
	};
	Ok(color)
}


#[cfg(test)]
mod tests {
	use image::{ImageBuffer, Luma, LumaA, RgbImage, RgbaImage};

	use super::*;

	#[test]
	fn alpha_to_float_matches_division() {
		for alpha in 0..=u8::MAX {
			assert!((alpha_to_float(alpha) - f64::from(alpha) / 255.0).abs() < 1e-6);
		}
		assert_eq!(alpha_to_float(0), 0.0);
		assert_eq!(alpha_to_float(255), 1.0);
		assert!((alpha_to_float(128) - 0.501961).abs() < 1e-6);
	}

	#[test]
	fn narrow_divides_by_257() {
		assert_eq!(narrow(0), 0);
		assert_eq!(narrow(256), 0);
		assert_eq!(narrow(257), 1);
		assert_eq!(narrow(1000), 3);
		assert_eq!(narrow(0x8080), 128);
		assert_eq!(narrow(65534), 254);
		assert_eq!(narrow(u16::MAX), 255);
	}

	#[test]
	fn bounds_are_half_open() {
		let image = DynamicImage::ImageRgb8(RgbImage::new(600, 400));
		let bounds = Bounds::of(&image);
		assert_eq!(bounds, Bounds { min_x: 0, min_y: 0, max_x: 600, max_y: 400 });

		assert!(validate_pixel_coords(&image, 0, 0).is_ok());
		assert!(validate_pixel_coords(&image, 599, 399).is_ok());
		assert!(validate_pixel_coords(&image, 100, 100).is_ok());
		for (x, y) in [(600, 0), (0, 400), (600, 400), (-1, -1), (1, -100), (1000, 1), (601, 240)] {
			match validate_pixel_coords(&image, x, y) {
				Err(Error::OutOfBounds { x: ex, y: ey, bounds: b }) => {
					assert_eq!((ex, ey), (x, y));
					assert_eq!(b, bounds);
				},
				other => panic!("expected OutOfBounds for ({x}, {y}), got {other:?}"),
			}
		}
	}

	#[test]
	fn out_of_bounds_never_returns_a_color() {
		let image = DynamicImage::ImageRgba8(RgbaImage::new(4, 4));
		assert!(get_pixel(&image, 4, 0).is_err());
		assert!(get_pixel(&image, -1, 2).is_err());
		assert!(get_pixel(&image, i64::MAX, i64::MIN).is_err());
	}

	#[test]
	fn eight_bit_pixels_pass_through() {
		let mut buf = RgbaImage::new(3, 2);
		buf.put_pixel(2, 1, Rgba([10, 20, 30, 128]));
		let image = DynamicImage::ImageRgba8(buf);
		assert_eq!(get_pixel(&image, 2, 1).unwrap(), Color { r: 10, g: 20, b: 30, a: 128 });
		assert_eq!(get_pixel(&image, 0, 0).unwrap(), Color { r: 0, g: 0, b: 0, a: 0 });
	}

	#[test]
	fn grayscale_expands_to_equal_channels() {
		let buf = ImageBuffer::from_pixel(2, 2, Luma([189u8]));
		let image = DynamicImage::ImageLuma8(buf);
		assert_eq!(get_pixel(&image, 1, 1).unwrap(), Color { r: 189, g: 189, b: 189, a: 255 });
	}

	#[test]
	fn sixteen_bit_pixels_are_narrowed() {
		let image = DynamicImage::ImageLuma16(ImageBuffer::from_pixel(2, 2, Luma([1000u16])));
		assert_eq!(get_pixel(&image, 0, 0).unwrap(), Color { r: 3, g: 3, b: 3, a: 255 });

		let image = DynamicImage::ImageLumaA16(ImageBuffer::from_pixel(2, 2, LumaA([u16::MAX, 0x8080])));
		assert_eq!(get_pixel(&image, 1, 0).unwrap(), Color { r: 255, g: 255, b: 255, a: 128 });

		let image = DynamicImage::ImageRgba16(ImageBuffer::from_pixel(1, 1, Rgba([257u16, 514, 65534, u16::MAX])));
		assert_eq!(get_pixel(&image, 0, 0).unwrap(), Color { r: 1, g: 2, b: 254, a: 255 });
	}
}
