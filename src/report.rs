use crate::pixel::Color;


pub fn format_report(x: i64, y: i64, color: Color, alpha_as_float: bool) -> String {
	let Color { r, g, b, a } = color;
	if alpha_as_float {
		format!("Pixel at ({x}, {y}) has RGBA values of R: {r}, G: {g}, B: {b}, A: {:.6}", color.alpha_f64())
	} else {
		format!("Pixel at ({x}, {y}) has RGBA values of R: {r}, G: {g}, B: {b}, A: {a}")
	}
}
