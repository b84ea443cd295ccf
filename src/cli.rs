use std::{ffi::OsString, path::PathBuf};

use clap::{ArgAction, Parser};

use crate::error::Error;


/// Report the RGBA value of one pixel in a JPEG or PNG image.
#[derive(Parser, Debug)]
#[command(version, args_override_self = true)]
pub struct Args {
	/// Path to JPG or PNG file.
	#[arg(long, default_value = "", allow_hyphen_values = true)]
	pub path: String,

	/// X coordinate of the pixel.
	#[arg(short = 'x', long = "x", default_value_t = 0, allow_negative_numbers = true)]
	pub x: i64,

	/// Y coordinate of the pixel.
	#[arg(short = 'y', long = "y", default_value_t = 0, allow_negative_numbers = true)]
	pub y: i64,

	/// Return alpha as a float in [0, 1] instead of an int.
	#[arg(
		long = "af",
		num_args = 0..=1,
		require_equals = true,
		default_missing_value = "true",
		default_value_t = false,
		action = ArgAction::Set
	)]
	pub alpha_as_float: bool,
}


/// Everything one run needs, fixed once argv has been parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
	pub image_path: PathBuf,
	pub x: i64,
	pub y: i64,
	pub alpha_as_float: bool,
}

impl TryFrom<Args> for Config {
	type Error = Error;

	fn try_from(args: Args) -> Result<Self, Self::Error> {
		if args.path.is_empty() {
			return Err(Error::Config("an image path is required (--path)"));
		}

		Ok(Config {
			image_path: PathBuf::from(args.path),
			x: args.x,
			y: args.y,
			alpha_as_float: args.alpha_as_float,
		})
	}
}


/// Rewrites single-dash long flags (`-path`, `-path=a.png`, `-af`) to the double-dash form clap expects.
///
/// Short flags, negative numbers, the value following a flag that takes one, and everything
/// after a bare `--` are left alone.
pub fn normalize_flags<I, T>(args: I) -> Vec<OsString>
where
	I: IntoIterator<Item = T>,
	T: Into<OsString>,
{
	let mut passthrough = false;
	let mut value_next = false;
	let mut out = Vec::new();

	for (i, arg) in args.into_iter().enumerate() {
		let arg: OsString = arg.into();
		// argv[0] is the program name
		if i == 0 || passthrough || value_next {
			value_next = false;
			out.push(arg);
			continue;
		}

		let Some(s) = arg.to_str() else {
			out.push(arg);
			continue;
		};
		if s == "--" {
			passthrough = true;
			out.push(arg);
			continue;
		}

		value_next = takes_value(s);
		match s.strip_prefix('-') {
			Some(rest) if !rest.starts_with('-') && is_long_name(rest) => out.push(format!("--{rest}").into()),
			_ => out.push(arg),
		}
	}

	out
}


/// Flags whose value is the next argument, in any dash spelling.
fn takes_value(arg: &str) -> bool {
	matches!(arg.strip_prefix("--").or_else(|| arg.strip_prefix('-')), Some("path" | "x" | "y"))
}


fn is_long_name(rest: &str) -> bool {
	let name = rest.split_once('=').map_or(rest, |(name, _)| name);
	name.chars().count() > 1 && name.starts_with(|c: char| c.is_ascii_alphabetic())
}
