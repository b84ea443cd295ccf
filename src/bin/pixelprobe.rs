use clap::Parser;
use pixelprobe::{Args, Config};


fn main() {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

	// Usage: pixelprobe -path <image> -x <col> -y <row> [-af]
	let args = Args::parse_from(pixelprobe::normalize_flags(std::env::args_os()));

	let result = Config::try_from(args).and_then(|config| pixelprobe::probe(&config));
	match result {
		Ok(line) => println!("{}", line),
		Err(e) => {
			eprintln!("Error: {}", e);
			std::process::exit(1);
		},
	}
}
