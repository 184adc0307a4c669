use clap::builder::{
	Styles,
	styling::{AnsiColor, Effects},
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn styles() -> Styles {
	Styles::styled()
		.header(AnsiColor::Red.on_default() | Effects::BOLD)
		.usage(AnsiColor::Red.on_default() | Effects::BOLD)
		.literal(AnsiColor::Blue.on_default() | Effects::BOLD)
		.placeholder(AnsiColor::Green.on_default())
		.error(AnsiColor::Red.on_default() | Effects::BOLD)
		.valid(AnsiColor::Cyan.on_default())
}

/// Resolves the tracing filter directive for a run.
///
/// Three or more `-v` flags raise the configured level to `info`, four or more to `debug`; lower
/// counts only affect report verbosity and leave `base` untouched.
pub fn log_filter(base: &str, verbose: u8) -> String {
	let base = base.trim();

	match verbose {
		0..=2 if base.is_empty() => "warn".to_string(),
		0..=2 => base.to_string(),
		3 => "info".to_string(),
		_ => "debug".to_string(),
	}
}
