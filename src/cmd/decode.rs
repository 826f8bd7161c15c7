use std::fs;
use std::path::PathBuf;

use torsort::bencode::{self, DecodeOptions, Value};

use crate::cmd::util::json_escape;

#[derive(clap::Args)]
pub struct Args {
	pub file: PathBuf,
	/// Nesting-depth ceiling for untrusted input.
	#[arg(long = "max-depth")]
	pub max_depth: Option<u32>,
	#[arg(long)]
	pub json: bool,
}

/// Output truncation limits for printed value trees.
#[derive(Debug, Clone, Copy)]
pub struct PrintOptions {
	/// Maximum number of entries printed per list or dictionary.
	pub max_items: usize,
	/// Maximum number of Unicode scalar values printed for strings.
	pub max_string_len: usize,
	/// Maximum recursive print depth for nested containers.
	pub max_print_depth: u32,
}

impl Default for PrintOptions {
	fn default() -> Self {
		Self {
			max_items: 32,
			max_string_len: 160,
			max_print_depth: 8,
		}
	}
}

/// Decode a file and print its value tree.
pub fn run(args: Args) -> crate::cmd::Result<()> {
	let Args {
		file: path,
		max_depth,
		json,
	} = args;

	let mut options = DecodeOptions::default();
	if let Some(max_depth) = max_depth {
		options.max_depth = max_depth;
	}

	let raw = fs::read(&path)?;
	let value = bencode::decode_with_options(&raw, &options)?;

	if json {
		println!("{{");
		println!("  \"path\": \"{}\",", json_escape(&path.display().to_string()));
		println!("  \"bytes\": {},", raw.len());
		println!("  \"value\": {}", value_json(&value));
		println!("}}");
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("bytes: {}", raw.len());
	println!("decoded:");
	print_value(&value, 2, 0, PrintOptions::default());

	Ok(())
}

fn print_value(value: &Value, indent: usize, depth: u32, options: PrintOptions) {
	let pad = " ".repeat(indent);
	match value {
		Value::Integer(number) => println!("{pad}{number}"),
		Value::Bytes(bytes) => println!("{pad}{}", render_bytes(bytes, options.max_string_len)),
		Value::List(items) => {
			if depth >= options.max_print_depth {
				println!("{pad}[... {} items]", items.len());
				return;
			}
			println!("{pad}[");
			for item in items.iter().take(options.max_items) {
				print_value(item, indent + 2, depth + 1, options);
			}
			if items.len() > options.max_items {
				println!("{pad}  ... {} more", items.len() - options.max_items);
			}
			println!("{pad}]");
		}
		Value::Dict(entries) => {
			if depth >= options.max_print_depth {
				println!("{pad}{{... {} entries}}", entries.len());
				return;
			}
			println!("{pad}{{");
			for (key, item) in entries.iter().take(options.max_items) {
				print!("{pad}  {} = ", render_bytes(key, options.max_string_len));
				if matches!(item, Value::List(_) | Value::Dict(_)) {
					println!();
					print_value(item, indent + 4, depth + 1, options);
				} else {
					print_value(item, 0, depth + 1, options);
				}
			}
			if entries.len() > options.max_items {
				println!("{pad}  ... {} more entries", entries.len() - options.max_items);
			}
			println!("{pad}}}");
		}
	}
}

fn render_bytes(bytes: &[u8], max_len: usize) -> String {
	match std::str::from_utf8(bytes) {
		Ok(text) if !text.chars().any(char::is_control) => format!("\"{}\"", truncate(text, max_len)),
		_ => format!("bytes[{}]", bytes.len()),
	}
}

fn truncate(input: &str, max_len: usize) -> String {
	if input.chars().count() <= max_len {
		return input.to_owned();
	}
	let out: String = input.chars().take(max_len).collect();
	format!("{out}...")
}

/// Render a value as JSON. Integers become strings because they may exceed
/// any JSON number range; byte strings are rendered as lossy UTF-8.
fn value_json(value: &Value) -> String {
	match value {
		Value::Integer(number) => format!("\"{number}\""),
		Value::Bytes(bytes) => format!("\"{}\"", json_escape(&String::from_utf8_lossy(bytes))),
		Value::List(items) => {
			let inner: Vec<String> = items.iter().map(value_json).collect();
			format!("[{}]", inner.join(","))
		}
		Value::Dict(entries) => {
			let inner: Vec<String> = entries
				.iter()
				.map(|(key, item)| format!("\"{}\":{}", json_escape(&String::from_utf8_lossy(key)), value_json(item)))
				.collect();
			format!("{{{}}}", inner.join(","))
		}
	}
}
