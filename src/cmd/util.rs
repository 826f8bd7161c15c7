use std::path::Path;

use torsort::catalog::{Catalog, CatalogError};

/// Load the catalog file when given, otherwise start empty.
pub(crate) fn load_catalog(path: Option<&Path>) -> Result<Catalog, CatalogError> {
	match path {
		Some(path) => Catalog::load(path),
		None => Ok(Catalog::empty()),
	}
}

/// Escape text for embedding in JSON string values.
pub(crate) fn json_escape(input: &str) -> String {
	let mut out = String::with_capacity(input.len());
	for ch in input.chars() {
		match ch {
			'"' => out.push_str("\\\""),
			'\\' => out.push_str("\\\\"),
			'\n' => out.push_str("\\n"),
			'\r' => out.push_str("\\r"),
			'\t' => out.push_str("\\t"),
			c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
			c => out.push(c),
		}
	}
	out
}
