use std::collections::BTreeMap;

use num_bigint::BigInt;

/// Decoded bencode value tree.
///
/// The union is closed: every wire form maps onto exactly one of these four
/// variants, and decoder and encoder both match on them exhaustively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
	/// Arbitrary-precision integer (`i...e`).
	Integer(BigInt),
	/// Raw byte string (`<len>:<bytes>`), not required to be valid text.
	Bytes(Vec<u8>),
	/// Ordered sequence of values (`l...e`).
	List(Vec<Value>),
	/// Dictionary with byte-string keys (`d...e`). The map keeps keys in
	/// ascending byte-wise order, which is exactly the canonical encoding
	/// order.
	Dict(BTreeMap<Vec<u8>, Value>),
}

impl Value {
	/// Stable lowercase label for the variant.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Integer(_) => "integer",
			Self::Bytes(_) => "bytes",
			Self::List(_) => "list",
			Self::Dict(_) => "dict",
		}
	}

	/// Return the integer payload, if this is an integer.
	pub fn as_integer(&self) -> Option<&BigInt> {
		match self {
			Self::Integer(number) => Some(number),
			_ => None,
		}
	}

	/// Return the raw bytes, if this is a byte string.
	pub fn as_bytes(&self) -> Option<&[u8]> {
		match self {
			Self::Bytes(bytes) => Some(bytes),
			_ => None,
		}
	}

	/// Return the items, if this is a list.
	pub fn as_list(&self) -> Option<&[Value]> {
		match self {
			Self::List(items) => Some(items),
			_ => None,
		}
	}

	/// Return the entries, if this is a dictionary.
	pub fn as_dict(&self) -> Option<&BTreeMap<Vec<u8>, Value>> {
		match self {
			Self::Dict(entries) => Some(entries),
			_ => None,
		}
	}

	/// Look up a dictionary entry by raw key bytes.
	pub fn get(&self, key: &[u8]) -> Option<&Value> {
		self.as_dict().and_then(|entries| entries.get(key))
	}
}
