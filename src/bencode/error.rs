use thiserror::Error;

/// Module-local result type.
pub type Result<T> = std::result::Result<T, BencodeError>;

/// Errors produced while decoding bencode data.
#[derive(Debug, Error)]
pub enum BencodeError {
	/// Lookahead byte matches no value introducer.
	#[error("unknown tag byte 0x{byte:02x} at offset {at}")]
	MalformedTag {
		/// Byte offset of the rejected tag.
		at: usize,
		/// Rejected byte.
		byte: u8,
	},
	/// Not enough bytes remained for a requested read.
	#[error("unexpected eof at offset {at}, need {need} bytes, remaining {rem}")]
	UnexpectedEof {
		/// Byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// A token contained a byte other than the one required next.
	#[error("expected {expected} at offset {at}, got 0x{got:02x}")]
	UnexpectedByte {
		/// Byte offset of the rejected byte.
		at: usize,
		/// Description of the required byte.
		expected: &'static str,
		/// Actual byte read.
		got: u8,
	},
	/// Integer literal or length prefix has a superfluous leading zero.
	#[error("invalid leading zero in {what} at offset {at}")]
	LeadingZero {
		/// Byte offset of the first digit.
		at: usize,
		/// Token kind being parsed.
		what: &'static str,
	},
	/// Integer literal is `-0`.
	#[error("negative zero integer at offset {at}")]
	NegativeZero {
		/// Byte offset of the minus sign.
		at: usize,
	},
	/// Dictionary key position holds a non-string value.
	#[error("non-string dictionary key ({got}) at offset {at}")]
	NonStringKey {
		/// Byte offset of the key introducer.
		at: usize,
		/// Variant label of the offending key.
		got: &'static str,
	},
	/// Bytes remain after the single top-level value.
	#[error("trailing data after value: {rem} bytes at offset {at}")]
	TrailingData {
		/// Byte offset where the value ended.
		at: usize,
		/// Unconsumed bytes.
		rem: usize,
	},
	/// Nesting depth exceeded the configured ceiling.
	#[error("decode depth exceeded (max={max_depth})")]
	DepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Declared string length does not fit in memory.
	#[error("string length at offset {at} exceeds addressable range")]
	LengthOverflow {
		/// Byte offset of the length prefix.
		at: usize,
	},
}
