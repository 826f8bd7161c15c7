use std::collections::BTreeMap;

use num_bigint::BigInt;

use crate::bencode::bytes::Cursor;
use crate::bencode::{BencodeError, Result, Value};

/// Runtime limits for decoding untrusted input.
#[derive(Debug, Clone, Copy)]
pub struct DecodeOptions {
	/// Maximum recursive nesting depth for lists and dictionaries.
	pub max_depth: u32,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self { max_depth: 64 }
	}
}

/// Decode exactly one bencode value spanning the whole buffer.
///
/// Any trailing byte after the value's terminator is a hard failure; a
/// buffer encodes one value, never a sequence of values.
pub fn decode(bytes: &[u8]) -> Result<Value> {
	decode_with_options(bytes, &DecodeOptions::default())
}

/// Decode with an explicit nesting-depth ceiling.
pub fn decode_with_options(bytes: &[u8], options: &DecodeOptions) -> Result<Value> {
	let mut cursor = Cursor::new(bytes);
	let value = decode_value(&mut cursor, options, 0)?;
	if cursor.remaining() > 0 {
		return Err(BencodeError::TrailingData {
			at: cursor.pos(),
			rem: cursor.remaining(),
		});
	}

	Ok(value)
}

/// Decode, converting any failure into `None`.
pub fn try_decode(bytes: &[u8]) -> Option<Value> {
	decode(bytes).ok()
}

fn decode_value(cursor: &mut Cursor<'_>, options: &DecodeOptions, depth: u32) -> Result<Value> {
	let at = cursor.pos();
	match cursor.peek() {
		Some(b'i') => decode_integer(cursor),
		Some(b'l') => decode_list(cursor, options, depth),
		Some(b'd') => decode_dict(cursor, options, depth),
		Some(byte) if byte.is_ascii_digit() => Ok(Value::Bytes(decode_byte_string(cursor)?)),
		Some(byte) => Err(BencodeError::MalformedTag { at, byte }),
		None => Err(BencodeError::UnexpectedEof { at, need: 1, rem: 0 }),
	}
}

fn decode_integer(cursor: &mut Cursor<'_>) -> Result<Value> {
	let _ = cursor.read_byte()?;

	let negative = cursor.peek() == Some(b'-');
	if negative {
		let _ = cursor.read_byte()?;
	}

	let digits_at = cursor.pos();
	let digits = cursor.take_while(|byte| byte.is_ascii_digit());
	if digits.is_empty() {
		return match cursor.peek() {
			Some(byte) => Err(BencodeError::UnexpectedByte {
				at: digits_at,
				expected: "decimal digit",
				got: byte,
			}),
			None => Err(BencodeError::UnexpectedEof {
				at: digits_at,
				need: 1,
				rem: 0,
			}),
		};
	}

	if digits[0] == b'0' && digits.len() > 1 {
		return Err(BencodeError::LeadingZero {
			at: digits_at,
			what: "integer",
		});
	}
	if negative && digits == b"0" {
		return Err(BencodeError::NegativeZero { at: digits_at - 1 });
	}

	cursor.expect_byte(b'e', "'e' integer terminator")?;

	let mut value = parse_decimal(digits);
	if negative {
		value = -value;
	}
	Ok(Value::Integer(value))
}

fn decode_byte_string(cursor: &mut Cursor<'_>) -> Result<Vec<u8>> {
	let len_at = cursor.pos();
	let digits = cursor.take_while(|byte| byte.is_ascii_digit());
	if digits.is_empty() {
		return match cursor.peek() {
			Some(byte) => Err(BencodeError::UnexpectedByte {
				at: len_at,
				expected: "decimal digit",
				got: byte,
			}),
			None => Err(BencodeError::UnexpectedEof {
				at: len_at,
				need: 1,
				rem: 0,
			}),
		};
	}

	if digits[0] == b'0' && digits.len() > 1 {
		return Err(BencodeError::LeadingZero {
			at: len_at,
			what: "string length",
		});
	}

	let len = parse_length(digits).ok_or(BencodeError::LengthOverflow { at: len_at })?;
	cursor.expect_byte(b':', "':' length separator")?;
	Ok(cursor.read_exact(len)?.to_vec())
}

fn decode_list(cursor: &mut Cursor<'_>, options: &DecodeOptions, depth: u32) -> Result<Value> {
	if depth >= options.max_depth {
		return Err(BencodeError::DepthExceeded {
			max_depth: options.max_depth,
		});
	}

	let _ = cursor.read_byte()?;
	let mut items = Vec::new();
	while cursor.peek() != Some(b'e') {
		items.push(decode_value(cursor, options, depth + 1)?);
	}
	let _ = cursor.read_byte()?;

	Ok(Value::List(items))
}

fn decode_dict(cursor: &mut Cursor<'_>, options: &DecodeOptions, depth: u32) -> Result<Value> {
	if depth >= options.max_depth {
		return Err(BencodeError::DepthExceeded {
			max_depth: options.max_depth,
		});
	}

	let _ = cursor.read_byte()?;
	let mut entries = BTreeMap::new();
	loop {
		let at = cursor.pos();
		match cursor.peek() {
			Some(b'e') => {
				let _ = cursor.read_byte()?;
				break;
			}
			Some(byte) if byte.is_ascii_digit() => {
				let key = decode_byte_string(cursor)?;
				let value = decode_value(cursor, options, depth + 1)?;
				// Input keys need not be sorted or unique; a later duplicate
				// overwrites the earlier entry.
				entries.insert(key, value);
			}
			Some(b'i') => return Err(BencodeError::NonStringKey { at, got: "integer" }),
			Some(b'l') => return Err(BencodeError::NonStringKey { at, got: "list" }),
			Some(b'd') => return Err(BencodeError::NonStringKey { at, got: "dict" }),
			Some(byte) => return Err(BencodeError::MalformedTag { at, byte }),
			None => return Err(BencodeError::UnexpectedEof { at, need: 1, rem: 0 }),
		}
	}

	Ok(Value::Dict(entries))
}

fn parse_decimal(digits: &[u8]) -> BigInt {
	let mut value = BigInt::from(0_u8);
	for byte in digits {
		value = value * 10_u8 + (*byte - b'0');
	}
	value
}

fn parse_length(digits: &[u8]) -> Option<usize> {
	let mut value = 0_usize;
	for byte in digits {
		value = value.checked_mul(10)?.checked_add(usize::from(*byte - b'0'))?;
	}
	Some(value)
}
