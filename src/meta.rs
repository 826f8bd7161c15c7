//! Metainfo extraction and infohash fingerprinting.
//!
//! A metainfo file decodes to a top-level dictionary holding an `info`
//! dictionary. The infohash identifying the content is the SHA-1 digest of
//! the *canonical* encoding of that info dictionary, so files whose source
//! bytes ordered keys differently still fingerprint identically.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use num_bigint::{BigInt, Sign};
use sha1::{Digest, Sha1};
use thiserror::Error;

use crate::bencode::{self, BencodeError, Value};

/// Errors produced while extracting metainfo from decoded values.
#[derive(Debug, Error)]
pub enum MetaError {
	/// Filesystem IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Underlying bencode decode failure.
	#[error("bencode: {0}")]
	Bencode(#[from] BencodeError),
	/// Top-level value is not a dictionary.
	#[error("top-level value is {got}, expected dict")]
	NotDict {
		/// Variant label of the actual value.
		got: &'static str,
	},
	/// Top-level dictionary has no `info` key.
	#[error("no info dictionary present")]
	MissingInfo,
	/// The `info` entry is not a dictionary.
	#[error("info entry is {got}, expected dict")]
	InfoNotDict {
		/// Variant label of the actual value.
		got: &'static str,
	},
	/// A required info field is missing.
	#[error("info field missing: {field}")]
	MissingField {
		/// Dotted field path inside the info dictionary.
		field: &'static str,
	},
	/// An info field holds the wrong value kind.
	#[error("info field {field} is {got}, expected {expected}")]
	FieldKind {
		/// Dotted field path inside the info dictionary.
		field: &'static str,
		/// Variant label of the actual value.
		got: &'static str,
		/// Required variant label.
		expected: &'static str,
	},
	/// Total declared length is negative.
	#[error("negative total length {length}")]
	NegativeLength {
		/// Declared total length.
		length: BigInt,
	},
	/// Fingerprint hex string is malformed.
	#[error("invalid fingerprint hex: {value}")]
	InvalidFingerprint {
		/// Offending hex string.
		value: String,
	},
}

/// SHA-1 digest over the canonical encoding of an info dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fingerprint([u8; 20]);

impl Fingerprint {
	/// Digest arbitrary bytes.
	pub fn of(bytes: &[u8]) -> Self {
		let mut hasher = Sha1::new();
		hasher.update(bytes);
		Self(hasher.finalize().into())
	}

	/// Parse a 40-character hex digest.
	pub fn parse(value: &str) -> Result<Self, MetaError> {
		let raw = hex::decode(value).map_err(|_| MetaError::InvalidFingerprint { value: value.to_owned() })?;
		let digest: [u8; 20] = raw.try_into().map_err(|_| MetaError::InvalidFingerprint { value: value.to_owned() })?;
		Ok(Self(digest))
	}

	/// Raw digest bytes.
	pub fn as_bytes(&self) -> &[u8; 20] {
		&self.0
	}
}

impl fmt::Display for Fingerprint {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&hex::encode(self.0))
	}
}

/// Fields extracted from one metainfo file.
#[derive(Debug, Clone)]
pub struct Metainfo {
	/// Raw `info.name` bytes.
	pub name: Vec<u8>,
	/// Total content size: `info.length`, or the sum over `info.files`.
	pub total_length: BigInt,
	/// SHA-1 digest of the canonical info encoding.
	pub fingerprint: Fingerprint,
}

impl Metainfo {
	/// Extract metainfo fields from a decoded top-level value.
	pub fn extract(value: &Value) -> Result<Self, MetaError> {
		let top = value.as_dict().ok_or(MetaError::NotDict { got: value.kind() })?;
		let info = top.get(b"info".as_slice()).ok_or(MetaError::MissingInfo)?;
		let entries = info.as_dict().ok_or(MetaError::InfoNotDict { got: info.kind() })?;

		let name = match entries.get(b"name".as_slice()) {
			Some(Value::Bytes(bytes)) => bytes.clone(),
			Some(other) => {
				return Err(MetaError::FieldKind {
					field: "name",
					got: other.kind(),
					expected: "bytes",
				});
			}
			None => return Err(MetaError::MissingField { field: "name" }),
		};

		let total_length = total_length(entries)?;
		if total_length.sign() == Sign::Minus {
			return Err(MetaError::NegativeLength { length: total_length });
		}

		let fingerprint = Fingerprint::of(&bencode::encode(info));

		Ok(Self {
			name,
			total_length,
			fingerprint,
		})
	}

	/// Decode a buffer and extract its metainfo fields.
	pub fn from_bytes(bytes: &[u8]) -> Result<Self, MetaError> {
		let value = bencode::decode(bytes)?;
		Self::extract(&value)
	}

	/// Read a file, decode it, and extract its metainfo fields.
	pub fn read(path: impl AsRef<Path>) -> Result<Self, MetaError> {
		let raw = fs::read(path)?;
		Self::from_bytes(&raw)
	}

	/// Lossy UTF-8 rendering of the name for display.
	pub fn name_lossy(&self) -> String {
		String::from_utf8_lossy(&self.name).into_owned()
	}
}

fn total_length(info: &BTreeMap<Vec<u8>, Value>) -> Result<BigInt, MetaError> {
	if let Some(entry) = info.get(b"length".as_slice()) {
		return match entry {
			Value::Integer(number) => Ok(number.clone()),
			other => Err(MetaError::FieldKind {
				field: "length",
				got: other.kind(),
				expected: "integer",
			}),
		};
	}

	let files = match info.get(b"files".as_slice()) {
		Some(Value::List(items)) => items,
		Some(other) => {
			return Err(MetaError::FieldKind {
				field: "files",
				got: other.kind(),
				expected: "list",
			});
		}
		None => return Err(MetaError::MissingField { field: "length" }),
	};

	let mut total = BigInt::from(0_u8);
	for entry in files {
		match entry.get(b"length") {
			Some(Value::Integer(number)) => total += number,
			Some(other) => {
				return Err(MetaError::FieldKind {
					field: "files[].length",
					got: other.kind(),
					expected: "integer",
				});
			}
			None => return Err(MetaError::MissingField { field: "files[].length" }),
		}
	}
	Ok(total)
}
