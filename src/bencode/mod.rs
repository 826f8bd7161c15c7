mod bytes;
mod decode;
mod encode;
mod error;
mod value;

/// Decoder entry points and limits.
pub use decode::{DecodeOptions, decode, decode_with_options, try_decode};
/// Canonical encoder entry points.
pub use encode::{encode, encode_into};
/// Error and result aliases.
pub use error::{BencodeError, Result};
/// Decoded value tree.
pub use value::Value;
