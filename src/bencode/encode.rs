use crate::bencode::Value;

/// Serialize a value into its canonical bencode bytes.
///
/// Dictionary entries are emitted in ascending byte-wise key order, so two
/// logically-equal trees serialize identically regardless of how their
/// source bytes ordered the keys. Every well-formed value tree encodes; the
/// closed union leaves no out-of-union input to reject.
pub fn encode(value: &Value) -> Vec<u8> {
	let mut out = Vec::new();
	encode_into(value, &mut out);
	out
}

/// Append the canonical encoding of `value` to `out`.
pub fn encode_into(value: &Value, out: &mut Vec<u8>) {
	match value {
		Value::Integer(number) => {
			out.push(b'i');
			out.extend_from_slice(number.to_str_radix(10).as_bytes());
			out.push(b'e');
		}
		Value::Bytes(bytes) => encode_byte_string(bytes, out),
		Value::List(items) => {
			out.push(b'l');
			for item in items {
				encode_into(item, out);
			}
			out.push(b'e');
		}
		Value::Dict(entries) => {
			out.push(b'd');
			for (key, item) in entries {
				encode_byte_string(key, out);
				encode_into(item, out);
			}
			out.push(b'e');
		}
	}
}

fn encode_byte_string(bytes: &[u8], out: &mut Vec<u8>) {
	out.extend_from_slice(bytes.len().to_string().as_bytes());
	out.push(b':');
	out.extend_from_slice(bytes);
}

#[cfg(test)]
mod tests {
	use std::collections::BTreeMap;

	use num_bigint::BigInt;

	use crate::bencode::{Value, decode, encode};

	#[test]
	fn encodes_integers_minimally() {
		assert_eq!(encode(&Value::Integer(BigInt::from(3))), b"i3e");
		assert_eq!(encode(&Value::Integer(BigInt::from(-3))), b"i-3e");
		assert_eq!(encode(&Value::Integer(BigInt::from(0))), b"i0e");
	}

	#[test]
	fn encodes_byte_strings_with_length_prefix() {
		assert_eq!(encode(&Value::Bytes(Vec::new())), b"0:");
		assert_eq!(encode(&Value::Bytes(b"spam".to_vec())), b"4:spam");
	}

	#[test]
	fn encodes_dict_keys_in_ascending_byte_order() {
		let mut entries = BTreeMap::new();
		entries.insert(b"spam".to_vec(), Value::Bytes(b"eggs".to_vec()));
		entries.insert(b"cow".to_vec(), Value::Bytes(b"moo".to_vec()));
		assert_eq!(encode(&Value::Dict(entries)), b"d3:cow3:moo4:spam4:eggse");
	}

	#[test]
	fn round_trips_nested_values() {
		let mut files = BTreeMap::new();
		files.insert(b"length".to_vec(), Value::Integer(BigInt::from(1024)));
		files.insert(b"path".to_vec(), Value::List(vec![Value::Bytes(b"a".to_vec()), Value::Bytes(b"b.txt".to_vec())]));
		let tree = Value::List(vec![Value::Dict(files), Value::Integer(BigInt::from(-7))]);

		let encoded = encode(&tree);
		assert_eq!(decode(&encoded).expect("round trip decodes"), tree);
	}

	#[test]
	fn canonicalizes_unsorted_input_key_order() {
		let unsorted = b"d4:spam4:eggs3:cow3:mooe";
		let value = decode(unsorted).expect("unsorted dict decodes");
		assert_eq!(encode(&value), b"d3:cow3:moo4:spam4:eggse");
	}

	#[test]
	fn canonical_encoding_is_idempotent() {
		let unsorted = b"d1:bi2e1:al1:cd1:zi1e1:y0:eee";
		let first = decode(unsorted).expect("input decodes");
		let canonical = encode(&first);
		let second = decode(&canonical).expect("canonical bytes decode");
		assert_eq!(first, second);
		assert_eq!(encode(&second), canonical);
	}
}
