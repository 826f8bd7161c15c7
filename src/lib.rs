//! Public library API for inspecting and organizing torrent metainfo files.

/// Bencode value model, strict decoder, and canonical encoder.
pub mod bencode;
/// Known-release catalog lookup keyed by infohash.
pub mod catalog;
/// Metainfo extraction and infohash fingerprinting.
pub mod meta;
/// Directory scanning, relocation planning, and apply.
pub mod organize;
