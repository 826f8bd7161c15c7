//! Known-release catalog lookup keyed by infohash.
//!
//! The catalog is a JSON array of release records maintained outside this
//! tool; fetching it from wherever it is published is the caller's problem.
//! Loading fails closed: a record with an unparseable infohash rejects the
//! whole file rather than silently shrinking the catalog.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::meta::{Fingerprint, MetaError};

/// Errors produced while loading a release catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
	/// Filesystem IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Catalog file is not valid JSON.
	#[error("catalog json: {0}")]
	Json(#[from] serde_json::Error),
	/// A record's infohash is not a valid 40-character hex digest.
	#[error("catalog record {index}: {source}")]
	BadRecord {
		/// Zero-based index of the offending record.
		index: usize,
		/// Underlying fingerprint parse failure.
		source: MetaError,
	},
}

/// One known release as listed in the catalog file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseRecord {
	/// Hex SHA-1 infohash of the release's info dictionary.
	pub infohash: String,
	/// Release year.
	pub year: u16,
	/// Release month, 1 through 12.
	pub month: u8,
	/// Optional announcement or description URL.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub associated_url: Option<String>,
	/// Optional free-form label distinguishing special releases.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub special_label: Option<String>,
}

/// Known releases indexed by infohash fingerprint.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
	releases: HashMap<Fingerprint, ReleaseRecord>,
}

impl Catalog {
	/// Catalog with no known releases; every fingerprint is unrecognized.
	pub fn empty() -> Self {
		Self::default()
	}

	/// Index a list of records, failing on any unparseable infohash.
	pub fn from_records(records: Vec<ReleaseRecord>) -> Result<Self, CatalogError> {
		let mut releases = HashMap::with_capacity(records.len());
		for (index, record) in records.into_iter().enumerate() {
			let fingerprint =
				Fingerprint::parse(&record.infohash).map_err(|source| CatalogError::BadRecord { index, source })?;
			releases.insert(fingerprint, record);
		}
		Ok(Self { releases })
	}

	/// Load records from a JSON array file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
		let raw = fs::read(path)?;
		let records: Vec<ReleaseRecord> = serde_json::from_slice(&raw)?;
		Self::from_records(records)
	}

	/// Look up a release by fingerprint.
	pub fn get(&self, fingerprint: &Fingerprint) -> Option<&ReleaseRecord> {
		self.releases.get(fingerprint)
	}

	/// Whether `fingerprint` names a known release.
	pub fn contains(&self, fingerprint: &Fingerprint) -> bool {
		self.releases.contains_key(fingerprint)
	}

	/// Number of known releases.
	pub fn len(&self) -> usize {
		self.releases.len()
	}

	/// Whether the catalog holds no releases.
	pub fn is_empty(&self) -> bool {
		self.releases.is_empty()
	}
}
