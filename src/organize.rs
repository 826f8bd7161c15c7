//! Directory scanning, relocation planning, and apply.
//!
//! Planning never touches the filesystem beyond reading; every decision is
//! recorded in the plan so a dry run shows exactly what apply would do.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

use crate::bencode::BencodeError;
use crate::catalog::Catalog;
use crate::meta::{Fingerprint, MetaError, Metainfo};

/// Directory collecting metainfo files absent from the catalog.
pub const UNRECOGNIZED_DIR: &str = "unrecognized-torrents";
/// File name every relocated metainfo file is renamed to.
pub const METAINFO_FILE_NAME: &str = "metainfo.torrent";

/// Errors produced while planning or applying a relocation.
#[derive(Debug, Error)]
pub enum OrganizeError {
	/// Filesystem IO failure with the path involved.
	#[error("io at {path:?}: {source}")]
	Io {
		/// Path the operation touched.
		path: PathBuf,
		/// Underlying error.
		#[source]
		source: std::io::Error,
	},
	/// Directory walking failure.
	#[error("walk: {0}")]
	Walk(#[from] walkdir::Error),
	/// Destination already occupied when applying a move.
	#[error("destination already exists: {path:?}")]
	DestinationExists {
		/// Occupied destination path.
		path: PathBuf,
	},
}

/// Why a scanned file was left out of the plan.
#[derive(Debug)]
pub enum SkipReason {
	/// The bytes are not one well-formed bencode value.
	NotBencode(BencodeError),
	/// Decoded, but the metainfo shape is missing or malformed.
	NotMetainfo(MetaError),
}

impl fmt::Display for SkipReason {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::NotBencode(err) => write!(f, "not bencode ({err})"),
			Self::NotMetainfo(err) => write!(f, "not metainfo ({err})"),
		}
	}
}

/// One file to relocate.
#[derive(Debug)]
pub struct PlannedMove {
	/// Current file location.
	pub source: PathBuf,
	/// Destination under the organize root.
	pub dest: PathBuf,
	/// Extracted metainfo fields.
	pub metainfo: Metainfo,
	/// Whether the fingerprint matched the catalog.
	pub known: bool,
	/// The file already sits at its destination.
	pub in_place: bool,
}

/// A scanned file left out of the plan.
#[derive(Debug)]
pub struct SkippedFile {
	/// File location.
	pub path: PathBuf,
	/// Why it was skipped.
	pub reason: SkipReason,
}

/// A later file whose fingerprint was already claimed.
#[derive(Debug)]
pub struct DuplicateFile {
	/// Duplicate file location, left untouched.
	pub path: PathBuf,
	/// File that claimed the fingerprint first.
	pub first: PathBuf,
	/// Shared fingerprint.
	pub fingerprint: Fingerprint,
}

/// Relocation plan for one directory tree.
#[derive(Debug)]
pub struct OrganizePlan {
	/// Files to relocate, in scan order.
	pub moves: Vec<PlannedMove>,
	/// Files skipped with reasons, in scan order.
	pub skipped: Vec<SkippedFile>,
	/// Later files whose fingerprint was already claimed.
	pub duplicates: Vec<DuplicateFile>,
}

/// Result of applying a plan.
#[derive(Debug)]
pub struct ApplyReport {
	/// Files renamed to their destination.
	pub moved: usize,
	/// Files that were already in place.
	pub unchanged: usize,
}

/// Scan `root` recursively and plan relocations against `catalog`.
///
/// The first file seen for a fingerprint claims it; later files with the
/// same fingerprint are recorded as duplicates and left in place.
pub fn plan(root: &Path, catalog: &Catalog) -> Result<OrganizePlan, OrganizeError> {
	let mut plan = OrganizePlan {
		moves: Vec::new(),
		skipped: Vec::new(),
		duplicates: Vec::new(),
	};
	let mut claimed: HashMap<Fingerprint, PathBuf> = HashMap::new();

	for entry in WalkDir::new(root).sort_by_file_name() {
		let entry = entry?;
		if !entry.file_type().is_file() {
			continue;
		}

		let path = entry.into_path();
		let raw = fs::read(&path).map_err(|source| OrganizeError::Io {
			path: path.clone(),
			source,
		})?;

		let metainfo = match Metainfo::from_bytes(&raw) {
			Ok(metainfo) => metainfo,
			Err(MetaError::Bencode(err)) => {
				plan.skipped.push(SkippedFile {
					path,
					reason: SkipReason::NotBencode(err),
				});
				continue;
			}
			Err(err) => {
				plan.skipped.push(SkippedFile {
					path,
					reason: SkipReason::NotMetainfo(err),
				});
				continue;
			}
		};

		if let Some(first) = claimed.get(&metainfo.fingerprint) {
			plan.duplicates.push(DuplicateFile {
				path,
				first: first.clone(),
				fingerprint: metainfo.fingerprint,
			});
			continue;
		}
		claimed.insert(metainfo.fingerprint, path.clone());

		let known = catalog.contains(&metainfo.fingerprint);
		let dest = destination_path(root, known, &metainfo);
		let in_place = dest == path;
		plan.moves.push(PlannedMove {
			source: path,
			dest,
			metainfo,
			known,
			in_place,
		});
	}

	Ok(plan)
}

/// Apply a plan: create parent directories and rename each source.
///
/// A destination that already exists is a hard failure; apply never
/// overwrites.
pub fn apply(plan: &OrganizePlan) -> Result<ApplyReport, OrganizeError> {
	let mut moved = 0;
	let mut unchanged = 0;

	for item in &plan.moves {
		if item.in_place {
			unchanged += 1;
			continue;
		}

		if item.dest.exists() {
			return Err(OrganizeError::DestinationExists { path: item.dest.clone() });
		}
		if let Some(parent) = item.dest.parent() {
			fs::create_dir_all(parent).map_err(|source| OrganizeError::Io {
				path: parent.to_path_buf(),
				source,
			})?;
		}
		fs::rename(&item.source, &item.dest).map_err(|source| OrganizeError::Io {
			path: item.source.clone(),
			source,
		})?;
		moved += 1;
	}

	Ok(ApplyReport { moved, unchanged })
}

/// Compute the destination for a metainfo file under `root`.
///
/// Layout: `<root>[/unrecognized-torrents]/<length hex>-<name>-<infohash>/metainfo.torrent`,
/// with the prefix dropped for catalog-known fingerprints.
pub fn destination_path(root: &Path, known: bool, metainfo: &Metainfo) -> PathBuf {
	let dir_name = format!(
		"{:08x}-{}-{}",
		metainfo.total_length,
		sanitize_name(&metainfo.name),
		metainfo.fingerprint,
	);

	let mut out = root.to_path_buf();
	if !known {
		out.push(UNRECOGNIZED_DIR);
	}
	out.push(dir_name);
	out.push(METAINFO_FILE_NAME);
	out
}

/// Collapse a raw name into a lowercase `[0-9a-z_]` label.
///
/// Runs of other bytes become a single `_`, leading and trailing `_` are
/// trimmed, and an empty result falls back to `unknown`.
pub fn sanitize_name(name: &[u8]) -> String {
	let mut out = String::with_capacity(name.len());
	let mut gap = false;
	for byte in name {
		let byte = byte.to_ascii_lowercase();
		if byte.is_ascii_lowercase() || byte.is_ascii_digit() {
			if gap && !out.is_empty() {
				out.push('_');
			}
			gap = false;
			out.push(char::from(byte));
		} else {
			gap = true;
		}
	}

	if out.is_empty() { "unknown".to_owned() } else { out }
}
