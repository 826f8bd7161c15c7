use thiserror::Error;

/// Value tree decode command.
pub mod decode;
/// Infohash fingerprint command.
pub mod hash;
/// Relocation planning and apply command.
pub mod organize;
/// Metainfo summary command.
pub mod show;

mod util;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CmdError {
	/// Filesystem IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Bencode decode failure.
	#[error("{0}")]
	Bencode(#[from] torsort::bencode::BencodeError),
	/// Metainfo extraction failure.
	#[error("{0}")]
	Meta(#[from] torsort::meta::MetaError),
	/// Catalog load failure.
	#[error("{0}")]
	Catalog(#[from] torsort::catalog::CatalogError),
	/// Relocation failure.
	#[error("{0}")]
	Organize(#[from] torsort::organize::OrganizeError),
}

/// CLI result type.
pub type Result<T> = std::result::Result<T, CmdError>;
