#![allow(missing_docs)]

use clap::{Parser, Subcommand};

mod cmd;

#[derive(Parser)]
#[command(name = "torsort", about = "Torrent metainfo inspection and organizing tools")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Decode a bencode file and print its value tree.
	Decode(cmd::decode::Args),
	/// Print a metainfo summary with catalog classification.
	Show(cmd::show::Args),
	/// Print the infohash fingerprint of a metainfo file.
	Hash(cmd::hash::Args),
	/// Plan relocation of metainfo files under a root, optionally applying it.
	Organize(cmd::organize::Args),
}

fn main() {
	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> cmd::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Decode(args) => cmd::decode::run(args),
		Commands::Show(args) => cmd::show::run(args),
		Commands::Hash(args) => cmd::hash::run(args),
		Commands::Organize(args) => cmd::organize::run(args),
	}
}
