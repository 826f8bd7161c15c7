use std::path::PathBuf;

use torsort::meta::Metainfo;

use crate::cmd::util::json_escape;

#[derive(clap::Args)]
pub struct Args {
	pub file: PathBuf,
	#[arg(long)]
	pub json: bool,
}

/// Print the infohash fingerprint of one metainfo file.
pub fn run(args: Args) -> crate::cmd::Result<()> {
	let Args { file: path, json } = args;

	let metainfo = Metainfo::read(&path)?;

	if json {
		println!(
			"{{\"path\":\"{}\",\"infohash\":\"{}\"}}",
			json_escape(&path.display().to_string()),
			metainfo.fingerprint,
		);
		return Ok(());
	}

	println!("{}", metainfo.fingerprint);
	Ok(())
}
