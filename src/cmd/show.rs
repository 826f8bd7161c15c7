use std::path::PathBuf;

use torsort::meta::Metainfo;

use crate::cmd::util::{json_escape, load_catalog};

#[derive(clap::Args)]
pub struct Args {
	pub file: PathBuf,
	/// JSON file listing known releases.
	#[arg(long)]
	pub catalog: Option<PathBuf>,
	#[arg(long)]
	pub json: bool,
}

/// Print a metainfo summary with catalog classification.
pub fn run(args: Args) -> crate::cmd::Result<()> {
	let Args {
		file: path,
		catalog,
		json,
	} = args;

	let catalog = load_catalog(catalog.as_deref())?;
	let metainfo = Metainfo::read(&path)?;
	let release = catalog.get(&metainfo.fingerprint);

	if json {
		println!("{{");
		println!("  \"path\": \"{}\",", json_escape(&path.display().to_string()));
		println!("  \"name\": \"{}\",", json_escape(&metainfo.name_lossy()));
		println!("  \"total_length\": \"{}\",", metainfo.total_length);
		println!("  \"infohash\": \"{}\",", metainfo.fingerprint);
		println!("  \"known\": {},", release.is_some());
		match release {
			Some(release) => println!(
				"  \"release\": {{\"year\":{},\"month\":{}}}",
				release.year, release.month
			),
			None => println!("  \"release\": null"),
		}
		println!("}}");
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("name: {}", metainfo.name_lossy());
	println!("total_length: {}", metainfo.total_length);
	println!("infohash: {}", metainfo.fingerprint);
	println!("known: {}", release.is_some());
	if let Some(release) = release {
		println!("release: {}-{:02}", release.year, release.month);
		if let Some(url) = &release.associated_url {
			println!("url: {url}");
		}
		if let Some(label) = &release.special_label {
			println!("label: {label}");
		}
	}

	Ok(())
}
