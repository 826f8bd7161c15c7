use std::path::{Path, PathBuf};

use torsort::organize::{self, ApplyReport, OrganizePlan};

use crate::cmd::util::{json_escape, load_catalog};

#[derive(clap::Args)]
pub struct Args {
	pub root: PathBuf,
	/// JSON file listing known releases.
	#[arg(long)]
	pub catalog: Option<PathBuf>,
	/// Perform the planned renames instead of only printing them.
	#[arg(long)]
	pub apply: bool,
	#[arg(long)]
	pub json: bool,
}

/// Plan relocation of metainfo files under a root, optionally applying it.
pub fn run(args: Args) -> crate::cmd::Result<()> {
	let Args {
		root,
		catalog,
		apply,
		json,
	} = args;

	let catalog = load_catalog(catalog.as_deref())?;
	let plan = organize::plan(&root, &catalog)?;
	let report = if apply { Some(organize::apply(&plan)?) } else { None };

	if json {
		print_json(&root, &plan, report.as_ref());
		return Ok(());
	}

	println!("root: {}", root.display());
	println!("catalog_releases: {}", catalog.len());

	println!("planned: {}", plan.moves.len());
	for item in &plan.moves {
		let note = if item.in_place {
			" (in place)"
		} else if item.known {
			""
		} else {
			" (unrecognized)"
		};
		println!("  {} -> {}{}", item.source.display(), item.dest.display(), note);
	}

	println!("skipped: {}", plan.skipped.len());
	for item in &plan.skipped {
		println!("  {}: {}", item.path.display(), item.reason);
	}

	println!("duplicates: {}", plan.duplicates.len());
	for item in &plan.duplicates {
		println!("  {} (first: {})", item.path.display(), item.first.display());
	}

	match report {
		Some(report) => {
			println!("moved: {}", report.moved);
			println!("unchanged: {}", report.unchanged);
		}
		None => println!("dry_run: true"),
	}

	Ok(())
}

fn print_json(root: &Path, plan: &OrganizePlan, report: Option<&ApplyReport>) {
	println!("{{");
	println!("  \"root\": \"{}\",", json_escape(&root.display().to_string()));

	println!("  \"moves\": [");
	for (idx, item) in plan.moves.iter().enumerate() {
		let comma = if idx + 1 == plan.moves.len() { "" } else { "," };
		println!(
			"    {{\"source\":\"{}\",\"dest\":\"{}\",\"infohash\":\"{}\",\"known\":{},\"in_place\":{}}}{}",
			json_escape(&item.source.display().to_string()),
			json_escape(&item.dest.display().to_string()),
			item.metainfo.fingerprint,
			item.known,
			item.in_place,
			comma,
		);
	}
	println!("  ],");

	println!("  \"skipped\": [");
	for (idx, item) in plan.skipped.iter().enumerate() {
		let comma = if idx + 1 == plan.skipped.len() { "" } else { "," };
		println!(
			"    {{\"path\":\"{}\",\"reason\":\"{}\"}}{}",
			json_escape(&item.path.display().to_string()),
			json_escape(&item.reason.to_string()),
			comma,
		);
	}
	println!("  ],");

	println!("  \"duplicates\": [");
	for (idx, item) in plan.duplicates.iter().enumerate() {
		let comma = if idx + 1 == plan.duplicates.len() { "" } else { "," };
		println!(
			"    {{\"path\":\"{}\",\"first\":\"{}\",\"infohash\":\"{}\"}}{}",
			json_escape(&item.path.display().to_string()),
			json_escape(&item.first.display().to_string()),
			item.fingerprint,
			comma,
		);
	}
	println!("  ],");

	match report {
		Some(report) => println!(
			"  \"applied\": {{\"moved\":{},\"unchanged\":{}}}",
			report.moved, report.unchanged
		),
		None => println!("  \"applied\": null"),
	}
	println!("}}");
}
