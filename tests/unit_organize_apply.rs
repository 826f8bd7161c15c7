#![allow(missing_docs)]

use std::collections::BTreeMap;
use std::fs;
use std::process::Command;

use num_bigint::BigInt;
use serde_json::Value as Json;
use torsort::bencode::{Value, encode};
use torsort::catalog::Catalog;
use torsort::meta::Metainfo;
use torsort::organize::{self, destination_path};

#[test]
fn plans_and_applies_relocation_with_catalog_split() {
	let dir = tempfile::tempdir().expect("tempdir creates");
	let root = dir.path().join("dumps");
	fs::create_dir_all(root.join("incoming")).expect("tree creates");

	let alpha = torrent_bytes("Alpha Dump 2014", 600);
	let beta = torrent_bytes("beta", 424);
	fs::write(root.join("incoming/alpha.torrent"), &alpha).expect("alpha writes");
	fs::write(root.join("incoming/beta.torrent"), &beta).expect("beta writes");
	fs::write(root.join("incoming/beta_copy.torrent"), &beta).expect("copy writes");
	fs::write(root.join("notes.txt"), b"not a torrent").expect("junk writes");

	let alpha_meta = Metainfo::from_bytes(&alpha).expect("alpha extracts");
	let catalog = Catalog::from_records(vec![release_record(&alpha_meta.fingerprint.to_string())]).expect("catalog builds");

	let plan = organize::plan(&root, &catalog).expect("plan builds");

	assert_eq!(plan.moves.len(), 2);
	assert_eq!(plan.skipped.len(), 1);
	assert_eq!(plan.duplicates.len(), 1);
	assert_eq!(plan.duplicates[0].path, root.join("incoming/beta_copy.torrent"));
	assert_eq!(plan.duplicates[0].first, root.join("incoming/beta.torrent"));

	let alpha_move = plan
		.moves
		.iter()
		.find(|item| item.source == root.join("incoming/alpha.torrent"))
		.expect("alpha planned");
	assert!(alpha_move.known);
	assert_eq!(alpha_move.dest, destination_path(&root, true, &alpha_move.metainfo));
	assert!(!alpha_move.dest.starts_with(root.join("unrecognized-torrents")));

	let beta_move = plan
		.moves
		.iter()
		.find(|item| item.source == root.join("incoming/beta.torrent"))
		.expect("beta planned");
	assert!(!beta_move.known);
	assert!(beta_move.dest.starts_with(root.join("unrecognized-torrents")));
	assert!(beta_move.dest.ends_with("metainfo.torrent"));

	let report = organize::apply(&plan).expect("apply succeeds");
	assert_eq!(report.moved, 2);
	assert_eq!(report.unchanged, 0);

	assert!(alpha_move.dest.is_file(), "alpha should be relocated");
	assert!(beta_move.dest.is_file(), "beta should be relocated");
	assert!(!root.join("incoming/alpha.torrent").exists());
	assert!(!root.join("incoming/beta.torrent").exists());
	assert!(root.join("incoming/beta_copy.torrent").is_file(), "duplicates stay in place");
	assert!(root.join("notes.txt").is_file(), "skipped files stay in place");
}

#[test]
fn reapplying_an_organized_tree_changes_nothing() {
	let dir = tempfile::tempdir().expect("tempdir creates");
	let root = dir.path().join("dumps");
	fs::create_dir_all(&root).expect("tree creates");

	fs::write(root.join("a.torrent"), torrent_bytes("alpha", 600)).expect("alpha writes");
	fs::write(root.join("b.torrent"), torrent_bytes("beta", 424)).expect("beta writes");

	let catalog = Catalog::empty();
	let first = organize::plan(&root, &catalog).expect("first plan builds");
	let report = organize::apply(&first).expect("first apply succeeds");
	assert_eq!(report.moved, 2);

	let second = organize::plan(&root, &catalog).expect("second plan builds");
	assert_eq!(second.moves.len(), 2);
	assert!(second.moves.iter().all(|item| item.in_place), "second pass should be in place");

	let report = organize::apply(&second).expect("second apply succeeds");
	assert_eq!(report.moved, 0);
	assert_eq!(report.unchanged, 2);
}

#[test]
fn organize_cli_dry_run_then_apply() {
	let dir = tempfile::tempdir().expect("tempdir creates");
	let root = dir.path().join("dumps");
	fs::create_dir_all(&root).expect("tree creates");

	let raw = torrent_bytes("dump", 1024);
	fs::write(root.join("dump.torrent"), &raw).expect("fixture writes");
	let dest = destination_path(&root, false, &Metainfo::from_bytes(&raw).expect("metainfo extracts"));

	let json = run_json(vec![
		"organize".to_owned(),
		root.display().to_string(),
		"--json".to_owned(),
	]);
	assert_eq!(json["moves"].as_array().map(Vec::len), Some(1));
	assert!(json["applied"].is_null(), "dry run should not apply");
	assert!(root.join("dump.torrent").is_file(), "dry run should not move files");

	let json = run_json(vec![
		"organize".to_owned(),
		root.display().to_string(),
		"--apply".to_owned(),
		"--json".to_owned(),
	]);
	assert_eq!(json["applied"]["moved"], 1);
	assert!(!root.join("dump.torrent").exists(), "apply should move the file");
	assert!(dest.is_file(), "file should land at the planned destination");
}

fn torrent_bytes(name: &str, length: i64) -> Vec<u8> {
	let mut info = BTreeMap::new();
	info.insert(b"length".to_vec(), Value::Integer(BigInt::from(length)));
	info.insert(b"name".to_vec(), Value::Bytes(name.as_bytes().to_vec()));
	info.insert(b"piece length".to_vec(), Value::Integer(BigInt::from(16384)));

	let mut top = BTreeMap::new();
	top.insert(b"announce".to_vec(), Value::Bytes(b"http://example.org/announce".to_vec()));
	top.insert(b"info".to_vec(), Value::Dict(info));
	encode(&Value::Dict(top))
}

fn release_record(infohash: &str) -> torsort::catalog::ReleaseRecord {
	torsort::catalog::ReleaseRecord {
		infohash: infohash.to_owned(),
		year: 2014,
		month: 6,
		associated_url: None,
		special_label: None,
	}
}

fn run_json(args: Vec<String>) -> Json {
	let output = Command::new(env!("CARGO_BIN_EXE_torsort")).args(&args).output().expect("command executes");

	assert!(output.status.success(), "command should succeed: {}", String::from_utf8_lossy(&output.stderr));
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}
