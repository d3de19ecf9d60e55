#![allow(missing_docs)]

use std::process::{Command, Output};

use nomdec_testkit::{fixture_json, fixture_path, scratch_file};
use serde_json::{Value, json};

const POINT_PACKAGE: &str = "sha1-0101010101010101010101010101010101010101";
const CHUNK_REF: &str = "sha1-0202020202020202020202020202020202020202";

#[test]
fn decode_list_json() {
	let json = run_json(&["decode", &fixture("list_int32.json"), "--json"]);

	assert_eq!(json["type"], "List<Int32>");
	assert_eq!(json["compression"], "none");
	assert_eq!(json["trailing"], 0);
	assert_eq!(json["value"], json!([0, 1, 2, 3]));
}

#[test]
fn decode_struct_with_union_and_local_enum() {
	let json = run_json(&["decode", &fixture("point.json"), "--packages", &fixture("packages.json"), "--json"]);

	let named = format!("Point@{POINT_PACKAGE}");
	assert_eq!(json["type"], named.as_str());
	assert_eq!(json["value"]["type"], named.as_str());
	assert_eq!(json["value"]["fields"], json!({ "x": 3, "y": -4, "label": "origin" }));
	assert_eq!(json["value"]["union"], json!({ "index": 0, "name": "dir", "value": 1 }));
}

#[test]
fn decode_struct_text_tree() {
	let output = run(&["decode", &fixture("point.json"), "--packages", &fixture("packages.json")]);
	assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

	let stdout = String::from_utf8_lossy(&output.stdout);
	assert!(stdout.contains(&format!("type: Point@{POINT_PACKAGE}")), "stdout: {stdout}");
	assert!(stdout.contains("Point {"), "stdout: {stdout}");
	assert!(stdout.contains("label = \"origin\""), "stdout: {stdout}");
	assert!(stdout.contains("| dir = 1"), "stdout: {stdout}");
}

#[test]
fn local_reference_uses_scope_flag() {
	let failed = run(&["decode", &fixture("point_local.json"), "--packages", &fixture("packages.json")]);
	assert!(!failed.status.success(), "decode without scope should fail");
	assert!(String::from_utf8_lossy(&failed.stderr).contains("no package scope"));

	let json = run_json(&[
		"decode",
		&fixture("point_local.json"),
		"--packages",
		&fixture("packages.json"),
		"--scope",
		POINT_PACKAGE,
		"--json",
	]);
	assert_eq!(json["type"], format!("Point@{POINT_PACKAGE}").as_str());
	assert_eq!(json["value"]["fields"], json!({ "x": 1, "y": 2 }));
	assert_eq!(json["value"]["union"]["name"], "note");
	assert_eq!(json["value"]["union"]["value"], "local");
}

#[test]
fn missing_package_is_reported() {
	let output = run(&["decode", &fixture("point.json")]);
	assert!(!output.status.success());
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains(&format!("error: unknown package {POINT_PACKAGE}")), "stderr: {stderr}");
}

#[test]
fn chunked_list_reads_manifest_chunks() {
	let json = run_json(&["decode", &fixture("list_chunked.json"), "--packages", &fixture("packages.json"), "--json"]);
	assert_eq!(json["value"], json!([5, 6, 7]));

	let output = run(&["decode", &fixture("list_chunked.json")]);
	assert!(!output.status.success());
	assert!(String::from_utf8_lossy(&output.stderr).contains(&format!("chunk not found: {CHUNK_REF}")));
}

#[test]
fn dynamic_map_values() {
	let json = run_json(&["decode", &fixture("map_values.json"), "--json"]);
	assert_eq!(json["type"], "Map<String, Value>");
	assert_eq!(json["value"], json!([["a", 1], ["b", [true, false]]]));
}

#[test]
fn decode_limits_come_from_flags() {
	let output = run(&["decode", &fixture("point.json"), "--packages", &fixture("packages.json"), "--max-depth", "1"]);
	assert!(!output.status.success());
	assert!(String::from_utf8_lossy(&output.stderr).contains("decode depth exceeded (max=1)"));

	let output = run(&["decode", &fixture("list_int32.json"), "--max-sequence-len", "2"]);
	assert!(!output.status.success());
	assert!(String::from_utf8_lossy(&output.stderr).contains("collection too large"));
}

#[test]
fn zstd_token_files_are_detected() {
	let text = serde_json::to_vec(&fixture_json("list_int32.json")).expect("fixture re-encodes");
	let packed = zstd::encode_all(&text[..], 3).expect("zstd encodes");
	let path = scratch_file("list_int32.json.zst", &packed);

	let json = run_json(&["decode", &path.display().to_string(), "--json"]);
	assert_eq!(json["compression"], "zstd");
	assert_eq!(json["value"], json!([0, 1, 2, 3]));
}

#[test]
fn package_listing_json() {
	let json = run_json(&["package", &fixture("package.json"), "--json"]);

	assert_eq!(json["dependencies"], json!([CHUNK_REF]));
	let types = json["types"].as_array().expect("types array");
	assert_eq!(types.len(), 2);
	assert_eq!(types[0], json!({ "name": "Dir", "kind": "Enum", "definition": "enum Dir { north, south }" }));
	assert_eq!(types[1]["name"], "Point");
	assert_eq!(
		types[1]["definition"],
		"struct Point { x: Int32, y: Int32, label?: String } | { dir: Dir, note: String }"
	);
}

#[test]
fn package_command_rejects_other_values() {
	let output = run(&["package", &fixture("list_int32.json")]);
	assert!(!output.status.success());
	assert!(String::from_utf8_lossy(&output.stderr).contains("unexpected kind List"));
}

#[test]
fn kinds_table_json() {
	let json = run_json(&["kinds", "--json"]);
	let rows = json.as_array().expect("kinds array");

	assert_eq!(rows.len(), 23);
	assert_eq!(rows[0], json!({ "code": 0, "name": "Bool", "class": "primitive" }));
	assert_eq!(rows[15], json!({ "code": 15, "name": "Map", "class": "compound", "arity": 2 }));
	assert_eq!(rows[22]["name"], "Package");
}

fn fixture(name: &str) -> String {
	fixture_path(name).display().to_string()
}

fn run(args: &[&str]) -> Output {
	Command::new(env!("CARGO_BIN_EXE_nomdec")).args(args).output().expect("command executes")
}

fn run_json(args: &[&str]) -> Value {
	let output = run(args);
	assert!(
		output.status.success(),
		"command failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}
