use std::fs;
use std::path::Path;

use nomdec::types::{Decoder, MemoryStore, PackageRegistry, Ref, Result, TokenCursor, tokens_from_json};
use serde::Deserialize;
use tracing::{info, warn};

/// Package and chunk definitions supplied next to a token file.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Manifest {
	#[serde(default)]
	pub packages: Vec<PackageEntry>,
	#[serde(default)]
	pub chunks: Vec<ChunkEntry>,
}

/// Package body tokens (`[[deps...], [name, type, ...]]`) registered under `hash`.
#[derive(Debug, Deserialize)]
pub(crate) struct PackageEntry {
	#[serde(rename = "ref")]
	pub hash: String,
	pub tokens: serde_json::Value,
}

/// Chunk stored under `hash`, given as a token array or raw bytes.
#[derive(Debug, Deserialize)]
pub(crate) struct ChunkEntry {
	#[serde(rename = "ref")]
	pub hash: String,
	#[serde(flatten)]
	pub body: ChunkBody,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ChunkBody {
	Tokens { tokens: serde_json::Value },
	Bytes { bytes: Vec<u8> },
}

/// Registry and chunk store populated from an optional manifest.
#[derive(Debug, Default)]
pub(crate) struct Context {
	pub packages: PackageRegistry,
	pub store: MemoryStore,
}

/// Load and register every package and chunk listed in the manifest at `path`.
pub(crate) fn load_context(path: Option<&Path>) -> Result<Context> {
	let mut context = Context::default();
	let Some(path) = path else {
		return Ok(context);
	};

	let manifest: Manifest = serde_json::from_slice(&fs::read(path)?)?;
	for entry in &manifest.packages {
		let hash = Ref::parse(&entry.hash)?;
		let tokens = tokens_from_json(&entry.tokens)?;
		let mut cursor = TokenCursor::new(&tokens);
		let package = Decoder::new(&context.packages).read_package(&mut cursor)?;
		if !cursor.at_end() {
			warn!(package = %hash, remaining = cursor.remaining(), "trailing tokens after package body");
		}
		context.packages.register(hash, package)?;
	}

	for entry in manifest.chunks {
		let hash = Ref::parse(&entry.hash)?;
		let bytes = match entry.body {
			ChunkBody::Tokens { tokens } => serde_json::to_vec(&tokens)?,
			ChunkBody::Bytes { bytes } => bytes,
		};
		context.store.put(hash, &bytes);
	}

	info!(
		manifest = %path.display(),
		packages = context.packages.len(),
		chunks = context.store.len(),
		"loaded manifest"
	);
	Ok(context)
}

/// Truncate `input` to `max_len` Unicode scalar values.
pub(crate) fn truncate(input: &str, max_len: usize) -> String {
	if input.chars().count() <= max_len {
		return input.to_owned();
	}
	let out: String = input.chars().take(max_len).collect();
	format!("{out}...")
}
