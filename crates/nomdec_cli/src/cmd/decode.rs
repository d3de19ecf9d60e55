use std::path::PathBuf;

use nomdec::types::{DecodeOptions, Decoder, Ref, Result, TokenCursor, load_tokens};
use tracing::{debug, warn};

use crate::cmd::render::{PrintOptions, describe_type, print_value, value_to_json};
use crate::cmd::util::load_context;

/// Decode and print the top-level value in a token file.
pub fn run(path: PathBuf, manifest: Option<PathBuf>, scope: Option<Ref>, options: DecodeOptions, json: bool) -> Result<()> {
	let (compression, tokens) = load_tokens(&path)?;
	debug!(path = %path.display(), compression = compression.as_str(), tokens = tokens.len(), "loaded tokens");

	let context = load_context(manifest.as_deref())?;
	let mut decoder = Decoder::new(&context.packages).with_options(options).with_store(&context.store);
	if let Some(scope) = scope {
		decoder = decoder.with_scope(scope);
	}

	let mut cursor = TokenCursor::new(&tokens);
	let (ty, value) = decoder.decode_top_level(&mut cursor)?;
	let trailing = cursor.remaining();
	if trailing > 0 {
		warn!(trailing, "tokens left after the top-level value");
	}

	if json {
		let payload = DecodeJson {
			path: path.display().to_string(),
			compression: compression.as_str(),
			type_name: describe_type(&ty),
			trailing,
			value: value_to_json(&value),
		};
		println!("{}", serde_json::to_string_pretty(&payload)?);
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("compression: {}", compression.as_str());
	println!("type: {}", describe_type(&ty));
	if trailing > 0 {
		println!("trailing: {trailing}");
	}
	println!("value:");
	print_value(&value, 0, 0, PrintOptions::default());

	Ok(())
}

#[derive(serde::Serialize)]
struct DecodeJson {
	path: String,
	compression: &'static str,
	#[serde(rename = "type")]
	type_name: String,
	trailing: usize,
	value: serde_json::Value,
}
