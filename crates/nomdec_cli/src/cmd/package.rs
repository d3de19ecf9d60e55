use std::path::PathBuf;

use nomdec::types::{DecodeError, Decoder, PackageRegistry, Result, TokenCursor, TokenPath, Value, load_tokens};

use crate::cmd::render::{describe_type, package_to_json};

/// Decode a top-level package value and list its dependencies and named types.
pub fn run(path: PathBuf, json: bool) -> Result<()> {
	let (_, tokens) = load_tokens(&path)?;
	let registry = PackageRegistry::new();
	let mut cursor = TokenCursor::new(&tokens);
	let (ty, value) = Decoder::new(&registry).decode_top_level(&mut cursor)?;

	let Value::Package(package) = value else {
		return Err(DecodeError::UnexpectedKind {
			at: TokenPath::from_indices(&[0]),
			kind: ty.kind(),
			context: "package file",
		});
	};

	if json {
		let mut payload = package_to_json(&package);
		payload["path"] = serde_json::json!(path.display().to_string());
		println!("{}", serde_json::to_string_pretty(&payload)?);
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("dependencies: {}", package.dependencies().len());
	for hash in package.dependencies() {
		println!("  {hash}");
	}
	println!("types: {}", package.named_types().len());
	for (name, ty) in package.named_types() {
		println!("  {name} = {}", describe_type(ty));
	}

	Ok(())
}
