use nomdec::types::{Field, Package, TypeRef, Value};
use serde_json::{Map, Value as JsonValue, json};

use crate::cmd::util::truncate;

/// Output truncation limits for value trees.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PrintOptions {
	/// Maximum number of fields printed for a single struct.
	pub max_fields_per_struct: usize,
	/// Maximum number of Unicode scalar values printed for strings.
	pub max_string_len: usize,
	/// Maximum number of elements printed for collections.
	pub max_items: usize,
	/// Maximum recursive print depth for nested values.
	pub max_print_depth: u32,
}

impl Default for PrintOptions {
	fn default() -> Self {
		Self {
			max_fields_per_struct: 80,
			max_string_len: 200,
			max_items: 32,
			max_print_depth: 8,
		}
	}
}

/// Describe a type, expanding inline struct and enum definitions.
pub(crate) fn describe_type(ty: &TypeRef) -> String {
	match ty {
		TypeRef::Struct { name, fields, choices } => {
			let mut out = format!("struct {name} {{{}}}", describe_fields(fields));
			if !choices.is_empty() {
				out.push_str(&format!(" | {{{}}}", describe_fields(choices)));
			}
			out
		}
		TypeRef::Enum { name, symbols } => format!("enum {name} {{ {} }}", symbols.join(", ")),
		other => other.to_string(),
	}
}

fn describe_fields(fields: &[Field]) -> String {
	let parts: Vec<String> = fields
		.iter()
		.map(|field| {
			let marker = if field.optional { "?" } else { "" };
			format!("{}{marker}: {}", field.name, describe_type(&field.ty))
		})
		.collect();
	if parts.is_empty() { String::new() } else { format!(" {} ", parts.join(", ")) }
}

/// Convert a decoded value into JSON.
///
/// Sets become arrays, maps become arrays of `[key, value]` pairs and blobs
/// become byte arrays, since neither keys nor bytes map onto JSON natively.
pub(crate) fn value_to_json(value: &Value) -> JsonValue {
	match value {
		Value::Bool(v) => json!(v),
		Value::Int8(v) => json!(v),
		Value::Int16(v) => json!(v),
		Value::Int32(v) => json!(v),
		Value::Int64(v) => json!(v),
		Value::UInt8(v) => json!(v),
		Value::UInt16(v) => json!(v),
		Value::UInt32(v) => json!(v),
		Value::UInt64(v) => json!(v),
		Value::Float32(v) => json!(v),
		Value::Float64(v) => json!(v),
		Value::String(v) => json!(v.as_ref()),
		Value::Blob(v) => JsonValue::Array(v.iter().map(|byte| json!(byte)).collect()),
		Value::List(items) => JsonValue::Array(items.iter().map(value_to_json).collect()),
		Value::Set(items) => JsonValue::Array(items.iter().map(value_to_json).collect()),
		Value::Map(entries) => JsonValue::Array(
			entries
				.iter()
				.map(|(key, value)| JsonValue::Array(vec![value_to_json(key), value_to_json(value)]))
				.collect(),
		),
		Value::Ref(target) => json!({
			"ref": target.target.to_string(),
			"target_type": target.target_type.to_string(),
		}),
		Value::TypeRef(ty) => json!(describe_type(ty)),
		Value::Package(package) => package_to_json(package),
		Value::Struct(item) => {
			let fields: Map<String, JsonValue> = item
				.fields
				.iter()
				.map(|field| (field.name.to_string(), value_to_json(&field.value)))
				.collect();

			let mut out = Map::new();
			out.insert("type".to_owned(), json!(item.type_ref.to_string()));
			out.insert("fields".to_owned(), JsonValue::Object(fields));
			if let Some(union) = &item.union {
				out.insert(
					"union".to_owned(),
					json!({
						"index": union.index,
						"name": union.name.as_ref(),
						"value": value_to_json(&union.value),
					}),
				);
			}
			JsonValue::Object(out)
		}
	}
}

/// Convert a package into JSON with its dependencies and named definitions.
pub(crate) fn package_to_json(package: &Package) -> JsonValue {
	let dependencies: Vec<String> = package.dependencies().iter().map(ToString::to_string).collect();
	let types: Vec<JsonValue> = package
		.named_types()
		.map(|(name, ty)| {
			json!({
				"name": name,
				"kind": ty.kind().as_str(),
				"definition": describe_type(ty),
			})
		})
		.collect();
	json!({ "dependencies": dependencies, "types": types })
}

/// Print a value as an indented tree on stdout.
pub(crate) fn print_value(value: &Value, indent: usize, depth: u32, options: PrintOptions) {
	let pad = " ".repeat(indent);
	if let Some(text) = inline(value, options) {
		println!("{pad}{text}");
		return;
	}

	match value {
		Value::List(items) => print_items("[", "]", items.iter(), items.len(), indent, depth, options),
		Value::Set(items) => print_items("set {", "}", items.iter(), items.len(), indent, depth, options),
		Value::Map(entries) => {
			if depth >= options.max_print_depth {
				println!("{pad}{{ ... {} entries }}", entries.len());
				return;
			}
			println!("{pad}{{");
			for (key, value) in entries.iter().take(options.max_items) {
				let key = inline(key, options).unwrap_or_else(|| value_to_json(key).to_string());
				print_labeled(&format!("{key} =>"), value, indent + 2, depth + 1, options);
			}
			if entries.len() > options.max_items {
				println!("{pad}  ... {} more", entries.len() - options.max_items);
			}
			println!("{pad}}}");
		}
		Value::Package(package) => {
			println!("{pad}package {{");
			for hash in package.dependencies() {
				println!("{pad}  depends {hash}");
			}
			for (name, ty) in package.named_types() {
				println!("{pad}  {name} = {}", describe_type(ty));
			}
			println!("{pad}}}");
		}
		Value::Struct(item) => {
			if depth >= options.max_print_depth {
				println!("{pad}{} {{ ... }}", item.name);
				return;
			}
			println!("{pad}{} {{", item.name);
			for field in item.fields.iter().take(options.max_fields_per_struct) {
				print_labeled(&format!("{} =", field.name), &field.value, indent + 2, depth + 1, options);
			}
			if item.fields.len() > options.max_fields_per_struct {
				println!("{pad}  ... {} more fields", item.fields.len() - options.max_fields_per_struct);
			}
			if let Some(union) = &item.union {
				print_labeled(&format!("| {} =", union.name), &union.value, indent + 2, depth + 1, options);
			}
			println!("{pad}}}");
		}
		_ => {}
	}
}

fn print_items<'a>(
	open: &str,
	close: &str,
	items: impl Iterator<Item = &'a Value>,
	len: usize,
	indent: usize,
	depth: u32,
	options: PrintOptions,
) {
	let pad = " ".repeat(indent);
	if depth >= options.max_print_depth {
		println!("{pad}{open} ... {len} items {close}");
		return;
	}
	println!("{pad}{open}");
	for item in items.take(options.max_items) {
		print_value(item, indent + 2, depth + 1, options);
	}
	if len > options.max_items {
		println!("{pad}  ... {} more", len - options.max_items);
	}
	println!("{pad}{close}");
}

fn print_labeled(label: &str, value: &Value, indent: usize, depth: u32, options: PrintOptions) {
	let pad = " ".repeat(indent);
	match inline(value, options) {
		Some(text) => println!("{pad}{label} {text}"),
		None => {
			println!("{pad}{label}");
			print_value(value, indent + 2, depth, options);
		}
	}
}

/// Single-line rendering for scalar values; `None` for nested ones.
fn inline(value: &Value, options: PrintOptions) -> Option<String> {
	Some(match value {
		Value::Bool(v) => v.to_string(),
		Value::Int8(v) => v.to_string(),
		Value::Int16(v) => v.to_string(),
		Value::Int32(v) => v.to_string(),
		Value::Int64(v) => v.to_string(),
		Value::UInt8(v) => v.to_string(),
		Value::UInt16(v) => v.to_string(),
		Value::UInt32(v) => v.to_string(),
		Value::UInt64(v) => v.to_string(),
		Value::Float32(v) => v.to_string(),
		Value::Float64(v) => v.to_string(),
		Value::String(v) => format!("\"{}\"", truncate(v, options.max_string_len)),
		Value::Blob(v) => format!("blob[{}]", v.len()),
		Value::Ref(target) => format!("ref {} -> {}", target.target, target.target_type),
		Value::TypeRef(ty) => format!("type {}", describe_type(ty)),
		Value::List(_) | Value::Set(_) | Value::Map(_) | Value::Package(_) | Value::Struct(_) => return None,
	})
}
