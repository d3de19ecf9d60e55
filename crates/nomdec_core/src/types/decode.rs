use std::collections::BTreeSet;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use tracing::{debug, trace};

use crate::types::value::{FieldValue, MapValue, RefValue, SetValue, StructValue, UnionValue, Value};
use crate::types::{
	ChunkStore, DecodeError, Field, Kind, Package, PackageRef, PackageRegistry, Ref, Result, Token, TokenCursor, TokenPath, TypeRef, tokens_from_bytes,
};

/// Runtime limits for decoding.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
	/// Maximum recursive nesting of values and type descriptions.
	pub max_depth: u32,
	/// Maximum tokens in one collection's element sequence.
	pub max_sequence_len: usize,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self {
			max_depth: 64,
			max_sequence_len: 1 << 20,
		}
	}
}

/// Recursive-descent decoder over token cursors.
///
/// Holds only borrowed, read-only collaborators; one decoder can serve any
/// number of sequential decode calls.
pub struct Decoder<'r> {
	packages: &'r PackageRegistry,
	store: Option<&'r dyn ChunkStore>,
	options: DecodeOptions,
	scope: Option<Ref>,
}

/// Per-call recursion state.
#[derive(Debug, Clone, Copy)]
struct Frame {
	depth: u32,
	scope: Option<Ref>,
}

impl<'r> Decoder<'r> {
	/// Decoder resolving named types through `packages`.
	pub fn new(packages: &'r PackageRegistry) -> Self {
		Self {
			packages,
			store: None,
			options: DecodeOptions::default(),
			scope: None,
		}
	}

	/// Replace decode limits.
	pub fn with_options(mut self, options: DecodeOptions) -> Self {
		self.options = options;
		self
	}

	/// Fetch blobs and collections stored by reference from `store`.
	pub fn with_store(mut self, store: &'r dyn ChunkStore) -> Self {
		self.store = Some(store);
		self
	}

	/// Resolve enclosing-package references at the top level against `package`.
	pub fn with_scope(mut self, package: Ref) -> Self {
		self.scope = Some(package);
		self
	}

	/// Decode one tagged value, returning its effective type and value.
	///
	/// Dynamic envelopes are unwrapped, so the returned type is the concrete
	/// inner type; named types carry the package hash they resolved against.
	pub fn decode_top_level(&self, cursor: &mut TokenCursor<'_>) -> Result<(TypeRef, Value)> {
		let frame = self.root_frame();
		let mut ty = self.type_tag(cursor, frame)?;
		let mut inner = frame;
		while ty == TypeRef::Primitive(Kind::Value) {
			inner = self.descend(inner)?;
			ty = self.type_tag(cursor, inner)?;
		}

		let value = self.value(cursor, &ty, inner)?;
		let ty = match (ty, &value) {
			(_, Value::Struct(item)) => item.type_ref.clone(),
			(TypeRef::Named { name, package: PackageRef::Local }, _) => match inner.scope {
				Some(hash) => TypeRef::Named {
					name,
					package: PackageRef::Hash(hash),
				},
				None => TypeRef::Named {
					name,
					package: PackageRef::Local,
				},
			},
			(ty, _) => ty,
		};
		Ok((ty, value))
	}

	/// Read "the type of what follows": a kind tag plus any tag-form parameters.
	pub fn read_type_tag(&self, cursor: &mut TokenCursor<'_>) -> Result<TypeRef> {
		self.type_tag(cursor, self.root_frame())
	}

	/// Read a reified type description, including inline struct and enum definitions.
	pub fn read_type_value(&self, cursor: &mut TokenCursor<'_>) -> Result<TypeRef> {
		self.type_value(cursor, self.root_frame())
	}

	/// Read a value of the already known type `ty`, without a leading tag.
	pub fn read_value(&self, cursor: &mut TokenCursor<'_>, ty: &TypeRef) -> Result<Value> {
		self.value(cursor, ty, self.root_frame())
	}

	/// Read a package body: dependency hashes then `(name, type)` pairs.
	pub fn read_package(&self, cursor: &mut TokenCursor<'_>) -> Result<Package> {
		self.package(cursor, self.root_frame())
	}

	fn root_frame(&self) -> Frame {
		Frame {
			depth: 0,
			scope: self.scope,
		}
	}

	fn descend(&self, frame: Frame) -> Result<Frame> {
		if frame.depth >= self.options.max_depth {
			return Err(DecodeError::DepthExceeded {
				max_depth: self.options.max_depth,
			});
		}
		Ok(Frame {
			depth: frame.depth + 1,
			..frame
		})
	}

	/// Tag grammar. Named structs and enums enter through a `TypeRef` kind
	/// followed by hash and name; a bare `Struct`, `Enum` or `Unresolved` kind
	/// here is `UnexpectedKind`, since inline definitions only appear as type values.
	fn type_tag(&self, cursor: &mut TokenCursor<'_>, frame: Frame) -> Result<TypeRef> {
		let frame = self.descend(frame)?;
		let at = cursor.position();
		let kind = cursor.read_kind()?;
		trace!(%kind, %at, "type tag");

		match kind {
			Kind::List | Kind::Set | Kind::Ref | Kind::Map => {
				let arity = kind.arity().unwrap_or(1);
				let mut params = Vec::with_capacity(arity);
				for _ in 0..arity {
					params.push(self.type_tag(cursor, frame)?);
				}
				Ok(TypeRef::Compound { kind, params })
			}
			Kind::TypeRef => read_type_ref_kind(cursor),
			Kind::Enum | Kind::Struct | Kind::Unresolved => Err(DecodeError::UnexpectedKind {
				at,
				kind,
				context: "type tag",
			}),
			_ => Ok(TypeRef::Primitive(kind)),
		}
	}

	fn type_value(&self, cursor: &mut TokenCursor<'_>, frame: Frame) -> Result<TypeRef> {
		let frame = self.descend(frame)?;
		let at = cursor.position();
		let kind = cursor.read_kind()?;
		trace!(%kind, %at, "type value");

		match kind {
			Kind::Enum => {
				let name = cursor.read_string()?;
				let mut seq = cursor.read_sequence()?;
				let mut symbols = Vec::with_capacity(seq.remaining());
				while !seq.at_end() {
					symbols.push(Box::from(seq.read_string()?));
				}
				Ok(TypeRef::Enum {
					name: name.into(),
					symbols,
				})
			}
			Kind::List | Kind::Map | Kind::Ref | Kind::Set => {
				let mut seq = cursor.read_sequence()?;
				let mut params = Vec::with_capacity(seq.remaining());
				while !seq.at_end() {
					params.push(self.type_value(&mut seq, frame)?);
				}
				let expected = kind.arity().unwrap_or(1);
				if params.len() != expected {
					return Err(DecodeError::ArityMismatch {
						kind,
						expected,
						got: params.len(),
					});
				}
				Ok(TypeRef::Compound { kind, params })
			}
			Kind::Struct => {
				let name = cursor.read_string()?;
				let fields = self.field_list(cursor, frame)?;
				let choices = self.field_list(cursor, frame)?;
				Ok(TypeRef::Struct {
					name: name.into(),
					fields,
					choices,
				})
			}
			Kind::TypeRef => read_type_ref_kind(cursor),
			Kind::Unresolved => Err(DecodeError::UnexpectedKind {
				at,
				kind,
				context: "type value",
			}),
			_ => Ok(TypeRef::Primitive(kind)),
		}
	}

	fn field_list(&self, cursor: &mut TokenCursor<'_>, frame: Frame) -> Result<Vec<Field>> {
		let mut seq = cursor.read_sequence()?;
		let mut fields = Vec::with_capacity(seq.remaining() / 3);
		while !seq.at_end() {
			let name = seq.read_string()?;
			let ty = self.type_value(&mut seq, frame)?;
			let optional = seq.read_bool()?;
			fields.push(Field {
				name: name.into(),
				ty,
				optional,
			});
		}
		Ok(fields)
	}

	fn value(&self, cursor: &mut TokenCursor<'_>, ty: &TypeRef, frame: Frame) -> Result<Value> {
		let frame = self.descend(frame)?;
		match ty {
			TypeRef::Primitive(kind) => self.primitive(cursor, *kind, frame),
			TypeRef::Compound { kind, params } => self.compound(cursor, *kind, params, frame),
			TypeRef::Named { name, package } => {
				let (hash, definition) = self.resolve(name, *package, frame)?;
				let type_ref = TypeRef::Named {
					name: name.clone(),
					package: PackageRef::Hash(hash),
				};
				let scoped = Frame {
					scope: Some(hash),
					..frame
				};
				match &definition {
					TypeRef::Struct { .. } => Ok(Value::Struct(self.structure(cursor, type_ref, &definition, scoped)?)),
					TypeRef::Enum { .. } => Ok(Value::UInt32(cursor.read_int("enum ordinal")?)),
					_ => Err(DecodeError::NotNamedDefinition {
						name: name.to_string(),
						package: hash,
					}),
				}
			}
			TypeRef::Struct { .. } => Ok(Value::Struct(self.structure(cursor, ty.clone(), ty, frame)?)),
			TypeRef::Enum { .. } => Ok(Value::UInt32(cursor.read_int("enum ordinal")?)),
		}
	}

	fn primitive(&self, cursor: &mut TokenCursor<'_>, kind: Kind, frame: Frame) -> Result<Value> {
		Ok(match kind {
			Kind::Bool => Value::Bool(cursor.read_bool()?),
			Kind::UInt8 => Value::UInt8(cursor.read_int("uint8")?),
			Kind::UInt16 => Value::UInt16(cursor.read_int("uint16")?),
			Kind::UInt32 => Value::UInt32(cursor.read_int("uint32")?),
			Kind::UInt64 => Value::UInt64(cursor.read_int("uint64")?),
			Kind::Int8 => Value::Int8(cursor.read_int("int8")?),
			Kind::Int16 => Value::Int16(cursor.read_int("int16")?),
			Kind::Int32 => Value::Int32(cursor.read_int("int32")?),
			Kind::Int64 => Value::Int64(cursor.read_int("int64")?),
			Kind::Float32 => Value::Float32(cursor.read_f32()?),
			Kind::Float64 => Value::Float64(cursor.read_f64()?),
			Kind::String => Value::String(cursor.read_string()?.into()),
			Kind::Blob => Value::Blob(self.blob(cursor)?),
			Kind::Value => {
				let inner = self.type_tag(cursor, frame)?;
				self.value(cursor, &inner, frame)?
			}
			Kind::TypeRef => Value::TypeRef(self.type_value(cursor, frame)?),
			Kind::Package => Value::Package(self.package(cursor, frame)?),
			Kind::List | Kind::Map | Kind::Ref | Kind::Set | Kind::Enum | Kind::Struct | Kind::Unresolved => {
				return Err(DecodeError::UnexpectedKind {
					at: cursor.position(),
					kind,
					context: "primitive value",
				});
			}
		})
	}

	fn compound(&self, cursor: &mut TokenCursor<'_>, kind: Kind, params: &[TypeRef], frame: Frame) -> Result<Value> {
		let expected = kind.arity().unwrap_or(0);
		if params.len() != expected {
			return Err(DecodeError::ArityMismatch {
				kind,
				expected,
				got: params.len(),
			});
		}

		match kind {
			Kind::List => self.with_elements(cursor, |elements| {
				let mut items = Vec::with_capacity(elements.remaining());
				while !elements.at_end() {
					items.push(self.value(elements, &params[0], frame)?);
				}
				Ok(Value::List(items))
			}),
			Kind::Set => self.with_elements(cursor, |elements| {
				let mut items = SetValue::new();
				while !elements.at_end() {
					items.insert(self.value(elements, &params[0], frame)?);
				}
				Ok(Value::Set(items))
			}),
			Kind::Map => self.with_elements(cursor, |elements| {
				let mut entries = MapValue::new();
				while !elements.at_end() {
					let key = self.value(elements, &params[0], frame)?;
					let value = self.value(elements, &params[1], frame)?;
					entries.insert(key, value);
				}
				Ok(Value::Map(entries))
			}),
			Kind::Ref => Ok(Value::Ref(RefValue {
				target: cursor.read_ref()?,
				target_type: params[0].clone(),
			})),
			_ => Err(DecodeError::UnexpectedKind {
				at: cursor.position(),
				kind,
				context: "compound value",
			}),
		}
	}

	fn structure(&self, cursor: &mut TokenCursor<'_>, type_ref: TypeRef, definition: &TypeRef, frame: Frame) -> Result<StructValue> {
		let TypeRef::Struct { name, fields, choices } = definition else {
			return Err(DecodeError::UnexpectedKind {
				at: cursor.position(),
				kind: definition.kind(),
				context: "struct definition",
			});
		};

		let mut values = Vec::with_capacity(fields.len());
		for field in fields {
			if field.optional && !cursor.read_bool()? {
				continue;
			}
			let value = self.value(cursor, &field.ty, frame)?;
			values.push(FieldValue {
				name: field.name.clone(),
				value,
			});
		}

		let union = if choices.is_empty() {
			None
		} else {
			let index: u32 = cursor.read_int("union index")?;
			let choice = choices.get(index as usize).ok_or_else(|| DecodeError::InvalidUnionIndex {
				name: name.to_string(),
				index,
				choices: choices.len(),
			})?;
			let value = self.value(cursor, &choice.ty, frame)?;
			Some(UnionValue {
				index,
				name: choice.name.clone(),
				value: Box::new(value),
			})
		};

		Ok(StructValue {
			name: name.clone(),
			type_ref,
			definition: definition.clone(),
			fields: values,
			union,
		})
	}

	fn package(&self, cursor: &mut TokenCursor<'_>, frame: Frame) -> Result<Package> {
		let mut deps = cursor.read_sequence()?;
		let mut dependencies = BTreeSet::new();
		while !deps.at_end() {
			dependencies.insert(deps.read_ref()?);
		}

		let mut types = cursor.read_sequence()?;
		let mut named_types = Vec::with_capacity(types.remaining() / 2);
		while !types.at_end() {
			let name = types.read_string()?;
			let ty = self.type_value(&mut types, frame)?;
			named_types.push((Box::from(name), ty));
		}

		Package::new(dependencies, named_types)
	}

	fn resolve(&self, name: &str, package: PackageRef, frame: Frame) -> Result<(Ref, TypeRef)> {
		let hash = match package {
			PackageRef::Hash(hash) => hash,
			PackageRef::Local => frame.scope.ok_or_else(|| DecodeError::NoEnclosingPackage { name: name.to_owned() })?,
		};
		let definition = self.packages.lookup(&hash, name)?;
		debug!(name, package = %hash, kind = %definition.kind(), "resolved named type");
		Ok((hash, definition))
	}

	fn blob(&self, cursor: &mut TokenCursor<'_>) -> Result<Vec<u8>> {
		let at = cursor.position();
		let text = cursor.read_string()?;
		if Ref::looks_like(text) {
			let hash = Ref::parse(text)?;
			return Ok(self.chunk(at, hash)?.to_vec());
		}
		STANDARD.decode(text).map_err(|err| DecodeError::MalformedBlob {
			at,
			reason: err.to_string(),
		})
	}

	/// Run `read` over the next element sequence, inline or fetched from the chunk store.
	fn with_elements<T>(&self, cursor: &mut TokenCursor<'_>, read: impl FnOnce(&mut TokenCursor<'_>) -> Result<T>) -> Result<T> {
		let at = cursor.position();
		let by_reference = matches!(cursor.peek(), Some(Token::String(text)) if Ref::looks_like(text));
		if by_reference {
			let hash = cursor.read_ref()?;
			let bytes = self.chunk(at.clone(), hash)?;
			let (_, tokens) = tokens_from_bytes(bytes.to_vec())?;
			debug!(chunk = %hash, tokens = tokens.len(), "loaded element chunk");
			let mut elements = TokenCursor::new(&tokens);
			self.check_len(at, &elements)?;
			return read(&mut elements);
		}

		let mut elements = cursor.read_sequence()?;
		self.check_len(at, &elements)?;
		read(&mut elements)
	}

	fn check_len(&self, at: TokenPath, elements: &TokenCursor<'_>) -> Result<()> {
		let count = elements.remaining();
		if count > self.options.max_sequence_len {
			return Err(DecodeError::CollectionTooLarge {
				at,
				count,
				max: self.options.max_sequence_len,
			});
		}
		Ok(())
	}

	fn chunk(&self, at: TokenPath, hash: Ref) -> Result<std::sync::Arc<[u8]>> {
		let store = self.store.ok_or(DecodeError::NoChunkStore { at, hash })?;
		store.get(&hash).ok_or(DecodeError::ChunkNotFound { hash })
	}
}

/// Shared handling of a `TypeRef` kind in both tag and value position.
///
/// A following string with the `sha1-` prefix makes it a named reference and
/// must parse as a content hash, else `MalformedRef`. Anything else leaves it
/// as the primitive `TypeRef` kind and consumes nothing more, so a package body
/// entry such as `"X", 20, "Y"` still reads `X` as the primitive kind.
fn read_type_ref_kind(cursor: &mut TokenCursor<'_>) -> Result<TypeRef> {
	match cursor.peek() {
		Some(Token::String(text)) if Ref::has_prefix(text) => {
			let hash = cursor.read_ref()?;
			let name = cursor.read_string()?;
			Ok(TypeRef::Named {
				name: name.into(),
				package: PackageRef::from_wire(hash),
			})
		}
		_ => Ok(TypeRef::Primitive(Kind::TypeRef)),
	}
}
