use std::collections::HashMap;
use std::fmt;
use std::hash::{DefaultHasher, Hash, Hasher};

use crate::types::{Kind, Package, Ref, TypeRef};

/// Generic structural result of decoding one value.
///
/// Floats compare and hash by bit pattern, so `NaN` equals itself and `0.0`
/// differs from `-0.0`, matching equality of the encoded form.
#[derive(Debug, Clone)]
pub enum Value {
	/// Boolean.
	Bool(bool),
	/// Signed 8-bit integer.
	Int8(i8),
	/// Signed 16-bit integer.
	Int16(i16),
	/// Signed 32-bit integer.
	Int32(i32),
	/// Signed 64-bit integer.
	Int64(i64),
	/// Unsigned 8-bit integer.
	UInt8(u8),
	/// Unsigned 16-bit integer.
	UInt16(u16),
	/// Unsigned 32-bit integer; also carries enum ordinals.
	UInt32(u32),
	/// Unsigned 64-bit integer.
	UInt64(u64),
	/// 32-bit float.
	Float32(f32),
	/// 64-bit float.
	Float64(f64),
	/// UTF-8 string.
	String(Box<str>),
	/// Raw bytes, inline or loaded from a chunk.
	Blob(Vec<u8>),
	/// Ordered list.
	List(Vec<Value>),
	/// Unordered set.
	Set(SetValue),
	/// Unordered map.
	Map(MapValue),
	/// Unresolved content-hash reference.
	Ref(RefValue),
	/// Reified type description.
	TypeRef(TypeRef),
	/// Decoded package; not registered.
	Package(Package),
	/// Struct record.
	Struct(StructValue),
}

impl Value {
	/// Kind of the decoded value.
	pub fn kind(&self) -> Kind {
		match self {
			Self::Bool(_) => Kind::Bool,
			Self::Int8(_) => Kind::Int8,
			Self::Int16(_) => Kind::Int16,
			Self::Int32(_) => Kind::Int32,
			Self::Int64(_) => Kind::Int64,
			Self::UInt8(_) => Kind::UInt8,
			Self::UInt16(_) => Kind::UInt16,
			Self::UInt32(_) => Kind::UInt32,
			Self::UInt64(_) => Kind::UInt64,
			Self::Float32(_) => Kind::Float32,
			Self::Float64(_) => Kind::Float64,
			Self::String(_) => Kind::String,
			Self::Blob(_) => Kind::Blob,
			Self::List(_) => Kind::List,
			Self::Set(_) => Kind::Set,
			Self::Map(_) => Kind::Map,
			Self::Ref(_) => Kind::Ref,
			Self::TypeRef(_) => Kind::TypeRef,
			Self::Package(_) => Kind::Package,
			Self::Struct(_) => Kind::Struct,
		}
	}

	/// Borrow the struct record, if this is one.
	pub fn as_struct(&self) -> Option<&StructValue> {
		match self {
			Self::Struct(item) => Some(item),
			_ => None,
		}
	}
}

impl PartialEq for Value {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::Bool(a), Self::Bool(b)) => a == b,
			(Self::Int8(a), Self::Int8(b)) => a == b,
			(Self::Int16(a), Self::Int16(b)) => a == b,
			(Self::Int32(a), Self::Int32(b)) => a == b,
			(Self::Int64(a), Self::Int64(b)) => a == b,
			(Self::UInt8(a), Self::UInt8(b)) => a == b,
			(Self::UInt16(a), Self::UInt16(b)) => a == b,
			(Self::UInt32(a), Self::UInt32(b)) => a == b,
			(Self::UInt64(a), Self::UInt64(b)) => a == b,
			(Self::Float32(a), Self::Float32(b)) => a.to_bits() == b.to_bits(),
			(Self::Float64(a), Self::Float64(b)) => a.to_bits() == b.to_bits(),
			(Self::String(a), Self::String(b)) => a == b,
			(Self::Blob(a), Self::Blob(b)) => a == b,
			(Self::List(a), Self::List(b)) => a == b,
			(Self::Set(a), Self::Set(b)) => a == b,
			(Self::Map(a), Self::Map(b)) => a == b,
			(Self::Ref(a), Self::Ref(b)) => a == b,
			(Self::TypeRef(a), Self::TypeRef(b)) => a == b,
			(Self::Package(a), Self::Package(b)) => a == b,
			(Self::Struct(a), Self::Struct(b)) => a == b,
			_ => false,
		}
	}
}

impl Eq for Value {}

impl Hash for Value {
	fn hash<H: Hasher>(&self, state: &mut H) {
		std::mem::discriminant(self).hash(state);
		match self {
			Self::Bool(v) => v.hash(state),
			Self::Int8(v) => v.hash(state),
			Self::Int16(v) => v.hash(state),
			Self::Int32(v) => v.hash(state),
			Self::Int64(v) => v.hash(state),
			Self::UInt8(v) => v.hash(state),
			Self::UInt16(v) => v.hash(state),
			Self::UInt32(v) => v.hash(state),
			Self::UInt64(v) => v.hash(state),
			Self::Float32(v) => v.to_bits().hash(state),
			Self::Float64(v) => v.to_bits().hash(state),
			Self::String(v) => v.hash(state),
			Self::Blob(v) => v.hash(state),
			Self::List(v) => v.hash(state),
			Self::Set(v) => v.hash(state),
			Self::Map(v) => v.hash(state),
			Self::Ref(v) => v.hash(state),
			Self::TypeRef(v) => v.hash(state),
			Self::Package(v) => v.hash(state),
			Self::Struct(v) => v.hash(state),
		}
	}
}

/// Buckets of entry positions keyed by element digest.
type Index = HashMap<u64, Vec<usize>>;

fn digest(value: &impl Hash) -> u64 {
	let mut hasher = DefaultHasher::new();
	value.hash(&mut hasher);
	hasher.finish()
}

fn find(index: &Index, hash: u64, mut matches: impl FnMut(usize) -> bool) -> Option<usize> {
	index.get(&hash)?.iter().copied().find(|idx| matches(*idx))
}

/// Set of decoded values; duplicates collapse and equality ignores order.
#[derive(Clone, Default)]
pub struct SetValue {
	items: Vec<Value>,
	index: Index,
}

impl SetValue {
	/// Empty set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Insert unless an equal value is present. Returns whether it was added.
	pub fn insert(&mut self, value: Value) -> bool {
		let hash = digest(&value);
		if find(&self.index, hash, |idx| self.items[idx] == value).is_some() {
			return false;
		}
		self.index.entry(hash).or_default().push(self.items.len());
		self.items.push(value);
		true
	}

	/// Whether an equal value is present.
	pub fn contains(&self, value: &Value) -> bool {
		find(&self.index, digest(value), |idx| self.items[idx] == *value).is_some()
	}

	/// Members in first-seen order.
	pub fn iter(&self) -> std::slice::Iter<'_, Value> {
		self.items.iter()
	}

	/// Number of members.
	pub fn len(&self) -> usize {
		self.items.len()
	}

	/// Whether the set has no members.
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}
}

impl FromIterator<Value> for SetValue {
	fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
		let mut out = Self::new();
		for item in iter {
			out.insert(item);
		}
		out
	}
}

impl PartialEq for SetValue {
	fn eq(&self, other: &Self) -> bool {
		self.len() == other.len() && self.items.iter().all(|item| other.contains(item))
	}
}

impl Eq for SetValue {}

impl Hash for SetValue {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.items.len().hash(state);
		self.index
			.iter()
			.map(|(hash, bucket)| hash.wrapping_mul(bucket.len() as u64))
			.fold(0_u64, u64::wrapping_add)
			.hash(state);
	}
}

impl fmt::Debug for SetValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_set().entries(&self.items).finish()
	}
}

/// Mapping between decoded values; later duplicate keys replace earlier ones.
#[derive(Clone, Default)]
pub struct MapValue {
	entries: Vec<(Value, Value)>,
	index: Index,
}

impl MapValue {
	/// Empty map.
	pub fn new() -> Self {
		Self::default()
	}

	/// Insert or replace the entry for `key`, returning the previous value.
	pub fn insert(&mut self, key: Value, value: Value) -> Option<Value> {
		let hash = digest(&key);
		if let Some(idx) = find(&self.index, hash, |idx| self.entries[idx].0 == key) {
			return Some(std::mem::replace(&mut self.entries[idx].1, value));
		}
		self.index.entry(hash).or_default().push(self.entries.len());
		self.entries.push((key, value));
		None
	}

	/// Value stored under `key`.
	pub fn get(&self, key: &Value) -> Option<&Value> {
		find(&self.index, digest(key), |idx| self.entries[idx].0 == *key).map(|idx| &self.entries[idx].1)
	}

	/// Entries in encoded order.
	pub fn iter(&self) -> impl ExactSizeIterator<Item = (&Value, &Value)> {
		self.entries.iter().map(|(key, value)| (key, value))
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether the map has no entries.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl FromIterator<(Value, Value)> for MapValue {
	fn from_iter<I: IntoIterator<Item = (Value, Value)>>(iter: I) -> Self {
		let mut out = Self::new();
		for (key, value) in iter {
			out.insert(key, value);
		}
		out
	}
}

impl PartialEq for MapValue {
	fn eq(&self, other: &Self) -> bool {
		self.len() == other.len() && self.entries.iter().all(|(key, value)| other.get(key) == Some(value))
	}
}

impl Eq for MapValue {}

impl Hash for MapValue {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.entries.len().hash(state);
		self.entries.iter().map(digest).fold(0_u64, u64::wrapping_add).hash(state);
	}
}

impl fmt::Debug for MapValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_map().entries(self.entries.iter().map(|(key, value)| (key, value))).finish()
	}
}

/// Content-hash reference; never dereferenced while decoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RefValue {
	/// Referenced chunk.
	pub target: Ref,
	/// Declared target type.
	pub target_type: TypeRef,
}

/// Decoded struct record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StructValue {
	/// Struct name.
	pub name: Box<str>,
	/// Named reference with the concrete package the struct was resolved from.
	pub type_ref: TypeRef,
	/// Resolved struct definition.
	pub definition: TypeRef,
	/// Present fields in declared order.
	pub fields: Vec<FieldValue>,
	/// Active union choice, when the struct declares choices.
	pub union: Option<UnionValue>,
}

impl StructValue {
	/// Value of a present field.
	pub fn get(&self, name: &str) -> Option<&Value> {
		self.fields.iter().find(|field| field.name.as_ref() == name).map(|field| &field.value)
	}

	/// Whether a field is present.
	pub fn has(&self, name: &str) -> bool {
		self.get(name).is_some()
	}
}

/// One present struct field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldValue {
	/// Field name.
	pub name: Box<str>,
	/// Decoded value.
	pub value: Value,
}

/// Active union choice of a struct.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnionValue {
	/// Zero-based choice ordinal.
	pub index: u32,
	/// Name of the chosen field.
	pub name: Box<str>,
	/// Decoded choice value.
	pub value: Box<Value>,
}

#[cfg(test)]
mod tests;
