use std::fmt;

/// Tag identifying what follows in the token stream.
///
/// Discriminants are the wire codes written by the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Kind {
	/// Boolean scalar.
	Bool = 0,
	/// Unsigned 8-bit integer.
	UInt8 = 1,
	/// Unsigned 16-bit integer.
	UInt16 = 2,
	/// Unsigned 32-bit integer.
	UInt32 = 3,
	/// Unsigned 64-bit integer.
	UInt64 = 4,
	/// Signed 8-bit integer.
	Int8 = 5,
	/// Signed 16-bit integer.
	Int16 = 6,
	/// Signed 32-bit integer.
	Int32 = 7,
	/// Signed 64-bit integer.
	Int64 = 8,
	/// 32-bit float.
	Float32 = 9,
	/// 64-bit float.
	Float64 = 10,
	/// UTF-8 string.
	String = 11,
	/// Opaque byte sequence.
	Blob = 12,
	/// Dynamic envelope; the concrete type is carried inline.
	Value = 13,
	/// Ordered sequence.
	List = 14,
	/// Key/value mapping.
	Map = 15,
	/// Content-hash reference.
	Ref = 16,
	/// Unordered set.
	Set = 17,
	/// Enum definition.
	Enum = 18,
	/// Struct definition.
	Struct = 19,
	/// Type description.
	TypeRef = 20,
	/// Named reference into a package.
	Unresolved = 21,
	/// Package of named type definitions.
	Package = 22,
}

impl Kind {
	/// Every kind in wire-code order.
	pub const ALL: [Kind; 23] = [
		Kind::Bool,
		Kind::UInt8,
		Kind::UInt16,
		Kind::UInt32,
		Kind::UInt64,
		Kind::Int8,
		Kind::Int16,
		Kind::Int32,
		Kind::Int64,
		Kind::Float32,
		Kind::Float64,
		Kind::String,
		Kind::Blob,
		Kind::Value,
		Kind::List,
		Kind::Map,
		Kind::Ref,
		Kind::Set,
		Kind::Enum,
		Kind::Struct,
		Kind::TypeRef,
		Kind::Unresolved,
		Kind::Package,
	];

	/// Map a wire code to its kind.
	pub fn from_code(code: u8) -> Option<Self> {
		Self::ALL.get(usize::from(code)).copied()
	}

	/// Wire code of this kind.
	pub fn code(self) -> u8 {
		self as u8
	}

	/// Whether a `Primitive` type description may carry this kind.
	pub fn is_primitive(self) -> bool {
		!matches!(self, Self::List | Self::Map | Self::Ref | Self::Set | Self::Enum | Self::Struct | Self::Unresolved)
	}

	/// Number of type parameters for compound kinds, `None` otherwise.
	pub fn arity(self) -> Option<usize> {
		match self {
			Self::List | Self::Set | Self::Ref => Some(1),
			Self::Map => Some(2),
			_ => None,
		}
	}

	/// Stable name used in diagnostics and CLI output.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Bool => "Bool",
			Self::UInt8 => "UInt8",
			Self::UInt16 => "UInt16",
			Self::UInt32 => "UInt32",
			Self::UInt64 => "UInt64",
			Self::Int8 => "Int8",
			Self::Int16 => "Int16",
			Self::Int32 => "Int32",
			Self::Int64 => "Int64",
			Self::Float32 => "Float32",
			Self::Float64 => "Float64",
			Self::String => "String",
			Self::Blob => "Blob",
			Self::Value => "Value",
			Self::List => "List",
			Self::Map => "Map",
			Self::Ref => "Ref",
			Self::Set => "Set",
			Self::Enum => "Enum",
			Self::Struct => "Struct",
			Self::TypeRef => "TypeRef",
			Self::Unresolved => "Unresolved",
			Self::Package => "Package",
		}
	}
}

impl fmt::Display for Kind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
