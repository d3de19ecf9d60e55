use std::fmt;

use crate::types::{Kind, Ref};

/// Package a named type reference points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageRef {
	/// The package enclosing the reference (zero hash on the wire).
	Local,
	/// A registered package identified by content hash.
	Hash(Ref),
}

impl PackageRef {
	/// Convert a wire hash, mapping the zero sentinel to [`PackageRef::Local`].
	pub fn from_wire(hash: Ref) -> Self {
		if hash.is_zero() { Self::Local } else { Self::Hash(hash) }
	}

	/// Hash written on the wire for this reference.
	pub fn to_wire(self) -> Ref {
		match self {
			Self::Local => Ref::default(),
			Self::Hash(hash) => hash,
		}
	}
}

/// One struct field or union choice.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
	/// Field name.
	pub name: Box<str>,
	/// Declared field type.
	pub ty: TypeRef,
	/// Whether a presence flag precedes the value.
	pub optional: bool,
}

impl Field {
	/// Build a required field.
	pub fn required(name: &str, ty: TypeRef) -> Self {
		Self {
			name: name.into(),
			ty,
			optional: false,
		}
	}

	/// Build an optional field.
	pub fn optional(name: &str, ty: TypeRef) -> Self {
		Self {
			name: name.into(),
			ty,
			optional: true,
		}
	}
}

/// Structural type description.
///
/// Equality and hashing are deep, so a `TypeRef` can key the constructor registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
	/// Scalar, dynamic, or meta kind.
	Primitive(Kind),
	/// `List`, `Set`, `Ref` (one parameter) or `Map` (key, value).
	Compound {
		/// Compound kind.
		kind: Kind,
		/// Type parameters in declared order.
		params: Vec<TypeRef>,
	},
	/// Reference to a named definition, resolved lazily.
	Named {
		/// Definition name.
		name: Box<str>,
		/// Package holding the definition.
		package: PackageRef,
	},
	/// Struct definition with an optional tagged union.
	Struct {
		/// Struct name.
		name: Box<str>,
		/// Fields in declared order.
		fields: Vec<Field>,
		/// Union choices; exactly one is active per value when non-empty.
		choices: Vec<Field>,
	},
	/// Enum definition; values are ordinals into `symbols`.
	Enum {
		/// Enum name.
		name: Box<str>,
		/// Symbol names in ordinal order.
		symbols: Vec<Box<str>>,
	},
}

impl TypeRef {
	/// `Primitive(kind)`.
	pub fn primitive(kind: Kind) -> Self {
		Self::Primitive(kind)
	}

	/// `List(elem)`.
	pub fn list(elem: TypeRef) -> Self {
		Self::Compound {
			kind: Kind::List,
			params: vec![elem],
		}
	}

	/// `Set(elem)`.
	pub fn set(elem: TypeRef) -> Self {
		Self::Compound {
			kind: Kind::Set,
			params: vec![elem],
		}
	}

	/// `Ref(target)`.
	pub fn reference(target: TypeRef) -> Self {
		Self::Compound {
			kind: Kind::Ref,
			params: vec![target],
		}
	}

	/// `Map(key, value)`.
	pub fn map(key: TypeRef, value: TypeRef) -> Self {
		Self::Compound {
			kind: Kind::Map,
			params: vec![key, value],
		}
	}

	/// Named reference into `package`.
	pub fn named(name: &str, package: PackageRef) -> Self {
		Self::Named {
			name: name.into(),
			package,
		}
	}

	/// Struct definition.
	pub fn structure(name: &str, fields: Vec<Field>, choices: Vec<Field>) -> Self {
		Self::Struct {
			name: name.into(),
			fields,
			choices,
		}
	}

	/// Enum definition.
	pub fn enumeration(name: &str, symbols: &[&str]) -> Self {
		Self::Enum {
			name: name.into(),
			symbols: symbols.iter().map(|symbol| Box::from(*symbol)).collect(),
		}
	}

	/// Kind tag describing this type.
	pub fn kind(&self) -> Kind {
		match self {
			Self::Primitive(kind) | Self::Compound { kind, .. } => *kind,
			Self::Named { .. } => Kind::Unresolved,
			Self::Struct { .. } => Kind::Struct,
			Self::Enum { .. } => Kind::Enum,
		}
	}

	/// Name of a named reference or definition.
	pub fn name(&self) -> Option<&str> {
		match self {
			Self::Named { name, .. } | Self::Struct { name, .. } | Self::Enum { name, .. } => Some(name),
			Self::Primitive(_) | Self::Compound { .. } => None,
		}
	}

	/// Type parameters of a compound type, empty otherwise.
	pub fn params(&self) -> &[TypeRef] {
		match self {
			Self::Compound { params, .. } => params,
			_ => &[],
		}
	}
}

impl fmt::Display for TypeRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Primitive(kind) => write!(f, "{kind}"),
			Self::Compound { kind, params } => {
				write!(f, "{kind}<")?;
				for (idx, param) in params.iter().enumerate() {
					if idx > 0 {
						f.write_str(", ")?;
					}
					write!(f, "{param}")?;
				}
				f.write_str(">")
			}
			Self::Named { name, package } => match package {
				PackageRef::Local => write!(f, "{name}"),
				PackageRef::Hash(hash) => write!(f, "{name}@{hash}"),
			},
			Self::Struct { name, .. } => write!(f, "struct {name}"),
			Self::Enum { name, .. } => write!(f, "enum {name}"),
		}
	}
}

#[cfg(test)]
mod tests;
