use std::collections::HashSet;

use crate::types::{Field, Kind, PackageRef, Ref, TypeRef};

#[test]
fn equality_is_structural() {
	let a = TypeRef::map(TypeRef::primitive(Kind::String), TypeRef::list(TypeRef::primitive(Kind::Int32)));
	let b = TypeRef::map(TypeRef::primitive(Kind::String), TypeRef::list(TypeRef::primitive(Kind::Int32)));
	let c = TypeRef::map(TypeRef::primitive(Kind::String), TypeRef::set(TypeRef::primitive(Kind::Int32)));
	assert_eq!(a, b);
	assert_ne!(a, c);

	let mut seen = HashSet::new();
	seen.insert(a);
	assert!(seen.contains(&b));
	assert!(!seen.contains(&c));
}

#[test]
fn struct_equality_covers_optional_flag_and_choices() {
	let base = TypeRef::structure("S", vec![Field::required("x", TypeRef::primitive(Kind::Int16))], Vec::new());
	let optional = TypeRef::structure("S", vec![Field::optional("x", TypeRef::primitive(Kind::Int16))], Vec::new());
	let union = TypeRef::structure(
		"S",
		vec![Field::required("x", TypeRef::primitive(Kind::Int16))],
		vec![Field::required("b", TypeRef::primitive(Kind::Bool))],
	);
	assert_ne!(base, optional);
	assert_ne!(base, union);
}

#[test]
fn zero_wire_hash_becomes_local() {
	assert_eq!(PackageRef::from_wire(Ref::default()), PackageRef::Local);
	let hash = Ref::from_digest([7_u8; Ref::LEN]);
	assert_eq!(PackageRef::from_wire(hash), PackageRef::Hash(hash));
	assert_eq!(PackageRef::Local.to_wire(), Ref::default());
}

#[test]
fn kind_and_name_accessors() {
	let named = TypeRef::named("E", PackageRef::Local);
	assert_eq!(named.kind(), Kind::Unresolved);
	assert_eq!(named.name(), Some("E"));
	assert_eq!(TypeRef::enumeration("E", &["a"]).kind(), Kind::Enum);
	assert_eq!(TypeRef::primitive(Kind::Blob).name(), None);
	assert_eq!(TypeRef::reference(TypeRef::primitive(Kind::UInt32)).params().len(), 1);
}

#[test]
fn display_renders_compact_form() {
	let ty = TypeRef::map(TypeRef::primitive(Kind::Int64), TypeRef::list(TypeRef::named("E", PackageRef::Local)));
	assert_eq!(ty.to_string(), "Map<Int64, List<E>>");
}
