use crate::types::{DecodeError, Kind, Package, Ref, TypeRef};

#[test]
fn keeps_insertion_order_and_looks_up_by_name() {
	let package = Package::new(
		[],
		vec![
			("Zed".into(), TypeRef::enumeration("Zed", &["z"])),
			("Alpha".into(), TypeRef::primitive(Kind::Int8)),
		],
	)
	.expect("package builds");

	let names: Vec<&str> = package.named_types().map(|(name, _)| name).collect();
	assert_eq!(names, vec!["Zed", "Alpha"]);
	assert_eq!(package.named_type("Alpha"), Some(&TypeRef::primitive(Kind::Int8)));
	assert_eq!(package.named_type("Missing"), None);
}

#[test]
fn duplicate_dependencies_collapse() {
	let dep = Ref::from_digest([1_u8; Ref::LEN]);
	let package = Package::new([dep, dep, Ref::from_digest([2_u8; Ref::LEN])], Vec::new()).expect("package builds");
	assert_eq!(package.dependencies().len(), 2);
}

#[test]
fn rejects_duplicate_type_names() {
	let err = Package::new(
		[],
		vec![("E".into(), TypeRef::enumeration("E", &["a"])), ("E".into(), TypeRef::enumeration("E", &["b"]))],
	)
	.expect_err("duplicate name should fail");
	assert!(matches!(err, DecodeError::DuplicateTypeName { ref name } if name == "E"));
}
