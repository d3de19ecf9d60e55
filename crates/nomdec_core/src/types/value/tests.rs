use std::hash::{DefaultHasher, Hash, Hasher};

use crate::types::{MapValue, SetValue, Value};

fn digest(value: &Value) -> u64 {
	let mut hasher = DefaultHasher::new();
	value.hash(&mut hasher);
	hasher.finish()
}

#[test]
fn set_collapses_duplicates_and_ignores_order() {
	let a: SetValue = [Value::UInt8(1), Value::UInt8(2), Value::UInt8(1)].into_iter().collect();
	let b: SetValue = [Value::UInt8(2), Value::UInt8(1)].into_iter().collect();
	assert_eq!(a.len(), 2);
	assert_eq!(a, b);

	let c: SetValue = [Value::UInt8(2), Value::UInt16(1)].into_iter().collect();
	assert_ne!(a, c, "element kind participates in equality");
}

#[test]
fn map_replaces_duplicate_keys_and_ignores_order() {
	let mut a = MapValue::new();
	assert_eq!(a.insert(Value::Int64(0), Value::Float64(1.0)), None);
	a.insert(Value::Int64(2), Value::Float64(3.0));
	assert_eq!(a.insert(Value::Int64(0), Value::Float64(9.0)), Some(Value::Float64(1.0)));
	assert_eq!(a.len(), 2);

	let b: MapValue = [(Value::Int64(2), Value::Float64(3.0)), (Value::Int64(0), Value::Float64(9.0))].into_iter().collect();
	assert_eq!(a, b);
	assert_eq!(a.get(&Value::Int64(2)), Some(&Value::Float64(3.0)));

	let keys: Vec<&Value> = a.iter().map(|(key, _)| key).collect();
	assert_eq!(keys, vec![&Value::Int64(0), &Value::Int64(2)]);
}

#[test]
fn list_equality_is_ordered() {
	assert_ne!(Value::List(vec![Value::Int32(0), Value::Int32(1)]), Value::List(vec![Value::Int32(1), Value::Int32(0)]));
}

#[test]
fn floats_compare_by_bit_pattern() {
	assert_eq!(Value::Float64(f64::NAN), Value::Float64(f64::NAN));
	assert_ne!(Value::Float64(0.0), Value::Float64(-0.0));
	assert_ne!(Value::Float32(1.0), Value::Float64(1.0));

	let set: SetValue = [Value::Float32(f32::NAN), Value::Float32(f32::NAN), Value::Float32(0.0), Value::Float32(-0.0)]
		.into_iter()
		.collect();
	assert_eq!(set.len(), 3);
	assert!(set.contains(&Value::Float32(f32::NAN)));
}

#[test]
fn equal_collections_hash_alike_regardless_of_order() {
	let a = Value::Set((0..50).map(Value::Int64).collect());
	let b = Value::Set((0..50).rev().map(Value::Int64).collect());
	assert_eq!(a, b);
	assert_eq!(digest(&a), digest(&b));

	let c = Value::Map([(Value::Bool(true), Value::UInt8(1)), (Value::Bool(false), Value::UInt8(0))].into_iter().collect());
	let d = Value::Map([(Value::Bool(false), Value::UInt8(0)), (Value::Bool(true), Value::UInt8(1))].into_iter().collect());
	assert_eq!(c, d);
	assert_eq!(digest(&c), digest(&d));

	let nested: SetValue = [a, b, c, d].into_iter().collect();
	assert_eq!(nested.len(), 2, "sets of sets collapse by content");
}

#[test]
fn large_collections_insert_in_linear_time() {
	let count = 200_000_i64;
	let started = std::time::Instant::now();

	let set: SetValue = (0..count).chain(0..count).map(Value::Int64).collect();
	let map: MapValue = (0..count).map(|idx| (Value::Int64(idx % (count / 2)), Value::Int64(idx))).collect();

	assert_eq!(set.len(), count as usize);
	assert_eq!(map.len(), (count / 2) as usize);
	assert_eq!(map.get(&Value::Int64(0)), Some(&Value::Int64(count / 2)));
	assert!(
		started.elapsed() < std::time::Duration::from_secs(10),
		"inserting {count} members took {:?}",
		started.elapsed()
	);
}
