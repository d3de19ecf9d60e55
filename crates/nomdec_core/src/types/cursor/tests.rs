use serde_json::json;

use crate::types::test_support::tokens;
use crate::types::{DecodeError, Kind, Token, TokenCursor};

#[test]
fn reads_mixed_tokens_in_order() {
	let input = tokens(json!([1, "hi", true]));
	let mut cursor = TokenCursor::new(&input);

	assert_eq!(cursor.read_f64().expect("number reads"), 1.0);
	assert!(!cursor.at_end());
	assert_eq!(cursor.read_string().expect("string reads"), "hi");
	assert!(!cursor.at_end());
	assert!(cursor.read_bool().expect("bool reads"));
	assert!(cursor.at_end());
}

#[test]
fn exhausted_cursor_reports_unexpected_end() {
	let input = tokens(json!([true]));
	let mut cursor = TokenCursor::new(&input);
	cursor.read_bool().expect("bool reads");

	let err = cursor.read_string().expect_err("cursor is exhausted");
	match err {
		DecodeError::UnexpectedEnd { at, expected } => {
			assert_eq!(at.to_string(), "[1]");
			assert_eq!(expected, "string");
		}
		other => panic!("unexpected error: {other}"),
	}
}

#[test]
fn string_where_number_expected_is_type_mismatch() {
	let input = tokens(json!(["42"]));
	let mut cursor = TokenCursor::new(&input);
	let err = cursor.read_int::<i32>("int32").expect_err("string is not a number");
	assert!(matches!(err, DecodeError::TypeMismatch { expected: "int32", got: "string", .. }));
}

#[test]
fn integer_width_is_range_checked() {
	let input = tokens(json!([255, 256, -1, 1.0, 1.5]));
	let mut cursor = TokenCursor::new(&input);

	assert_eq!(cursor.read_int::<u8>("uint8").expect("255 fits u8"), 255);
	let err = cursor.read_int::<u8>("uint8").expect_err("256 overflows u8");
	assert!(matches!(err, DecodeError::RangeError { ref value, target: "uint8", .. } if value == "256"));
	let err = cursor.read_int::<u32>("uint32").expect_err("negative overflows u32");
	assert!(matches!(err, DecodeError::RangeError { target: "uint32", .. }));
	assert_eq!(cursor.read_int::<i16>("int16").expect("integral float is accepted"), 1);
	let err = cursor.read_int::<i16>("int16").expect_err("fractional float is not an integer");
	assert!(matches!(err, DecodeError::TypeMismatch { got: "float", .. }));
}

#[test]
fn u64_extremes_survive() {
	let input = vec![Token::UInt(u64::MAX), Token::Int(i64::MIN)];
	let mut cursor = TokenCursor::new(&input);
	assert_eq!(cursor.read_int::<u64>("uint64").expect("u64 max reads"), u64::MAX);
	assert_eq!(cursor.read_int::<i64>("int64").expect("i64 min reads"), i64::MIN);
}

#[test]
fn float32_overflow_is_range_error() {
	let input = tokens(json!([1e300, 0.5]));
	let mut cursor = TokenCursor::new(&input);
	let err = cursor.read_f32().expect_err("1e300 overflows f32");
	assert!(matches!(err, DecodeError::RangeError { target: "float32", .. }));
	assert_eq!(cursor.read_f32().expect("0.5 fits"), 0.5);
}

#[test]
fn nested_sequences_track_position() {
	let input = tokens(json!([0, [1, [true]]]));
	let mut cursor = TokenCursor::new(&input);
	cursor.read_int::<u8>("uint8").expect("first reads");

	let mut outer = cursor.read_sequence().expect("sequence reads");
	assert!(cursor.at_end());
	assert_eq!(outer.remaining(), 2);
	outer.read_int::<u8>("uint8").expect("nested number reads");

	let mut inner = outer.read_sequence().expect("inner sequence reads");
	assert_eq!(inner.position().to_string(), "[1][1][0]");
	let err = inner.read_string().expect_err("bool is not a string");
	match err {
		DecodeError::TypeMismatch { at, .. } => assert_eq!(at.to_string(), "[1][1][0]"),
		other => panic!("unexpected error: {other}"),
	}
}

#[test]
fn read_sequence_rejects_scalars() {
	let input = tokens(json!([3]));
	let mut cursor = TokenCursor::new(&input);
	let err = cursor.read_sequence().expect_err("number is not a sequence");
	assert!(matches!(err, DecodeError::TypeMismatch { expected: "sequence", got: "integer", .. }));
}

#[test]
fn kind_tags_and_peek() {
	let input = tokens(json!([20, 99]));
	let mut cursor = TokenCursor::new(&input);
	assert!(cursor.peek().is_some_and(Token::is_number));
	assert_eq!(cursor.read_kind().expect("kind reads"), Kind::TypeRef);
	let err = cursor.read_kind().expect_err("99 is not a kind");
	assert!(matches!(err, DecodeError::UnknownKind { code: 99, .. }));
	assert!(cursor.peek().is_none());
}

#[test]
fn reads_content_hash() {
	let input = tokens(json!(["sha1-a9993e364706816aba3e25717850c26c9cd0d89d", "nope"]));
	let mut cursor = TokenCursor::new(&input);
	let hash = cursor.read_ref().expect("hash reads");
	assert_eq!(hash.to_string(), "sha1-a9993e364706816aba3e25717850c26c9cd0d89d");
	assert!(matches!(cursor.read_ref(), Err(DecodeError::MalformedRef { .. })));
}
