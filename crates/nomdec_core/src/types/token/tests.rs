use serde_json::json;

use crate::types::{DecodeError, Token, parse_tokens, tokens_from_json};

#[test]
fn converts_json_scalars_and_nesting() {
	let tokens = tokens_from_json(&json!([1, -2, 1.5, "hi", true, [0, [18446744073709551615_u64]]])).expect("tokens convert");
	assert_eq!(
		tokens,
		vec![
			Token::Int(1),
			Token::Int(-2),
			Token::Float(1.5),
			Token::String("hi".into()),
			Token::Bool(true),
			Token::Seq(vec![Token::Int(0), Token::Seq(vec![Token::UInt(u64::MAX)])]),
		]
	);
}

#[test]
fn null_reports_nested_position() {
	let err = tokens_from_json(&json!([0, [1, null]])).expect_err("null has no token form");
	match err {
		DecodeError::InvalidToken { at, got } => {
			assert_eq!(at.to_string(), "[1][1]");
			assert_eq!(got, "null");
		}
		other => panic!("unexpected error: {other}"),
	}
}

#[test]
fn top_level_must_be_array() {
	let err = tokens_from_json(&json!({"a": 1})).expect_err("object is not a token stream");
	assert!(matches!(err, DecodeError::TypeMismatch { expected: "array", got: "object", .. }));
}

#[test]
fn parses_json_text() {
	let tokens = parse_tokens(b"[0, true]").expect("json parses");
	assert_eq!(tokens, vec![Token::Int(0), Token::Bool(true)]);

	let err = parse_tokens(b"[0, ").expect_err("truncated json fails");
	assert!(matches!(err, DecodeError::InvalidJson(_)));
}
