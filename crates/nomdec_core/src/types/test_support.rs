use serde_json::Value as Json;

use crate::types::{Kind, Ref, Token, tokens_from_json};

pub(crate) const SAMPLE_REF: &str = "sha1-a9993e364706816aba3e25717850c26c9cd0d89d";
pub(crate) const ZERO_REF: &str = "sha1-0000000000000000000000000000000000000000";

pub(crate) fn tokens(value: Json) -> Vec<Token> {
	tokens_from_json(&value).expect("test json converts to tokens")
}

pub(crate) fn code(kind: Kind) -> u8 {
	kind.code()
}

pub(crate) fn sample_ref() -> Ref {
	Ref::parse(SAMPLE_REF).expect("sample hash parses")
}

pub(crate) fn ref_of(byte: u8) -> Ref {
	Ref::from_digest([byte; Ref::LEN])
}
