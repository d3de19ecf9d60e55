use serde_json::Value as Json;

use crate::types::{DecodeError, Result, TokenPath};

/// One pre-parsed input token.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
	/// Boolean literal.
	Bool(bool),
	/// Integral number that fits `i64`.
	Int(i64),
	/// Integral number above `i64::MAX`.
	UInt(u64),
	/// Non-integral number.
	Float(f64),
	/// UTF-8 string.
	String(Box<str>),
	/// Nested token sequence.
	Seq(Vec<Token>),
}

impl Token {
	/// Short label of the token's native kind.
	pub fn type_label(&self) -> &'static str {
		match self {
			Self::Bool(_) => "bool",
			Self::Int(_) | Self::UInt(_) => "integer",
			Self::Float(_) => "float",
			Self::String(_) => "string",
			Self::Seq(_) => "sequence",
		}
	}

	/// Whether the token is any kind of number.
	pub fn is_number(&self) -> bool {
		matches!(self, Self::Int(_) | Self::UInt(_) | Self::Float(_))
	}

	/// Convert one JSON value into a token.
	pub fn from_json(value: &Json) -> Result<Self> {
		from_json_at(value, &mut Vec::new())
	}
}

impl From<bool> for Token {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<i64> for Token {
	fn from(value: i64) -> Self {
		Self::Int(value)
	}
}

impl From<&str> for Token {
	fn from(value: &str) -> Self {
		Self::String(value.into())
	}
}

impl From<Vec<Token>> for Token {
	fn from(value: Vec<Token>) -> Self {
		Self::Seq(value)
	}
}

/// Convert a top-level JSON array into its token sequence.
pub fn tokens_from_json(value: &Json) -> Result<Vec<Token>> {
	match value {
		Json::Array(items) => {
			let mut path = Vec::with_capacity(4);
			let mut out = Vec::with_capacity(items.len());
			for (idx, item) in items.iter().enumerate() {
				path.push(idx);
				out.push(from_json_at(item, &mut path)?);
				path.pop();
			}
			Ok(out)
		}
		other => Err(DecodeError::TypeMismatch {
			at: TokenPath::root(),
			expected: "array",
			got: json_label(other),
		}),
	}
}

/// Parse JSON text holding a top-level token array.
pub fn parse_tokens(bytes: &[u8]) -> Result<Vec<Token>> {
	let value: Json = serde_json::from_slice(bytes)?;
	tokens_from_json(&value)
}

fn from_json_at(value: &Json, path: &mut Vec<usize>) -> Result<Token> {
	match value {
		Json::Bool(v) => Ok(Token::Bool(*v)),
		Json::Number(number) => {
			if let Some(v) = number.as_i64() {
				Ok(Token::Int(v))
			} else if let Some(v) = number.as_u64() {
				Ok(Token::UInt(v))
			} else {
				Ok(Token::Float(number.as_f64().unwrap_or(f64::NAN)))
			}
		}
		Json::String(v) => Ok(Token::String(v.as_str().into())),
		Json::Array(items) => {
			let mut out = Vec::with_capacity(items.len());
			for (idx, item) in items.iter().enumerate() {
				path.push(idx);
				out.push(from_json_at(item, path)?);
				path.pop();
			}
			Ok(Token::Seq(out))
		}
		Json::Null | Json::Object(_) => Err(DecodeError::InvalidToken {
			at: TokenPath::from_indices(path),
			got: json_label(value),
		}),
	}
}

fn json_label(value: &Json) -> &'static str {
	match value {
		Json::Null => "null",
		Json::Bool(_) => "bool",
		Json::Number(_) => "number",
		Json::String(_) => "string",
		Json::Array(_) => "array",
		Json::Object(_) => "object",
	}
}

#[cfg(test)]
mod tests;
