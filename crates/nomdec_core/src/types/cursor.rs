use std::fmt;

use crate::types::{DecodeError, Kind, Ref, Result, Token};

/// Location of a token: one index per nesting level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenPath(Vec<usize>);

impl TokenPath {
	/// Path of the outermost sequence itself.
	pub fn root() -> Self {
		Self(Vec::new())
	}

	/// Build a path from per-level indices.
	pub fn from_indices(indices: &[usize]) -> Self {
		Self(indices.to_vec())
	}

	/// Per-level indices.
	pub fn indices(&self) -> &[usize] {
		&self.0
	}

	fn child(&self, idx: usize) -> Self {
		let mut out = Vec::with_capacity(self.0.len() + 1);
		out.extend_from_slice(&self.0);
		out.push(idx);
		Self(out)
	}
}

impl fmt::Display for TokenPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.0.is_empty() {
			return f.write_str("[]");
		}
		for idx in &self.0 {
			write!(f, "[{idx}]")?;
		}
		Ok(())
	}
}

/// Forward-only reader over one level of a token sequence.
#[derive(Debug, Clone)]
pub struct TokenCursor<'a> {
	tokens: &'a [Token],
	pos: usize,
	base: TokenPath,
}

impl<'a> TokenCursor<'a> {
	/// Create a cursor at the first token.
	pub fn new(tokens: &'a [Token]) -> Self {
		Self {
			tokens,
			pos: 0,
			base: TokenPath::root(),
		}
	}

	/// Path of the next token to be read.
	pub fn position(&self) -> TokenPath {
		self.base.child(self.pos)
	}

	/// Number of unread tokens at this level.
	pub fn remaining(&self) -> usize {
		self.tokens.len().saturating_sub(self.pos)
	}

	/// Whether every token at this level has been consumed.
	pub fn at_end(&self) -> bool {
		self.pos >= self.tokens.len()
	}

	/// Look at the next token without consuming it.
	pub fn peek(&self) -> Option<&'a Token> {
		self.tokens.get(self.pos)
	}

	/// Consume and return the next token.
	pub fn read_next(&mut self, expected: &'static str) -> Result<&'a Token> {
		let Some(token) = self.tokens.get(self.pos) else {
			return Err(DecodeError::UnexpectedEnd {
				at: self.position(),
				expected,
			});
		};
		self.pos += 1;
		Ok(token)
	}

	/// Read a boolean token.
	pub fn read_bool(&mut self) -> Result<bool> {
		let at = self.position();
		match self.read_next("bool")? {
			Token::Bool(value) => Ok(*value),
			other => Err(mismatch(at, "bool", other)),
		}
	}

	/// Read a string token.
	pub fn read_string(&mut self) -> Result<&'a str> {
		let at = self.position();
		match self.read_next("string")? {
			Token::String(value) => Ok(value),
			other => Err(mismatch(at, "string", other)),
		}
	}

	/// Read a number as a fixed-width integer, range-checked against `T`.
	pub fn read_int<T: TryFrom<i128>>(&mut self, target: &'static str) -> Result<T> {
		let at = self.position();
		let token = self.read_next(target)?;
		let wide = match token {
			Token::Int(value) => i128::from(*value),
			Token::UInt(value) => i128::from(*value),
			Token::Float(value) if value.is_finite() && value.fract() == 0.0 => *value as i128,
			other => return Err(mismatch(at, target, other)),
		};
		T::try_from(wide).map_err(|_| out_of_range(at, token, target))
	}

	/// Read a number as `f64`.
	pub fn read_f64(&mut self) -> Result<f64> {
		let at = self.position();
		match self.read_next("float64")? {
			Token::Int(value) => Ok(*value as f64),
			Token::UInt(value) => Ok(*value as f64),
			Token::Float(value) => Ok(*value),
			other => Err(mismatch(at, "float64", other)),
		}
	}

	/// Read a number as `f32`; finite values beyond `f32` range fail.
	pub fn read_f32(&mut self) -> Result<f32> {
		let at = self.position();
		let token = self.peek();
		let wide = self.read_f64()?;
		let narrow = wide as f32;
		if wide.is_finite() && !narrow.is_finite() {
			return Err(DecodeError::RangeError {
				at,
				value: token.map(render_number).unwrap_or_default(),
				target: "float32",
			});
		}
		Ok(narrow)
	}

	/// Read a kind tag.
	pub fn read_kind(&mut self) -> Result<Kind> {
		let at = self.position();
		let code: u8 = self.read_int("kind")?;
		Kind::from_code(code).ok_or(DecodeError::UnknownKind { at, code })
	}

	/// Read a content hash string.
	pub fn read_ref(&mut self) -> Result<Ref> {
		Ref::parse(self.read_string()?)
	}

	/// Consume a nested sequence and return a cursor over it.
	pub fn read_sequence(&mut self) -> Result<TokenCursor<'a>> {
		let at = self.position();
		match self.read_next("sequence")? {
			Token::Seq(items) => Ok(Self {
				tokens: items,
				pos: 0,
				base: at,
			}),
			other => Err(mismatch(at, "sequence", other)),
		}
	}
}

fn mismatch(at: TokenPath, expected: &'static str, got: &Token) -> DecodeError {
	DecodeError::TypeMismatch {
		at,
		expected,
		got: got.type_label(),
	}
}

fn out_of_range(at: TokenPath, token: &Token, target: &'static str) -> DecodeError {
	DecodeError::RangeError {
		at,
		value: render_number(token),
		target,
	}
}

fn render_number(token: &Token) -> String {
	match token {
		Token::Int(value) => value.to_string(),
		Token::UInt(value) => value.to_string(),
		Token::Float(value) => value.to_string(),
		other => other.type_label().to_owned(),
	}
}

#[cfg(test)]
mod tests;
