use std::fmt;
use std::str::FromStr;

use crate::types::DecodeError;

const PREFIX: &str = "sha1-";

/// Content hash identifying a package or a stored chunk.
///
/// Textual form is `sha1-` followed by 40 hex digits. The all-zero digest is
/// the encoder's "enclosing package" sentinel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ref {
	digest: [u8; Ref::LEN],
}

impl Ref {
	/// Digest length in bytes.
	pub const LEN: usize = 20;

	/// Wrap raw digest bytes.
	pub fn from_digest(digest: [u8; Self::LEN]) -> Self {
		Self { digest }
	}

	/// Raw digest bytes.
	pub fn digest(&self) -> &[u8; Self::LEN] {
		&self.digest
	}

	/// Whether this is the all-zero sentinel.
	pub fn is_zero(&self) -> bool {
		self.digest.iter().all(|byte| *byte == 0)
	}

	/// Parse the `sha1-<hex>` form.
	pub fn parse(value: &str) -> Result<Self, DecodeError> {
		let malformed = || DecodeError::MalformedRef { value: value.to_owned() };
		let hex_part = value.strip_prefix(PREFIX).ok_or_else(malformed)?;
		let mut digest = [0_u8; Self::LEN];
		hex::decode_to_slice(hex_part, &mut digest).map_err(|_| malformed())?;
		Ok(Self { digest })
	}

	/// Whether a string carries the `sha1-` prefix, well-formed or not.
	pub fn has_prefix(value: &str) -> bool {
		value.starts_with(PREFIX)
	}

	/// Cheap check that a string has the hash shape, without allocating.
	pub fn looks_like(value: &str) -> bool {
		value
			.strip_prefix(PREFIX)
			.is_some_and(|hex_part| hex_part.len() == Self::LEN * 2 && hex_part.bytes().all(|byte| byte.is_ascii_hexdigit()))
	}
}

impl FromStr for Ref {
	type Err = DecodeError;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		Self::parse(value)
	}
}

impl fmt::Display for Ref {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{PREFIX}{}", hex::encode(self.digest))
	}
}
