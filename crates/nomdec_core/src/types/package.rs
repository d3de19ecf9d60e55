use std::collections::BTreeSet;

use crate::types::{DecodeError, Ref, Result, TypeRef};

/// Immutable unit of named type definitions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Package {
	dependencies: BTreeSet<Ref>,
	named_types: Vec<(Box<str>, TypeRef)>,
}

impl Package {
	/// Build a package, rejecting repeated type names.
	pub fn new(dependencies: impl IntoIterator<Item = Ref>, named_types: Vec<(Box<str>, TypeRef)>) -> Result<Self> {
		let mut seen = BTreeSet::new();
		for (name, _) in &named_types {
			if !seen.insert(name.as_ref()) {
				return Err(DecodeError::DuplicateTypeName { name: name.to_string() });
			}
		}

		Ok(Self {
			dependencies: dependencies.into_iter().collect(),
			named_types,
		})
	}

	/// Hashes of packages this one depends on.
	pub fn dependencies(&self) -> &BTreeSet<Ref> {
		&self.dependencies
	}

	/// Named definitions in insertion order.
	pub fn named_types(&self) -> impl ExactSizeIterator<Item = (&str, &TypeRef)> {
		self.named_types.iter().map(|(name, ty)| (name.as_ref(), ty))
	}

	/// Look up a named definition.
	pub fn named_type(&self, name: &str) -> Option<&TypeRef> {
		self.named_types.iter().find(|(item, _)| item.as_ref() == name).map(|(_, ty)| ty)
	}
}

#[cfg(test)]
mod tests;
