use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::types::{DecodeError, Package, Ref, Result, TypeRef};

/// Shared table of registered packages keyed by content hash.
///
/// Entries are never removed or replaced, so lookups hand out `Arc` clones and
/// never hold the lock while the caller decodes.
#[derive(Debug, Default)]
pub struct PackageRegistry {
	packages: RwLock<HashMap<Ref, Arc<Package>>>,
}

impl PackageRegistry {
	/// Empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Register `package` under its externally computed `hash`.
	///
	/// Re-registering identical content is a no-op; different content under a
	/// registered hash fails with [`DecodeError::AlreadyRegistered`].
	pub fn register(&self, hash: Ref, package: Package) -> Result<Ref> {
		let mut packages = self.packages.write();
		if let Some(existing) = packages.get(&hash) {
			if **existing == package {
				debug!(package = %hash, "package already registered");
				return Ok(hash);
			}
			return Err(DecodeError::AlreadyRegistered { package: hash });
		}

		debug!(package = %hash, named_types = package.named_types().len(), "registering package");
		packages.insert(hash, Arc::new(package));
		Ok(hash)
	}

	/// Registered package for `hash`.
	pub fn get(&self, hash: &Ref) -> Result<Arc<Package>> {
		self.packages
			.read()
			.get(hash)
			.cloned()
			.ok_or(DecodeError::UnknownPackage { package: *hash })
	}

	/// Named definition `name` inside package `hash`.
	pub fn lookup(&self, hash: &Ref, name: &str) -> Result<TypeRef> {
		let package = self.get(hash)?;
		package.named_type(name).cloned().ok_or_else(|| DecodeError::UnknownType {
			name: name.to_owned(),
			package: *hash,
		})
	}

	/// Whether `hash` is registered.
	pub fn contains(&self, hash: &Ref) -> bool {
		self.packages.read().contains_key(hash)
	}

	/// Number of registered packages.
	pub fn len(&self) -> usize {
		self.packages.read().len()
	}

	/// Whether no package is registered.
	pub fn is_empty(&self) -> bool {
		self.packages.read().is_empty()
	}
}
