use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::types::{DecodeError, Kind, Result, TypeRef, Value};

type Constructor<D> = Arc<dyn Fn(Value) -> D + Send + Sync>;

/// Maps a type shape to the function that wraps generic values into domain values `D`.
pub struct ConstructorRegistry<D> {
	constructors: RwLock<HashMap<TypeRef, Constructor<D>>>,
}

impl<D> ConstructorRegistry<D> {
	/// Empty registry.
	pub fn new() -> Self {
		Self {
			constructors: RwLock::new(HashMap::new()),
		}
	}

	/// Associate `ty` with `constructor`, replacing any earlier registration.
	pub fn register<F>(&self, ty: TypeRef, constructor: F)
	where
		F: Fn(Value) -> D + Send + Sync + 'static,
	{
		debug!(ty = %ty, "registering constructor");
		self.constructors.write().insert(ty, Arc::new(constructor));
	}

	/// Register one constructor for every primitive kind shape.
	pub fn register_primitives<F>(&self, constructor: F)
	where
		F: Fn(Value) -> D + Send + Sync + 'static,
	{
		let shared: Constructor<D> = Arc::new(constructor);
		let mut constructors = self.constructors.write();
		for kind in Kind::ALL.into_iter().filter(|kind| kind.is_primitive()) {
			constructors.insert(TypeRef::Primitive(kind), Arc::clone(&shared));
		}
	}

	/// Wrap a decoded `value` of type `ty` into its domain representation.
	pub fn wrap(&self, ty: &TypeRef, value: Value) -> Result<D> {
		let constructor = self
			.constructors
			.read()
			.get(ty)
			.cloned()
			.ok_or_else(|| DecodeError::NoConstructorRegistered { ty: ty.to_string() })?;
		Ok(constructor(value))
	}

	/// Whether a constructor is registered for `ty`.
	pub fn contains(&self, ty: &TypeRef) -> bool {
		self.constructors.read().contains_key(ty)
	}

	/// Number of registered shapes.
	pub fn len(&self) -> usize {
		self.constructors.read().len()
	}

	/// Whether no shape is registered.
	pub fn is_empty(&self) -> bool {
		self.constructors.read().is_empty()
	}
}

impl<D> Default for ConstructorRegistry<D> {
	fn default() -> Self {
		Self::new()
	}
}

impl<D> fmt::Debug for ConstructorRegistry<D> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ConstructorRegistry").field("len", &self.len()).finish()
	}
}
