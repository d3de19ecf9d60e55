use std::collections::HashMap;
use std::sync::Arc;

use crate::types::Ref;

/// Content-addressed byte storage consulted for values stored by reference.
///
/// Absence is reported as `None`; the decoder turns it into
/// [`DecodeError::ChunkNotFound`](crate::types::DecodeError::ChunkNotFound).
pub trait ChunkStore {
	/// Chunk bytes for `hash`.
	fn get(&self, hash: &Ref) -> Option<Arc<[u8]>>;

	/// Whether `hash` is stored.
	fn has(&self, hash: &Ref) -> bool {
		self.get(hash).is_some()
	}
}

/// In-memory chunk store keyed by externally computed hashes.
#[derive(Debug, Default)]
pub struct MemoryStore {
	chunks: HashMap<Ref, Arc<[u8]>>,
}

impl MemoryStore {
	/// Empty store.
	pub fn new() -> Self {
		Self::default()
	}

	/// Store `bytes` under `hash`, replacing any previous chunk.
	pub fn put(&mut self, hash: Ref, bytes: &[u8]) {
		self.chunks.insert(hash, Arc::from(bytes));
	}

	/// Number of stored chunks.
	pub fn len(&self) -> usize {
		self.chunks.len()
	}

	/// Whether the store is empty.
	pub fn is_empty(&self) -> bool {
		self.chunks.is_empty()
	}
}

impl ChunkStore for MemoryStore {
	fn get(&self, hash: &Ref) -> Option<Arc<[u8]>> {
		self.chunks.get(hash).cloned()
	}

	fn has(&self, hash: &Ref) -> bool {
		self.chunks.contains_key(hash)
	}
}
