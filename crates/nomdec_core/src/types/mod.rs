mod constructor;
mod cursor;
mod decode;
mod error;
mod hash;
mod kind;
mod package;
mod registry;
mod source;
mod store;
mod token;
mod type_ref;
mod value;

#[cfg(test)]
mod test_support;

/// Type-shape keyed constructor registry.
pub use constructor::ConstructorRegistry;
/// Forward-only token reader and token positions.
pub use cursor::{TokenCursor, TokenPath};
/// Recursive value decoder and its limits.
pub use decode::{DecodeOptions, Decoder};
/// Error and result aliases.
pub use error::{DecodeError, Result};
/// Content hash.
pub use hash::Ref;
/// Kind tag space.
pub use kind::Kind;
/// Package of named type definitions.
pub use package::Package;
/// Shared package table.
pub use registry::PackageRegistry;
/// Token file loading and compression detection.
pub use source::{Compression, ZSTD_MAGIC, decode_bytes, load_tokens, tokens_from_bytes};
/// Chunk storage interface and in-memory implementation.
pub use store::{ChunkStore, MemoryStore};
/// Input tokens and the JSON adapter.
pub use token::{Token, parse_tokens, tokens_from_json};
/// Type description model.
pub use type_ref::{Field, PackageRef, TypeRef};
/// Decoded value types.
pub use value::{FieldValue, MapValue, RefValue, SetValue, StructValue, UnionValue, Value};
