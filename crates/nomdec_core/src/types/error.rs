use thiserror::Error;

use crate::types::{Kind, Ref, TokenPath};

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, DecodeError>;

/// Errors produced while reading tokens, resolving types, and decoding values.
#[derive(Debug, Error)]
pub enum DecodeError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Input is neither JSON text nor a zstd frame.
	#[error("unsupported compression or not a token file (magic={magic:?})")]
	UnknownMagic {
		/// First up-to-4 bytes of the stream.
		magic: [u8; 4],
	},
	/// Decompression output exceeded configured safety limit.
	#[error("decompressed output exceeded limit {limit} bytes")]
	DecompressedTooLarge {
		/// Maximum allowed output bytes.
		limit: usize,
	},
	/// Token text was not valid JSON.
	#[error("invalid json: {0}")]
	InvalidJson(#[from] serde_json::Error),
	/// JSON value has no token representation.
	#[error("invalid token at {at}: {got} has no token form")]
	InvalidToken {
		/// Location of the offending JSON value.
		at: TokenPath,
		/// JSON value kind.
		got: &'static str,
	},
	/// Cursor exhausted mid-parse.
	#[error("unexpected end of tokens at {at}, expected {expected}")]
	UnexpectedEnd {
		/// Position where the read was attempted.
		at: TokenPath,
		/// What the decoder was about to read.
		expected: &'static str,
	},
	/// Token's native kind does not match the requested read.
	#[error("token type mismatch at {at}: expected {expected}, got {got}")]
	TypeMismatch {
		/// Position of the token.
		at: TokenPath,
		/// Requested token interpretation.
		expected: &'static str,
		/// Actual token kind.
		got: &'static str,
	},
	/// Numeric token outside the target integer width.
	#[error("number out of range at {at}: {value} does not fit {target}")]
	RangeError {
		/// Position of the token.
		at: TokenPath,
		/// Rendered token value.
		value: String,
		/// Target integer type.
		target: &'static str,
	},
	/// Blob string was not valid base64.
	#[error("malformed blob at {at}: {reason}")]
	MalformedBlob {
		/// Position of the token.
		at: TokenPath,
		/// Decoder failure description.
		reason: String,
	},
	/// String token is not a `sha1-<hex>` content hash.
	#[error("malformed content hash: {value:?}")]
	MalformedRef {
		/// Offending string.
		value: String,
	},
	/// Kind tag code outside the known table.
	#[error("unknown kind code {code} at {at}")]
	UnknownKind {
		/// Position of the tag.
		at: TokenPath,
		/// Wire code read.
		code: u8,
	},
	/// Known kind in a position where it is not allowed.
	#[error("unexpected kind {kind} at {at} while reading {context}")]
	UnexpectedKind {
		/// Position of the tag.
		at: TokenPath,
		/// Kind read.
		kind: Kind,
		/// Grammar position being decoded.
		context: &'static str,
	},
	/// Compound type description with the wrong number of parameters.
	#[error("{kind} expects {expected} type parameters, got {got}")]
	ArityMismatch {
		/// Compound kind.
		kind: Kind,
		/// Required parameter count.
		expected: usize,
		/// Parameters read.
		got: usize,
	},
	/// Package hash is not registered.
	#[error("unknown package {package}")]
	UnknownPackage {
		/// Requested package hash.
		package: Ref,
	},
	/// Package has no definition with this name.
	#[error("unknown type {name} in package {package}")]
	UnknownType {
		/// Requested definition name.
		name: String,
		/// Package searched.
		package: Ref,
	},
	/// Named reference resolved to something that is neither a struct nor an enum.
	#[error("type {name} in package {package} is not a struct or enum definition")]
	NotNamedDefinition {
		/// Definition name.
		name: String,
		/// Package holding the definition.
		package: Ref,
	},
	/// Local reference decoded without an enclosing package scope.
	#[error("type {name} refers to the enclosing package, but no package scope is set")]
	NoEnclosingPackage {
		/// Definition name.
		name: String,
	},
	/// Union ordinal outside the struct's choices.
	#[error("invalid union index {index} for {name} with {choices} choices")]
	InvalidUnionIndex {
		/// Struct name.
		name: String,
		/// Ordinal read.
		index: u32,
		/// Number of declared choices.
		choices: usize,
	},
	/// Package declares the same type name twice.
	#[error("duplicate type name {name} in package")]
	DuplicateTypeName {
		/// Repeated name.
		name: String,
	},
	/// Different package content already registered under this hash.
	#[error("package {package} already registered with different content")]
	AlreadyRegistered {
		/// Colliding hash.
		package: Ref,
	},
	/// No constructor was registered for the type shape.
	#[error("no constructor registered for {ty}")]
	NoConstructorRegistered {
		/// Rendered type shape.
		ty: String,
	},
	/// Decoder recursion depth exceeded configured limit.
	#[error("decode depth exceeded (max={max_depth})")]
	DepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// A single collection held more elements than allowed.
	#[error("collection too large at {at}: count={count}, max={max}")]
	CollectionTooLarge {
		/// Position of the element sequence.
		at: TokenPath,
		/// Element tokens present.
		count: usize,
		/// Configured ceiling.
		max: usize,
	},
	/// Referenced chunk is absent from the chunk store.
	#[error("chunk not found: {hash}")]
	ChunkNotFound {
		/// Requested chunk hash.
		hash: Ref,
	},
	/// Value is stored by reference but the decoder has no chunk store.
	#[error("value at {at} is stored in chunk {hash}, but no chunk store is configured")]
	NoChunkStore {
		/// Position of the reference token.
		at: TokenPath,
		/// Referenced chunk hash.
		hash: Ref,
	},
}
