//! Decoder for tag-prefixed token streams describing structurally typed values.

/// Kind tags, type descriptions, packages, registries, and the recursive value decoder.
pub mod types;
