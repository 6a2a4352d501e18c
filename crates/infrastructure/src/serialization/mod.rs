//! Deterministic JSON encoding for files written by Folio.
//!
//! Files are written with 2-space indentation and a trailing newline; map
//! keys come out sorted when the source type uses `BTreeMap`.

mod json;

pub use json::{SerializationError, from_json_bytes, to_json_stable_bytes};
