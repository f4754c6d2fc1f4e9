//! # Fior Engine
//!
//! Core query/transform engine for the ranyou "fi(lter) or(der)" editor:
//! - Playlist item data model
//! - Field catalog and value coercion
//! - Seeded deterministic RNG
//! - Operation evaluators (search, check, random select, sort, randomize)
//! - Pipeline document model and structural mutators
//! - Document persistence boundary
//!
//! The engine is a pure, synchronous library: it receives already-fetched
//! playlist data and a decoded pipeline document, and returns derived item
//! lists. It performs no I/O and holds no shared mutable state.

pub mod coerce;
pub mod document;
pub mod error;
pub mod eval;
pub mod key;
pub mod model;
pub mod rng;
pub mod storage;

pub use document::FiorData;
pub use error::{Error, Result};
pub use eval::{evaluate_column, evaluate_document};
pub use key::{Key, ValueKind};
