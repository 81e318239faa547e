//! # Canopy Document
//! A small self-describing document model used as the replication wire
//! format. Scalars are stored as text and parsed on demand, containers
//! auto-vivify on write, and the writer omits empty slots.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod error;
mod parser;
mod pretty;
mod value;
mod vector;
mod writer;

pub use error::ParseError;
pub use parser::MAX_DEPTH;
pub use pretty::pretty;
pub use value::{Map, Value};
pub use vector::{Vector2, Vector3, Vector4};
