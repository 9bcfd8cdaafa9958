//! Static per-record metadata.
//!
//! Descriptors are `'static`, built once by generated code and read-only
//! thereafter. They describe *what exists*; keys, accessors and queries in
//! the rest of the crate describe *what runs* against it.
pub mod entity;
pub mod field;
pub mod unique;
