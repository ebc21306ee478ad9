//! # Keel Core Alias System
//!
//! Pure name-to-path translation. An alias is a name beginning with the
//! reserved marker character (`@app`, `@runtime`, ...) mapped to an absolute
//! filesystem or URL-like path. The registry is populated during bootstrap
//! and read for the process lifetime; a small fixed set of root aliases is
//! immutable after construction.

pub mod error;
pub mod registry;

pub use error::AliasSystemError;
pub use registry::{ALIAS_MARKER, AliasRegistry};

// Test module declaration
#[cfg(test)]
mod tests;
