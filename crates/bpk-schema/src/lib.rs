//! Shared types for `bpk`.
//!
//! Plain values with no I/O: the artifact kinds a source tree can build
//! into, the platforms the packaging tool targets, and the request that
//! drives a single packaging run.

pub mod arch;
pub mod kind;
pub mod request;

// Re-exports
pub use arch::*;
pub use kind::*;
pub use request::PackageRequest;
