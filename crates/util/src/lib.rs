//! obj-iface-util - value-level primitives for obj-iface
//!
//! The deep-copy primitive, the deep-merge primitive and the record
//! predicate that the record interface wrapper is built on.

pub mod json_clone;
pub mod merge;
pub mod predicate;

// Re-exports for convenience
pub use json_clone::{clone, clone_record};
pub use merge::{deep_merge, merge_into};
pub use predicate::is_record;
