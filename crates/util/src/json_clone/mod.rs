//! JSON cloning utilities.
//!
//! The deep-copy primitive used when a handle is built in copy mode and by
//! `clone_record` / `assign`.

mod clone;

pub use clone::{clone, clone_record};
