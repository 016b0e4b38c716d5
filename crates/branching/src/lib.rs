//! branching - The fork engine
//!
//! Creates a new branch, or extends an existing one, from a user-selected
//! span of text inside some message. Forking is a provenance link, not a
//! content copy: the new branch starts with no messages and a queued
//! reference to the selected text. This crate also owns the sibling
//! business rules the repository deliberately does not enforce: a
//! conversation keeps at least one branch, the primary branch is never
//! deleted individually, and positions stay contiguous after removal.

pub mod engine;
pub mod error;

pub use engine::{ForkEngine, ForkSource};
pub use error::{ForkError, Result};
