//! Shared foundational types used across the Veriform front ends and generators.
//!
//! Currently this is the [`ContentHash`] used to fingerprint loaded sources
//! and to decide whether a generated artifact on disk is already up to date.

#![warn(missing_docs)]

pub mod hash;

pub use hash::ContentHash;
