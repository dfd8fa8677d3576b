//! # Workflows Module
//!
//! The public, user-facing entry points of the library. A workflow ties the
//! `core` data structures and the `engine` configuration together into a
//! complete procedure; [`hydrogens`] implements the strip-and-rebuild
//! hydrogen normalization this tool exists for.

pub mod hydrogens;
