//! # Protonate Core Library
//!
//! A library for normalizing the hydrogen content of macromolecular structures:
//! every existing hydrogen is stripped and rebuilt from a forcefield's hydrogen
//! templates at a target pH, producing a structure with a consistent protonation
//! state ahead of molecular-dynamics simulation.
//!
//! ## Architectural Philosophy
//!
//! The library is split into three layers with a strict dependency direction,
//! keeping data, policy, and procedure separable and testable.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`MolecularSystem`),
//!   structure file I/O (PDB and mmCIF), forcefield hydrogen-template data, and
//!   the geometric construction utilities.
//!
//! - **[`engine`]: The Run Environment.** Run configuration, the compute
//!   platform/device property resolver, and the error taxonomy shared by the
//!   workflow layer.
//!
//! - **[`workflows`]: The Public API.** The user-facing entry point that ties
//!   `core` and `engine` together into the hydrogen-normalization procedure.

pub mod core;
pub mod engine;
pub mod workflows;
