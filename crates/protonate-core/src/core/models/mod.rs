//! # Core Models Module
//!
//! The fundamental data structures used to represent molecular systems:
//! atoms, residues, chains, bonds, and the container tying them together.
//!
//! ## Key Components
//!
//! - [`atom`] - Individual atom representation with element and coordinates
//! - [`element`] - Chemical element identification and covalent radii
//! - [`residue`] - Residue structure and amino-acid classification
//! - [`chain`] - Chain organization and classification
//! - [`system`] - Complete molecular system with all components and relationships
//! - [`topology`] - Bond records
//! - [`ids`] - Stable identifier types for atoms, residues, and chains

pub mod atom;
pub mod chain;
pub mod element;
pub mod ids;
pub mod residue;
pub mod system;
pub mod topology;
