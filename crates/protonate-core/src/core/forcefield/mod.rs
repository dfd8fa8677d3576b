//! Forcefield data for hydrogen construction.
//!
//! A forcefield here is the part of a simulation parameter set this tool
//! actually consumes: per-residue hydrogen templates (which hydrogens exist,
//! on which parent, with what bond length and local geometry) and the
//! protonation rules deciding which template variant applies at a given pH.

pub mod params;
pub mod protonation;
