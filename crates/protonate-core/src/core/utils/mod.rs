//! Geometric utilities shared by the hydrogen-placement workflow.

pub mod geometry;
