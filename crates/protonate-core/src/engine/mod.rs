//! # Engine Module
//!
//! The run environment for the normalization workflow: the immutable run
//! configuration, the compute platform/device property resolver, and the
//! error taxonomy shared with the workflow layer.

pub mod config;
pub mod error;
pub mod platform;
