use thiserror::Error;

use crate::core::forcefield::params::ForcefieldLoadError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Platform '{name}' is not supported by this installation")]
    UnknownPlatform { name: String },

    #[error(transparent)]
    Forcefield(#[from] ForcefieldLoadError),

    #[error("No hydrogen template for residue '{residue_name}' (residue {residue_number})")]
    MissingTemplate {
        residue_name: String,
        residue_number: isize,
    },

    #[error("Internal logic error: {0}")]
    Internal(String),
}
