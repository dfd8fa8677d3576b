//! Input/output for molecular structure file formats.
//!
//! Provides the [`traits::MolecularFile`] interface, the PDB and mmCIF
//! implementations, and extension-based format dispatch. The dispatcher is
//! deliberately strict: exactly `.pdb` or `.cif`, case-sensitive, with no
//! content sniffing, so a misnamed input fails before anything is parsed.

pub mod mmcif;
pub mod pdb;
pub mod traits;

use std::path::Path;
use thiserror::Error;

/// The structure file formats this tool reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureFormat {
    Pdb,
    Mmcif,
}

#[derive(Debug, Error)]
#[error("Format not supported: must be '.pdb' or '.cif' (got '{path}')")]
pub struct UnsupportedFormatError {
    pub path: String,
}

impl StructureFormat {
    /// Selects the parser for a structure path from its extension.
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedFormatError`] for any extension other than the
    /// exact, lower-case `.pdb` or `.cif`.
    pub fn from_path(path: &Path) -> Result<Self, UnsupportedFormatError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("pdb") => Ok(StructureFormat::Pdb),
            Some("cif") => Ok(StructureFormat::Mmcif),
            _ => Err(UnsupportedFormatError {
                path: path.display().to_string(),
            }),
        }
    }
}
