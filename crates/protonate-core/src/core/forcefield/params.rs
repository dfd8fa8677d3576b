use phf::phf_map;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Embedded hydrogen-template sets, keyed by the forcefield identifiers users
/// pass on the command line. The Amber protein forcefields share one set of
/// hydrogen definitions, so the aliases all resolve to the same data.
static BUILTIN_SETS: phf::Map<&'static str, &'static str> = phf_map! {
    "amber99sbildn.xml" => include_str!("../../../data/amber99sbildn.toml"),
    "amber99sbildn" => include_str!("../../../data/amber99sbildn.toml"),
    "amber99sb.xml" => include_str!("../../../data/amber99sbildn.toml"),
    "amber99sb" => include_str!("../../../data/amber99sbildn.toml"),
    "amber03.xml" => include_str!("../../../data/amber99sbildn.toml"),
    "amber03" => include_str!("../../../data/amber99sbildn.toml"),
    "amber14-all.xml" => include_str!("../../../data/amber99sbildn.toml"),
    "amber14-all" => include_str!("../../../data/amber99sbildn.toml"),
};

/// The local geometry used to construct a group of hydrogens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeometryKind {
    /// Tetrahedral center; construction depends on how many heavy neighbors
    /// the parent already has. Single-hydrogen groups on a one-neighbor
    /// parent (hydroxyl, thiol) are rotatable and choose among staggered
    /// positions.
    Sp3,
    /// A single in-plane hydrogen completing a trigonal center (amide NH,
    /// aromatic CH).
    Planar,
    /// Two in-plane hydrogens on a trigonal nitrogen with one heavy neighbor
    /// (primary amide, guanidinium).
    Planar2,
}

/// One group of hydrogens sharing a parent heavy atom.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct HydrogenGroup {
    /// Name of the heavy atom the hydrogens bond to.
    pub parent: String,
    /// Hydrogen atom names, in placement order.
    pub names: Vec<String>,
    /// Bond length to the parent in Angstroms.
    pub length: f64,
    /// Local construction geometry.
    pub geometry: GeometryKind,
}

/// Hydrogen definitions for one residue template (a residue name or a
/// protonation-variant name such as `HIE` or `ASH`).
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ResidueTemplate {
    pub groups: Vec<HydrogenGroup>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TemplateFile {
    residues: HashMap<String, ResidueTemplate>,
}

#[derive(Debug, Error)]
pub enum ForcefieldLoadError {
    #[error("Unknown forcefield '{name}': not a built-in set and no such file exists")]
    UnknownForcefield { name: String },
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error in '{name}': {source}")]
    Toml {
        name: String,
        source: toml::de::Error,
    },
}

/// A loaded forcefield hydrogen-template set.
#[derive(Debug, Clone)]
pub struct Forcefield {
    name: String,
    residues: HashMap<String, ResidueTemplate>,
}

impl Forcefield {
    /// Loads a forcefield by identifier.
    ///
    /// The identifier is first resolved against the built-in sets; otherwise
    /// it is treated as a path to a TOML template file on disk.
    ///
    /// # Errors
    ///
    /// Returns an error when the identifier matches neither a built-in set
    /// nor a readable, well-formed template file.
    pub fn load(name: &str) -> Result<Self, ForcefieldLoadError> {
        let content = if let Some(embedded) = BUILTIN_SETS.get(name) {
            (*embedded).to_string()
        } else if Path::new(name).is_file() {
            std::fs::read_to_string(name).map_err(|e| ForcefieldLoadError::Io {
                path: name.to_string(),
                source: e,
            })?
        } else {
            return Err(ForcefieldLoadError::UnknownForcefield {
                name: name.to_string(),
            });
        };

        let parsed: TemplateFile =
            toml::from_str(&content).map_err(|e| ForcefieldLoadError::Toml {
                name: name.to_string(),
                source: e,
            })?;

        Ok(Self {
            name: name.to_string(),
            residues: parsed.residues,
        })
    }

    /// The identifier this forcefield was loaded under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Looks up the hydrogen template for a residue or variant name.
    pub fn residue_template(&self, key: &str) -> Option<&ResidueTemplate> {
        self.residues.get(key)
    }

    /// Returns the number of residue templates in the set.
    pub fn template_count(&self) -> usize {
        self.residues.len()
    }
}
