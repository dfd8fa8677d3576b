use crate::core::io::traits::MolecularFile;
use crate::core::models::atom::Atom;
use crate::core::models::chain::ChainType;
use crate::core::models::element::Element;
use crate::core::models::ids::ResidueId;
use crate::core::models::system::MolecularSystem;
use nalgebra::Point3;
use std::collections::HashMap;
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MmcifError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("No _atom_site loop found in mmCIF data")]
    MissingAtomSiteLoop,
    #[error("Missing required field '{field}' in _atom_site row {row}")]
    MissingField { field: &'static str, row: usize },
    #[error("Invalid value '{value}' for field '{field}' in _atom_site row {row}")]
    InvalidValue {
        field: &'static str,
        value: String,
        row: usize,
    },
    #[error("No _atom_site records found in mmCIF data")]
    EmptyAtomSite,
}

/// Reader and writer for the mmCIF (PDBx) format.
///
/// Only the `_atom_site` loop is interpreted on input. The writer emits a
/// complete `_atom_site` loop with both label and auth identifiers, which is
/// the output format of the whole pipeline.
pub struct MmcifFile;

/// Tokenizes one mmCIF data line, respecting single- and double-quoted values.
fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut chars = line.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }
        if c == '\'' || c == '"' {
            let quote = c;
            chars.next();
            let mut token = String::new();
            for ch in chars.by_ref() {
                if ch == quote {
                    break;
                }
                token.push(ch);
            }
            tokens.push(token);
            continue;
        }
        let mut token = String::new();
        while let Some(&ch) = chars.peek() {
            if ch.is_whitespace() {
                break;
            }
            token.push(ch);
            chars.next();
        }
        tokens.push(token);
    }

    tokens
}

fn is_nil(value: &str) -> bool {
    value == "." || value == "?"
}

struct AtomSiteRow<'a> {
    fields: &'a HashMap<String, usize>,
    tokens: &'a [String],
    row: usize,
}

impl<'a> AtomSiteRow<'a> {
    fn get(&self, field: &'static str) -> Option<&'a str> {
        self.fields
            .get(field)
            .and_then(|&idx| self.tokens.get(idx))
            .map(|s| s.as_str())
            .filter(|v| !is_nil(v))
    }

    fn require(&self, field: &'static str) -> Result<&'a str, MmcifError> {
        self.get(field).ok_or(MmcifError::MissingField {
            field,
            row: self.row,
        })
    }

    fn require_f64(&self, field: &'static str) -> Result<f64, MmcifError> {
        let value = self.require(field)?;
        value.parse().map_err(|_| MmcifError::InvalidValue {
            field,
            value: value.to_string(),
            row: self.row,
        })
    }
}

impl MolecularFile for MmcifFile {
    type Error = MmcifError;

    fn read_from(reader: &mut impl BufRead) -> Result<MolecularSystem, Self::Error> {
        let lines: Vec<String> = reader.lines().collect::<Result<_, _>>()?;

        // Locate the _atom_site loop: a loop_ keyword whose first field
        // declaration belongs to the _atom_site category.
        let mut field_indices: HashMap<String, usize> = HashMap::new();
        let mut data_start = None;
        let mut i = 0;
        while i < lines.len() {
            if lines[i].trim() == "loop_" {
                let mut j = i + 1;
                let mut fields = Vec::new();
                while j < lines.len() {
                    let trimmed = lines[j].trim();
                    if trimmed.starts_with("_atom_site.") {
                        fields.push(trimmed.to_string());
                        j += 1;
                    } else if trimmed.is_empty() || trimmed.starts_with('#') {
                        if fields.is_empty() {
                            break;
                        }
                        j += 1;
                    } else {
                        break;
                    }
                }
                if !fields.is_empty() {
                    for (idx, field) in fields.into_iter().enumerate() {
                        field_indices.insert(field, idx);
                    }
                    data_start = Some(j);
                    break;
                }
            }
            i += 1;
        }

        let Some(data_start) = data_start else {
            return Err(MmcifError::MissingAtomSiteLoop);
        };

        let mut system = MolecularSystem::new();
        let mut row = 0usize;
        for line in &lines[data_start..] {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if trimmed.starts_with('#')
                || trimmed.starts_with("loop_")
                || trimmed.starts_with("data_")
                || trimmed.starts_with('_')
            {
                break;
            }

            let tokens = tokenize(trimmed);
            if tokens.len() < field_indices.len() {
                continue;
            }
            row += 1;
            let record = AtomSiteRow {
                fields: &field_indices,
                tokens: &tokens,
                row,
            };

            let group = record.get("_atom_site.group_PDB").unwrap_or("ATOM");
            let name = record.require("_atom_site.label_atom_id")?;
            let res_name = record.require("_atom_site.label_comp_id")?;
            let chain_str = record
                .get("_atom_site.auth_asym_id")
                .or_else(|| record.get("_atom_site.label_asym_id"))
                .ok_or(MmcifError::MissingField {
                    field: "_atom_site.label_asym_id",
                    row,
                })?;
            let chain_id = chain_str.chars().next().unwrap_or('A');

            // Waters and ligands often carry '.' in label_seq_id; fall back
            // to the author numbering.
            let seq_str = record
                .get("_atom_site.label_seq_id")
                .or_else(|| record.get("_atom_site.auth_seq_id"))
                .ok_or(MmcifError::MissingField {
                    field: "_atom_site.label_seq_id",
                    row,
                })?;
            let res_seq: isize = seq_str.parse().map_err(|_| MmcifError::InvalidValue {
                field: "_atom_site.label_seq_id",
                value: seq_str.to_string(),
                row,
            })?;

            let serial: usize = match record.get("_atom_site.id") {
                Some(value) => value.parse().map_err(|_| MmcifError::InvalidValue {
                    field: "_atom_site.id",
                    value: value.to_string(),
                    row,
                })?,
                None => row,
            };

            let x = record.require_f64("_atom_site.Cartn_x")?;
            let y = record.require_f64("_atom_site.Cartn_y")?;
            let z = record.require_f64("_atom_site.Cartn_z")?;
            let occupancy = match record.get("_atom_site.occupancy") {
                Some(value) => value.parse().unwrap_or(1.0),
                None => 1.0,
            };
            let temp_factor = match record.get("_atom_site.B_iso_or_equiv") {
                Some(value) => value.parse().unwrap_or(0.0),
                None => 0.0,
            };

            let element = record
                .get("_atom_site.type_symbol")
                .and_then(|s| s.parse::<Element>().ok())
                .unwrap_or_else(|| Element::from_atom_name(name));

            let chain_type = if group == "ATOM" {
                ChainType::Protein
            } else if matches!(res_name, "HOH" | "WAT" | "DOD") {
                ChainType::Water
            } else {
                ChainType::Other
            };

            let chain = system.add_chain(chain_id, chain_type);
            let residue_id = system
                .add_residue(chain, res_seq, res_name)
                .ok_or(MmcifError::MissingField {
                    field: "_atom_site.label_seq_id",
                    row,
                })?;

            let mut atom = Atom::new(name, ResidueId::default(), element, Point3::new(x, y, z));
            atom.serial = serial;
            atom.occupancy = occupancy;
            atom.temp_factor = temp_factor;
            system.add_atom_to_residue(residue_id, atom);
        }

        if system.atom_count() == 0 {
            return Err(MmcifError::EmptyAtomSite);
        }
        Ok(system)
    }

    fn write_to(system: &MolecularSystem, writer: &mut impl Write) -> Result<(), Self::Error> {
        writeln!(writer, "data_protonated")?;
        writeln!(writer, "#")?;
        writeln!(writer, "loop_")?;
        for field in [
            "group_PDB",
            "id",
            "type_symbol",
            "label_atom_id",
            "label_alt_id",
            "label_comp_id",
            "label_asym_id",
            "label_entity_id",
            "label_seq_id",
            "pdbx_PDB_ins_code",
            "Cartn_x",
            "Cartn_y",
            "Cartn_z",
            "occupancy",
            "B_iso_or_equiv",
            "auth_seq_id",
            "auth_asym_id",
            "pdbx_PDB_model_num",
        ] {
            writeln!(writer, "_atom_site.{field}")?;
        }

        let mut serial = 0usize;
        for (entity, (_, chain)) in system.chains_iter().enumerate() {
            for &residue_id in chain.residues() {
                let Some(residue) = system.residue(residue_id) else {
                    continue;
                };
                let group = if residue.is_amino_acid() {
                    "ATOM"
                } else {
                    "HETATM"
                };
                for &atom_id in residue.atoms() {
                    let Some(atom) = system.atom(atom_id) else {
                        continue;
                    };
                    serial += 1;
                    writeln!(
                        writer,
                        "{} {} {} {} . {} {} {} {} ? {:.3} {:.3} {:.3} {:.2} {:.2} {} {} 1",
                        group,
                        serial,
                        atom.element.symbol(),
                        atom.name,
                        residue.name,
                        chain.id,
                        entity + 1,
                        residue.id,
                        atom.position.x,
                        atom.position.y,
                        atom.position.z,
                        atom.occupancy,
                        atom.temp_factor,
                        residue.id,
                        chain.id,
                    )?;
                }
            }
        }
        writeln!(writer, "#")?;
        Ok(())
    }
}
