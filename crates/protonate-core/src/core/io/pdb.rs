use crate::core::io::traits::MolecularFile;
use crate::core::models::atom::Atom;
use crate::core::models::chain::ChainType;
use crate::core::models::element::Element;
use crate::core::models::ids::ResidueId;
use crate::core::models::system::MolecularSystem;
use nalgebra::Point3;
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: PdbParseErrorKind,
    },
    #[error("Missing required record: {0}")]
    MissingRecord(String),
}

#[derive(Debug, Error)]
pub enum PdbParseErrorKind {
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: String, value: String },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: String, value: String },
    #[error("Required field in columns {columns} is empty")]
    MissingRequiredField { columns: String },
    #[error("Line is too short for an ATOM/HETATM record (must reach column 54)")]
    LineTooShort,
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end).unwrap_or("").trim()
}

fn parse_float(line: &str, line_num: usize, start: usize, end: usize) -> Result<f64, PdbError> {
    let text = slice_and_trim(line, start, end);
    text.parse().map_err(|_| PdbError::Parse {
        line: line_num,
        kind: PdbParseErrorKind::InvalidFloat {
            columns: format!("{}-{}", start + 1, end),
            value: text.into(),
        },
    })
}

/// Reader and writer for the fixed-column PDB format.
///
/// Only coordinate records are interpreted: `ATOM`, `HETATM`, `TER`, and
/// `END`. Alternate locations other than the primary one are dropped, and
/// only the first model of a multi-model file is read.
pub struct PdbFile;

impl MolecularFile for PdbFile {
    type Error = PdbError;

    fn read_from(reader: &mut impl BufRead) -> Result<MolecularSystem, Self::Error> {
        let mut system = MolecularSystem::new();
        let mut atom_seen = false;

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;
            let record_type = slice_and_trim(&line, 0, 6);

            match record_type {
                "ATOM" | "HETATM" => {
                    if line.len() < 54 {
                        return Err(PdbError::Parse {
                            line: line_num,
                            kind: PdbParseErrorKind::LineTooShort,
                        });
                    }

                    let alt_loc = slice_and_trim(&line, 16, 17);
                    if !alt_loc.is_empty() && alt_loc != "A" {
                        continue;
                    }

                    let serial_str = slice_and_trim(&line, 6, 11);
                    let name = slice_and_trim(&line, 12, 16);
                    let res_name = slice_and_trim(&line, 17, 20);
                    let chain_id = slice_and_trim(&line, 21, 22)
                        .chars()
                        .next()
                        .unwrap_or('A');
                    let res_seq_str = slice_and_trim(&line, 22, 26);

                    if name.is_empty() {
                        return Err(PdbError::Parse {
                            line: line_num,
                            kind: PdbParseErrorKind::MissingRequiredField {
                                columns: "13-16".into(),
                            },
                        });
                    }

                    let serial: usize = serial_str.parse().map_err(|_| PdbError::Parse {
                        line: line_num,
                        kind: PdbParseErrorKind::InvalidInt {
                            columns: "7-11".into(),
                            value: serial_str.into(),
                        },
                    })?;
                    let res_seq: isize = res_seq_str.parse().map_err(|_| PdbError::Parse {
                        line: line_num,
                        kind: PdbParseErrorKind::InvalidInt {
                            columns: "23-26".into(),
                            value: res_seq_str.into(),
                        },
                    })?;

                    let x = parse_float(&line, line_num, 30, 38)?;
                    let y = parse_float(&line, line_num, 38, 46)?;
                    let z = parse_float(&line, line_num, 46, 54)?;

                    let occupancy = slice_and_trim(&line, 54, 60)
                        .parse()
                        .unwrap_or(1.0);
                    let temp_factor = slice_and_trim(&line, 60, 66)
                        .parse()
                        .unwrap_or(0.0);

                    let element_str = slice_and_trim(&line, 76, 78);
                    let element = element_str
                        .parse::<Element>()
                        .unwrap_or_else(|_| Element::from_atom_name(name));

                    let chain_type = classify_chain(record_type, res_name);
                    let chain = system.add_chain(chain_id, chain_type);
                    let residue_id =
                        system
                            .add_residue(chain, res_seq, res_name)
                            .ok_or_else(|| {
                                PdbError::MissingRecord(format!(
                                    "chain {chain_id} vanished while adding residue {res_seq}"
                                ))
                            })?;

                    let mut atom =
                        Atom::new(name, ResidueId::default(), element, Point3::new(x, y, z));
                    atom.serial = serial;
                    atom.occupancy = occupancy;
                    atom.temp_factor = temp_factor;
                    system.add_atom_to_residue(residue_id, atom);
                    atom_seen = true;
                }
                "ENDMDL" | "END" => break,
                _ => {}
            }
        }

        if !atom_seen {
            return Err(PdbError::MissingRecord("ATOM/HETATM records".into()));
        }
        Ok(system)
    }

    fn write_to(system: &MolecularSystem, writer: &mut impl Write) -> Result<(), Self::Error> {
        let mut serial = 0usize;
        for (_, chain) in system.chains_iter() {
            let mut last_residue = None;
            for &residue_id in chain.residues() {
                let Some(residue) = system.residue(residue_id) else {
                    continue;
                };
                last_residue = Some(residue);
                let record_type = if residue.is_amino_acid() {
                    "ATOM"
                } else {
                    "HETATM"
                };
                for &atom_id in residue.atoms() {
                    let Some(atom) = system.atom(atom_id) else {
                        continue;
                    };
                    serial += 1;
                    let name_field = if atom.name.len() >= 4 {
                        atom.name.clone()
                    } else {
                        format!(" {:<3}", atom.name)
                    };
                    writeln!(
                        writer,
                        "{:<6}{:>5} {:<4} {:<3} {:1}{:>4}    {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}          {:>2}",
                        record_type,
                        serial,
                        name_field,
                        residue.name,
                        chain.id,
                        residue.id,
                        atom.position.x,
                        atom.position.y,
                        atom.position.z,
                        atom.occupancy,
                        atom.temp_factor,
                        atom.element.symbol(),
                    )?;
                }
            }
            if let Some(residue) = last_residue {
                if residue.is_amino_acid() {
                    serial += 1;
                    writeln!(
                        writer,
                        "TER   {:>5}      {:<3} {:1}{:>4}",
                        serial, residue.name, chain.id, residue.id
                    )?;
                }
            }
        }
        writeln!(writer, "END")?;
        Ok(())
    }
}

fn classify_chain(record_type: &str, res_name: &str) -> ChainType {
    if record_type == "ATOM" {
        ChainType::Protein
    } else if matches!(res_name, "HOH" | "WAT" | "DOD") {
        ChainType::Water
    } else {
        ChainType::Other
    }
}
