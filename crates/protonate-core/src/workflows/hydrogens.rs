use crate::core::forcefield::params::{Forcefield, GeometryKind, HydrogenGroup};
use crate::core::forcefield::protonation;
use crate::core::models::atom::Atom;
use crate::core::models::element::Element;
use crate::core::models::ids::{AtomId, ResidueId};
use crate::core::models::system::MolecularSystem;
use crate::core::utils::geometry;
use crate::engine::config::BuildConfig;
use crate::engine::error::EngineError;
use nalgebra::Point3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

/// Summary of one normalization pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HydrogenReport {
    /// Pre-existing hydrogens removed before rebuilding.
    pub removed: usize,
    /// Hydrogens constructed from forcefield templates.
    pub added: usize,
    /// Template hydrogens that could not be placed (parent or frame atoms
    /// missing from the input, typically truncated residues).
    pub skipped: usize,
    /// Residues with no template in the forcefield (ligands, modified
    /// residues); left without hydrogens.
    pub unmatched_residues: usize,
}

/// Strips every hydrogen from the system and rebuilds the set the forcefield
/// prescribes at the configured pH.
///
/// The local contract is strict: no pre-existing hydrogen survives, so every
/// hydrogen in the output was constructed here, with the protonation state
/// the template variant selection decided. Disulfide-bridged cysteines are
/// detected from connectivity before placement and never receive a thiol
/// hydrogen. Rotatable terminal hydrogens (hydroxyl, thiol) choose among
/// staggered torsions with an RNG seeded from the configuration, so runs
/// with equal seeds are reproducible.
///
/// Bond connectivity must already be present (see
/// [`crate::core::topology::connectivity::infer_bonds`]).
///
/// # Errors
///
/// Returns [`EngineError::MissingTemplate`] when an amino-acid residue has
/// no hydrogen template under its resolved variant name.
pub fn run(
    system: &mut MolecularSystem,
    config: &BuildConfig,
    forcefield: &Forcefield,
) -> Result<HydrogenReport, EngineError> {
    let mut report = HydrogenReport::default();
    let mut rng = StdRng::seed_from_u64(config.seed);

    let hydrogens = system.hydrogen_atom_ids();
    report.removed = hydrogens.len();
    for atom_id in hydrogens {
        system.remove_atom(atom_id);
    }
    info!(
        "Removed {} existing hydrogen atom(s); rebuilding at pH {:.1}",
        report.removed, config.ph
    );

    let bridged = system.find_disulfide_bonded_residues();
    if !bridged.is_empty() {
        debug!("Found {} disulfide-bridged cysteine(s)", bridged.len());
    }

    // Chain and residue iteration follows file order, and every stochastic
    // draw comes from the seeded RNG, so the pass is reproducible.
    let chain_residues: Vec<Vec<ResidueId>> = system
        .chains_iter()
        .map(|(_, chain)| chain.residues().to_vec())
        .collect();

    for residues in chain_residues {
        for (position, &residue_id) in residues.iter().enumerate() {
            let first_in_chain = position == 0;
            place_residue_hydrogens(
                system,
                forcefield,
                config,
                &mut rng,
                residue_id,
                first_in_chain,
                bridged.contains(&residue_id),
                &mut report,
            )?;
        }
    }

    info!(
        "Added {} hydrogen atom(s) ({} skipped, {} residue(s) without template)",
        report.added, report.skipped, report.unmatched_residues
    );
    Ok(report)
}

#[allow(clippy::too_many_arguments)]
fn place_residue_hydrogens(
    system: &mut MolecularSystem,
    forcefield: &Forcefield,
    config: &BuildConfig,
    rng: &mut StdRng,
    residue_id: ResidueId,
    first_in_chain: bool,
    disulfide_bridged: bool,
    report: &mut HydrogenReport,
) -> Result<(), EngineError> {
    let (residue_name, residue_number, is_amino_acid) = {
        let residue = system
            .residue(residue_id)
            .ok_or_else(|| EngineError::Internal("residue vanished during placement".into()))?;
        (residue.name.clone(), residue.id, residue.is_amino_acid())
    };

    let key = protonation::template_key(&residue_name, config.ph, disulfide_bridged);
    let Some(template) = forcefield.residue_template(key) else {
        if is_amino_acid {
            return Err(EngineError::MissingTemplate {
                residue_name: key.to_string(),
                residue_number,
            });
        }
        debug!("No hydrogen template for residue {residue_name} {residue_number}");
        report.unmatched_residues += 1;
        return Ok(());
    };
    let groups = template.groups.clone();

    let mut has_backbone_n_group = false;
    for group in &groups {
        if group.parent == "N" {
            has_backbone_n_group = true;
        }
        place_group(system, rng, residue_id, group, first_in_chain, report);
    }

    // Proline-type templates carry no backbone amide group, but an
    // N-terminal imino nitrogen still needs its ammonium hydrogens.
    if first_in_chain && is_amino_acid && !has_backbone_n_group {
        let terminal_group = HydrogenGroup {
            parent: "N".to_string(),
            names: vec!["H2".to_string(), "H3".to_string()],
            length: 1.01,
            geometry: GeometryKind::Sp3,
        };
        place_group(system, rng, residue_id, &terminal_group, false, report);
    }

    Ok(())
}

fn place_group(
    system: &mut MolecularSystem,
    rng: &mut StdRng,
    residue_id: ResidueId,
    group: &HydrogenGroup,
    first_in_chain: bool,
    report: &mut HydrogenReport,
) {
    let Some(parent_id) = system
        .residue(residue_id)
        .and_then(|r| r.get_atom_id_by_name(&group.parent))
    else {
        report.skipped += group.names.len();
        return;
    };
    let parent_pos = match system.atom(parent_id) {
        Some(atom) => atom.position,
        None => {
            report.skipped += group.names.len();
            return;
        }
    };

    let neighbors = heavy_neighbors(system, parent_id);
    let neighbor_positions: Vec<Point3<f64>> =
        neighbors.iter().map(|&(_, pos)| pos).collect();

    // An N-terminal backbone nitrogen has lost its peptide partner; it gets
    // a staggered ammonium instead of the planar amide hydrogen.
    let terminal_ammonium =
        first_in_chain && group.parent == "N" && group.geometry == GeometryKind::Planar;

    let (names, positions): (Vec<&str>, Vec<Point3<f64>>) = if terminal_ammonium {
        if neighbors.len() != 1 {
            report.skipped += group.names.len();
            return;
        }
        let Some(positions) =
            staggered_candidates(system, parent_id, &parent_pos, &neighbors[0], group.length)
        else {
            report.skipped += group.names.len();
            return;
        };
        (vec!["H1", "H2", "H3"], positions.to_vec())
    } else {
        match group.geometry {
            GeometryKind::Planar => {
                if neighbor_positions.len() < 2 {
                    report.skipped += group.names.len();
                    return;
                }
                match geometry::completion_position(&parent_pos, &neighbor_positions, group.length)
                {
                    Some(pos) => (vec![group.names[0].as_str()], vec![pos]),
                    None => {
                        report.skipped += group.names.len();
                        return;
                    }
                }
            }
            GeometryKind::Planar2 => {
                if neighbors.len() != 1 {
                    report.skipped += group.names.len();
                    return;
                }
                let Some(plane_ref) = frame_reference(system, parent_id, neighbors[0].0) else {
                    report.skipped += group.names.len();
                    return;
                };
                let pair = geometry::planar_pair_positions(
                    &parent_pos,
                    &neighbors[0].1,
                    &plane_ref,
                    group.length,
                );
                let names: Vec<&str> = group.names.iter().map(String::as_str).collect();
                (names, pair[..group.names.len().min(2)].to_vec())
            }
            GeometryKind::Sp3 => match neighbors.len() {
                0 => {
                    // Free molecule (water): build an arbitrary but fixed frame.
                    let mut positions = vec![parent_pos + nalgebra::Vector3::x() * group.length];
                    if group.names.len() > 1 {
                        let angle = 104.5f64.to_radians();
                        positions.push(
                            parent_pos
                                + nalgebra::Vector3::new(angle.cos(), angle.sin(), 0.0)
                                    * group.length,
                        );
                    }
                    let count = group.names.len().min(positions.len());
                    let names: Vec<&str> =
                        group.names[..count].iter().map(String::as_str).collect();
                    (names, positions[..count].to_vec())
                }
                1 => {
                    let Some(candidates) = staggered_candidates(
                        system,
                        parent_id,
                        &parent_pos,
                        &neighbors[0],
                        group.length,
                    ) else {
                        report.skipped += group.names.len();
                        return;
                    };
                    let wanted = group.names.len().min(3);
                    let positions: Vec<Point3<f64>> = if wanted == 3 {
                        candidates.to_vec()
                    } else {
                        // Rotatable group: pick the torsion(s) with the
                        // seeded RNG so runs stay reproducible.
                        let start = rng.gen_range(0..3);
                        (0..wanted)
                            .map(|k| candidates[(start + k) % 3])
                            .collect()
                    };
                    let names: Vec<&str> =
                        group.names[..wanted].iter().map(String::as_str).collect();
                    (names, positions)
                }
                2 => {
                    let pair = geometry::sp3_pair_positions(
                        &parent_pos,
                        &neighbor_positions[0],
                        &neighbor_positions[1],
                        group.length,
                    );
                    let count = group.names.len().min(2);
                    let names: Vec<&str> =
                        group.names[..count].iter().map(String::as_str).collect();
                    (names, pair[..count].to_vec())
                }
                _ => {
                    match geometry::completion_position(
                        &parent_pos,
                        &neighbor_positions,
                        group.length,
                    ) {
                        Some(pos) => (vec![group.names[0].as_str()], vec![pos]),
                        None => {
                            report.skipped += group.names.len();
                            return;
                        }
                    }
                }
            },
        }
    };

    report.skipped += group.names.len().saturating_sub(positions.len());
    for (name, position) in names.iter().zip(positions.iter()) {
        let atom = Atom::new(name, residue_id, Element::Hydrogen, *position);
        if let Some(atom_id) = system.add_atom_to_residue(residue_id, atom) {
            system.add_bond(atom_id, parent_id);
            report.added += 1;
        }
    }
}

/// Heavy (non-hydrogen) neighbors of an atom, sorted by name for
/// reproducible frame selection.
fn heavy_neighbors(system: &MolecularSystem, atom_id: AtomId) -> Vec<(AtomId, Point3<f64>)> {
    let mut named: Vec<(String, AtomId, Point3<f64>)> = system
        .get_bonded_neighbors(atom_id)
        .unwrap_or(&[])
        .iter()
        .filter_map(|&id| {
            let atom = system.atom(id)?;
            if atom.is_hydrogen() {
                None
            } else {
                Some((atom.name.clone(), id, atom.position))
            }
        })
        .collect();
    named.sort_by(|a, b| a.0.cmp(&b.0));
    named.into_iter().map(|(_, id, pos)| (id, pos)).collect()
}

/// A third frame atom for torsion-dependent placement: the first heavy
/// neighbor of `neighbor_id` other than the parent, by name.
fn frame_reference(
    system: &MolecularSystem,
    parent_id: AtomId,
    neighbor_id: AtomId,
) -> Option<Point3<f64>> {
    heavy_neighbors(system, neighbor_id)
        .into_iter()
        .find(|&(id, _)| id != parent_id)
        .map(|(_, pos)| pos)
}

fn staggered_candidates(
    system: &MolecularSystem,
    parent_id: AtomId,
    parent_pos: &Point3<f64>,
    neighbor: &(AtomId, Point3<f64>),
    bond_length: f64,
) -> Option<[Point3<f64>; 3]> {
    let reference = frame_reference(system, parent_id, neighbor.0)?;
    Some(geometry::staggered_positions(
        &reference,
        &neighbor.1,
        parent_pos,
        bond_length,
    ))
}
