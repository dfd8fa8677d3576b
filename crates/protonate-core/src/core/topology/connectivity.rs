use crate::core::models::element::Element;
use crate::core::models::ids::AtomId;
use crate::core::models::system::MolecularSystem;
use nalgebra::Point3;
use std::collections::HashMap;

/// Distance tolerance added on top of the covalent-radius sum.
const BOND_TOLERANCE: f64 = 0.45;

/// Pairs closer than this are treated as recording artifacts, not bonds.
const MIN_BOND_DISTANCE: f64 = 0.4;

/// Spatial-hash cell edge; must cover the largest radius sum plus tolerance
/// among bond-forming elements (S-S at 2.55).
const CELL_SIZE: f64 = 2.8;

/// Elements that appear as free ions in deposited structures and must not be
/// covalently linked by the distance criterion.
fn is_ionic(element: Element) -> bool {
    matches!(
        element,
        Element::Sodium
            | Element::Magnesium
            | Element::Potassium
            | Element::Calcium
            | Element::Chlorine
            | Element::Manganese
            | Element::Iron
            | Element::Zinc
    )
}

fn cell_of(position: &Point3<f64>) -> (i32, i32, i32) {
    (
        (position.x / CELL_SIZE).floor() as i32,
        (position.y / CELL_SIZE).floor() as i32,
        (position.z / CELL_SIZE).floor() as i32,
    )
}

/// Infers covalent bonds from interatomic distances.
///
/// Two atoms are bonded when their separation is below the sum of their
/// covalent radii plus a tolerance. A spatial hash keeps the search local, so
/// the cost stays linear in the number of atoms. Hydrogens are bonded to at
/// most one partner (their nearest heavy atom); ions and elements without
/// radius data never bond. Peptide links and disulfide bridges fall out of
/// the same criterion, which is what the downstream protonation logic needs.
///
/// Existing bonds are preserved; `add_bond` is idempotent.
pub fn infer_bonds(system: &mut MolecularSystem) {
    struct Site {
        id: AtomId,
        position: Point3<f64>,
        radius: f64,
        is_hydrogen: bool,
    }

    let sites: Vec<Site> = system
        .atoms_iter()
        .filter_map(|(id, atom)| {
            if is_ionic(atom.element) {
                return None;
            }
            atom.element.covalent_radius().map(|radius| Site {
                id,
                position: atom.position,
                radius,
                is_hydrogen: atom.is_hydrogen(),
            })
        })
        .collect();

    let mut grid: HashMap<(i32, i32, i32), Vec<usize>> = HashMap::new();
    for (idx, site) in sites.iter().enumerate() {
        grid.entry(cell_of(&site.position)).or_default().push(idx);
    }

    let mut heavy_pairs: Vec<(AtomId, AtomId)> = Vec::new();
    let mut hydrogen_partner: HashMap<AtomId, (AtomId, f64)> = HashMap::new();

    for (idx, site) in sites.iter().enumerate() {
        let (cx, cy, cz) = cell_of(&site.position);
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(indices) = grid.get(&(cx + dx, cy + dy, cz + dz)) else {
                        continue;
                    };
                    for &other_idx in indices {
                        if other_idx <= idx {
                            continue;
                        }
                        let other = &sites[other_idx];
                        if site.is_hydrogen && other.is_hydrogen {
                            continue;
                        }

                        let distance = (site.position - other.position).norm();
                        let cutoff = site.radius + other.radius + BOND_TOLERANCE;
                        if distance < MIN_BOND_DISTANCE || distance > cutoff {
                            continue;
                        }

                        match (site.is_hydrogen, other.is_hydrogen) {
                            (false, false) => heavy_pairs.push((site.id, other.id)),
                            (true, false) => {
                                let entry = hydrogen_partner
                                    .entry(site.id)
                                    .or_insert((other.id, distance));
                                if distance < entry.1 {
                                    *entry = (other.id, distance);
                                }
                            }
                            (false, true) => {
                                let entry = hydrogen_partner
                                    .entry(other.id)
                                    .or_insert((site.id, distance));
                                if distance < entry.1 {
                                    *entry = (site.id, distance);
                                }
                            }
                            (true, true) => unreachable!(),
                        }
                    }
                }
            }
        }
    }

    for (a, b) in heavy_pairs {
        system.add_bond(a, b);
    }
    for (hydrogen, (heavy, _)) in hydrogen_partner {
        system.add_bond(hydrogen, heavy);
    }
}
