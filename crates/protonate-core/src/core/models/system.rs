use super::atom::Atom;
use super::chain::{Chain, ChainType};
use super::ids::{AtomId, ChainId, ResidueId};
use super::residue::Residue;
use super::topology::Bond;
use slotmap::{SecondaryMap, SlotMap};
use std::collections::{HashMap, HashSet};

const CYSTEINE_SULFUR_GAMMA_ATOM_NAME: &str = "SG";

/// Represents a complete molecular system with atoms, residues, chains, and bonds.
///
/// This struct is the central data structure of the library. Atoms, residues,
/// and chains live in slot maps so that removal (hydrogen stripping) never
/// invalidates the IDs of surviving components, and a secondary adjacency map
/// caches bond connectivity for neighbor queries during hydrogen placement.
#[derive(Debug, Clone, Default)]
pub struct MolecularSystem {
    atoms: SlotMap<AtomId, Atom>,
    residues: SlotMap<ResidueId, Residue>,
    chains: SlotMap<ChainId, Chain>,
    bonds: Vec<Bond>,
    /// Lookup map for finding residues by chain ID and residue number.
    residue_id_map: HashMap<(ChainId, isize), ResidueId>,
    /// Lookup map for finding chains by their single-character identifier.
    chain_id_map: HashMap<char, ChainId>,
    /// Cached adjacency list for bond connectivity, indexed by atom ID.
    bond_adjacency: SecondaryMap<AtomId, Vec<AtomId>>,
}

impl MolecularSystem {
    /// Creates a new, empty molecular system.
    pub fn new() -> Self {
        Self::default()
    }

    /// Retrieves an immutable reference to an atom by its ID.
    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id)
    }

    /// Retrieves a mutable reference to an atom by its ID.
    pub fn atom_mut(&mut self, id: AtomId) -> Option<&mut Atom> {
        self.atoms.get_mut(id)
    }

    /// Returns an iterator over all atoms in the system.
    pub fn atoms_iter(&self) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.atoms.iter()
    }

    /// Returns the number of atoms in the system.
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    /// Retrieves an immutable reference to a residue by its ID.
    pub fn residue(&self, id: ResidueId) -> Option<&Residue> {
        self.residues.get(id)
    }

    /// Retrieves a mutable reference to a residue by its ID.
    pub fn residue_mut(&mut self, id: ResidueId) -> Option<&mut Residue> {
        self.residues.get_mut(id)
    }

    /// Returns an iterator over all residues in the system.
    pub fn residues_iter(&self) -> impl Iterator<Item = (ResidueId, &Residue)> {
        self.residues.iter()
    }

    /// Retrieves an immutable reference to a chain by its ID.
    pub fn chain(&self, id: ChainId) -> Option<&Chain> {
        self.chains.get(id)
    }

    /// Returns an iterator over all chains in the system.
    pub fn chains_iter(&self) -> impl Iterator<Item = (ChainId, &Chain)> {
        self.chains.iter()
    }

    /// Returns a slice of all bonds in the system.
    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    /// Finds a chain ID by its single-character identifier.
    pub fn find_chain_by_id(&self, id: char) -> Option<ChainId> {
        self.chain_id_map.get(&id).copied()
    }

    /// Finds a residue ID by its chain ID and residue number.
    pub fn find_residue_by_id(
        &self,
        chain_id: ChainId,
        residue_number: isize,
    ) -> Option<ResidueId> {
        self.residue_id_map
            .get(&(chain_id, residue_number))
            .copied()
    }

    /// Adds a new chain to the system or returns the existing one.
    ///
    /// This method is idempotent; if a chain with the given ID already exists,
    /// it returns the existing chain ID without creating a duplicate.
    pub fn add_chain(&mut self, id: char, chain_type: ChainType) -> ChainId {
        *self.chain_id_map.entry(id).or_insert_with(|| {
            let chain = Chain::new(id, chain_type);
            self.chains.insert(chain)
        })
    }

    /// Adds a new residue to the system or returns the existing one.
    ///
    /// Idempotent on (chain ID, residue number).
    ///
    /// # Return
    ///
    /// Returns `Some(ResidueId)` if successful, otherwise `None` (e.g., if the
    /// chain doesn't exist).
    pub fn add_residue(
        &mut self,
        chain_id: ChainId,
        residue_number: isize,
        name: &str,
    ) -> Option<ResidueId> {
        let chain = self.chains.get_mut(chain_id)?;
        let key = (chain_id, residue_number);

        let residue_id = *self.residue_id_map.entry(key).or_insert_with(|| {
            let residue = Residue::new(residue_number, name, chain_id);
            self.residues.insert(residue)
        });

        if !chain.residues.contains(&residue_id) {
            chain.residues.push(residue_id);
        }

        Some(residue_id)
    }

    /// Adds an atom to a specific residue.
    ///
    /// Inserts the atom into the system, registers it with the residue, and
    /// initializes its bond adjacency list.
    ///
    /// # Return
    ///
    /// Returns `Some(AtomId)` if successful, otherwise `None` (e.g., if the
    /// residue doesn't exist).
    pub fn add_atom_to_residue(&mut self, residue_id: ResidueId, mut atom: Atom) -> Option<AtomId> {
        if !self.residues.contains_key(residue_id) {
            return None;
        }

        atom.residue_id = residue_id;
        let name = atom.name.clone();

        let atom_id = self.atoms.insert(atom);
        self.bond_adjacency.insert(atom_id, Vec::new());

        let residue = self.residues.get_mut(residue_id)?;
        residue.add_atom(&name, atom_id);

        Some(atom_id)
    }

    /// Adds a bond between two atoms.
    ///
    /// Idempotent; adding an existing bond succeeds without duplicating it.
    ///
    /// # Return
    ///
    /// Returns `Some(())` if successful, otherwise `None` (e.g., if either
    /// atom doesn't exist).
    pub fn add_bond(&mut self, atom1_id: AtomId, atom2_id: AtomId) -> Option<()> {
        if !self.atoms.contains_key(atom1_id) || !self.atoms.contains_key(atom2_id) {
            return None;
        }

        if let Some(neighbors) = self.bond_adjacency.get(atom1_id) {
            if neighbors.contains(&atom2_id) {
                return Some(());
            }
        }

        self.bonds.push(Bond::new(atom1_id, atom2_id));
        self.bond_adjacency[atom1_id].push(atom2_id);
        self.bond_adjacency[atom2_id].push(atom1_id);
        Some(())
    }

    /// Removes an atom from the system.
    ///
    /// Removes the atom together with its bonds, its adjacency entry, and its
    /// registration in the parent residue.
    ///
    /// # Return
    ///
    /// Returns `Some(Atom)` if the atom existed and was removed, otherwise `None`.
    pub fn remove_atom(&mut self, atom_id: AtomId) -> Option<Atom> {
        let atom = self.atoms.remove(atom_id)?;

        if let Some(residue) = self.residues.get_mut(atom.residue_id) {
            residue.remove_atom(&atom.name, atom_id);
        }

        let original_bonds = std::mem::take(&mut self.bonds);
        self.bonds = original_bonds
            .into_iter()
            .filter(|bond| !bond.contains(atom_id))
            .collect();

        let neighbors = self.bond_adjacency.remove(atom_id).unwrap_or_default();
        for neighbor_id in neighbors {
            if let Some(adjacency) = self.bond_adjacency.get_mut(neighbor_id) {
                adjacency.retain(|&id| id != atom_id);
            }
        }

        Some(atom)
    }

    /// Retrieves the bonded neighbors of an atom.
    ///
    /// # Return
    ///
    /// Returns `Some(&[AtomId])` if the atom exists, otherwise `None`.
    pub fn get_bonded_neighbors(&self, atom_id: AtomId) -> Option<&[AtomId]> {
        self.bond_adjacency.get(atom_id).map(|v| v.as_slice())
    }

    /// Returns the IDs of all hydrogen atoms currently in the system.
    pub fn hydrogen_atom_ids(&self) -> Vec<AtomId> {
        self.atoms
            .iter()
            .filter(|(_, atom)| atom.is_hydrogen())
            .map(|(id, _)| id)
            .collect()
    }

    /// Detects the residue IDs of all cysteines involved in disulfide bridges.
    ///
    /// A disulfide bridge is identified by a covalent bond between the
    /// sulfur-gamma (SG) atoms of two different cysteine-family residues
    /// (CYS or CYX in the source file).
    pub fn find_disulfide_bonded_residues(&self) -> HashSet<ResidueId> {
        let mut bonded_residue_ids = HashSet::new();

        let cysteine_sg_atoms: HashMap<ResidueId, AtomId> = self
            .residues_iter()
            .filter_map(|(res_id, residue)| {
                if matches!(residue.name.as_str(), "CYS" | "CYX" | "CYM") {
                    residue
                        .get_atom_id_by_name(CYSTEINE_SULFUR_GAMMA_ATOM_NAME)
                        .map(|sg_id| (res_id, sg_id))
                } else {
                    None
                }
            })
            .collect();

        if cysteine_sg_atoms.len() < 2 {
            return bonded_residue_ids;
        }

        let sg_atom_to_residue: HashMap<AtomId, ResidueId> = cysteine_sg_atoms
            .iter()
            .map(|(&res_id, &atom_id)| (atom_id, res_id))
            .collect();

        for (res_id_a, sg_atom_id_a) in &cysteine_sg_atoms {
            if bonded_residue_ids.contains(res_id_a) {
                continue;
            }

            if let Some(neighbors) = self.get_bonded_neighbors(*sg_atom_id_a) {
                for neighbor_id in neighbors {
                    if let Some(res_id_b) = sg_atom_to_residue.get(neighbor_id) {
                        if res_id_b != res_id_a {
                            bonded_residue_ids.insert(*res_id_a);
                            bonded_residue_ids.insert(*res_id_b);
                        }
                    }
                }
            }
        }

        bonded_residue_ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::element::Element;
    use nalgebra::Point3;

    fn add_simple_atom(
        system: &mut MolecularSystem,
        residue_id: ResidueId,
        name: &str,
        element: Element,
        position: Point3<f64>,
    ) -> AtomId {
        let atom = Atom::new(name, residue_id, element, position);
        system.add_atom_to_residue(residue_id, atom).unwrap()
    }

    #[test]
    fn add_chain_is_idempotent() {
        let mut system = MolecularSystem::new();
        let c1 = system.add_chain('A', ChainType::Protein);
        let c2 = system.add_chain('A', ChainType::Protein);
        assert_eq!(c1, c2);
        assert_eq!(system.chains_iter().count(), 1);
    }

    #[test]
    fn add_residue_is_idempotent_per_chain_and_number() {
        let mut system = MolecularSystem::new();
        let chain = system.add_chain('A', ChainType::Protein);
        let r1 = system.add_residue(chain, 1, "ALA").unwrap();
        let r2 = system.add_residue(chain, 1, "ALA").unwrap();
        assert_eq!(r1, r2);
        assert_eq!(system.chain(chain).unwrap().residues().len(), 1);
    }

    #[test]
    fn add_atom_registers_with_residue() {
        let mut system = MolecularSystem::new();
        let chain = system.add_chain('A', ChainType::Protein);
        let residue_id = system.add_residue(chain, 1, "GLY").unwrap();
        let atom_id = add_simple_atom(
            &mut system,
            residue_id,
            "CA",
            Element::Carbon,
            Point3::origin(),
        );

        assert_eq!(system.atom_count(), 1);
        assert_eq!(
            system.residue(residue_id).unwrap().get_atom_id_by_name("CA"),
            Some(atom_id)
        );
        assert_eq!(system.get_bonded_neighbors(atom_id), Some(&[][..]));
    }

    #[test]
    fn add_bond_updates_adjacency_and_is_idempotent() {
        let mut system = MolecularSystem::new();
        let chain = system.add_chain('A', ChainType::Protein);
        let residue_id = system.add_residue(chain, 1, "GLY").unwrap();
        let a1 = add_simple_atom(
            &mut system,
            residue_id,
            "N",
            Element::Nitrogen,
            Point3::origin(),
        );
        let a2 = add_simple_atom(
            &mut system,
            residue_id,
            "CA",
            Element::Carbon,
            Point3::new(1.46, 0.0, 0.0),
        );

        system.add_bond(a1, a2).unwrap();
        system.add_bond(a2, a1).unwrap();

        assert_eq!(system.bonds().len(), 1);
        assert_eq!(system.get_bonded_neighbors(a1).unwrap(), &[a2]);
        assert_eq!(system.get_bonded_neighbors(a2).unwrap(), &[a1]);
    }

    #[test]
    fn remove_atom_cleans_bonds_adjacency_and_residue() {
        let mut system = MolecularSystem::new();
        let chain = system.add_chain('A', ChainType::Protein);
        let residue_id = system.add_residue(chain, 1, "GLY").unwrap();
        let n = add_simple_atom(
            &mut system,
            residue_id,
            "N",
            Element::Nitrogen,
            Point3::origin(),
        );
        let h = add_simple_atom(
            &mut system,
            residue_id,
            "H",
            Element::Hydrogen,
            Point3::new(1.01, 0.0, 0.0),
        );
        system.add_bond(n, h).unwrap();

        let removed = system.remove_atom(h).unwrap();
        assert_eq!(removed.name, "H");
        assert_eq!(system.atom_count(), 1);
        assert!(system.bonds().is_empty());
        assert_eq!(system.get_bonded_neighbors(n).unwrap(), &[] as &[AtomId]);
        assert!(
            system
                .residue(residue_id)
                .unwrap()
                .get_atom_id_by_name("H")
                .is_none()
        );
    }

    #[test]
    fn remove_atom_returns_none_for_missing_atom() {
        let mut system = MolecularSystem::new();
        let chain = system.add_chain('A', ChainType::Protein);
        let residue_id = system.add_residue(chain, 1, "GLY").unwrap();
        let atom_id = add_simple_atom(
            &mut system,
            residue_id,
            "CA",
            Element::Carbon,
            Point3::origin(),
        );
        system.remove_atom(atom_id);
        assert!(system.remove_atom(atom_id).is_none());
    }

    #[test]
    fn hydrogen_atom_ids_selects_only_hydrogens() {
        let mut system = MolecularSystem::new();
        let chain = system.add_chain('A', ChainType::Protein);
        let residue_id = system.add_residue(chain, 1, "ALA").unwrap();
        add_simple_atom(
            &mut system,
            residue_id,
            "CA",
            Element::Carbon,
            Point3::origin(),
        );
        let h1 = add_simple_atom(
            &mut system,
            residue_id,
            "HA",
            Element::Hydrogen,
            Point3::new(1.09, 0.0, 0.0),
        );
        let h2 = add_simple_atom(
            &mut system,
            residue_id,
            "HB1",
            Element::Hydrogen,
            Point3::new(0.0, 1.09, 0.0),
        );

        let mut hydrogens = system.hydrogen_atom_ids();
        hydrogens.sort();
        let mut expected = vec![h1, h2];
        expected.sort();
        assert_eq!(hydrogens, expected);
    }

    #[test]
    fn disulfide_detection_requires_sg_sg_bond() {
        let mut system = MolecularSystem::new();
        let chain = system.add_chain('A', ChainType::Protein);
        let res_a = system.add_residue(chain, 1, "CYS").unwrap();
        let res_b = system.add_residue(chain, 2, "CYS").unwrap();
        let res_c = system.add_residue(chain, 3, "CYS").unwrap();
        let sg_a = add_simple_atom(
            &mut system,
            res_a,
            "SG",
            Element::Sulfur,
            Point3::origin(),
        );
        let sg_b = add_simple_atom(
            &mut system,
            res_b,
            "SG",
            Element::Sulfur,
            Point3::new(2.05, 0.0, 0.0),
        );
        add_simple_atom(
            &mut system,
            res_c,
            "SG",
            Element::Sulfur,
            Point3::new(20.0, 0.0, 0.0),
        );
        system.add_bond(sg_a, sg_b).unwrap();

        let bridged = system.find_disulfide_bonded_residues();
        assert!(bridged.contains(&res_a));
        assert!(bridged.contains(&res_b));
        assert!(!bridged.contains(&res_c));
    }
}
