use super::ids::{AtomId, ChainId};
use phf::phf_set;
use std::collections::HashMap;

/// Standard amino-acid residue names plus the protonation-variant aliases
/// used by the Amber forcefield family.
static AMINO_ACID_NAMES: phf::Set<&'static str> = phf_set! {
    "ALA", "ARG", "ASN", "ASP", "CYS", "GLN", "GLU", "GLY", "HIS", "ILE",
    "LEU", "LYS", "MET", "PHE", "PRO", "SER", "THR", "TRP", "TYR", "VAL",
    "HID", "HIE", "HIP", "HSD", "HSE", "HSP",
    "ASH", "GLH", "LYN", "CYM", "CYX",
};

/// Residue names under which crystallographic water is deposited.
static WATER_NAMES: phf::Set<&'static str> = phf_set! {
    "HOH", "WAT", "DOD", "TIP", "TIP3", "SOL",
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Residue {
    pub id: isize,                          // Residue sequence number from source file
    pub name: String,                       // Name of the residue (e.g., "ALA", "GLY")
    pub chain_id: ChainId,                  // ID of the parent chain
    pub(crate) atoms: Vec<AtomId>,          // Atoms belonging to this residue, in insertion order
    atom_name_map: HashMap<String, AtomId>, // Map from atom name to its stable ID
}

impl Residue {
    pub(crate) fn new(id: isize, name: &str, chain_id: ChainId) -> Self {
        Self {
            id,
            name: name.to_string(),
            chain_id,
            atoms: Vec::new(),
            atom_name_map: HashMap::new(),
        }
    }

    pub(crate) fn add_atom(&mut self, atom_name: &str, atom_id: AtomId) {
        self.atoms.push(atom_id);
        self.atom_name_map.insert(atom_name.to_string(), atom_id);
    }

    pub(crate) fn remove_atom(&mut self, atom_name: &str, atom_id: AtomId) {
        self.atoms.retain(|&id| id != atom_id);
        self.atom_name_map.remove(atom_name);
    }

    pub fn atoms(&self) -> &[AtomId] {
        &self.atoms
    }

    pub fn get_atom_id_by_name(&self, name: &str) -> Option<AtomId> {
        self.atom_name_map.get(name).copied()
    }

    /// Whether this residue is a (possibly protonation-variant) amino acid.
    pub fn is_amino_acid(&self) -> bool {
        AMINO_ACID_NAMES.contains(self.name.as_str())
    }

    /// Whether this residue is crystallographic water.
    pub fn is_water(&self) -> bool {
        WATER_NAMES.contains(self.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::KeyData;

    fn dummy_atom_id(n: u64) -> AtomId {
        AtomId::from(KeyData::from_ffi(n))
    }

    fn dummy_chain_id(n: u64) -> ChainId {
        ChainId::from(KeyData::from_ffi(n))
    }

    #[test]
    fn new_residue_initializes_fields_correctly() {
        let chain_id = dummy_chain_id(1);
        let residue = Residue::new(10, "GLY", chain_id);
        assert_eq!(residue.id, 10);
        assert_eq!(residue.name, "GLY");
        assert_eq!(residue.chain_id, chain_id);
        assert!(residue.atoms().is_empty());
        assert!(residue.get_atom_id_by_name("CA").is_none());
    }

    #[test]
    fn add_atom_adds_atom_and_maps_name() {
        let chain_id = dummy_chain_id(2);
        let mut residue = Residue::new(5, "ALA", chain_id);
        let atom_id = dummy_atom_id(42);
        residue.add_atom("CA", atom_id);
        assert_eq!(residue.atoms(), &[atom_id]);
        assert_eq!(residue.get_atom_id_by_name("CA"), Some(atom_id));
    }

    #[test]
    fn remove_atom_removes_atom_and_name_mapping() {
        let chain_id = dummy_chain_id(4);
        let mut residue = Residue::new(8, "THR", chain_id);
        let atom_id = dummy_atom_id(100);
        residue.add_atom("OG1", atom_id);
        residue.remove_atom("OG1", atom_id);
        assert!(residue.atoms().is_empty());
        assert!(residue.get_atom_id_by_name("OG1").is_none());
    }

    #[test]
    fn remove_atom_does_nothing_if_atom_not_present() {
        let chain_id = dummy_chain_id(5);
        let mut residue = Residue::new(9, "VAL", chain_id);
        let atom_id = dummy_atom_id(200);
        residue.add_atom("CG1", atom_id);
        residue.remove_atom("CG2", dummy_atom_id(201));
        assert_eq!(residue.atoms(), &[atom_id]);
        assert_eq!(residue.get_atom_id_by_name("CG1"), Some(atom_id));
    }

    #[test]
    fn amino_acid_classification_covers_variants() {
        let chain_id = dummy_chain_id(6);
        assert!(Residue::new(1, "ALA", chain_id).is_amino_acid());
        assert!(Residue::new(2, "HIE", chain_id).is_amino_acid());
        assert!(Residue::new(3, "CYX", chain_id).is_amino_acid());
        assert!(!Residue::new(4, "HOH", chain_id).is_amino_acid());
        assert!(!Residue::new(5, "ATP", chain_id).is_amino_acid());
    }

    #[test]
    fn water_classification_covers_common_names() {
        let chain_id = dummy_chain_id(7);
        assert!(Residue::new(1, "HOH", chain_id).is_water());
        assert!(Residue::new(2, "WAT", chain_id).is_water());
        assert!(!Residue::new(3, "SER", chain_id).is_water());
    }
}
