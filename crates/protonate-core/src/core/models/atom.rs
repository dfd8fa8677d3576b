use super::element::Element;
use super::ids::ResidueId;
use nalgebra::Point3;

/// Represents an atom in a molecular structure.
///
/// This struct carries the identity and per-atom record fields that the
/// PDB/mmCIF readers produce and the mmCIF writer consumes: name, element,
/// serial number, coordinates, occupancy, and temperature factor. Freshly
/// built hydrogens receive a serial of 0 until the writer renumbers the
/// system.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The atom name (e.g., "CA", "N", "HB2").
    pub name: String,
    /// The ID of the parent residue this atom belongs to.
    pub residue_id: ResidueId,
    /// The chemical element of the atom.
    pub element: Element,
    /// The serial number from the source file, 0 for atoms built in-memory.
    pub serial: usize,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
    /// Crystallographic occupancy.
    pub occupancy: f64,
    /// Isotropic temperature factor (B-factor).
    pub temp_factor: f64,
}

impl Atom {
    /// Creates a new `Atom` with full occupancy and a zero temperature factor.
    ///
    /// # Arguments
    ///
    /// * `name` - The atom name.
    /// * `residue_id` - The ID of the residue this atom belongs to.
    /// * `element` - The chemical element.
    /// * `position` - The 3D coordinates of the atom.
    pub fn new(name: &str, residue_id: ResidueId, element: Element, position: Point3<f64>) -> Self {
        Self {
            name: name.to_string(),
            residue_id,
            element,
            serial: 0,
            position,
            occupancy: 1.0,
            temp_factor: 0.0,
        }
    }

    pub fn is_hydrogen(&self) -> bool {
        self.element.is_hydrogen()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    #[test]
    fn new_atom_has_expected_default_fields() {
        let residue_id = ResidueId::default();
        let atom = Atom::new("CA", residue_id, Element::Carbon, Point3::new(1.0, 2.0, 3.0));

        assert_eq!(atom.name, "CA");
        assert_eq!(atom.residue_id, residue_id);
        assert_eq!(atom.element, Element::Carbon);
        assert_eq!(atom.serial, 0);
        assert_eq!(atom.position, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(atom.occupancy, 1.0);
        assert_eq!(atom.temp_factor, 0.0);
    }

    #[test]
    fn is_hydrogen_follows_element() {
        let residue_id = ResidueId::default();
        let h = Atom::new("HB2", residue_id, Element::Hydrogen, Point3::origin());
        let c = Atom::new("CB", residue_id, Element::Carbon, Point3::origin());
        assert!(h.is_hydrogen());
        assert!(!c.is_hydrogen());
    }

    #[test]
    fn atom_equality_and_clone_works() {
        let residue_id = ResidueId::default();
        let atom1 = Atom::new("N", residue_id, Element::Nitrogen, Point3::origin());
        let atom2 = atom1.clone();
        assert_eq!(atom1, atom2);
    }
}
