use nalgebra::{Point3, Rotation3, Unit, Vector3};

/// Tetrahedral bond angle in degrees.
pub const TETRAHEDRAL_ANGLE: f64 = 109.47;

/// Constructs an atom position from three reference atoms and internal
/// coordinates (the standard natural-extension construction).
///
/// The new atom `d` is placed at `bond_length` from `c`, forming the angle
/// `b-c-d` and the torsion `a-b-c-d`.
///
/// # Arguments
///
/// * `a`, `b`, `c` - Reference positions, `c` being the bonding partner.
/// * `bond_length` - The c-d distance in Angstroms.
/// * `angle_deg` - The b-c-d angle in degrees.
/// * `torsion_deg` - The a-b-c-d dihedral in degrees.
pub fn place_atom(
    a: &Point3<f64>,
    b: &Point3<f64>,
    c: &Point3<f64>,
    bond_length: f64,
    angle_deg: f64,
    torsion_deg: f64,
) -> Point3<f64> {
    let ab = b - a;
    let bc = c - b;
    let bc_unit = bc.normalize();

    let theta = angle_deg.to_radians();
    let phi = torsion_deg.to_radians();

    let d_local = Vector3::new(
        -bond_length * theta.cos(),
        bond_length * phi.cos() * theta.sin(),
        bond_length * phi.sin() * theta.sin(),
    );

    let mut normal = ab.cross(&bc_unit);
    if normal.norm() < 1e-6 {
        // Collinear frame; any perpendicular completes it
        normal = if bc_unit.x.abs() < 0.9 {
            Vector3::x().cross(&bc_unit)
        } else {
            Vector3::y().cross(&bc_unit)
        };
    }
    let n_unit = normal.normalize();
    let m = n_unit.cross(&bc_unit);

    let d_world = bc_unit * d_local.x + m * d_local.y + n_unit * d_local.z;
    c + d_world
}

/// Places a single atom that completes the coordination of `center`.
///
/// The new position lies along the negated bisector of the unit vectors from
/// `center` to its neighbors. With two in-plane neighbors this yields the
/// planar completion (amide and aromatic hydrogens); with three it yields the
/// fourth tetrahedral direction.
///
/// Returns `None` when no neighbors are given.
pub fn completion_position(
    center: &Point3<f64>,
    neighbors: &[Point3<f64>],
    bond_length: f64,
) -> Option<Point3<f64>> {
    if neighbors.is_empty() {
        return None;
    }
    let sum: Vector3<f64> = neighbors
        .iter()
        .map(|p| (p - center).normalize())
        .sum();
    if sum.norm() < 1e-6 {
        return None;
    }
    Some(center - sum.normalize() * bond_length)
}

/// Places the two hydrogens of a tetrahedral center with two heavy neighbors
/// (methylene and secondary-amine groups).
///
/// Both positions lie in the plane perpendicular to the neighbor-neighbor
/// plane, separated by the tetrahedral angle.
pub fn sp3_pair_positions(
    center: &Point3<f64>,
    neighbor1: &Point3<f64>,
    neighbor2: &Point3<f64>,
    bond_length: f64,
) -> [Point3<f64>; 2] {
    let n1 = (neighbor1 - center).normalize();
    let n2 = (neighbor2 - center).normalize();

    let bisector = (n1 + n2).normalize();
    let mut perpendicular = n1.cross(&n2);
    if perpendicular.norm() < 1e-6 {
        perpendicular = if bisector.x.abs() < 0.9 {
            Vector3::x().cross(&bisector)
        } else {
            Vector3::y().cross(&bisector)
        };
    }
    let perpendicular = perpendicular.normalize();

    let half_angle = (TETRAHEDRAL_ANGLE / 2.0).to_radians();
    let d1 = (-bisector * half_angle.cos() + perpendicular * half_angle.sin()).normalize();
    let d2 = (-bisector * half_angle.cos() - perpendicular * half_angle.sin()).normalize();

    [center + d1 * bond_length, center + d2 * bond_length]
}

/// Places the two in-plane hydrogens of a planar nitrogen with one heavy
/// neighbor (primary-amide and guanidinium NH2 groups).
///
/// The hydrogens sit in the plane defined by `plane_ref`, `neighbor`, and
/// `center`, at 120 degrees on either side of the neighbor-center axis.
pub fn planar_pair_positions(
    center: &Point3<f64>,
    neighbor: &Point3<f64>,
    plane_ref: &Point3<f64>,
    bond_length: f64,
) -> [Point3<f64>; 2] {
    let base = (center - neighbor).normalize();
    let in_plane = plane_ref - neighbor;
    let mut normal = base.cross(&in_plane);
    if normal.norm() < 1e-6 {
        normal = if base.x.abs() < 0.9 {
            Vector3::x().cross(&base)
        } else {
            Vector3::y().cross(&base)
        };
    }
    let axis = Unit::new_normalize(normal);

    let rot_pos = Rotation3::from_axis_angle(&axis, 60.0f64.to_radians());
    let rot_neg = Rotation3::from_axis_angle(&axis, -60.0f64.to_radians());

    [
        center + (rot_pos * base) * bond_length,
        center + (rot_neg * base) * bond_length,
    ]
}

/// Generates the three staggered positions around a rotatable bond.
///
/// For a tetrahedral `center` with a single heavy neighbor, the candidates
/// sit anti and gauche to `reference` (the neighbor's other substituent),
/// i.e., at torsions of 180, -60, and +60 degrees.
pub fn staggered_positions(
    reference: &Point3<f64>,
    neighbor: &Point3<f64>,
    center: &Point3<f64>,
    bond_length: f64,
) -> [Point3<f64>; 3] {
    [
        place_atom(reference, neighbor, center, bond_length, TETRAHEDRAL_ANGLE, 180.0),
        place_atom(reference, neighbor, center, bond_length, TETRAHEDRAL_ANGLE, -60.0),
        place_atom(reference, neighbor, center, bond_length, TETRAHEDRAL_ANGLE, 60.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn angle_deg(center: &Point3<f64>, p1: &Point3<f64>, p2: &Point3<f64>) -> f64 {
        let v1 = (p1 - center).normalize();
        let v2 = (p2 - center).normalize();
        v1.dot(&v2).clamp(-1.0, 1.0).acos().to_degrees()
    }

    #[test]
    fn place_atom_extends_collinear_frame() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(1.0, 0.0, 0.0);
        let c = Point3::new(2.0, 0.0, 0.0);

        let d = place_atom(&a, &b, &c, 1.0, 180.0, 0.0);

        assert!((d.x - 3.0).abs() < 1e-5);
        assert!(d.y.abs() < 1e-5);
        assert!(d.z.abs() < 1e-5);
    }

    #[test]
    fn place_atom_honors_bond_length_and_angle() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(1.5, 0.0, 0.0);
        let c = Point3::new(2.0, 1.3, 0.0);

        let d = place_atom(&a, &b, &c, 1.09, TETRAHEDRAL_ANGLE, 60.0);

        let bond = (d - c).norm();
        assert!((bond - 1.09).abs() < 1e-6, "bond length {bond}");
        let angle = angle_deg(&c, &b, &d);
        assert!((angle - TETRAHEDRAL_ANGLE).abs() < 1e-4, "angle {angle}");
    }

    #[test]
    fn completion_position_bisects_two_neighbors() {
        let center = Point3::new(0.0, 0.0, 0.0);
        let n1 = Point3::new(1.0, 1.0, 0.0);
        let n2 = Point3::new(-1.0, 1.0, 0.0);

        let h = completion_position(&center, &[n1, n2], 1.01).unwrap();

        assert!((h.x).abs() < 1e-6);
        assert!((h.y + 1.01).abs() < 1e-6);
        assert!((h.z).abs() < 1e-6);
    }

    #[test]
    fn completion_position_rejects_empty_neighbor_list() {
        let center = Point3::new(0.0, 0.0, 0.0);
        assert!(completion_position(&center, &[], 1.0).is_none());
    }

    #[test]
    fn sp3_pair_has_tetrahedral_separation() {
        let center = Point3::new(0.0, 0.0, 0.0);
        let n1 = Point3::new(1.5, 0.0, 0.0);
        let n2 = Point3::new(-0.5, 1.4, 0.0);

        let [h1, h2] = sp3_pair_positions(&center, &n1, &n2, 1.09);

        assert!(((h1 - center).norm() - 1.09).abs() < 1e-6);
        assert!(((h2 - center).norm() - 1.09).abs() < 1e-6);
        let hh = angle_deg(&center, &h1, &h2);
        assert!((hh - TETRAHEDRAL_ANGLE).abs() < 1e-4, "H-X-H angle {hh}");
    }

    #[test]
    fn planar_pair_is_coplanar_with_reference() {
        let center = Point3::new(0.0, 1.3, 0.0);
        let neighbor = Point3::new(0.0, 0.0, 0.0);
        let plane_ref = Point3::new(1.2, -0.7, 0.0);

        let [h1, h2] = planar_pair_positions(&center, &neighbor, &plane_ref, 1.01);

        // All constructed points must remain in the z = 0 plane
        assert!(h1.z.abs() < 1e-6);
        assert!(h2.z.abs() < 1e-6);
        // 120-degree angles against the neighbor
        let a1 = angle_deg(&center, &neighbor, &h1);
        let a2 = angle_deg(&center, &neighbor, &h2);
        assert!((a1 - 120.0).abs() < 1e-4, "angle {a1}");
        assert!((a2 - 120.0).abs() < 1e-4, "angle {a2}");
    }

    #[test]
    fn staggered_positions_are_rotamers_of_each_other() {
        let reference = Point3::new(0.0, 0.0, 1.0);
        let neighbor = Point3::new(0.0, 0.0, 0.0);
        let center = Point3::new(1.4, 0.0, 0.0);

        let candidates = staggered_positions(&reference, &neighbor, &center, 1.09);

        for h in &candidates {
            assert!(((h - center).norm() - 1.09).abs() < 1e-6);
            let angle = angle_deg(&center, &neighbor, h);
            assert!((angle - TETRAHEDRAL_ANGLE).abs() < 1e-4);
        }
        // Pairwise separations of a staggered triple match 120-degree torsions
        let d01 = (candidates[0] - candidates[1]).norm();
        let d12 = (candidates[1] - candidates[2]).norm();
        assert!((d01 - d12).abs() < 1e-6);
    }
}
