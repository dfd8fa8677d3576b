use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Represents a chemical element relevant to biomolecular structures.
///
/// The set covers the elements that appear in protein and nucleic-acid
/// structures plus the common ions and cofactor metals found in PDB entries.
/// Anything else parses to [`Element::Unknown`] carrying no radius data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    Hydrogen,
    Carbon,
    Nitrogen,
    Oxygen,
    Sulfur,
    Phosphorus,
    Selenium,
    Sodium,
    Magnesium,
    Chlorine,
    Potassium,
    Calcium,
    Manganese,
    Iron,
    Zinc,
    Unknown,
}

#[derive(Debug, Error)]
#[error("Unrecognized element symbol: '{0}'")]
pub struct ParseElementError(pub String);

impl Element {
    /// Returns the one- or two-letter element symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            Element::Hydrogen => "H",
            Element::Carbon => "C",
            Element::Nitrogen => "N",
            Element::Oxygen => "O",
            Element::Sulfur => "S",
            Element::Phosphorus => "P",
            Element::Selenium => "SE",
            Element::Sodium => "NA",
            Element::Magnesium => "MG",
            Element::Chlorine => "CL",
            Element::Potassium => "K",
            Element::Calcium => "CA",
            Element::Manganese => "MN",
            Element::Iron => "FE",
            Element::Zinc => "ZN",
            Element::Unknown => "X",
        }
    }

    /// Returns the covalent radius in Angstroms, used by the bond-inference
    /// distance criterion. `None` for [`Element::Unknown`].
    pub fn covalent_radius(&self) -> Option<f64> {
        let r = match self {
            Element::Hydrogen => 0.31,
            Element::Carbon => 0.76,
            Element::Nitrogen => 0.71,
            Element::Oxygen => 0.66,
            Element::Sulfur => 1.05,
            Element::Phosphorus => 1.07,
            Element::Selenium => 1.20,
            Element::Sodium => 1.66,
            Element::Magnesium => 1.41,
            Element::Chlorine => 1.02,
            Element::Potassium => 2.03,
            Element::Calcium => 1.76,
            Element::Manganese => 1.39,
            Element::Iron => 1.32,
            Element::Zinc => 1.22,
            Element::Unknown => return None,
        };
        Some(r)
    }

    pub fn is_hydrogen(&self) -> bool {
        matches!(self, Element::Hydrogen)
    }

    /// Infers the element from a PDB-style atom name when no explicit element
    /// column is available.
    ///
    /// Atom names lead with the element symbol once digits are stripped
    /// ("1HB2" is a hydrogen, "CA" a carbon, "OXT" an oxygen). Two-letter
    /// symbols are only assumed for names that cannot be a carbon/nitrogen/
    /// oxygen/sulfur/hydrogen/phosphorus with a remoteness suffix, which keeps
    /// "CA" (alpha carbon) from being read as calcium.
    pub fn from_atom_name(name: &str) -> Element {
        let stripped: String = name
            .trim()
            .chars()
            .skip_while(|c| c.is_ascii_digit())
            .collect();
        match stripped.chars().next() {
            Some('H') => Element::Hydrogen,
            Some('C') => Element::Carbon,
            Some('N') => Element::Nitrogen,
            Some('O') => Element::Oxygen,
            Some('S') => {
                if stripped.eq_ignore_ascii_case("SE") {
                    Element::Selenium
                } else {
                    Element::Sulfur
                }
            }
            Some('P') => Element::Phosphorus,
            _ => Element::Unknown,
        }
    }
}

impl FromStr for Element {
    type Err = ParseElementError;

    /// Parses an element symbol, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "H" | "D" => Ok(Element::Hydrogen),
            "C" => Ok(Element::Carbon),
            "N" => Ok(Element::Nitrogen),
            "O" => Ok(Element::Oxygen),
            "S" => Ok(Element::Sulfur),
            "P" => Ok(Element::Phosphorus),
            "SE" => Ok(Element::Selenium),
            "NA" => Ok(Element::Sodium),
            "MG" => Ok(Element::Magnesium),
            "CL" => Ok(Element::Chlorine),
            "K" => Ok(Element::Potassium),
            "CA" => Ok(Element::Calcium),
            "MN" => Ok(Element::Manganese),
            "FE" => Ok(Element::Iron),
            "ZN" => Ok(Element::Zinc),
            other if !other.is_empty() => Err(ParseElementError(other.to_string())),
            _ => Err(ParseElementError(String::new())),
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_str_parses_common_symbols() {
        assert_eq!("H".parse::<Element>().unwrap(), Element::Hydrogen);
        assert_eq!("C".parse::<Element>().unwrap(), Element::Carbon);
        assert_eq!("N".parse::<Element>().unwrap(), Element::Nitrogen);
        assert_eq!("O".parse::<Element>().unwrap(), Element::Oxygen);
        assert_eq!("S".parse::<Element>().unwrap(), Element::Sulfur);
        assert_eq!("ZN".parse::<Element>().unwrap(), Element::Zinc);
    }

    #[test]
    fn from_str_is_case_insensitive_and_trims() {
        assert_eq!(" h ".parse::<Element>().unwrap(), Element::Hydrogen);
        assert_eq!("Fe".parse::<Element>().unwrap(), Element::Iron);
        assert_eq!("cl".parse::<Element>().unwrap(), Element::Chlorine);
    }

    #[test]
    fn from_str_maps_deuterium_to_hydrogen() {
        assert_eq!("D".parse::<Element>().unwrap(), Element::Hydrogen);
    }

    #[test]
    fn from_str_rejects_unknown_symbols() {
        assert!("Xx".parse::<Element>().is_err());
        assert!("".parse::<Element>().is_err());
    }

    #[test]
    fn from_atom_name_strips_leading_digits() {
        assert_eq!(Element::from_atom_name("1HB2"), Element::Hydrogen);
        assert_eq!(Element::from_atom_name("2HG1"), Element::Hydrogen);
    }

    #[test]
    fn from_atom_name_reads_alpha_carbon_as_carbon() {
        assert_eq!(Element::from_atom_name("CA"), Element::Carbon);
        assert_eq!(Element::from_atom_name("CB"), Element::Carbon);
    }

    #[test]
    fn from_atom_name_recognizes_heteroatoms() {
        assert_eq!(Element::from_atom_name("OXT"), Element::Oxygen);
        assert_eq!(Element::from_atom_name("SG"), Element::Sulfur);
        assert_eq!(Element::from_atom_name("SE"), Element::Selenium);
        assert_eq!(Element::from_atom_name("ND1"), Element::Nitrogen);
    }

    #[test]
    fn covalent_radius_present_for_known_elements() {
        assert!(Element::Carbon.covalent_radius().is_some());
        assert!(Element::Unknown.covalent_radius().is_none());
    }

    #[test]
    fn is_hydrogen_only_for_hydrogen() {
        assert!(Element::Hydrogen.is_hydrogen());
        assert!(!Element::Carbon.is_hydrogen());
    }
}
