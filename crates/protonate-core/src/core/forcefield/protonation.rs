//! Protonation-state selection.
//!
//! Maps a residue name and target pH to the hydrogen-template variant whose
//! hydrogens should be built. The rules use intrinsic (solvent-exposed) pKa
//! values with a buffer window around each pKa to avoid flipping states right
//! at the edge:
//!
//! - below its pKa window, an acid keeps its proton (ASH, GLH) and histidine
//!   becomes doubly protonated (HIP);
//! - near neutral pH, ASP/GLU are deprotonated, LYS and CYS protonated, and
//!   histidine neutral (the epsilon tautomer, HIE, is the fixed choice);
//! - above the relevant pKa window, LYN and CYM appear.
//!
//! Disulfide-bridged cysteines are not pH-driven: they always resolve to CYX.

/// Intrinsic pKa values for the titratable side chains.
const PKA_ASP: f64 = 3.9;
const PKA_GLU: f64 = 4.2;
const PKA_HIS: f64 = 6.0;
const PKA_CYS: f64 = 8.3;
const PKA_LYS: f64 = 10.5;

/// Buffer around each pKa to avoid edge flipping.
const WINDOW: f64 = 0.8;

/// Resolves the hydrogen-template key for a residue at the given pH.
///
/// Input names may already be explicit variants (HIE, ASH, ...), which pass
/// through unchanged except for the disulfide override; CHARMM-style
/// histidine names (HSD/HSE/HSP) are translated to their Amber equivalents.
/// Non-titratable residues resolve to themselves.
pub fn template_key<'a>(residue_name: &'a str, ph: f64, disulfide_bridged: bool) -> &'a str {
    match residue_name {
        "CYS" | "CYM" | "CYX" if disulfide_bridged => "CYX",
        "HIS" => {
            if ph <= PKA_HIS - WINDOW {
                "HIP"
            } else {
                // neutral tautomer default
                "HIE"
            }
        }
        "HSD" => "HID",
        "HSE" => "HIE",
        "HSP" => "HIP",
        "ASP" => {
            if ph <= PKA_ASP - WINDOW {
                "ASH"
            } else {
                "ASP"
            }
        }
        "GLU" => {
            if ph <= PKA_GLU - WINDOW {
                "GLH"
            } else {
                "GLU"
            }
        }
        "LYS" => {
            if ph >= PKA_LYS + WINDOW {
                "LYN"
            } else {
                "LYS"
            }
        }
        "CYS" => {
            if ph >= PKA_CYS + WINDOW {
                "CYM"
            } else {
                "CYS"
            }
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_ph_gives_standard_states() {
        assert_eq!(template_key("ASP", 7.0, false), "ASP");
        assert_eq!(template_key("GLU", 7.0, false), "GLU");
        assert_eq!(template_key("LYS", 7.0, false), "LYS");
        assert_eq!(template_key("CYS", 7.0, false), "CYS");
        assert_eq!(template_key("HIS", 7.0, false), "HIE");
        assert_eq!(template_key("ALA", 7.0, false), "ALA");
    }

    #[test]
    fn acidic_ph_protonates_acids_and_histidine() {
        assert_eq!(template_key("ASP", 1.0, false), "ASH");
        assert_eq!(template_key("GLU", 1.0, false), "GLH");
        assert_eq!(template_key("HIS", 1.0, false), "HIP");
        assert_eq!(template_key("LYS", 1.0, false), "LYS");
    }

    #[test]
    fn basic_ph_deprotonates_lysine_and_cysteine() {
        assert_eq!(template_key("LYS", 13.0, false), "LYN");
        assert_eq!(template_key("CYS", 13.0, false), "CYM");
        assert_eq!(template_key("HIS", 13.0, false), "HIE");
    }

    #[test]
    fn within_window_keeps_neutral_defaults() {
        // pH 6.0 sits inside the histidine window; the neutral tautomer wins
        assert_eq!(template_key("HIS", 6.0, false), "HIE");
        // pH 3.5 sits inside the aspartate window; stay deprotonated
        assert_eq!(template_key("ASP", 3.5, false), "ASP");
    }

    #[test]
    fn disulfide_overrides_ph_for_cysteine() {
        assert_eq!(template_key("CYS", 7.0, true), "CYX");
        assert_eq!(template_key("CYS", 13.0, true), "CYX");
        assert_eq!(template_key("CYX", 7.0, true), "CYX");
    }

    #[test]
    fn charmm_histidine_names_translate() {
        assert_eq!(template_key("HSD", 7.0, false), "HID");
        assert_eq!(template_key("HSE", 7.0, false), "HIE");
        assert_eq!(template_key("HSP", 7.0, false), "HIP");
    }

    #[test]
    fn explicit_variants_pass_through() {
        assert_eq!(template_key("HID", 7.0, false), "HID");
        assert_eq!(template_key("ASH", 7.0, false), "ASH");
        assert_eq!(template_key("LYN", 7.0, false), "LYN");
    }
}
