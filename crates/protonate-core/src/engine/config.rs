/// Immutable configuration for one normalization run.
///
/// Created once from user input and never mutated; every stochastic choice in
/// the workflow derives from `seed`, so equal configurations over equal
/// inputs produce identical output.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildConfig {
    /// Forcefield identifier: a built-in set name or a template-file path.
    pub forcefield: String,
    /// Target pH for protonation-state selection.
    pub ph: f64,
    /// Seed for the workflow RNG (rotatable-hydrogen torsion choice).
    pub seed: u64,
    /// Requested compute platform name, if any.
    pub platform: Option<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            forcefield: "amber99sbildn.xml".to_string(),
            ph: 7.0,
            seed: 917,
            platform: None,
        }
    }
}
