use crate::cli::Cli;
use crate::error::{CliError, Result};
use crate::output;
use crate::ui;
use protonate::core::io::mmcif::MmcifFile;
use protonate::core::io::pdb::PdbFile;
use protonate::core::io::traits::MolecularFile;
use protonate::core::io::StructureFormat;
use protonate::core::forcefield::params::Forcefield;
use protonate::core::topology::connectivity;
use protonate::engine::config::BuildConfig;
use protonate::engine::platform;
use protonate::workflows::hydrogens;
use tracing::{debug, info};

/// Fixed target pH for protonation-state selection.
const TARGET_PH: f64 = 7.0;

/// The whole pipeline: resolve platform properties, parse the structure,
/// infer connectivity, normalize hydrogens, and write the result as mmCIF
/// without clobbering an existing file.
pub fn execute(cli: Cli) -> Result<()> {
    info!("Started");
    info!("Using:");
    info!("  initial structure: {}", cli.structure.display());
    info!("  force field: {}", cli.forcefield);
    info!("  random seed: {}", cli.seed);

    let properties = platform::resolve_properties(cli.platform.as_deref())?;
    if let Some(name) = cli.platform.as_deref() {
        info!("  platform: {name}");
        for (key, value) in &properties {
            info!("  platform property: {key} = {value}");
        }
    }

    let format = StructureFormat::from_path(&cli.structure)?;

    let mut system = ui::run_with_spinner("Loading structure", || match format {
        StructureFormat::Pdb => {
            PdbFile::read_from_path(&cli.structure).map_err(|e| CliError::FileParsing {
                path: cli.structure.clone(),
                source: e.into(),
            })
        }
        StructureFormat::Mmcif => {
            MmcifFile::read_from_path(&cli.structure).map_err(|e| CliError::FileParsing {
                path: cli.structure.clone(),
                source: e.into(),
            })
        }
    })?;
    info!(
        "Loaded {} atom(s) in {} chain(s)",
        system.atom_count(),
        system.chains_iter().count()
    );

    connectivity::infer_bonds(&mut system);
    debug!("Inferred {} bond(s)", system.bonds().len());

    let forcefield = Forcefield::load(&cli.forcefield)
        .map_err(protonate::engine::error::EngineError::from)?;
    debug!(
        "Forcefield '{}' provides {} residue template(s)",
        forcefield.name(),
        forcefield.template_count()
    );

    let config = BuildConfig {
        forcefield: cli.forcefield.clone(),
        ph: TARGET_PH,
        seed: cli.seed,
        platform: cli.platform.clone(),
    };

    info!("Removing and re-adding hydrogen atoms");
    let report =
        ui::run_with_spinner("Normalizing hydrogens", || {
            hydrogens::run(&mut system, &config, &forcefield)
        })?;
    debug!(
        "Hydrogen report: {} removed, {} added, {} skipped, {} unmatched residue(s)",
        report.removed, report.added, report.skipped, report.unmatched_residues
    );

    let target = output::derive_output_path(&cli.structure, cli.output.as_deref());
    if let Some(backup) = output::reserve_output_path(&target)? {
        info!("Existing file moved to '{}'", backup.display());
    }

    info!("Writing structure to '{}'", target.display());
    MmcifFile::write_to_path(&system, &target).map_err(|e| CliError::FileWriting {
        path: target.clone(),
        source: e.into(),
    })?;

    info!("Done");
    Ok(())
}
