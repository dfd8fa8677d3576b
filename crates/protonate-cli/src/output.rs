use std::io;
use std::path::{Path, PathBuf};

/// Derives the output path from the input structure and the `--output` flag.
///
/// With an explicit output, a `.cif` suffix is appended unless already
/// present. Without one, the default is the input path with its extension
/// replaced by `_H.cif`.
pub fn derive_output_path(structure: &Path, output: Option<&Path>) -> PathBuf {
    match output {
        Some(path) => {
            let text = path.as_os_str().to_string_lossy();
            if text.ends_with(".cif") {
                path.to_path_buf()
            } else {
                PathBuf::from(format!("{text}.cif"))
            }
        }
        None => {
            let stem = structure.with_extension("");
            PathBuf::from(format!("{}_H.cif", stem.display()))
        }
    }
}

/// Frees the output path without clobbering an existing file.
///
/// If a file already exists at `path`, it is renamed to the first unused
/// backup name of the form `#<name>.<n>#` (n = 1, 2, ...) in the same
/// directory, and that backup path is returned. The probe loop is unbounded
/// and performs no locking, so concurrent invocations racing on the same
/// path are undefined.
///
/// # Errors
///
/// Any filesystem error (permissions, rename failure) is returned as-is and
/// is fatal to the run.
pub fn reserve_output_path(path: &Path) -> io::Result<Option<PathBuf>> {
    if !path.is_file() {
        return Ok(None);
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let parent = path.parent().unwrap_or_else(|| Path::new(""));

    let mut num = 1usize;
    loop {
        let candidate = parent.join(format!("#{file_name}.{num}#"));
        if candidate.is_file() {
            num += 1;
        } else {
            std::fs::rename(path, &candidate)?;
            return Ok(Some(candidate));
        }
    }
}
