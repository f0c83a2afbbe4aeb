//! Artifact placement in the output directory.
//!
//! Every write lands in a hidden temporary file next to the destination and
//! is renamed onto the canonical name only once fully written and synced, so
//! the canonical name never refers to a partial file.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;

use tracing::debug;

/// A file found in the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputEntry {
    pub name: String,
    pub bytes: u64,
}

/// Copy `src` into `out_dir` as `name`, preserving its permissions.
///
/// Returns the number of bytes written.
pub fn install_artifact(src: &Path, out_dir: &Path, name: &str) -> io::Result<u64> {
    let mut source = File::open(src)?;
    let permissions = source.metadata()?.permissions();
    let dest = out_dir.join(name);
    let bytes = write_atomic(&mut source, &dest, Some(permissions))?;
    debug!(src = %src.display(), dest = %dest.display(), bytes, "artifact installed");
    Ok(bytes)
}

/// Stream `reader` into `dest` all-or-nothing.
///
/// On any error the temporary file is removed and `dest` is left exactly as
/// it was before the call.
pub fn write_atomic<R: Read>(
    reader: &mut R,
    dest: &Path,
    permissions: Option<fs::Permissions>,
) -> io::Result<u64> {
    let dir = match dest.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::Builder::new()
        .prefix(".kiln-")
        .suffix(".partial")
        .tempfile_in(dir)?;

    let bytes = io::copy(reader, tmp.as_file_mut())?;
    tmp.as_file().sync_all()?;
    if let Some(permissions) = permissions {
        tmp.as_file().set_permissions(permissions)?;
    }
    tmp.persist(dest).map_err(|e| e.error)?;
    Ok(bytes)
}

/// Remove the file at `dest` if there is one. Directories are left alone.
///
/// Returns whether a file was removed.
pub fn remove_previous(dest: &Path) -> io::Result<bool> {
    match fs::symlink_metadata(dest) {
        Ok(meta) if meta.is_dir() => Ok(false),
        Ok(_) => {
            fs::remove_file(dest)?;
            debug!(path = %dest.display(), "removed previous artifact");
            Ok(true)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// Regular files in `dir`, sorted by name. Temporary files are skipped.
pub fn list_output_dir(dir: &Path) -> io::Result<Vec<OutputEntry>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let meta = entry.metadata()?;
        if !meta.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with(".kiln-") {
            continue;
        }
        entries.push(OutputEntry {
            name,
            bytes: meta.len(),
        });
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}
