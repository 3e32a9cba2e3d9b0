use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

const TEMP_PREFIX: &str = ".digicase.tmp.";

/// Replace the contents of `path` with `bytes` in one step.
///
/// The data goes to a temporary file in the same directory, is flushed and
/// synced, then renamed over `path`. Readers see either the old file or the
/// new one, never a partial write.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        Some(_) => Path::new("."),
        None => {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("path `{}` has no parent directory", path.display()),
            ))
        }
    };
    fs::create_dir_all(parent)?;

    // Dropping the temp file on an error path removes it.
    let mut tmp = tempfile::Builder::new().prefix(TEMP_PREFIX).tempfile_in(parent)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    persist(tmp, path)?;
    sync_parent_dir(parent)
}

fn persist(tmp: NamedTempFile, path: &Path) -> io::Result<()> {
    tmp.persist(path).map(|_| ()).map_err(|err| err.error)
}

#[cfg(unix)]
fn sync_parent_dir(parent: &Path) -> io::Result<()> {
    fs::File::open(parent)?.sync_all()
}

#[cfg(not(unix))]
fn sync_parent_dir(_parent: &Path) -> io::Result<()> {
    Ok(())
}
