use crate::error::{RibbonError, RibbonResult};
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::Path;

/// Write `contents` to a file that must not exist yet.
pub fn write_new_file(path: &Path, contents: &[u8]) -> RibbonResult<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => RibbonError::OutputExists(path.to_path_buf()),
            _ => RibbonError::Io(e),
        })?;
    file.write_all(contents)?;
    Ok(())
}
