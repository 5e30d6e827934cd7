//! Filesystem helpers for mirroring build outputs between directories.
//!
//! Directory copies merge into an existing destination and overwrite files
//! of the same name. Symlinks are rejected so a copy never escapes the tree
//! it was asked to mirror, and recursion is capped at
//! [`MAX_DIRECTORY_DEPTH`] levels.

use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use std::fs;
use std::io;

/// Maximum nesting accepted by [`copy_directory`].
pub const MAX_DIRECTORY_DEPTH: usize = 64;

/// Recursively copies `source` into `destination`, overwriting existing files.
///
/// `destination` and any missing parents are created. Entries already present
/// in `destination` but absent from `source` are left untouched.
///
/// # Errors
///
/// Returns an error when `source` is not a directory, when a symlink is
/// encountered, when nesting exceeds [`MAX_DIRECTORY_DEPTH`], or when any
/// underlying I/O operation fails.
///
/// # Examples
///
/// ```
/// use camino::Utf8PathBuf;
/// use meshviewer_common::fs::copy_directory;
/// use std::fs;
/// use tempfile::tempdir;
///
/// # fn demo() -> std::io::Result<()> {
/// let source = tempdir()?;
/// fs::write(source.path().join("app.js"), "contents")?;
/// let destination = tempdir()?;
/// let source_path = Utf8PathBuf::try_from(source.path().to_path_buf()).expect("utf-8 path");
/// let destination_path =
///     Utf8PathBuf::try_from(destination.path().to_path_buf()).expect("utf-8 path");
/// copy_directory(&source_path, &destination_path)?;
/// assert!(destination.path().join("app.js").exists());
/// # Ok(())
/// # }
/// # demo().expect("copy succeeds");
/// ```
pub fn copy_directory(source: &Utf8Path, destination: &Utf8Path) -> io::Result<()> {
    copy_directory_with_depth(source, destination, MAX_DIRECTORY_DEPTH)
}

fn copy_directory_with_depth(
    source: &Utf8Path,
    destination: &Utf8Path,
    remaining_depth: usize,
) -> io::Result<()> {
    if remaining_depth == 0 {
        return Err(depth_limit_error(source));
    }

    let metadata = source.symlink_metadata()?;
    ensure_not_symlink(source, metadata.file_type())?;
    ensure_directory(source, &metadata)?;

    fs::create_dir_all(destination)?;
    for entry in source.read_dir_utf8()? {
        let entry = entry?;
        let entry_path = entry.path();
        let file_type = entry_path.symlink_metadata()?.file_type();

        ensure_not_symlink(entry_path, file_type)?;

        let target = destination.join(entry.file_name());
        if file_type.is_dir() {
            copy_directory_with_depth(entry_path, &target, remaining_depth - 1)?;
        } else {
            debug!("copying {entry_path} to {target}");
            fs::copy(entry_path, &target)?;
        }
    }

    Ok(())
}

/// Copies a single file into `directory`, keeping its file name.
///
/// Returns the path of the written copy.
///
/// # Errors
///
/// Returns an error when `file` has no file name, is a symlink, or cannot be
/// copied.
pub fn copy_file_into(file: &Utf8Path, directory: &Utf8Path) -> io::Result<Utf8PathBuf> {
    let file_name = file.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("`{file}` has no file name"),
        )
    })?;
    ensure_not_symlink(file, file.symlink_metadata()?.file_type())?;

    let target = directory.join(file_name);
    debug!("copying {file} to {target}");
    fs::copy(file, &target)?;
    Ok(target)
}

/// Removes `directory` if it exists and creates it again, empty.
///
/// # Errors
///
/// Returns an error if the removal or creation fails.
pub fn recreate_directory(directory: &Utf8Path) -> io::Result<()> {
    if directory.exists() {
        debug!("removing {directory}");
        fs::remove_dir_all(directory)?;
    }
    fs::create_dir_all(directory)
}

fn ensure_not_symlink(path: &Utf8Path, file_type: fs::FileType) -> io::Result<()> {
    if file_type.is_symlink() {
        Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("refusing to follow symlink `{path}`"),
        ))
    } else {
        Ok(())
    }
}

fn ensure_directory(path: &Utf8Path, metadata: &fs::Metadata) -> io::Result<()> {
    if metadata.is_dir() {
        Ok(())
    } else {
        Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("`{path}` is not a directory"),
        ))
    }
}

fn depth_limit_error(path: &Utf8Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidInput,
        format!(
            "refusing to copy `{path}`: directory depth exceeds limit of {MAX_DIRECTORY_DEPTH} levels"
        ),
    )
}
