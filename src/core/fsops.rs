//! Thin wrappers over `std::fs` used by `kpr fs`. Every failure carries the
//! operation and path that failed.

use crate::errors::{AppError, AppResult};
use crate::utils::archive::zip_dir;
use std::fs;
use std::path::{Path, PathBuf};

/// Where `src` lands when copied or moved to `dest`. A directory `dest`
/// receives the file under its own name.
fn target_for(src: &Path, dest: &Path) -> AppResult<PathBuf> {
    if dest.is_dir() {
        let name = src.file_name().ok_or_else(|| {
            AppError::Validation(format!("{} has no file name", src.display()))
        })?;
        Ok(dest.join(name))
    } else {
        Ok(dest.to_path_buf())
    }
}

pub fn copy(src: &Path, dest: &Path) -> AppResult<PathBuf> {
    let target = target_for(src, dest)?;
    fs::copy(src, &target).map_err(AppError::file_op("copy", src))?;
    tracing::info!(src = %src.display(), dest = %target.display(), "file copied");
    Ok(target)
}

pub fn move_to(src: &Path, dest: &Path) -> AppResult<PathBuf> {
    let target = target_for(src, dest)?;
    if fs::rename(src, &target).is_err() {
        // Cross-device moves cannot be renamed; fall back to copy and remove.
        fs::copy(src, &target).map_err(AppError::file_op("move", src))?;
        fs::remove_file(src).map_err(AppError::file_op("move", src))?;
    }
    tracing::info!(src = %src.display(), dest = %target.display(), "file moved");
    Ok(target)
}

pub fn delete(path: &Path) -> AppResult<()> {
    fs::remove_file(path).map_err(AppError::file_op("delete", path))?;
    tracing::info!(path = %path.display(), "file deleted");
    Ok(())
}

/// Rename `path` to `new_name` inside the same parent directory.
pub fn rename(path: &Path, new_name: &str) -> AppResult<PathBuf> {
    if new_name.is_empty() || new_name.contains(['/', '\\']) {
        return Err(AppError::Validation(format!(
            "invalid new name {new_name:?}: expected a bare file name"
        )));
    }
    let target = match path.parent() {
        Some(parent) => parent.join(new_name),
        None => PathBuf::from(new_name),
    };
    if target.exists() {
        return Err(AppError::FileOp {
            op: "rename",
            path: target,
            source: std::io::Error::from(std::io::ErrorKind::AlreadyExists),
        });
    }
    fs::rename(path, &target).map_err(AppError::file_op("rename", path))?;
    tracing::info!(from = %path.display(), to = %target.display(), "renamed");
    Ok(target)
}

pub fn create_dir(path: &Path) -> AppResult<()> {
    fs::create_dir_all(path).map_err(AppError::file_op("create directory", path))
}

/// Names of the regular files directly inside `dir`, sorted.
pub fn list(dir: &Path) -> AppResult<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(AppError::file_op("list", dir))? {
        let entry = entry.map_err(AppError::file_op("list", dir))?;
        let is_file = entry
            .file_type()
            .map_err(AppError::file_op("list", dir))?
            .is_file();
        if is_file {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

/// Zip everything under `src_dir`. `.zip` is appended to `dest` when missing.
pub fn zip(src_dir: &Path, dest: &Path) -> AppResult<PathBuf> {
    if !src_dir.is_dir() {
        return Err(AppError::FileOp {
            op: "zip",
            path: src_dir.to_path_buf(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        });
    }
    let dest = match dest.extension() {
        Some(ext) if ext.eq_ignore_ascii_case("zip") => dest.to_path_buf(),
        _ => {
            let mut s = dest.as_os_str().to_owned();
            s.push(".zip");
            PathBuf::from(s)
        }
    };
    let files = zip_dir(src_dir, &dest)?;
    tracing::info!(src = %src_dir.display(), dest = %dest.display(), files, "directory zipped");
    Ok(dest)
}
