use crate::core::audit;
use crate::db::Storage;
use crate::errors::{AppError, AppResult};
use crate::utils::archive::zip_file;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Final path of a backup written to `dest`.
pub fn target_path(dest: &Path, compress: bool) -> PathBuf {
    if compress {
        dest.with_extension("zip")
    } else {
        dest.to_path_buf()
    }
}

/// Copy the database file to `dest`. With `compress` the copy is zipped
/// into `dest` with a `.zip` extension and the raw copy removed.
/// An existing destination is refused unless `force` is set.
pub fn backup(storage: &Storage, dest: &Path, compress: bool, force: bool) -> AppResult<PathBuf> {
    let src = storage.path();
    if !src.exists() {
        return Err(AppError::FileOp {
            op: "backup",
            path: src.to_path_buf(),
            source: io::Error::from(io::ErrorKind::NotFound),
        });
    }

    let final_path = target_path(dest, compress);
    if final_path.exists() && !force {
        return Err(AppError::FileOp {
            op: "backup",
            path: final_path,
            source: io::Error::from(io::ErrorKind::AlreadyExists),
        });
    }

    if let Some(parent) = dest.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(AppError::file_op("create directory", parent))?;
    }

    fs::copy(src, dest).map_err(AppError::file_op("backup", dest))?;

    if compress && final_path != dest {
        let entry = dest
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "kpr.db".to_string());
        zip_file(dest, &final_path, &entry)?;
        if let Err(e) = fs::remove_file(dest) {
            tracing::warn!(path = %dest.display(), error = %e, "failed to remove uncompressed backup");
        }
    }

    let pool = storage.open()?;
    audit(
        &pool.conn,
        "backup",
        &final_path.to_string_lossy(),
        if compress {
            "Backup created and compressed"
        } else {
            "Backup created"
        },
    );
    tracing::info!(dest = %final_path.display(), compress, "backup created");

    Ok(final_path)
}
