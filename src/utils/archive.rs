//! Zip helpers shared by backups, pre-migration snapshots and `kpr fs zip`.

use crate::errors::{AppError, AppResult};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

fn options() -> SimpleFileOptions {
    SimpleFileOptions::default().compression_method(CompressionMethod::Deflated)
}

/// Zip a single file into `dest`, stored under `entry_name`.
pub fn zip_file(src: &Path, dest: &Path, entry_name: &str) -> AppResult<()> {
    let file = File::create(dest).map_err(AppError::file_op("create archive", dest))?;
    let mut zip = ZipWriter::new(file);

    zip.start_file(entry_name, options())
        .map_err(|e| AppError::file_op("zip", src)(io::Error::other(e)))?;

    let mut f = File::open(src).map_err(AppError::file_op("open", src))?;
    io::copy(&mut f, &mut zip).map_err(AppError::file_op("zip", src))?;
    zip.finish()
        .map_err(|e| AppError::file_op("finish archive", dest)(io::Error::other(e)))?;

    Ok(())
}

/// Recursively zip every file and directory under `src_dir` into `dest`.
/// Entry names are relative to `src_dir` and use `/` separators.
pub fn zip_dir(src_dir: &Path, dest: &Path) -> AppResult<usize> {
    let mut entries = Vec::new();
    collect(src_dir, src_dir, &mut entries)?;

    let file = File::create(dest).map_err(AppError::file_op("create archive", dest))?;
    let mut zip = ZipWriter::new(file);
    let mut files = 0;

    for (path, name, is_dir) in entries {
        // Skip the archive itself when it is written inside the source tree.
        if path == dest {
            continue;
        }
        if is_dir {
            zip.add_directory(name, options())
                .map_err(|e| AppError::file_op("zip", &path)(io::Error::other(e)))?;
            continue;
        }
        zip.start_file(name, options())
            .map_err(|e| AppError::file_op("zip", &path)(io::Error::other(e)))?;
        let mut f = File::open(&path).map_err(AppError::file_op("open", &path))?;
        io::copy(&mut f, &mut zip).map_err(AppError::file_op("zip", &path))?;
        files += 1;
    }

    zip.finish()
        .map_err(|e| AppError::file_op("finish archive", dest)(io::Error::other(e)))?;
    Ok(files)
}

fn collect(root: &Path, dir: &Path, out: &mut Vec<(PathBuf, String, bool)>) -> AppResult<()> {
    let mut children: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(AppError::file_op("read directory", dir))?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .collect();
    children.sort();

    for path in children {
        let rel = path
            .strip_prefix(root)
            .map_err(|e| AppError::Other(e.to_string()))?
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/");

        if path.is_dir() {
            out.push((path.clone(), format!("{rel}/"), true));
            collect(root, &path, out)?;
        } else {
            out.push((path, rel, false));
        }
    }
    Ok(())
}
