//! Persistence of the canonical table
//!
//! The output CSV is the sole hand-off to downstream consumers. It is written
//! to a temporary file beside the target and renamed over it, so readers see
//! either the previous version or the complete new one.

use std::path::Path;

use anyhow::Result;
use polars::prelude::*;
use tempfile::NamedTempFile;

use super::error::CombineError;

/// Write the table as CSV to `path`, replacing any existing file atomically.
///
/// The header row is the table's column names in order; no index column is
/// written.
pub fn write_canonical_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    if extension != "csv" {
        return Err(CombineError::UnsupportedFormat { extension }.into());
    }

    let write_error = |source: std::io::Error| CombineError::Write {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(parent).map_err(write_error)?;
    CsvWriter::new(tmp.as_file_mut())
        .include_header(true)
        .finish(df)
        .map_err(|e| write_error(std::io::Error::other(e.to_string())))?;
    tmp.as_file()
        .set_permissions(output_permissions(path, tmp.as_file())?)
        .map_err(write_error)?;
    tmp.as_file().sync_all().map_err(write_error)?;
    tmp.persist(path).map_err(|e| write_error(e.error))?;

    log::info!("Wrote {} rows to {}", df.height(), path.display());
    Ok(())
}

/// Permissions for the replacement file: those of the file being replaced,
/// or world-readable for a new file.
fn output_permissions(path: &Path, tmp: &std::fs::File) -> Result<std::fs::Permissions> {
    if let Ok(existing) = std::fs::metadata(path) {
        if existing.is_file() {
            return Ok(existing.permissions());
        }
    }

    let mut permissions = tmp
        .metadata()
        .map_err(|source| CombineError::Write {
            path: path.to_path_buf(),
            source,
        })?
        .permissions();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        permissions.set_mode(0o644);
    }
    #[cfg(not(unix))]
    permissions.set_readonly(false);
    Ok(permissions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn dir_entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_rejects_non_csv_target() {
        let mut df = df! { "a" => [1i64] }.unwrap();
        let err = write_canonical_csv(&mut df, Path::new("out.parquet")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CombineError>(),
            Some(CombineError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_missing_directory_is_write_error() {
        let mut df = df! { "a" => [1i64] }.unwrap();
        let err =
            write_canonical_csv(&mut df, Path::new("/nonexistent/dir/out.csv")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CombineError>(),
            Some(CombineError::Write { .. })
        ));
    }

    #[test]
    fn test_failed_create_keeps_previous_output() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("combined.csv");
        let mut df = df! { "a" => [1i64, 2] }.unwrap();
        write_canonical_csv(&mut df, &target).unwrap();
        let before = std::fs::read(&target).unwrap();

        // The target is a regular file, so nothing can be created beneath it
        let mut replacement = df! { "a" => [9i64] }.unwrap();
        let err = write_canonical_csv(&mut replacement, &target.join("nested.csv")).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<CombineError>(),
            Some(CombineError::Write { .. })
        ));
        assert_eq!(std::fs::read(&target).unwrap(), before);
        assert_eq!(dir_entries(temp_dir.path()), vec!["combined.csv"]);
    }

    #[test]
    fn test_failed_replace_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("combined.csv");
        std::fs::create_dir(&target).unwrap();
        std::fs::write(target.join("keep.txt"), b"previous").unwrap();

        let mut df = df! { "a" => [1i64] }.unwrap();
        let err = write_canonical_csv(&mut df, &target).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<CombineError>(),
            Some(CombineError::Write { .. })
        ));
        assert_eq!(dir_entries(temp_dir.path()), vec!["combined.csv"]);
        assert_eq!(std::fs::read(target.join("keep.txt")).unwrap(), b"previous");
    }

    #[cfg(unix)]
    #[test]
    fn test_new_output_is_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("combined.csv");
        let mut df = df! { "a" => [1i64] }.unwrap();

        write_canonical_csv(&mut df, &target).unwrap();

        let mode = std::fs::metadata(&target).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[cfg(unix)]
    #[test]
    fn test_replacement_keeps_existing_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("combined.csv");
        std::fs::write(&target, b"old").unwrap();
        std::fs::set_permissions(&target, std::fs::Permissions::from_mode(0o640)).unwrap();
        let mut df = df! { "a" => [1i64] }.unwrap();

        write_canonical_csv(&mut df, &target).unwrap();

        let mode = std::fs::metadata(&target).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o640);
        assert_ne!(std::fs::read(&target).unwrap(), b"old");
    }
}
