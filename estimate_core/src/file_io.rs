//! # File I/O Module
//!
//! File operations with safety features:
//! - **Atomic writes**: Write to .tmp, sync, rename to prevent partial files
//! - **Version validation**: Settings files must match the schema version
//!
//! Reports written by [`crate::report::TextFileSink`] and
//! [`crate::report::PdfFileSink`] go through [`write_atomic`] as well.
//!
//! ## Example
//!
//! ```rust,no_run
//! use estimate_core::file_io::{load_settings_or_default, save_settings};
//! use std::path::Path;
//!
//! let path = Path::new("settings.json");
//! let mut settings = load_settings_or_default(path)?;
//! settings.set_object_name("Garage foundation");
//! save_settings(&settings, path)?;
//! # Ok::<(), estimate_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::errors::{CalcError, CalcResult};
use crate::settings::{Settings, SCHEMA_VERSION};

/// Temp file used while writing `path` (`name.ext` -> `name.ext.tmp`)
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let extension = tmp
        .extension()
        .map(|e| format!("{}.tmp", e.to_string_lossy()))
        .unwrap_or_else(|| "tmp".to_string());
    tmp.set_extension(extension);
    tmp
}

/// Write bytes to a file with atomic semantics.
///
/// The write process:
/// 1. Write to a temporary file next to the target
/// 2. Sync to disk (fsync)
/// 3. Rename over the target (atomic on most filesystems)
pub fn write_atomic(path: &Path, bytes: &[u8]) -> CalcResult<()> {
    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(bytes).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        // Clean up temp file if rename fails
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

/// Save settings as pretty JSON, creating the parent directory if needed.
pub fn save_settings(settings: &Settings, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(settings)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                CalcError::file_error("create directory", parent.display().to_string(), e.to_string())
            })?;
        }
    }

    write_atomic(path, json.as_bytes())
}

/// Load settings from a file.
///
/// # Returns
///
/// * `Ok(Settings)` - Successfully loaded settings
/// * `Err(CalcError::VersionMismatch)` - File version is incompatible
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_settings(path: &Path) -> CalcResult<Settings> {
    let mut file = File::open(path).map_err(|e| {
        CalcError::file_error("open", path.display().to_string(), e.to_string())
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| {
        CalcError::file_error("read", path.display().to_string(), e.to_string())
    })?;

    let settings: Settings =
        serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), e),
        })?;

    validate_version(&settings.version)?;

    Ok(settings)
}

/// Load settings, falling back to defaults when the file does not exist.
///
/// A file that exists but cannot be read or parsed is still an error.
pub fn load_settings_or_default(path: &Path) -> CalcResult<Settings> {
    if path.exists() {
        load_settings(path)
    } else {
        Ok(Settings::default())
    }
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let file_parts: Vec<u32> = file_version
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();

    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(mismatch());
    }

    // Major version must match
    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    // For 0.x versions a newer minor version is not readable
    if current_parts[0] == 0 && file_parts.len() > 1 && current_parts.len() > 1 && file_parts[1] > current_parts[1] {
        return Err(mismatch());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::UnitPrices;
    use std::env::temp_dir;

    fn temp_path(name: &str) -> PathBuf {
        temp_dir().join(format!("estimate_core_test_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_tmp_path_generation() {
        assert_eq!(
            tmp_path_for(Path::new("/path/to/settings.json")),
            Path::new("/path/to/settings.json.tmp")
        );
        assert_eq!(tmp_path_for(Path::new("/path/to/report")), Path::new("/path/to/report.tmp"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_path("roundtrip");

        let mut settings = Settings::default();
        settings.set_prices(UnitPrices::new(480.0, 1100.0, 1900.0)).unwrap();
        settings.set_object_name("Test Object");
        save_settings(&settings, &path).unwrap();

        let loaded = load_settings(&path).unwrap();
        assert_eq!(loaded, settings);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_write_leaves_no_tmp_file() {
        let path = temp_path("atomic");

        write_atomic(&path, b"hello").unwrap();

        assert!(!tmp_path_for(&path).exists());
        assert_eq!(fs::read(&path).unwrap(), b"hello");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = temp_path("missing");
        let _ = fs::remove_file(&path);
        let settings = load_settings_or_default(&path).unwrap();
        assert_eq!(settings.prices, UnitPrices::default());
    }

    #[test]
    fn test_invalid_json_is_error() {
        let path = temp_path("invalid");
        fs::write(&path, "{ not json").unwrap();
        let err = load_settings_or_default(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.5").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("garbage").is_err());
    }
}
