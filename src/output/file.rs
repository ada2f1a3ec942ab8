//! File saving functionality for screenshots.

use super::OutputError;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Ensure the save directory exists, creating it if necessary.
pub fn ensure_directory_exists(directory: &Path) -> Result<(), OutputError> {
    if directory.as_os_str().is_empty() || directory.exists() {
        return Ok(());
    }

    log::info!("Creating screenshot directory: {}", directory.display());
    fs::create_dir_all(directory).map_err(|source| OutputError::Io {
        path: directory.to_path_buf(),
        source,
    })
}

/// Write encoded image bytes to `path`.
///
/// The bytes land in a temporary file next to the target first and are then
/// renamed into place, so an interrupted run never leaves a truncated image
/// under the final name. Missing parent directories are created.
///
/// # Returns
/// Path to the saved file
pub fn save_image(path: &Path, image_data: &[u8]) -> Result<PathBuf, OutputError> {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    ensure_directory_exists(directory)?;

    let io_err = |source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    };

    log::info!(
        "Saving screenshot to: {} ({} bytes)",
        path.display(),
        image_data.len()
    );

    let mut staging = tempfile::Builder::new()
        .prefix(".sshot-")
        .suffix(".part")
        .tempfile_in(directory)
        .map_err(io_err)?;
    staging.write_all(image_data).map_err(io_err)?;
    staging.as_file().sync_all().map_err(io_err)?;

    // Staging files are private (0600); screenshots get ordinary file permissions.
    #[cfg(unix)]
    {
        use std::fs::Permissions;
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(staging.path(), Permissions::from_mode(0o644)).map_err(io_err)?;
    }

    staging.persist(path).map_err(|err| io_err(err.error))?;

    log::debug!("Screenshot saved successfully: {}", path.display());
    Ok(path.to_path_buf())
}

/// Expand tilde (~) in path strings.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}
