use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};

/// Platform base directory for per-user application data.
/// Windows: the roaming data dir (%APPDATA%), everything else: the user's home.
fn platform_base_dir() -> Result<PathBuf> {
    #[cfg(target_os = "windows")]
    let base = dirs::data_dir();
    #[cfg(not(target_os = "windows"))]
    let base = dirs::home_dir();

    base.ok_or_else(|| anyhow!("cannot determine the user's home directory"))
}

/// Expand a leading `~` (alone or followed by a separator) into the platform base dir.
fn expand_tilde(raw: &str) -> Result<PathBuf> {
    if raw == "~" {
        return platform_base_dir();
    }
    if let Some(rest) = raw.strip_prefix("~/").or_else(|| raw.strip_prefix("~\\")) {
        return Ok(platform_base_dir()?.join(rest));
    }
    Ok(PathBuf::from(raw))
}

/// Resolve the server home directory into an absolute path.
///
/// - `configured = None` → `<platform base>/<default_subdir>`
/// - `~` prefixes are expanded, relative paths are joined with the current dir
/// - with `create = true` the directory is created if missing
pub fn resolve_home_dir(
    configured: Option<String>,
    default_subdir: &str,
    create: bool,
) -> Result<PathBuf> {
    let mut path = match configured {
        Some(raw) => expand_tilde(raw.trim())?,
        None => platform_base_dir()?.join(default_subdir),
    };

    if path.is_relative() {
        let cwd = std::env::current_dir().context("cannot read current directory")?;
        path = cwd.join(path);
    }

    if create {
        ensure_dir(&path)?;
    }
    Ok(path)
}

fn ensure_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path)
        .with_context(|| format!("failed to create directory '{}'", path.display()))
}
