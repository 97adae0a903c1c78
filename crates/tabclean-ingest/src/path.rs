//! Input path resolution.

use std::path::{Path, PathBuf};

/// Expands a leading `~` to the home directory and makes the path absolute.
///
/// Paths that cannot be expanded or made absolute are returned as given; the
/// subsequent existence check reports them.
pub fn resolve_path(raw: impl AsRef<Path>) -> PathBuf {
    let raw = raw.as_ref();
    let expanded = match (raw.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) if rest.as_os_str().is_empty() => home,
        (Ok(rest), Some(home)) => home.join(rest),
        _ => raw.to_path_buf(),
    };
    if expanded.is_absolute() {
        return expanded;
    }
    std::path::absolute(&expanded).unwrap_or(expanded)
}
