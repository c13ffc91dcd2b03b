//! Override alias management
//!
//! When the compatibility layer's same-named tool cannot be removed from the
//! ambient path, an alias to the vendor tool is placed in a dedicated shim
//! directory that is always ordered first, so first-match resolution picks
//! the vendor tool regardless of the rest of the path.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::search_path::exe_name;

/// Create (or refresh) the alias for `name` pointing at `target`.
/// Returns the alias path.
pub fn create_override_alias(shim_dir: &Path, name: &str, target: &Path) -> Result<PathBuf> {
    fs::create_dir_all(shim_dir)
        .with_context(|| format!("Failed to create shim directory {}", shim_dir.display()))?;

    let alias = shim_dir.join(exe_name(name));
    if alias.symlink_metadata().is_ok() {
        fs::remove_file(&alias)
            .with_context(|| format!("Failed to remove stale alias {}", alias.display()))?;
    }

    make_alias(target, &alias).with_context(|| {
        format!(
            "Failed to alias {} -> {}",
            alias.display(),
            target.display()
        )
    })?;

    Ok(alias)
}

#[cfg(windows)]
fn make_alias(target: &Path, alias: &Path) -> std::io::Result<()> {
    // Hard links need no privileges; fall back to a copy across volumes
    fs::hard_link(target, alias).or_else(|_| fs::copy(target, alias).map(|_| ()))
}

#[cfg(not(windows))]
fn make_alias(target: &Path, alias: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, alias)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_refresh_alias() {
        let temp = tempfile::tempdir().unwrap();
        let shim_dir = temp.path().join("shim");
        let target_a = temp.path().join("target_a");
        let target_b = temp.path().join("target_b");
        fs::write(&target_a, "a").unwrap();
        fs::write(&target_b, "b").unwrap();

        let alias = create_override_alias(&shim_dir, "link", &target_a).unwrap();
        assert!(alias.symlink_metadata().is_ok());
        assert_eq!(alias.file_name().unwrap().to_str().unwrap(), exe_name("link"));

        // Refreshing replaces the previous alias instead of failing
        let alias = create_override_alias(&shim_dir, "link", &target_b).unwrap();
        assert!(alias.symlink_metadata().is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_alias_points_at_target() {
        let temp = tempfile::tempdir().unwrap();
        let shim_dir = temp.path().join("shim");
        let target = temp.path().join("link");
        fs::write(&target, "vendor linker").unwrap();

        let alias = create_override_alias(&shim_dir, "link", &target).unwrap();
        assert_eq!(fs::read_to_string(alias).unwrap(), "vendor linker");
    }
}
