//! Ordered, deduplicated search path construction and first-match resolution
//!
//! The search path is built fresh per invocation and never mutates process
//! state; PATH is exported to the external build system by the caller instead.

use crate::config::Config;
use crate::error::ResolveError;
use crate::flags::Arch;
use crate::hints::EnvHints;
use serde::Serialize;
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Platform executable name for a bare tool name
pub fn exe_name(base: &str) -> String {
    #[cfg(target_os = "windows")]
    {
        format!("{}.exe", base)
    }
    #[cfg(not(target_os = "windows"))]
    {
        base.to_string()
    }
}

/// Ordered directory sequence consulted first-match-wins
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchPath {
    entries: Vec<PathBuf>,
}

impl SearchPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a directory unless it is already present. The first occurrence
    /// keeps its position, so precedence is never silently changed.
    pub fn push(&mut self, dir: PathBuf) {
        if !self.entries.contains(&dir) {
            self.entries.push(dir);
        }
    }

    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Position of the first entry for which `pred` holds
    pub fn position<F: Fn(&Path) -> bool>(&self, pred: F) -> Option<usize> {
        self.entries.iter().position(|entry| pred(entry))
    }

    /// Scan the path in order and return the first match for `name`.
    ///
    /// A match is any directory entry with the executable's file name,
    /// including a dangling alias: distinguishing "nothing found anywhere"
    /// from "found but unusable" is left to the probe step.
    pub fn resolve(&self, name: &str) -> Result<PathBuf, ResolveError> {
        let file = exe_name(name);
        for dir in &self.entries {
            let candidate = dir.join(&file);
            if candidate.symlink_metadata().is_ok() {
                return Ok(candidate);
            }
        }
        Err(ResolveError::ToolNotFound {
            name: name.to_string(),
        })
    }

    /// Join the entries back into a PATH-style value for export
    pub fn to_env_value(&self) -> OsString {
        // Entries originate from split_paths or config and cannot contain the
        // platform separator, so joining cannot fail in practice.
        env::join_paths(&self.entries).unwrap_or_default()
    }
}

/// Whether a directory belongs to the POSIX compatibility layer.
/// Matching is a case-insensitive substring test with separators normalized,
/// so `D:\cygwin64\bin` and `/usr/bin` are both caught by the defaults.
pub fn is_compat_dir(dir: &Path, patterns: &[String]) -> bool {
    let normalized = dir.to_string_lossy().to_lowercase().replace('\\', "/");
    patterns
        .iter()
        .any(|pattern| normalized.contains(&pattern.to_lowercase().replace('\\', "/")))
}

/// Build the search path for one resolution:
///
/// 1. the override alias directory, when it exists (wins first-match
///    resolution when nothing else can disambiguate)
/// 2. the MSVC bin directory derived from hints
/// 3. the Windows SDK bin directory
/// 4. extra directories from config
/// 5. ambient entries, compatibility-layer directories removed
/// 6. the removed compatibility directories, appended last (shell and make
///    still live there, they just must not shadow the vendor tools)
pub fn build_search_path(hints: &EnvHints, arch: Arch, config: &Config) -> SearchPath {
    let mut path = SearchPath::new();

    if let Some(shim) = config.effective_shim_dir() {
        if shim.is_dir() {
            path.push(shim);
        }
    }

    if let Some(msvc_bin) = hints.msvc_bin_dir(arch) {
        path.push(msvc_bin);
    }
    if let Some(sdk_bin) = hints.sdk_bin_dir.clone() {
        path.push(sdk_bin);
    }
    for extra in &config.paths.extra {
        path.push(PathBuf::from(extra));
    }

    let mut compat = Vec::new();
    for entry in hints.ambient_entries() {
        if is_compat_dir(&entry, &config.paths.compat_patterns) {
            compat.push(entry);
        } else {
            path.push(entry);
        }
    }
    for entry in compat {
        path.push(entry);
    }

    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_deduplicates_keeping_first_position() {
        let mut path = SearchPath::new();
        path.push(PathBuf::from("/a"));
        path.push(PathBuf::from("/b"));
        path.push(PathBuf::from("/a"));

        assert_eq!(path.entries().len(), 2);
        assert_eq!(path.entries()[0], PathBuf::from("/a"));
    }

    #[test]
    fn test_resolve_empty_path_is_not_found() {
        let path = SearchPath::new();
        match path.resolve("cl") {
            Err(ResolveError::ToolNotFound { name }) => assert_eq!(name, "cl"),
            other => panic!("expected ToolNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_first_match_wins() {
        let temp = tempfile::tempdir().unwrap();
        let first = temp.path().join("first");
        let second = temp.path().join("second");
        std::fs::create_dir_all(&first).unwrap();
        std::fs::create_dir_all(&second).unwrap();
        let file = exe_name("link");
        std::fs::write(first.join(&file), "").unwrap();
        std::fs::write(second.join(&file), "").unwrap();

        let mut path = SearchPath::new();
        path.push(first.clone());
        path.push(second);

        let resolved = path.resolve("link").unwrap();
        assert_eq!(resolved, first.join(&file));

        // Deterministic: same filesystem state, same answer
        assert_eq!(path.resolve("link").unwrap(), resolved);
    }

    #[test]
    fn test_is_compat_dir_matches_defaults() {
        let patterns = vec![
            "cygwin".to_string(),
            "msys".to_string(),
            "/usr/bin".to_string(),
        ];
        assert!(is_compat_dir(Path::new(r"D:\cygwin64\bin"), &patterns));
        assert!(is_compat_dir(Path::new("/usr/bin"), &patterns));
        assert!(is_compat_dir(Path::new(r"C:\msys64\usr\bin"), &patterns));
        assert!(!is_compat_dir(
            Path::new(r"C:\Program Files\Microsoft Visual Studio"),
            &patterns
        ));
    }

    #[test]
    fn test_to_env_value_round_trips() {
        let mut path = SearchPath::new();
        let temp = tempfile::tempdir().unwrap();
        let a = temp.path().join("a");
        let b = temp.path().join("b");
        path.push(a.clone());
        path.push(b.clone());

        let joined = path.to_env_value();
        let split: Vec<PathBuf> = env::split_paths(&joined).collect();
        assert_eq!(split, vec![a, b]);
    }
}
