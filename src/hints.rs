//! Environment hints for locating vendor toolchain directories
//!
//! Hints come from the variables a Visual Studio developer prompt (or a CI
//! runner's MSVC setup step) exports. Their absence is not fatal; resolution
//! then falls back to ambient PATH entries only.

use crate::flags::Arch;
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;

/// Variable naming the Visual C++ installation root
pub const VC_INSTALL_DIR: &str = "VCINSTALLDIR";
/// Variable naming the Windows SDK binary directory
pub const SDK_BIN_DIR: &str = "WindowsSdkBinPath";

#[derive(Debug, Clone, Default)]
pub struct EnvHints {
    pub vc_install_dir: Option<PathBuf>,
    pub sdk_bin_dir: Option<PathBuf>,
    pub ambient_path: Option<OsString>,
}

impl EnvHints {
    /// Snapshot the relevant variables from the process environment.
    /// The snapshot is taken once so resolution is not affected by later
    /// environment changes.
    pub fn from_env() -> Self {
        Self {
            vc_install_dir: env::var_os(VC_INSTALL_DIR).map(PathBuf::from),
            sdk_bin_dir: env::var_os(SDK_BIN_DIR).map(PathBuf::from),
            ambient_path: env::var_os("PATH"),
        }
    }

    /// Ambient search path entries, in their original order
    pub fn ambient_entries(&self) -> Vec<PathBuf> {
        self.ambient_path
            .as_ref()
            .map(|p| env::split_paths(p).collect())
            .unwrap_or_default()
    }

    /// Derive the MSVC host/target bin directory from the VC install root:
    /// `$VCINSTALLDIR/Tools/MSVC/<version>/bin/Host<arch>/<arch>`.
    ///
    /// When several toolset versions are installed the highest one is chosen,
    /// so repeated invocations against the same installation always pick the
    /// same directory.
    pub fn msvc_bin_dir(&self, arch: Arch) -> Option<PathBuf> {
        let root = self.vc_install_dir.as_ref()?.join("Tools").join("MSVC");
        let mut versions: Vec<PathBuf> = fs::read_dir(&root)
            .ok()?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect();
        versions.sort();
        let newest = versions.pop()?;
        let bin = newest
            .join("bin")
            .join(format!("Host{}", arch.as_str()))
            .join(arch.as_str());
        bin.is_dir().then_some(bin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn fake_vc_install(versions: &[&str], arch: &str) -> TempDir {
        let temp = tempfile::tempdir().unwrap();
        for version in versions {
            let bin = temp
                .path()
                .join("Tools")
                .join("MSVC")
                .join(version)
                .join("bin")
                .join(format!("Host{}", arch))
                .join(arch);
            fs::create_dir_all(bin).unwrap();
        }
        temp
    }

    #[test]
    fn test_msvc_bin_dir_picks_highest_version() {
        let install = fake_vc_install(&["14.29.30133", "14.40.33807"], "x64");
        let hints = EnvHints {
            vc_install_dir: Some(install.path().to_path_buf()),
            ..Default::default()
        };

        let bin = hints.msvc_bin_dir(Arch::X64).unwrap();
        assert!(bin.to_string_lossy().contains("14.40.33807"));
        assert!(bin.ends_with("bin/Hostx64/x64") || bin.to_string_lossy().ends_with("x64"));
    }

    #[test]
    fn test_msvc_bin_dir_missing_arch_dir() {
        let install = fake_vc_install(&["14.40.33807"], "x64");
        let hints = EnvHints {
            vc_install_dir: Some(install.path().to_path_buf()),
            ..Default::default()
        };

        // x86 target directory was never created
        assert!(hints.msvc_bin_dir(Arch::X86).is_none());
    }

    #[test]
    fn test_absent_hints_are_not_fatal() {
        let hints = EnvHints::default();
        assert!(hints.msvc_bin_dir(Arch::X64).is_none());
        assert!(hints.ambient_entries().is_empty());
    }
}
