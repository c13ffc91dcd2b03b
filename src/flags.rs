//! Build profiles and compiler flag selection
//!
//! Flag selection is a pure mapping with no I/O; the match is exhaustive over
//! the mode enum, so an unrecognized mode cannot reach it.

use crate::error::ResolveError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Target architecture for the build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    X64,
    X86,
}

impl Arch {
    pub fn as_str(self) -> &'static str {
        match self {
            Arch::X64 => "x64",
            Arch::X86 => "x86",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Arch {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "x64" | "amd64" => Ok(Arch::X64),
            "x86" | "win32" => Ok(Arch::X86),
            _ => Err(ResolveError::Configuration {
                field: "architecture",
                value: s.to_string(),
            }),
        }
    }
}

/// Build mode, selecting the dynamic runtime variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    Release,
    Debug,
}

impl BuildMode {
    pub fn as_str(self) -> &'static str {
        match self {
            BuildMode::Release => "Release",
            BuildMode::Debug => "Debug",
        }
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildMode {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "release" => Ok(BuildMode::Release),
            "debug" => Ok(BuildMode::Debug),
            _ => Err(ResolveError::Configuration {
                field: "mode",
                value: s.to_string(),
            }),
        }
    }
}

/// Immutable (architecture, mode) pair for one build invocation.
/// Fields are private so a constructed profile cannot be mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BuildProfile {
    arch: Arch,
    mode: BuildMode,
}

impl BuildProfile {
    pub fn new(arch: Arch, mode: BuildMode) -> Self {
        Self { arch, mode }
    }

    /// Parse a profile from CLI-style strings
    pub fn parse(arch: &str, mode: &str) -> Result<Self, ResolveError> {
        Ok(Self::new(arch.parse()?, mode.parse()?))
    }

    pub fn arch(&self) -> Arch {
        self.arch
    }

    pub fn mode(&self) -> BuildMode {
        self.mode
    }
}

/// Compiler/preprocessor flag strings consumed by the external build system
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlagSet {
    pub cppflags: String,
    pub cflags: String,
    pub cxxflags: String,
}

/// Select the flag set for a profile.
///
/// Release builds use the dynamic release runtime (-MD), Debug builds the
/// dynamic debug runtime (-MDd). C++ sources additionally pin the language
/// standard.
pub fn select_flags(profile: &BuildProfile) -> FlagSet {
    match profile.mode() {
        BuildMode::Release => FlagSet {
            cppflags: "-MD".to_string(),
            cflags: "-MD".to_string(),
            cxxflags: "-MD /std:c++17".to_string(),
        },
        BuildMode::Debug => FlagSet {
            cppflags: "-MDd".to_string(),
            cflags: "-MDd".to_string(),
            cxxflags: "-MDd /std:c++17".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arch_parse() {
        assert_eq!("x64".parse::<Arch>().unwrap(), Arch::X64);
        assert_eq!("X86".parse::<Arch>().unwrap(), Arch::X86);
        assert_eq!("amd64".parse::<Arch>().unwrap(), Arch::X64);
        assert!("arm64".parse::<Arch>().is_err());
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!("Release".parse::<BuildMode>().unwrap(), BuildMode::Release);
        assert_eq!("debug".parse::<BuildMode>().unwrap(), BuildMode::Debug);
        assert!("Profile".parse::<BuildMode>().is_err());
    }

    #[test]
    fn test_profile_round_trip() {
        let profile = BuildProfile::parse("x86", "Debug").unwrap();
        assert_eq!(profile.arch(), Arch::X86);
        assert_eq!(profile.mode(), BuildMode::Debug);
    }

    #[test]
    fn test_release_flags() {
        let flags = select_flags(&BuildProfile::new(Arch::X64, BuildMode::Release));
        assert_eq!(flags.cflags, "-MD");
        assert!(flags.cxxflags.contains("/std:c++17"));
        assert!(!flags.cflags.contains("-MDd"));
    }

    #[test]
    fn test_debug_flags() {
        let flags = select_flags(&BuildProfile::new(Arch::X64, BuildMode::Debug));
        assert_eq!(flags.cflags, "-MDd");
        assert!(flags.cxxflags.contains("/std:c++17"));
    }

    #[test]
    fn test_flags_total_and_non_empty() {
        for arch in [Arch::X64, Arch::X86] {
            for mode in [BuildMode::Release, BuildMode::Debug] {
                let flags = select_flags(&BuildProfile::new(arch, mode));
                assert!(!flags.cppflags.is_empty());
                assert!(!flags.cflags.is_empty());
                assert!(!flags.cxxflags.is_empty());
            }
        }
    }
}
