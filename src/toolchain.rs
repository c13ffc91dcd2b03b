//! Toolchain resolution orchestration
//!
//! Builds the search path, resolves and vendor-verifies the compiler and
//! linker in that order, then selects flags. The first error short-circuits
//! everything after it; a partial toolchain is never returned.

use crate::config::Config;
use crate::error::ResolveError;
use crate::flags::{self, BuildProfile, FlagSet};
use crate::hints::EnvHints;
use crate::probe::{IdentityProbe, VendorIdentity};
use crate::search_path::{build_search_path, SearchPath};
use serde::Serialize;
use std::path::PathBuf;

/// The vendor a resolved tool is required to belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vendor {
    Microsoft,
    Gnu,
}

impl Vendor {
    pub fn matches(&self, identity: &VendorIdentity) -> bool {
        matches!(
            (self, identity),
            (Vendor::Microsoft, VendorIdentity::Microsoft) | (Vendor::Gnu, VendorIdentity::Gnu)
        )
    }
}

/// A resolved, vendor-verified executable
#[derive(Debug, Clone, Serialize)]
pub struct ToolCandidate {
    pub name: String,
    pub path: PathBuf,
    pub identity: VendorIdentity,
}

/// The complete result of one resolution, consumed immediately by the
/// external build system and never persisted
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedToolchain {
    pub profile: BuildProfile,
    pub compiler: ToolCandidate,
    pub linker: ToolCandidate,
    pub flags: FlagSet,
    pub search_path: SearchPath,
}

impl ResolvedToolchain {
    /// Environment the external build system consumes: the resolved PATH and
    /// the compiler/preprocessor flag variables.
    pub fn env_exports(&self) -> Vec<(String, String)> {
        vec![
            (
                "PATH".to_string(),
                self.search_path.to_env_value().to_string_lossy().into_owned(),
            ),
            ("CPPFLAGS".to_string(), self.flags.cppflags.clone()),
            ("CFLAGS".to_string(), self.flags.cflags.clone()),
            ("CXXFLAGS".to_string(), self.flags.cxxflags.clone()),
        ]
    }
}

/// Resolve `name` on the search path and verify it belongs to `required`.
pub fn resolve_and_verify(
    search_path: &SearchPath,
    name: &str,
    probe: &dyn IdentityProbe,
    required: Vendor,
) -> Result<ToolCandidate, ResolveError> {
    let path = search_path.resolve(name)?;
    let identity = probe.identify(name, &path)?;
    if !required.matches(&identity) {
        return Err(ResolveError::VendorMismatch {
            name: name.to_string(),
            path,
            identity: identity.to_string(),
        });
    }
    Ok(ToolCandidate {
        name: name.to_string(),
        path,
        identity,
    })
}

/// Resolve a full toolchain for one build invocation.
pub fn resolve_toolchain(
    hints: &EnvHints,
    profile: BuildProfile,
    config: &Config,
    probe: &dyn IdentityProbe,
    required: Vendor,
) -> Result<ResolvedToolchain, ResolveError> {
    let search_path = build_search_path(hints, profile.arch(), config);
    let compiler = resolve_and_verify(&search_path, &config.tools.compiler, probe, required)?;
    let linker = resolve_and_verify(&search_path, &config.tools.linker, probe, required)?;
    let flags = flags::select_flags(&profile);

    Ok(ResolvedToolchain {
        profile,
        compiler,
        linker,
        flags,
        search_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vendor_matching() {
        assert!(Vendor::Microsoft.matches(&VendorIdentity::Microsoft));
        assert!(!Vendor::Microsoft.matches(&VendorIdentity::Gnu));
        assert!(!Vendor::Microsoft.matches(&VendorIdentity::Unknown("x".to_string())));
        assert!(Vendor::Gnu.matches(&VendorIdentity::Gnu));
    }
}
