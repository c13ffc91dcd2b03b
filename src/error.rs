//! Error taxonomy for toolchain resolution
//!
//! Every variant carries enough context (tool name, attempted path, observed
//! identity) to let an operator fix the environment without reading source.
//! All errors are terminal for the current invocation; PATH state does not
//! change between immediate retries.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolveError {
    /// No directory on the search path contains the named executable.
    /// Remediation: fix the search path (hints, config extras).
    #[error("tool '{name}' not found on the search path")]
    ToolNotFound { name: String },

    /// The first match on the search path belongs to the wrong vendor.
    /// `identity` is the identity the candidate actually reported.
    #[error("'{name}' at {} is not the required vendor tool (reported: {identity})", .path.display())]
    VendorMismatch {
        name: String,
        path: PathBuf,
        identity: String,
    },

    /// The candidate could not be probed: spawn failure, not a regular
    /// executable file (e.g. a dangling alias), or the probe hung past the
    /// timeout. Distinct from ToolNotFound on purpose: the match exists, it
    /// just cannot be run. Remediation: recreate the alias or replace the file.
    #[error("failed to probe '{name}' at {}: {cause}", .path.display())]
    InvocationFailed {
        name: String,
        path: PathBuf,
        cause: String,
    },

    /// Unrecognized architecture or build mode.
    #[error("unrecognized {field}: '{value}'")]
    Configuration { field: &'static str, value: String },
}

impl ResolveError {
    pub(crate) fn invocation_failed(name: &str, path: &std::path::Path, cause: impl Into<String>) -> Self {
        Self::InvocationFailed {
            name: name.to_string(),
            path: path.to_path_buf(),
            cause: cause.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_error_messages_carry_context() {
        let err = ResolveError::ToolNotFound {
            name: "cl".to_string(),
        };
        assert!(err.to_string().contains("cl"));

        let err = ResolveError::VendorMismatch {
            name: "link".to_string(),
            path: PathBuf::from("/alt/bin/link"),
            identity: "GNU".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("link"));
        assert!(msg.contains("GNU"));

        let err = ResolveError::invocation_failed("link", Path::new("/shim/link"), "dangling alias");
        assert!(err.to_string().contains("dangling alias"));
    }

    #[test]
    fn test_not_found_and_invocation_failed_are_distinct() {
        let not_found = ResolveError::ToolNotFound {
            name: "link".to_string(),
        };
        let failed = ResolveError::invocation_failed("link", Path::new("/shim/link"), "broken");
        assert_ne!(not_found.to_string(), failed.to_string());
    }
}
