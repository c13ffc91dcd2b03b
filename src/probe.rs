//! Vendor identity probing
//!
//! Banner text matching is inherently fragile (locale, version, output
//! format), so the probe is a trait: the resolver's control flow never
//! depends on how identity is established, and the banner strategy can be
//! swapped for something sturdier (e.g. embedded version metadata) without
//! touching it.

use crate::error::ResolveError;
use serde::{Serialize, Serializer};
use std::fmt;
use std::fs;
use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// What a candidate executable reported itself to be
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VendorIdentity {
    Microsoft,
    Gnu,
    /// Unrecognized banner; carries the first output line for diagnostics
    Unknown(String),
}

impl VendorIdentity {
    /// Classify a probe's combined stdout+stderr output
    pub fn from_banner(banner: &str) -> Self {
        let lower = banner.to_lowercase();
        if lower.contains("microsoft") {
            VendorIdentity::Microsoft
        } else if lower.contains("gnu") || lower.contains("coreutils") {
            VendorIdentity::Gnu
        } else {
            let line = banner
                .lines()
                .map(str::trim)
                .find(|line| !line.is_empty())
                .unwrap_or("(no output)");
            VendorIdentity::Unknown(line.chars().take(120).collect())
        }
    }
}

impl fmt::Display for VendorIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VendorIdentity::Microsoft => f.write_str("Microsoft"),
            VendorIdentity::Gnu => f.write_str("GNU"),
            VendorIdentity::Unknown(line) => write!(f, "unknown: {}", line),
        }
    }
}

impl Serialize for VendorIdentity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Capability for establishing a candidate's vendor identity
pub trait IdentityProbe {
    fn identify(&self, name: &str, path: &Path) -> Result<VendorIdentity, ResolveError>;
}

/// Probe that runs the candidate with a diagnostic argument and inspects its
/// banner. Every invocation is bounded by a timeout so a hung tool cannot
/// stall resolution.
pub struct BannerProbe {
    timeout: Duration,
    diagnostic_arg: String,
}

impl BannerProbe {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            // MSVC tools print their banner even for an unknown option;
            // GNU tools answer --version properly.
            diagnostic_arg: "--version".to_string(),
        }
    }

    pub fn with_diagnostic_arg(mut self, arg: &str) -> Self {
        self.diagnostic_arg = arg.to_string();
        self
    }
}

impl IdentityProbe for BannerProbe {
    fn identify(&self, name: &str, path: &Path) -> Result<VendorIdentity, ResolveError> {
        // metadata() follows aliases, so a dangling alias fails here
        let meta = fs::metadata(path)
            .map_err(|e| ResolveError::invocation_failed(name, path, e.to_string()))?;
        if !meta.is_file() {
            return Err(ResolveError::invocation_failed(
                name,
                path,
                "not a regular executable file",
            ));
        }

        let mut child = Command::new(path)
            .arg(&self.diagnostic_arg)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ResolveError::invocation_failed(name, path, e.to_string()))?;

        let deadline = Instant::now() + self.timeout;
        loop {
            match child.try_wait() {
                Ok(Some(_status)) => break, // exit code is irrelevant, only the banner matters
                Ok(None) => {
                    if Instant::now() >= deadline {
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(ResolveError::invocation_failed(
                            name,
                            path,
                            format!("probe timed out after {:.1}s", self.timeout.as_secs_f64()),
                        ));
                    }
                    thread::sleep(Duration::from_millis(25));
                }
                Err(e) => {
                    return Err(ResolveError::invocation_failed(name, path, e.to_string()));
                }
            }
        }

        // Banners are a few lines at most, far below the pipe buffer, so
        // reading after exit cannot deadlock.
        let mut banner = String::new();
        if let Some(mut stdout) = child.stdout.take() {
            let _ = stdout.read_to_string(&mut banner);
        }
        if let Some(mut stderr) = child.stderr.take() {
            banner.push('\n');
            let _ = stderr.read_to_string(&mut banner);
        }

        Ok(VendorIdentity::from_banner(&banner))
    }
}
