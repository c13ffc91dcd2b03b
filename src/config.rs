use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tools: Tools,

    #[serde(default)]
    pub paths: Paths,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tools {
    #[serde(default = "default_compiler")]
    pub compiler: String,

    #[serde(default = "default_linker")]
    pub linker: String,

    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paths {
    /// Extra directories searched after the vendor directories
    #[serde(default)]
    pub extra: Vec<String>,

    /// Directory holding the override alias (default: %APPDATA%\vcprep\shim)
    #[serde(default)]
    pub shim_dir: Option<String>,

    /// Substrings identifying compatibility-layer directories that must not
    /// shadow the vendor tools
    #[serde(default = "default_compat_patterns")]
    pub compat_patterns: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tools: Tools::default(),
            paths: Paths::default(),
        }
    }
}

impl Default for Tools {
    fn default() -> Self {
        Self {
            compiler: default_compiler(),
            linker: default_linker(),
            probe_timeout_secs: default_probe_timeout(),
        }
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self {
            extra: Vec::new(),
            shim_dir: None,
            compat_patterns: default_compat_patterns(),
        }
    }
}

fn default_compiler() -> String {
    "cl".to_string()
}
fn default_linker() -> String {
    "link".to_string()
}
fn default_probe_timeout() -> u64 {
    5
}
fn default_compat_patterns() -> Vec<String> {
    vec![
        "cygwin".to_string(),
        "msys".to_string(),
        "/usr/bin".to_string(),
    ]
}

impl Config {
    /// Get the config file path: %APPDATA%\vcprep\config.toml
    pub fn config_path() -> Result<PathBuf> {
        let appdata =
            std::env::var("APPDATA").context("APPDATA environment variable not set")?;
        let config_dir = PathBuf::from(appdata).join("vcprep");
        Ok(config_dir.join("config.toml"))
    }

    /// Load config from file or return defaults
    pub fn load() -> Self {
        match Self::config_path() {
            Ok(path) if path.exists() => match fs::read_to_string(&path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => config,
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config file: {}", e);
                        Self::default()
                    }
                },
                Err(e) => {
                    eprintln!("Warning: Failed to read config file: {}", e);
                    Self::default()
                }
            },
            _ => Self::default(),
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let toml = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&path, toml).context("Failed to write config file")?;

        Ok(())
    }

    /// Apply CLI option overrides
    pub fn apply_cli_overrides(&mut self, probe_timeout_secs: Option<u64>) {
        if let Some(secs) = probe_timeout_secs {
            self.tools.probe_timeout_secs = secs;
        }
    }

    /// The override alias directory, if one can be determined.
    /// Explicit config wins; otherwise falls back next to the config file.
    pub fn effective_shim_dir(&self) -> Option<PathBuf> {
        if let Some(dir) = &self.paths.shim_dir {
            return Some(PathBuf::from(dir));
        }
        Self::config_path()
            .ok()
            .and_then(|path| path.parent().map(|dir| dir.join("shim")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.tools.compiler, "cl");
        assert_eq!(config.tools.linker, "link");
        assert_eq!(config.tools.probe_timeout_secs, 5);
        assert!(config
            .paths
            .compat_patterns
            .contains(&"cygwin".to_string()));
    }

    #[test]
    fn test_config_apply_cli_overrides() {
        let mut config = Config::default();
        config.apply_cli_overrides(Some(10));
        assert_eq!(config.tools.probe_timeout_secs, 10);

        // None leaves the value unchanged
        config.apply_cli_overrides(None);
        assert_eq!(config.tools.probe_timeout_secs, 10);
    }

    #[test]
    fn test_config_partial_toml() {
        let config: Config = toml::from_str(
            r#"
            [tools]
            linker = "lld-link"
            "#,
        )
        .unwrap();

        assert_eq!(config.tools.linker, "lld-link");
        // Unspecified fields fall back to defaults
        assert_eq!(config.tools.compiler, "cl");
        assert_eq!(config.tools.probe_timeout_secs, 5);
    }

    #[test]
    fn test_explicit_shim_dir_wins() {
        let mut config = Config::default();
        config.paths.shim_dir = Some("/opt/shim".to_string());
        assert_eq!(config.effective_shim_dir(), Some(PathBuf::from("/opt/shim")));
    }
}
