use clap::{ArgAction, Parser, Subcommand};
use std::time::Duration;

use crate::config::Config;
use crate::flags::{self, Arch, BuildProfile};
use crate::hints::EnvHints;
use crate::output::{self, OutputMode};
use crate::probe::BannerProbe;
use crate::progress;
use crate::search_path;
use crate::shim;
use crate::theme::Theme;
use crate::toolchain::{self, Vendor};

#[derive(Parser)]
#[command(name = "vcprep")]
#[command(version)]
#[command(about = "Resolve a clean MSVC toolchain when Cygwin shadows cl and link on PATH")]
#[command(
    long_about = "Vcprep deterministically resolves the MSVC compiler and linker on hosts \
    where a POSIX compatibility layer (Cygwin, MSYS) contributes same-named tools to the \
    search path, and emits the flag set for a build configuration.\n\n\
    Examples:\n  \
    vcprep resolve                    # Resolve cl/link for x64 Release\n  \
    vcprep resolve x86 Debug          # Resolve for x86 Debug\n  \
    vcprep resolve --exports          # Emit KEY=VALUE lines for the build system\n  \
    vcprep flags x64 Debug            # Print the flag set only\n  \
    vcprep path                       # Show the constructed search path\n  \
    vcprep pin                        # Pin the vendor linker via the shim alias"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase output verbosity (-v, -vv for more)
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve compiler and linker, verify their vendor, and select flags
    #[command(visible_alias = "r")]
    Resolve {
        /// Target architecture (x64 or x86)
        #[arg(default_value = "x64", value_name = "ARCH")]
        arch: String,

        /// Build mode (Release or Debug)
        #[arg(default_value = "Release", value_name = "MODE")]
        mode: String,

        /// Output the resolved toolchain as JSON for scripting
        #[arg(long)]
        json: bool,

        /// Emit KEY=VALUE environment lines for the external build system
        #[arg(long)]
        exports: bool,

        /// Probe timeout in seconds (overrides config)
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,
    },

    /// Print the compiler/preprocessor flag set for a build configuration
    #[command(visible_alias = "f")]
    Flags {
        /// Target architecture (x64 or x86)
        #[arg(default_value = "x64", value_name = "ARCH")]
        arch: String,

        /// Build mode (Release or Debug)
        #[arg(default_value = "Release", value_name = "MODE")]
        mode: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the search path that would be used for resolution
    #[command(visible_alias = "p")]
    Path {
        /// Target architecture (x64 or x86)
        #[arg(default_value = "x64", value_name = "ARCH")]
        arch: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Pin a vendor tool by placing an override alias in the shim directory
    Pin {
        /// Tool to pin (default: the configured linker)
        #[arg(value_name = "TOOL")]
        tool: Option<String>,

        /// Target architecture (x64 or x86)
        #[arg(long, default_value = "x64", value_name = "ARCH")]
        arch: String,

        /// Probe timeout in seconds (overrides config)
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,
    },

    /// View or modify configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,

        /// Open config file in editor
        #[arg(long)]
        edit: bool,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Show interactive menu when no command is provided
    pub fn show_interactive_menu() {
        println!();
        println!(
            "{}",
            Theme::header("Vcprep - MSVC Toolchain Resolution for Cygwin Builds")
        );
        println!("{}", Theme::divider_bold(60));
        println!();
        println!("{}", Theme::primary("Available Commands:"));
        println!();
        println!(
            "  {}  {}  {}",
            Theme::command("resolve"),
            Theme::muted("or"),
            Theme::command("r"),
        );
        println!(
            "     {} Resolve cl/link, verify vendor, select flags",
            Theme::muted("->")
        );
        println!();
        println!(
            "  {}  {}  {}",
            Theme::command("flags"),
            Theme::muted("or"),
            Theme::command("f"),
        );
        println!(
            "     {} Print the flag set for a configuration",
            Theme::muted("->")
        );
        println!();
        println!(
            "  {}  {}  {}",
            Theme::command("path"),
            Theme::muted("or"),
            Theme::command("p"),
        );
        println!(
            "     {} Show the constructed search path",
            Theme::muted("->")
        );
        println!();
        println!("  {}", Theme::command("pin"));
        println!(
            "     {} Pin a vendor tool via the shim alias",
            Theme::muted("->")
        );
        println!();
        println!("  {}", Theme::command("config"));
        println!("     {} View or modify configuration", Theme::muted("->"));
        println!();
        println!("{}", Theme::divider(60));
        println!();
        println!("{}", Theme::primary("Quick Examples:"));
        println!();
        println!(
            "  {} Resolve x64 Release toolchain",
            Theme::command("vcprep resolve")
        );
        println!(
            "  {} Resolve x86 Debug toolchain",
            Theme::command("vcprep resolve x86 Debug")
        );
        println!(
            "  {} Emit environment for the build system",
            Theme::command("vcprep resolve --exports")
        );
        println!(
            "  {} Show the search path with entries",
            Theme::command("vcprep path -v")
        );
        println!();
        println!(
            "{}",
            Theme::muted("Tip: Use --help with any command for detailed options")
        );
        println!();
    }

    pub fn run(self) -> anyhow::Result<()> {
        let output_mode = if self.quiet {
            OutputMode::Quiet
        } else if self.verbose >= 2 {
            OutputMode::VeryVerbose
        } else if self.verbose == 1 {
            OutputMode::Verbose
        } else {
            OutputMode::Normal
        };

        match self.command {
            None => {
                // No command provided - show interactive menu
                Self::show_interactive_menu();
                Ok(())
            }
            Some(command) => match command {
                Commands::Resolve {
                    arch,
                    mode,
                    json,
                    exports,
                    timeout,
                } => {
                    let mut config = Config::load();
                    config.apply_cli_overrides(timeout);

                    let profile = BuildProfile::parse(&arch, &mode)?;
                    let hints = EnvHints::from_env();
                    let probe =
                        BannerProbe::new(Duration::from_secs(config.tools.probe_timeout_secs));

                    // No spinner when the output is consumed by scripts
                    let spinner = if output_mode != OutputMode::Quiet && !json && !exports {
                        Some(progress::create_spinner("Probing toolchain..."))
                    } else {
                        None
                    };

                    let resolved = toolchain::resolve_toolchain(
                        &hints,
                        profile,
                        &config,
                        &probe,
                        Vendor::Microsoft,
                    );

                    if let Some(sp) = spinner {
                        progress::finish_and_clear(&sp);
                    }

                    let resolved = resolved?;

                    if json {
                        output::print_json(&resolved)?;
                    } else if exports {
                        output::print_exports(&resolved);
                    } else {
                        output::print_human(&resolved, output_mode);
                    }

                    Ok(())
                }
                Commands::Flags { arch, mode, json } => {
                    let profile = BuildProfile::parse(&arch, &mode)?;
                    let flag_set = flags::select_flags(&profile);

                    if json {
                        output::print_flags_json(&flag_set)?;
                    } else {
                        output::print_flag_lines(&flag_set);
                    }

                    Ok(())
                }
                Commands::Path { arch, json } => {
                    let config = Config::load();
                    let arch: Arch = arch.parse()?;
                    let hints = EnvHints::from_env();
                    let path = search_path::build_search_path(&hints, arch, &config);

                    if json {
                        output::print_search_path_json(&path)?;
                    } else {
                        output::print_search_path(&path, output_mode);
                    }

                    Ok(())
                }
                Commands::Pin {
                    tool,
                    arch,
                    timeout,
                } => {
                    let mut config = Config::load();
                    config.apply_cli_overrides(timeout);

                    let name = tool.unwrap_or_else(|| config.tools.linker.clone());
                    let arch: Arch = arch.parse()?;
                    let hints = EnvHints::from_env();
                    let probe =
                        BannerProbe::new(Duration::from_secs(config.tools.probe_timeout_secs));

                    let path = search_path::build_search_path(&hints, arch, &config);
                    let candidate =
                        toolchain::resolve_and_verify(&path, &name, &probe, Vendor::Microsoft)?;

                    let shim_dir = config.effective_shim_dir().ok_or_else(|| {
                        anyhow::anyhow!(
                            "no shim directory configured and APPDATA is not set"
                        )
                    })?;
                    let alias = shim::create_override_alias(&shim_dir, &name, &candidate.path)?;

                    if output_mode != OutputMode::Quiet {
                        println!(
                            "{} Pinned {} -> {}",
                            Theme::success("OK"),
                            alias.display(),
                            candidate.path.display()
                        );
                    }

                    Ok(())
                }
                Commands::Config {
                    show: _,
                    reset,
                    edit,
                } => {
                    if reset {
                        let default_config = Config::default();
                        default_config.save()?;
                        println!("{} Configuration reset to defaults.", Theme::success("OK"));
                    } else if edit {
                        if let Ok(path) = Config::config_path() {
                            // Create default config if it doesn't exist
                            if !path.exists() {
                                Config::default().save()?;
                            }
                            let editor =
                                std::env::var("EDITOR").unwrap_or_else(|_| "notepad".to_string());
                            std::process::Command::new(editor)
                                .arg(&path)
                                .status()
                                .map_err(|e| anyhow::anyhow!("Failed to open editor: {}", e))?;
                        } else {
                            return Err(anyhow::anyhow!("Failed to get config file path"));
                        }
                    } else {
                        // Default (and --show): print current configuration
                        let config = Config::load();
                        println!("{}", Theme::header("Current Configuration"));
                        println!("{}", Theme::divider_bold(60));
                        println!();
                        println!("Tools:");
                        println!("  Compiler: {}", config.tools.compiler);
                        println!("  Linker: {}", config.tools.linker);
                        println!("  Probe timeout: {} s", config.tools.probe_timeout_secs);
                        println!();
                        println!("Paths:");
                        if config.paths.extra.is_empty() {
                            println!("  Extra: (none)");
                        } else {
                            println!("  Extra:");
                            for dir in &config.paths.extra {
                                println!("    {}", dir);
                            }
                        }
                        match config.effective_shim_dir() {
                            Some(dir) => println!("  Shim dir: {}", dir.display()),
                            None => println!("  Shim dir: (unavailable - APPDATA not set)"),
                        }
                        println!();
                        println!("Compatibility patterns:");
                        for pattern in &config.paths.compat_patterns {
                            println!("  {}", pattern);
                        }
                        println!();
                        if let Ok(path) = Config::config_path() {
                            println!("Config file: {}", path.display());
                        }
                    }
                    Ok(())
                }
            },
        }
    }
}
