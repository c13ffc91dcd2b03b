use crate::flags::FlagSet;
use crate::search_path::SearchPath;
use crate::theme::Theme;
use crate::toolchain::ResolvedToolchain;

/// Output verbosity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Quiet,       // Only errors
    Normal,      // Standard output
    Verbose,     // More details
    VeryVerbose, // All details including every search path entry
}

/// Print the resolved toolchain as JSON for scripting
pub fn print_json(toolchain: &ResolvedToolchain) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(toolchain)?);
    Ok(())
}

/// Emit KEY=VALUE lines for the external build system's environment
pub fn print_exports(toolchain: &ResolvedToolchain) {
    for (key, value) in toolchain.env_exports() {
        println!("{}={}", key, value);
    }
}

/// Print a human-readable summary of the resolved toolchain
pub fn print_human(toolchain: &ResolvedToolchain, mode: OutputMode) {
    if mode == OutputMode::Quiet {
        return;
    }

    println!();
    println!(
        "{}",
        Theme::header(&format!(
            "Resolved Toolchain ({} {})",
            toolchain.profile.arch(),
            toolchain.profile.mode()
        ))
    );
    println!("{}", Theme::divider_bold(60));
    println!();
    println!(
        "  Compiler: {}  ({})",
        Theme::value(&toolchain.compiler.path.display().to_string()),
        toolchain.compiler.identity
    );
    println!(
        "  Linker:   {}  ({})",
        Theme::value(&toolchain.linker.path.display().to_string()),
        toolchain.linker.identity
    );
    println!();
    print_flag_lines(&toolchain.flags);

    if mode == OutputMode::Verbose || mode == OutputMode::VeryVerbose {
        println!();
        println!("{}", Theme::primary("Search path (first match wins):"));
        for (index, entry) in toolchain.search_path.entries().iter().enumerate() {
            println!("  {:2}. {}", index + 1, entry.display());
        }
    }
    println!();
}

/// Print the flag variables, one per line
pub fn print_flag_lines(flags: &FlagSet) {
    println!("  CPPFLAGS: {}", Theme::value(&flags.cppflags));
    println!("  CFLAGS:   {}", Theme::value(&flags.cflags));
    println!("  CXXFLAGS: {}", Theme::value(&flags.cxxflags));
}

/// Print a flag set as JSON
pub fn print_flags_json(flags: &FlagSet) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(flags)?);
    Ok(())
}

/// Print a constructed search path, one entry per line
pub fn print_search_path(path: &SearchPath, mode: OutputMode) {
    if mode == OutputMode::Quiet {
        return;
    }
    if path.is_empty() {
        println!("{}", Theme::muted("(empty search path - no hints, no ambient PATH)"));
        return;
    }
    for entry in path.entries() {
        println!("{}", entry.display());
    }
}

/// Print a constructed search path as JSON
pub fn print_search_path_json(path: &SearchPath) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(path)?);
    Ok(())
}
