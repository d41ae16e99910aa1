//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// relasm - release assembler
///
/// Discovers and validates OTP applications for inclusion in a release.
#[derive(Parser, Debug)]
#[command(
    name = "relasm",
    author,
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Discover and validate OTP applications for a release",
    long_about = "relasm scans library directories for compiled OTP applications \
                  (ebin/<name>.app plus one .beam per module), validates them, \
                  applies overrides and a skip list, and reports the result.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  relasm discover --lib-dir _build/default/lib\n    \
                  relasm discover --lib-dir lib --shallow --skip observer\n    \
                  relasm discover --override my_app=../my_app --format json"
)]
pub struct Cli {
    /// Configuration file (defaults to ./relasm.yaml, then the user config directory)
    #[arg(long, short = 'c', global = true, env = "RELASM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose (debug) logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Discover applications in library directories
    Discover(DiscoverArgs),

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Output format for discovered applications
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Arguments for the discover command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Scan a rebar3 build directory:\n    relasm discover --lib-dir _build/default/lib\n\n\
                   Scan only one level deep:\n    relasm discover --lib-dir lib --shallow\n\n\
                   Leave an application out:\n    relasm discover --lib-dir lib --skip observer\n\n\
                   Use a local checkout of an application:\n    relasm discover --lib-dir lib --override cowboy=../cowboy\n\n\
                   Machine-readable output:\n    relasm discover --lib-dir lib --format json")]
pub struct DiscoverArgs {
    /// Library directory to scan (repeatable, added to those in the config file)
    #[arg(long = "lib-dir", short = 'l', value_name = "DIR")]
    pub lib_dirs: Vec<PathBuf>,

    /// Only scan <DIR>/ebin and <DIR>/*/ebin instead of the whole tree
    #[arg(long)]
    pub shallow: bool,

    /// Application to leave out of the result (repeatable)
    #[arg(long = "skip", value_name = "APP")]
    pub skip: Vec<String>,

    /// Take an application from a specific directory (repeatable)
    #[arg(long = "override", value_name = "APP=DIR", value_parser = parse_override)]
    pub overrides: Vec<(String, PathBuf)>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Arguments for completions command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    #[arg(long)]
    pub shell: String,
}

/// Parse an `APP=DIR` override
pub fn parse_override(value: &str) -> Result<(String, PathBuf), String> {
    let (name, dir) = value
        .split_once('=')
        .ok_or_else(|| format!("expected APP=DIR, got '{value}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing application name in '{value}'"));
    }
    if dir.is_empty() {
        return Err(format!("missing directory in '{value}'"));
    }
    Ok((name.to_string(), PathBuf::from(dir)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_override() {
        assert_eq!(
            parse_override("cowboy=../cowboy"),
            Ok(("cowboy".to_string(), PathBuf::from("../cowboy")))
        );
    }

    #[test]
    fn test_parse_override_keeps_equals_in_dir() {
        assert_eq!(
            parse_override("a=/tmp/x=y"),
            Ok(("a".to_string(), PathBuf::from("/tmp/x=y")))
        );
    }

    #[test]
    fn test_parse_override_rejects_malformed() {
        assert!(parse_override("cowboy").is_err());
        assert!(parse_override("=dir").is_err());
        assert!(parse_override("app=").is_err());
    }

    #[test]
    fn test_discover_args() {
        let cli = Cli::try_parse_from([
            "relasm",
            "discover",
            "-l",
            "lib",
            "--lib-dir",
            "deps",
            "--shallow",
            "--skip",
            "observer",
            "--override",
            "a=../a",
            "--format",
            "json",
        ])
        .unwrap();
        let Commands::Discover(args) = cli.command else {
            panic!("expected discover");
        };
        assert_eq!(args.lib_dirs, [PathBuf::from("lib"), PathBuf::from("deps")]);
        assert!(args.shallow);
        assert_eq!(args.skip, ["observer"]);
        assert_eq!(args.overrides, [("a".to_string(), PathBuf::from("../a"))]);
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
