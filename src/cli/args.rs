//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Multilingual template server and publisher
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Template directory path (relative to project root)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub templates: Option<PathBuf>,

    /// Config file path (default: polyglot.toml)
    #[arg(short = 'C', long, global = true, default_value = "polyglot.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Serve every localized page from memory
    #[command(visible_alias = "s")]
    Serve {
        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<std::net::IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Render every localized page into the output directory
    #[command(visible_alias = "b")]
    Build {
        /// Output directory path (relative to project root)
        #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
        output: Option<PathBuf>,

        /// Recreate the output directory before publishing
        #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        clean: Option<bool>,
    },

    /// List every URL binding without rendering
    #[command(visible_alias = "r")]
    Routes {
        #[command(flatten)]
        args: RoutesArgs,
    },
}

/// Routes command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct RoutesArgs {
    /// Only list bindings of this language (the entry page is always listed)
    #[arg(short, long)]
    pub lang: Option<String>,

    /// Pretty-print JSON output
    #[arg(short, long, conflicts_with = "plain")]
    pub pretty: bool,

    /// One `url  template  language` line per binding instead of JSON
    #[arg(long)]
    pub plain: bool,
}

#[allow(unused)]
impl Cli {
    pub const fn is_serve(&self) -> bool {
        matches!(self.command, Commands::Serve { .. })
    }
    pub const fn is_build(&self) -> bool {
        matches!(self.command, Commands::Build { .. })
    }
    pub const fn is_routes(&self) -> bool {
        matches!(self.command, Commands::Routes { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve() {
        let cli = Cli::parse_from(["polyglot", "serve", "--port", "8080"]);
        assert!(cli.is_serve());
        match cli.command {
            Commands::Serve { port, interface } => {
                assert_eq!(port, Some(8080));
                assert!(interface.is_none());
            }
            _ => unreachable!(),
        }
        assert_eq!(cli.config, PathBuf::from("polyglot.toml"));
    }

    #[test]
    fn test_parse_build_clean_flag() {
        let cli = Cli::parse_from(["polyglot", "build", "--clean"]);
        match cli.command {
            Commands::Build { clean, output } => {
                assert_eq!(clean, Some(true));
                assert!(output.is_none());
            }
            _ => unreachable!(),
        }

        let cli = Cli::parse_from(["polyglot", "build", "--clean", "false", "-o", "dist"]);
        match cli.command {
            Commands::Build { clean, output } => {
                assert_eq!(clean, Some(false));
                assert_eq!(output, Some(PathBuf::from("dist")));
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["polyglot", "routes", "--plain", "-v", "-t", "tpl"]);
        assert!(cli.is_routes());
        assert!(cli.verbose);
        assert_eq!(cli.templates, Some(PathBuf::from("tpl")));
    }

    #[test]
    fn test_pretty_conflicts_with_plain() {
        let result = Cli::try_parse_from(["polyglot", "routes", "--pretty", "--plain"]);
        assert!(result.is_err());
    }
}
