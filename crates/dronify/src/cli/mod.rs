//! Command-line interface for dronify.
//!
//! This module provides the CLI structure and command handlers for the
//! `dronify` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{AssessCommand, ConfigCommand, EpochArg, ListCommand, ShowCommand};

/// dronify - Which drone flights are open to you?
///
/// Browses a drone model catalogue and reports which Open category
/// subcategories (A1/A2/A3) and the Specific authorisation route are
/// available for a model now, from 2026, and from 2028, given the
/// credentials you hold.
#[derive(Debug, Parser)]
#[command(name = "dronify")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse the catalogue (segments, series, models)
    List(ListCommand),

    /// Show a model's attributes
    Show(ShowCommand),

    /// Evaluate which subcategories a model can fly under
    Assess(AssessCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "dronify");
    }

    #[test]
    fn test_cli_verify() {
        // Verify the CLI structure is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_quiet() {
        let cli = Cli::try_parse_from(["dronify", "-q", "list"]).unwrap();
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Quiet);
    }

    #[test]
    fn test_verbosity_normal() {
        let cli = Cli::try_parse_from(["dronify", "list"]).unwrap();
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Normal);
    }

    #[test]
    fn test_verbosity_verbose() {
        let cli = Cli::try_parse_from(["dronify", "-v", "list"]).unwrap();
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Verbose);
    }

    #[test]
    fn test_verbosity_trace() {
        let cli = Cli::try_parse_from(["dronify", "-vv", "list"]).unwrap();
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Trace);
    }

    #[test]
    fn test_parse_list_bare() {
        let cli = Cli::try_parse_from(["dronify", "list"]).unwrap();
        match cli.command {
            Command::List(cmd) => {
                assert!(cmd.segment.is_none());
                assert!(cmd.series.is_none());
            }
            _ => panic!("expected list command"),
        }
    }

    #[test]
    fn test_parse_list_segment_series() {
        let cli = Cli::try_parse_from(["dronify", "list", "consumer", "mini"]).unwrap();
        match cli.command {
            Command::List(cmd) => {
                assert_eq!(cmd.segment.as_deref(), Some("consumer"));
                assert_eq!(cmd.series.as_deref(), Some("mini"));
            }
            _ => panic!("expected list command"),
        }
    }

    #[test]
    fn test_parse_show() {
        let cli = Cli::try_parse_from(["dronify", "show", "mini-4-pro"]).unwrap();
        match cli.command {
            Command::Show(cmd) => assert_eq!(cmd.model, "mini-4-pro"),
            _ => panic!("expected show command"),
        }
    }

    #[test]
    fn test_parse_assess_with_epoch_and_credentials() {
        let cli = Cli::try_parse_from([
            "dronify",
            "assess",
            "mini-4-pro",
            "--epoch",
            "2026",
            "--operator-id",
            "--flyer-id",
        ])
        .unwrap();
        match cli.command {
            Command::Assess(cmd) => {
                assert_eq!(cmd.epoch, Some(EpochArg::Y2026));
                assert!(cmd.operator_id);
                assert!(cmd.flyer_id);
                assert!(!cmd.gvc);
            }
            _ => panic!("expected assess command"),
        }
    }

    #[test]
    fn test_parse_assess_epoch_now() {
        let cli = Cli::try_parse_from(["dronify", "assess", "neo", "-e", "now"]).unwrap();
        match cli.command {
            Command::Assess(cmd) => assert_eq!(cmd.epoch, Some(EpochArg::Now)),
            _ => panic!("expected assess command"),
        }
    }

    #[test]
    fn test_parse_assess_epoch_conflicts_with_year() {
        let result =
            Cli::try_parse_from(["dronify", "assess", "neo", "-e", "now", "--year", "2026"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_config_show() {
        let cli = Cli::try_parse_from(["dronify", "config", "show"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Show { .. })
        ));
    }

    #[test]
    fn test_parse_with_config() {
        let cli = Cli::try_parse_from(["dronify", "-c", "/custom/config.toml", "list"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }
}
