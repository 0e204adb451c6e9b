//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::credentials::CredentialSet;
use crate::eligibility::Epoch;

/// List command arguments.
///
/// With no arguments, lists the catalogue segments; with a segment, its
/// series; with segment and series, the models.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Segment to list series for
    pub segment: Option<String>,

    /// Series to list models for
    pub series: Option<String>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// The model key to show
    pub model: String,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Assess command arguments.
#[derive(Debug, Args)]
pub struct AssessCommand {
    /// The model key to assess
    pub model: String,

    /// Assess a single rule epoch instead of all three
    #[arg(short, long, value_enum, conflicts_with = "year")]
    pub epoch: Option<EpochArg>,

    /// Assess the epoch a calendar year falls under
    #[arg(short = 'y', long)]
    pub year: Option<i32>,

    /// You hold an Operator ID
    #[arg(long)]
    pub operator_id: bool,

    /// You hold a Flyer ID (basic test)
    #[arg(long)]
    pub flyer_id: bool,

    /// You hold an A1/A3 training certificate (optional)
    #[arg(long)]
    pub a1a3: bool,

    /// You hold an A2 CofC
    #[arg(long)]
    pub a2_cofc: bool,

    /// You hold a GVC
    #[arg(long)]
    pub gvc: bool,

    /// You hold an Operational Authorisation
    #[arg(long)]
    pub oa: bool,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

impl AssessCommand {
    /// The credential set described by the flags.
    #[must_use]
    pub fn credentials(&self) -> CredentialSet {
        CredentialSet {
            operator_id: self.operator_id,
            flyer_id: self.flyer_id,
            a1a3_training: self.a1a3,
            a2_cofc: self.a2_cofc,
            gvc: self.gvc,
            oa: self.oa,
        }
    }

    /// The epochs to evaluate: one if pinned by flag, otherwise all three.
    #[must_use]
    pub fn epochs(&self) -> Vec<Epoch> {
        if let Some(epoch) = self.epoch {
            vec![epoch.into()]
        } else if let Some(year) = self.year {
            vec![Epoch::from_year(year)]
        } else {
            Epoch::ALL.to_vec()
        }
    }
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Epoch argument for assessments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EpochArg {
    /// The rules in force today
    Now,
    /// The rules arriving in 2026
    #[value(name = "2026")]
    Y2026,
    /// The rules planned from 2028
    #[value(name = "2028")]
    Y2028,
}

impl From<EpochArg> for Epoch {
    fn from(arg: EpochArg) -> Self {
        match arg {
            EpochArg::Now => Self::Now,
            EpochArg::Y2026 => Self::Y2026,
            EpochArg::Y2028 => Self::Y2028,
        }
    }
}
