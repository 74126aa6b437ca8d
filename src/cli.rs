use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "trackcfg",
    version,
    about = "Keep kernel config tracks consistent with policy and docs"
)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = "TRACKCFG_LAYOUT",
        value_name = "FILE",
        help = "Layout file (default: ~/.config/trackcfg/layout.toml)"
    )]
    pub layout: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignment {
    pub option: String,
    pub value: String,
}

pub fn parse_assignment(raw: &str) -> Result<Assignment, String> {
    match raw.split_once('=') {
        Some((option, value)) if !option.trim().is_empty() => Ok(Assignment {
            option: option.trim().to_string(),
            value: value.to_string(),
        }),
        _ => Err(crate::error::TrackError::InvalidAssignment(raw.to_string()).to_string()),
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show an option across tracks, dev copies, policy and README
    Show {
        #[arg(help = "Config option name (with or without CONFIG_ prefix)")]
        option: String,
    },
    /// Set an option in every track (dry-run unless --apply)
    Set {
        #[arg(value_parser = parse_assignment, value_name = "OPTION=VALUE")]
        assignment: Assignment,
        #[arg(long, value_name = "SECTION", help = "Also add/update in the policy under [SECTION]")]
        policy: Option<String>,
        #[arg(
            long,
            value_name = "HEADING",
            requires_all = ["doc_type", "desc"],
            help = "README section heading (e.g. 'USB Support')"
        )]
        doc: Option<String>,
        #[arg(long = "type", value_name = "TYPE", help = "Config type for README (bool/module/string)")]
        doc_type: Option<String>,
        #[arg(long, value_name = "DESC", help = "Description for README table")]
        desc: Option<String>,
        #[arg(long, default_value_t = false, help = "Actually write changes")]
        apply: bool,
    },
    /// Remove an option from policy and/or README (never from configs)
    #[command(group(
        ArgGroup::new("target")
            .args(["policy", "doc"])
            .required(true)
            .multiple(true)
    ))]
    Remove {
        option: String,
        #[arg(long, default_value_t = false)]
        policy: bool,
        #[arg(long, default_value_t = false)]
        doc: bool,
        #[arg(long, default_value_t = false, help = "Actually write changes")]
        apply: bool,
    },
    /// Check tracks against policy and each other, or review two configs
    Reconcile {
        #[arg(long, default_value_t = false, help = "Rewrite mismatched lines in place")]
        fix: bool,
        #[arg(long, short, default_value_t = false, help = "List all vendor-specific options")]
        verbose: bool,
        #[arg(long, num_args = 2, value_names = ["OLD", "NEW"], help = "Review changes between two config files")]
        review: Option<Vec<PathBuf>>,
    },
}
