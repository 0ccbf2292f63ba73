use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use shamir_core::ConsistencyPolicy;
use tracing::Level;

use crate::helpers::telemetry::setup_simple_tracing;
use crate::{convert, reconstruct};

#[derive(Parser, Debug)]
#[command(name = "shamir-recover")]
#[command(about = "Recover a threshold secret from shares written in mixed bases", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Indicate log levels by adding additional `-v` arguments. Eg.
    /// `shamir-recover -vv` will show every decoded share
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true
    )]
    pub verbose: u8,

    /// Only log errors. This argument cannot be used alongside `-v`
    #[arg(
        short,
        long,
        action = ArgAction::SetTrue,
        conflicts_with = "verbose",
        global = true
    )]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Reconstruct the secret of each share file
    Reconstruct {
        /// JSON share files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Do not cross-check the secret against a surplus share
        #[arg(long)]
        skip_consistency: bool,

        /// Vote across every threshold-sized subset to locate faulty shares
        #[arg(long)]
        audit: bool,

        /// Print a machine-readable summary instead of the trace
        #[arg(long)]
        json: bool,
    },

    /// Print the decimal value of a number written in another base
    Decode {
        value: String,

        #[arg(short, long, default_value_t = 10)]
        base: u32,
    },

    /// Write a decimal number in another base
    Encode {
        decimal: String,

        #[arg(short, long, default_value_t = 10)]
        base: u32,
    },
}

impl Cli {
    pub fn log_level(&self) -> Level {
        if self.quiet {
            Level::ERROR
        } else {
            match self.verbose {
                0 => Level::WARN,  //
                1 => Level::INFO,  // -v
                2 => Level::DEBUG, // -vv
                _ => Level::TRACE, // -vvv
            }
        }
    }

    pub fn execute(self) -> Result<()> {
        setup_simple_tracing(self.log_level());

        match self.command {
            Commands::Reconstruct {
                files,
                skip_consistency,
                audit,
                json,
            } => {
                let policy = if skip_consistency {
                    ConsistencyPolicy::Skip
                } else {
                    ConsistencyPolicy::Strict
                };
                reconstruct::execute(&files, policy, audit, json)?
            }
            Commands::Decode { value, base } => convert::decode(&value, base)?,
            Commands::Encode { decimal, base } => {
                convert::encode(&decimal, base)?
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level_for(args: &[&str]) -> Level {
        Cli::try_parse_from(args).unwrap().log_level()
    }

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(level_for(&["shamir-recover", "decode", "ff"]), Level::WARN);
        assert_eq!(
            level_for(&["shamir-recover", "-vv", "decode", "1"]),
            Level::DEBUG
        );
        assert_eq!(
            level_for(&["shamir-recover", "-vvvv", "decode", "1"]),
            Level::TRACE
        );
        assert_eq!(
            level_for(&["shamir-recover", "decode", "1", "-q"]),
            Level::ERROR
        );
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let args = ["shamir-recover", "-q", "-v", "decode", "1"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn reconstruct_needs_a_file() {
        assert!(Cli::try_parse_from(["shamir-recover", "reconstruct"]).is_err());
    }

    #[test]
    fn reconstruct_flags_parse() {
        let cli = Cli::try_parse_from([
            "shamir-recover",
            "reconstruct",
            "a.json",
            "b.json",
            "--skip-consistency",
            "--audit",
        ])
        .unwrap();
        match cli.command {
            Commands::Reconstruct {
                files,
                skip_consistency,
                audit,
                json,
            } => {
                assert_eq!(files.len(), 2);
                assert!(skip_consistency);
                assert!(audit);
                assert!(!json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
