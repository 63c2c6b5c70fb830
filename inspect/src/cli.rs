//! # CLI Interface
//!
//! Defines the command-line argument structure for `txfields` using
//! `clap` derive. Subcommands: `decode`, `comment`, `amount`, `address`
//! and `version`.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use ton_txfields::config::{DEFAULT_RETRY_ATTEMPTS, DEFAULT_RETRY_DELAY};

use crate::logging::LogFormat;

/// Inspect TON transactions: direction, sender, value and text comment.
#[derive(Parser, Debug)]
#[command(
    name = "txfields",
    about = "Decode the user-facing fields of TON transactions",
    version,
    propagate_version = true
)]
pub struct TxFieldsCli {
    /// Log output format.
    #[arg(
        long,
        global = true,
        value_enum,
        env = "TXFIELDS_LOG_FORMAT",
        default_value_t = LogFormat::Pretty
    )]
    pub log_format: LogFormat,

    /// Default log filter when `RUST_LOG` is unset.
    #[arg(long, global = true, env = "TXFIELDS_LOG", default_value = "warn")]
    pub log_level: String,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode every transaction in a JSON file (an array or a single object).
    Decode(DecodeArgs),
    /// Decode a message body (hex or JSON cell) as a text comment.
    Comment(CommentArgs),
    /// Convert a nanoton amount to TON or echo it back in nanotons.
    Amount(AmountArgs),
    /// Print an address in raw and user-friendly forms.
    Address(AddressArgs),
    /// Print version information and exit.
    Version,
}

/// Output format for `decode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One indented block per transaction.
    Text,
    /// A JSON array of summaries.
    Json,
}

/// Arguments for the `decode` subcommand.
#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Path to the transactions file, or `-` for stdin.
    pub input: PathBuf,

    /// Output format.
    #[arg(long, short = 'o', value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Attempts at reading the input file before giving up.
    #[arg(long, env = "TXFIELDS_RETRIES", default_value_t = DEFAULT_RETRY_ATTEMPTS)]
    pub retries: u32,

    /// Constant delay between read attempts, in milliseconds.
    #[arg(
        long,
        env = "TXFIELDS_RETRY_DELAY_MS",
        default_value_t = DEFAULT_RETRY_DELAY.as_millis() as u64
    )]
    pub retry_delay_ms: u64,
}

/// Arguments for the `comment` subcommand.
#[derive(Args, Debug)]
pub struct CommentArgs {
    /// Body as hex (one byte-aligned cell, at most 127 bytes) or as a JSON
    /// cell `{"data": "<hex>", "bits": n, "refs": [...]}` for bodies that
    /// continue into child cells.
    pub body: String,
}

/// Arguments for the `amount` subcommand.
#[derive(Args, Debug)]
pub struct AmountArgs {
    /// Amount in nanotons.
    pub nano: u128,

    /// Target unit: `ton` or `nano`.
    #[arg(long, short = 'c', default_value = "ton")]
    pub currency: String,
}

/// Arguments for the `address` subcommand.
#[derive(Args, Debug)]
pub struct AddressArgs {
    /// Address in raw (`0:abc...`) or user-friendly form.
    pub address: String,

    /// Mark the friendly form as test-only.
    #[arg(long)]
    pub testnet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        // Ensures the derive macros produce a valid CLI definition.
        TxFieldsCli::command().debug_assert();
    }

    #[test]
    fn decode_defaults_match_retry_policy() {
        let cli = TxFieldsCli::try_parse_from(["txfields", "decode", "txs.json"]).unwrap();
        match cli.command {
            Commands::Decode(args) => {
                assert_eq!(args.input, PathBuf::from("txs.json"));
                assert_eq!(args.output, OutputFormat::Text);
                assert_eq!(args.retries, 3);
                assert_eq!(args.retry_delay_ms, 1_000);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn global_flags_work_after_the_subcommand() {
        let cli = TxFieldsCli::try_parse_from([
            "txfields",
            "amount",
            "50000000",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.log_format, LogFormat::Json);
        match cli.command {
            Commands::Amount(args) => {
                assert_eq!(args.nano, 50_000_000);
                assert_eq!(args.currency, "ton");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn negative_amounts_are_rejected_by_the_parser() {
        assert!(TxFieldsCli::try_parse_from(["txfields", "amount", "-5"]).is_err());
    }
}
