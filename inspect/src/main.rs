// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # txfields
//!
//! Entry point for the `txfields` binary. Parses CLI arguments, initializes
//! logging, and runs one of the subcommands:
//!
//! - `decode`  — summarise every transaction in a JSON file
//! - `comment` — decode a hex or JSON cell body as a text comment
//! - `amount`  — convert nanotons to TON
//! - `address` — show an address in all its forms
//! - `version` — print build version information

mod cli;
mod input;
mod logging;
mod render;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use ton_txfields::address::{Address, FriendlyFlags};
use ton_txfields::config::TON_TICKER;
use ton_txfields::decode::{decode_comment, from_nano, AmountOptions, Currency, TxSummary};
use ton_txfields::retry::RetryPolicy;

use cli::{Commands, OutputFormat, TxFieldsCli};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = TxFieldsCli::parse();
    logging::init_logging(&cli.log_level, cli.log_format);

    match cli.command {
        Commands::Decode(args) => decode(args).await,
        Commands::Comment(args) => comment(args),
        Commands::Amount(args) => amount(args),
        Commands::Address(args) => address(args),
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Loads transactions and prints one summary per transaction.
async fn decode(args: cli::DecodeArgs) -> Result<()> {
    let policy = RetryPolicy::new(args.retries, Duration::from_millis(args.retry_delay_ms));
    let txs = input::load_transactions(&args.input, policy).await?;
    tracing::info!(count = txs.len(), input = %args.input.display(), "decoding transactions");

    let summaries: Vec<TxSummary> = txs.iter().map(TxSummary::from_transaction).collect();
    match args.output {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&summaries)
                .context("failed to serialize summaries")?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            for (i, summary) in summaries.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                print!("{}", render::render_text(summary));
            }
        }
    }
    Ok(())
}

/// Decodes a hex or JSON cell body as a comment.
fn comment(args: cli::CommentArgs) -> Result<()> {
    let body = input::parse_body(&args.body)?;
    let text = decode_comment(&body)?;
    println!("{}", text);
    Ok(())
}

/// Converts a nanoton amount to the requested unit.
fn amount(args: cli::AmountArgs) -> Result<()> {
    let options = AmountOptions::parse(&args.currency, false)?;
    match options.currency {
        Currency::Ton => println!("{} {}", from_nano(args.nano), TON_TICKER),
        Currency::Nano => println!("{}", args.nano),
    }
    Ok(())
}

/// Prints the raw and user-friendly forms of an address.
fn address(args: cli::AddressArgs) -> Result<()> {
    let addr: Address = args
        .address
        .parse()
        .with_context(|| format!("cannot parse address {:?}", args.address))?;
    let flags = |bounceable| FriendlyFlags {
        bounceable,
        test_only: args.testnet,
    };
    println!("workchain       {}", addr.workchain_name());
    println!("raw             {}", addr.to_raw_string());
    println!("bounceable      {}", addr.to_friendly(flags(true)));
    println!("non-bounceable  {}", addr.to_friendly(flags(false)));
    Ok(())
}

/// Prints version information to stdout.
fn print_version() {
    println!("txfields {}", env!("CARGO_PKG_VERSION"));
    println!("rustc    {}", option_env!("RUSTC_VERSION").unwrap_or("unknown"));
}
