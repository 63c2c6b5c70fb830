//! Loading transactions from JSON.
//!
//! Accepts either a JSON array of transactions or a single transaction
//! object. File reads go through the retry executor so that inputs on
//! flaky network mounts get a few chances before the command fails.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;
use tokio::io::AsyncReadExt;

use ton_txfields::cell::Cell;
use ton_txfields::retry::RetryPolicy;
use ton_txfields::transaction::Transaction;

/// Parses one transaction or an array of them.
pub fn parse_transactions(json: &str) -> Result<Vec<Transaction>> {
    let value: Value = serde_json::from_str(json).context("input is not valid JSON")?;
    match value {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                serde_json::from_value(item)
                    .with_context(|| format!("transaction #{} is malformed", i))
            })
            .collect(),
        other => {
            let tx = serde_json::from_value(other).context("transaction is malformed")?;
            Ok(vec![tx])
        }
    }
}

/// Parses a message body given on the command line.
///
/// A value starting with `{` is read as a JSON cell
/// (`{"data": "<hex>", "bits": n, "refs": [...]}`), which is how bodies
/// spanning several cells are passed. Anything else is plain hex for a
/// single byte-aligned cell of at most 127 bytes.
pub fn parse_body(input: &str) -> Result<Cell> {
    let input = input.trim();
    if input.starts_with('{') {
        return serde_json::from_str(input).context("body is not a valid JSON cell");
    }
    let bytes = hex::decode(input).context("body is not valid hex")?;
    Cell::from_bytes(&bytes).context("body does not fit in one cell, pass it as a JSON cell")
}

/// Reads and parses `path`, or stdin when `path` is `-`.
///
/// Stdin is read once; it cannot be rewound for a retry.
pub async fn load_transactions(path: &Path, policy: RetryPolicy) -> Result<Vec<Transaction>> {
    let raw = if path == Path::new("-") {
        let mut buf = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buf)
            .await
            .context("failed to read stdin")?;
        buf
    } else {
        policy
            .run(|| tokio::fs::read_to_string(path))
            .await
            .with_context(|| format!("failed to read {}", path.display()))?
    };
    tracing::debug!(bytes = raw.len(), "input loaded");
    parse_transactions(&raw)
}
