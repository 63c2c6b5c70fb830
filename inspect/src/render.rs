//! Human-readable rendering of decoded transactions.

use std::fmt::Write as _;

use ton_txfields::config::TON_TICKER;
use ton_txfields::decode::{FieldOutcome, TxSummary};

/// Renders one summary as an indented block:
///
/// ```text
/// tx 47000000000001 1111…1111
///   direction  internal
///   sender     0:a1a1…
///   amount     0.05 TON
///   comment    "Hello"
/// ```
pub fn render_text(summary: &TxSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "tx {} {}", summary.lt, short_hash(&summary.hash));

    let direction = summary
        .direction
        .map(|d| d.to_string())
        .unwrap_or_else(|| "none".to_string());
    let _ = writeln!(out, "  direction  {}", direction);
    let _ = writeln!(out, "  sender     {}", outcome(&summary.sender, |v| v.to_string()));
    let _ = writeln!(
        out,
        "  amount     {}",
        outcome(&summary.amount, |v| format!("{} {}", v, TON_TICKER))
    );
    let _ = writeln!(out, "  comment    {}", outcome(&summary.comment, |v| format!("{:?}", v)));
    if let Some(hash) = &summary.body_hash {
        let _ = writeln!(out, "  body hash  {}", hash);
    }
    out
}

fn outcome(field: &FieldOutcome, show: impl Fn(&str) -> String) -> String {
    match field {
        FieldOutcome::Ok(v) => show(v),
        FieldOutcome::Absent => "-".to_string(),
        FieldOutcome::Error(e) => format!("<error: {}>", e),
    }
}

fn short_hash(hash: &str) -> String {
    match (hash.get(..8), hash.get(hash.len().saturating_sub(8)..)) {
        (Some(head), Some(tail)) if hash.len() > 16 => format!("{}…{}", head, tail),
        _ => hash.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ton_txfields::address::Address;
    use ton_txfields::decode::build_comment_body;
    use ton_txfields::transaction::{Message, Transaction, TransactionBuilder};

    #[test]
    fn renders_every_field() {
        let tx = TransactionBuilder::new()
            .lt(7)
            .hash([0xAB; 32])
            .in_message(Message::internal(
                Address::new(0, [1; 32]),
                Address::new(0, [2; 32]),
                50_000_000,
                build_comment_body("Hello").unwrap(),
            ))
            .build();
        let text = render_text(&TxSummary::from_transaction(&tx));
        assert!(text.starts_with("tx 7 abababab…abababab\n"));
        assert!(text.contains("  direction  internal\n"));
        assert!(text.contains(&format!("  sender     0:{}\n", "01".repeat(32))));
        assert!(text.contains("  amount     0.05 TON\n"));
        assert!(text.contains("  comment    \"Hello\"\n"));
        assert!(text.contains("  body hash  "));
    }

    #[test]
    fn renders_absent_fields_as_dashes() {
        let text = render_text(&TxSummary::from_transaction(&Transaction::default()));
        assert!(text.contains("  direction  none\n"));
        assert!(text.contains("  sender     -\n"));
        assert!(text.contains("  amount     -\n"));
        assert!(text.contains("  comment    -\n"));
        assert!(!text.contains("body hash"));
    }

    #[test]
    fn short_hashes_are_left_alone() {
        assert_eq!(short_hash("abcd"), "abcd");
    }
}
