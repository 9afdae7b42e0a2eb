pub mod units;

use std::ops::Range;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;

use crate::ledger;
use crate::logging::{self, SharedSink};
use crate::model::recipient::parse_address;
use crate::model::Recipient;

pub use units::{format_signed_units, format_units, format_units_wide, scale_units, UnitsError};

const COMPONENT: &str = "parser";

/// Address, one or more separators from `, \s = : ;`, then an unsigned
/// decimal amount. Not anchored to lines: a pair may straddle a newline.
static RECIPIENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(0x[0-9a-fA-F]{40})[,\s=:;]+([0-9]+(?:\.[0-9]+)?)")
        .expect("recipient pattern compiles")
});

/// One address/amount pair as it appears in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry<'t> {
    pub address: &'t str,
    pub amount: &'t str,
    /// Byte range of the whole match in the input.
    pub span: Range<usize>,
}

/// Finds address/amount pairs in free-form text.
///
/// Holds no scan position: every call to [`RecipientScanner::entries`]
/// starts a fresh pass over the whole input.
#[derive(Debug, Clone, Copy)]
pub struct RecipientScanner<'t> {
    text: &'t str,
}

impl<'t> RecipientScanner<'t> {
    pub fn new(text: &'t str) -> Self {
        RecipientScanner { text }
    }

    pub fn entries(self) -> impl Iterator<Item = RawEntry<'t>> {
        RECIPIENT_PATTERN.captures_iter(self.text).filter_map(|caps| {
            let whole = caps.get(0)?;
            Some(RawEntry {
                address: caps.get(1)?.as_str(),
                amount: caps.get(2)?.as_str(),
                span: whole.range(),
            })
        })
    }
}

/// Turns pasted text into an ordered recipient list.
pub struct RecipientParser {
    sink: SharedSink,
}

impl RecipientParser {
    pub fn new(sink: SharedSink) -> Self {
        RecipientParser { sink }
    }

    /// Parse every well-formed pair, in input order.
    ///
    /// A pair whose address fails validation, or whose amount cannot be
    /// scaled to `decimals`, is dropped on its own; the rest of the text is
    /// still parsed. No matches yields an empty list.
    pub fn parse(&self, text: &str, decimals: u8) -> Vec<Recipient> {
        self.sink.debug(COMPONENT, "parsing amounts from text");

        let mut recipients = Vec::new();
        for entry in RecipientScanner::new(text).entries() {
            let normalized = entry.address.to_ascii_lowercase();
            let Some(address) = parse_address(&normalized) else {
                self.sink
                    .debug(COMPONENT, &format!("dropping invalid address {normalized}"));
                continue;
            };
            match scale_units(entry.amount, decimals) {
                Ok(value) => recipients.push(Recipient::new(address, value)),
                Err(e) => {
                    self.sink.debug(
                        COMPONENT,
                        &format!("error parsing amount for address {normalized}: {e}"),
                    );
                }
            }
        }

        self.sink
            .debug(COMPONENT, &format!("found {} recipients", recipients.len()));
        recipients
    }
}

/// Parse with no debug output.
pub fn parse_recipients(text: &str, decimals: u8) -> Vec<Recipient> {
    RecipientParser::new(logging::noop_sink()).parse(text, decimals)
}

/// CLI entry point for the `parse` subcommand.
pub fn run(path: &Path, decimals: u8) -> Result<()> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading recipients from {}", path.display()))?;
    let recipients = RecipientParser::new(logging::tracing_sink()).parse(&text, decimals);

    if recipients.is_empty() {
        println!("No recipients found in {}.", path.display());
        return Ok(());
    }

    for (i, r) in recipients.iter().enumerate() {
        println!("  {:>4}. {}  {}", i + 1, r.address_hex(), format_units(r.value, decimals));
    }
    let total = ledger::total_amount(&recipients);
    println!(
        "{} recipients, total {} ({} base units)",
        recipients.len(),
        format_units_wide(total, decimals),
        total
    );
    Ok(())
}
