
use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use crate::stores::IdentityDirectory;

// A display name that is already handle-shaped: one token of word
// characters, dots or hyphens, optionally prefixed with '@'.
static HANDLE_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^@?[A-Za-z0-9][A-Za-z0-9._-]*$").expect("handle shape pattern"));

// "from <token>" / "to <token>" fragments in free text, the token optionally
// wrapped in parentheses and/or prefixed with '@'.
static DIRECTED_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:from|to)\s+\(?@?([A-Za-z0-9][A-Za-z0-9._-]*)\)?").expect("directed token pattern"));

// Domain nouns that follow "from"/"to" in generated text without naming a user.
const STOP_WORDS: &[&str] = &["wishlist", "payout", "refund", "payment", "transfer", "withdrawal", "goal", "wallet"];

/// Everything a raw record can offer about who the other party is,
/// in descending order of trust.
#[derive(Debug, Default)]
pub struct IdentitySignals<'a> {
    /// A handle the upstream store recorded structurally (rule 1).
    pub structural_handle: Option<&'a str>,
    /// Free-text display name (rules 2 and 3).
    pub display_name: Option<&'a str>,
    /// Unstructured description text (rule 4).
    pub description: Option<&'a str>
}

/// Per-run counterparty resolution.
///
/// Holds the batch name-to-handle table, built from one directory lookup per
/// merge run. The cascade is strictly ordered: an earlier rule's match is
/// never overridden by a later rule.
pub struct IdentityResolver {
    names: HashMap<String, String>
}

impl IdentityResolver {
    /// Builds the resolver for one merge run, performing the single batch
    /// directory lookup. A directory failure degrades to an empty table:
    /// rule 2 will miss, the remaining rules still apply.
    pub async fn build<D: IdentityDirectory>(directory: &D, display_names: &[String]) -> Self {
        let names = match directory.lookup_handles(display_names).await {
            Ok(table) => table,
            Err(error) => {
                warn!("Identity directory lookup failed, continuing without the name table: {error}");
                HashMap::new()
            }
        };

        Self { names }
    }

    /// A resolver with no name table, for callers outside a merge run.
    pub fn empty() -> Self {
        Self { names: HashMap::new() }
    }

    /// Applies the resolution cascade, first match wins.
    pub fn resolve(&self, signals: &IdentitySignals<'_>) -> Option<String> {
        if let Some(handle) = signals.structural_handle.map(str::trim).filter(|h| !h.is_empty()) {
            return Some(strip_at(handle).to_string());
        }

        if let Some(name) = signals.display_name.map(str::trim).filter(|n| !n.is_empty()) {
            if let Some(handle) = self.names.get(name) {
                return Some(handle.clone());
            }

            if HANDLE_SHAPE.is_match(name) {
                return Some(strip_at(name).to_string());
            }
        }

        if let Some(description) = signals.description {
            for capture in DIRECTED_TOKEN.captures_iter(description) {
                if let Some(token) = capture.get(1) {
                    let token = token.as_str();

                    if !STOP_WORDS.contains(&token.to_lowercase().as_str()) {
                        return Some(token.to_string());
                    }
                }
            }
        }

        None
    }
}

fn strip_at(handle: &str) -> &str {
    handle.strip_prefix('@').unwrap_or(handle)
}
