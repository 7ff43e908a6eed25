use crate::constants::constants::MIN_NAME_TOKEN_LEN;
use crate::core::models::expense::Expense;
use chrono::{DateTime, Utc};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

/// Matching strategy between transaction text and a counterparty name.
/// Kept behind a trait so the token heuristic can be swapped for stricter
/// matching without touching the allocation algorithm.
pub trait NameMatcher: Send + Sync {
    fn matches(&self, text: &str, counterparty: &str) -> bool;
}

/// Default strategy: split the counterparty name into whitespace tokens of at
/// least [`MIN_NAME_TOKEN_LEN`] characters (whole name as fallback) and match
/// transaction text against a case-insensitive alternation of them. Regex
/// metacharacters in names are escaped.
pub struct TokenPatternMatcher;

impl TokenPatternMatcher {
    pub fn new() -> Self {
        TokenPatternMatcher
    }

    fn build_pattern(counterparty: &str) -> Option<Regex> {
        let tokens: Vec<String> = counterparty
            .split_whitespace()
            .filter(|t| t.chars().count() >= MIN_NAME_TOKEN_LEN)
            .map(regex::escape)
            .collect();

        let source = if tokens.is_empty() {
            let whole = counterparty.trim();
            if whole.is_empty() {
                return None;
            }
            regex::escape(whole)
        } else {
            tokens.join("|")
        };

        RegexBuilder::new(&source).case_insensitive(true).build().ok()
    }
}

impl Default for TokenPatternMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl NameMatcher for TokenPatternMatcher {
    fn matches(&self, text: &str, counterparty: &str) -> bool {
        match Self::build_pattern(counterparty) {
            Some(pattern) => pattern.is_match(text),
            None => false,
        }
    }
}

/// Earliest date the person appears in any expense, as payer or split
/// participant. A repayment cannot predate the debt that created it, so this
/// bounds the matcher's candidate window.
pub fn earliest_involvement(expenses: &[Expense], person: &str) -> Option<DateTime<Utc>> {
    expenses
        .iter()
        .filter(|e| e.involves(person))
        .map(|e| e.date)
        .min()
}

/// One settlement created by an auto-settle run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AutoSettledEntry {
    pub person: String,
    pub amount: f64,
    pub settlement_id: String,
    pub txn_id: String,
}

/// Summary of an auto-settle run, reported back to the caller so automated
/// entries can be audited.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AutoSettleSummary {
    pub settlements: Vec<AutoSettledEntry>,
}

impl AutoSettleSummary {
    pub fn total_settled(&self) -> f64 {
        self.settlements.iter().map(|e| e.amount).sum()
    }
}
