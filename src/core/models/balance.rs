use serde::{Deserialize, Serialize};

/// Net position of one counterparty relative to the ledger owner. Derived on
/// demand from the full expense/settlement set, never persisted.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Balance {
    pub person: String,
    /// Positive part of the signed total: what they owe the owner.
    pub they_owe: f64,
    /// Negative part, reported as a positive magnitude: what the owner owes.
    pub you_owe: f64,
    /// `they_owe - you_owe`, rounded to two decimal places.
    pub net_balance: f64,
}
