use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Direction of a bank transaction from the ledger owner's point of view.
/// This is the sole direction signal; feed amounts are always positive.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

/// A record from the owner's bank transaction feed. Read-only from the
/// ledger's perspective.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BankTransaction {
    pub txn_id: String,
    pub description: String,
    pub merchant: Option<String>,
    pub amount: f64,
    pub kind: TransactionKind,
    pub date: DateTime<Utc>,
}
