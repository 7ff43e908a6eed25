use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SplitType {
    Equal,
    Exact,
    Percentage,
}

/// One participant's share of an expense, already resolved to currency units.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Split {
    pub person: String,
    pub amount: f64,
}

/// How a caller asks for an expense to be divided. Resolved into amount
/// splits at creation time; percentages are never stored.
#[derive(Clone, Debug)]
pub enum SplitSpec {
    /// Divide evenly among the named participants. The first participant
    /// absorbs any rounding remainder.
    Equal(Vec<String>),
    /// Explicit per-person amounts; must reconcile with the expense total.
    Exact(Vec<(String, f64)>),
    /// Per-person percentages; must total 100. The first participant absorbs
    /// any rounding remainder.
    Percentage(Vec<(String, f64)>),
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub amount: f64,
    pub paid_by: String,
    pub split_type: SplitType,
    pub splits: Vec<Split>,
    pub date: DateTime<Utc>,
    pub group_id: Option<String>,
    pub category: Option<String>,
}

impl Expense {
    pub fn involves(&self, person: &str) -> bool {
        self.paid_by == person || self.splits.iter().any(|s| s.person == person)
    }
}
