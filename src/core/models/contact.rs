use serde::{Deserialize, Serialize};

/// A known counterparty. The matcher only processes people present in the
/// contact list, to avoid false positives against unrelated names in
/// transaction text.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    pub name: String,
}
