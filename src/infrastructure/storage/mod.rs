use crate::core::errors::LedgerError;
use crate::core::models::{
    contact::Contact, expense::Expense, marker::AutoSettledMarker, settlement::Settlement,
    transaction::BankTransaction,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait Storage: Send + Sync {
    async fn save_expense(&self, expense: Expense) -> Result<(), LedgerError>;
    async fn get_expenses(&self) -> Result<Vec<Expense>, LedgerError>;
    async fn delete_expense(&self, expense_id: &str) -> Result<(), LedgerError>;
    async fn save_settlement(&self, settlement: Settlement) -> Result<(), LedgerError>;
    async fn get_settlements(&self) -> Result<Vec<Settlement>, LedgerError>;
    async fn delete_settlement(&self, settlement_id: &str) -> Result<(), LedgerError>;
    async fn save_contact(&self, contact: Contact) -> Result<(), LedgerError>;
    async fn get_contacts(&self) -> Result<Vec<Contact>, LedgerError>;
    async fn save_transaction(&self, txn: BankTransaction) -> Result<(), LedgerError>;
    async fn get_transactions_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<BankTransaction>, LedgerError>;
    async fn has_marker(&self, txn_id: &str) -> Result<bool, LedgerError>;
    /// Atomic claim of a transaction id. Returns false when a marker already
    /// exists; the caller must treat that as "skip", not an error.
    async fn claim_marker(&self, marker: AutoSettledMarker) -> Result<bool, LedgerError>;
    async fn get_markers(&self) -> Result<Vec<AutoSettledMarker>, LedgerError>;
}

pub mod in_memory;
