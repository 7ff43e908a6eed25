use crate::core::errors::LedgerError;
use crate::core::models::{
    contact::Contact, expense::Expense, marker::AutoSettledMarker, settlement::Settlement,
    transaction::BankTransaction,
};
use crate::infrastructure::storage::Storage;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::Mutex;

pub struct InMemoryStorage {
    expenses: Mutex<HashMap<String, Expense>>,
    settlements: Mutex<HashMap<String, Settlement>>,
    contacts: Mutex<HashMap<String, Contact>>,
    transactions: Mutex<HashMap<String, BankTransaction>>, // txn_id -> record
    markers: Mutex<HashMap<String, AutoSettledMarker>>,    // txn_id -> marker
}

impl InMemoryStorage {
    pub fn new() -> Self {
        InMemoryStorage {
            expenses: Mutex::new(HashMap::new()),
            settlements: Mutex::new(HashMap::new()),
            contacts: Mutex::new(HashMap::new()),
            transactions: Mutex::new(HashMap::new()),
            markers: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn save_expense(&self, expense: Expense) -> Result<(), LedgerError> {
        self.expenses
            .lock()
            .await
            .insert(expense.id.clone(), expense);
        Ok(())
    }

    async fn get_expenses(&self) -> Result<Vec<Expense>, LedgerError> {
        Ok(self.expenses.lock().await.values().cloned().collect())
    }

    async fn delete_expense(&self, expense_id: &str) -> Result<(), LedgerError> {
        self.expenses
            .lock()
            .await
            .remove(expense_id)
            .map(|_| ())
            .ok_or_else(|| LedgerError::ExpenseNotFound(expense_id.to_string()))
    }

    async fn save_settlement(&self, settlement: Settlement) -> Result<(), LedgerError> {
        self.settlements
            .lock()
            .await
            .insert(settlement.id.clone(), settlement);
        Ok(())
    }

    async fn get_settlements(&self) -> Result<Vec<Settlement>, LedgerError> {
        Ok(self.settlements.lock().await.values().cloned().collect())
    }

    async fn delete_settlement(&self, settlement_id: &str) -> Result<(), LedgerError> {
        self.settlements
            .lock()
            .await
            .remove(settlement_id)
            .map(|_| ())
            .ok_or_else(|| LedgerError::SettlementNotFound(settlement_id.to_string()))
    }

    async fn save_contact(&self, contact: Contact) -> Result<(), LedgerError> {
        self.contacts.lock().await.insert(contact.id.clone(), contact);
        Ok(())
    }

    async fn get_contacts(&self) -> Result<Vec<Contact>, LedgerError> {
        Ok(self.contacts.lock().await.values().cloned().collect())
    }

    async fn save_transaction(&self, txn: BankTransaction) -> Result<(), LedgerError> {
        self.transactions.lock().await.insert(txn.txn_id.clone(), txn);
        Ok(())
    }

    async fn get_transactions_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<BankTransaction>, LedgerError> {
        // For production: use a database query with a date index
        Ok(self
            .transactions
            .lock()
            .await
            .values()
            .filter(|t| t.date >= since)
            .cloned()
            .collect())
    }

    async fn has_marker(&self, txn_id: &str) -> Result<bool, LedgerError> {
        Ok(self.markers.lock().await.contains_key(txn_id))
    }

    async fn claim_marker(&self, marker: AutoSettledMarker) -> Result<bool, LedgerError> {
        // Holding the lock across check-and-insert gives the uniqueness
        // guarantee a database would provide with a unique constraint.
        let mut markers = self.markers.lock().await;
        if markers.contains_key(&marker.txn_id) {
            return Ok(false);
        }
        markers.insert(marker.txn_id.clone(), marker);
        Ok(true)
    }

    async fn get_markers(&self) -> Result<Vec<AutoSettledMarker>, LedgerError> {
        Ok(self.markers.lock().await.values().cloned().collect())
    }
}
