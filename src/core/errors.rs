use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: String,
    pub title: String,
    pub description: String,
}

#[derive(Error, Debug, Serialize)]
pub enum LedgerError {
    #[error("Invalid input for field `{0}`: {1:?}")]
    InvalidInput(String, FieldError),
    #[error("Invalid split amounts")]
    InvalidSplit,
    #[error("Split percentages must total 100")]
    InvalidSplitPercentage,
    #[error("Cannot create settlement to self")]
    SelfSettlement,
    #[error("Expense {0} not found")]
    ExpenseNotFound(String),
    #[error("Settlement {0} not found")]
    SettlementNotFound(String),
    #[error("Contact {0} already exists")]
    ContactAlreadyExists(String),
    #[error("Storage error: {0}")]
    StorageError(String),
    #[error("Logging error: {0}")]
    LoggingError(String),
}
