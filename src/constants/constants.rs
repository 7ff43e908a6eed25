/// Tolerance for reconciling split amounts against an expense total.
pub const SPLIT_TOLERANCE: f64 = 0.01;

/// Balances below one currency unit are rounding dust and not worth matching.
pub const MIN_MATCH_BALANCE: f64 = 1.0;

/// Name tokens shorter than this are too generic to match transaction text.
pub const MIN_NAME_TOKEN_LEN: usize = 3;

pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_NOTES_LENGTH: usize = 255;
pub const MAX_AMOUNT: f64 = 1_000_000.0;

// Audit actions
pub const CONTACT_ADDED: &str = "CONTACT_ADDED";
pub const EXPENSE_ADDED: &str = "EXPENSE_ADDED";
pub const EXPENSE_DELETED: &str = "EXPENSE_DELETED";
pub const SETTLEMENT_CREATED: &str = "SETTLEMENT_CREATED";
pub const SETTLEMENT_DELETED: &str = "SETTLEMENT_DELETED";
pub const SETTLEMENT_AUTO_CREATED: &str = "SETTLEMENT_AUTO_CREATED";
pub const TRANSACTIONS_IMPORTED: &str = "TRANSACTIONS_IMPORTED";
pub const BALANCE_QUERIED: &str = "BALANCE_QUERIED";
pub const AUTO_SETTLE_RUN: &str = "AUTO_SETTLE_RUN";
