// src/tests/mod.rs

mod balance_tests;

use crate::{InMemoryLogging, InMemoryStorage, LedgerService, TokenPatternMatcher};
use chrono::{DateTime, TimeZone, Utc};

pub(crate) const OWNER: &str = "Me";

pub(crate) fn ledger() -> LedgerService<InMemoryLogging, InMemoryStorage, TokenPatternMatcher> {
    ledger_with_storage(InMemoryStorage::new())
}

pub(crate) fn ledger_with_storage(
    storage: InMemoryStorage,
) -> LedgerService<InMemoryLogging, InMemoryStorage, TokenPatternMatcher> {
    LedgerService::new(
        storage,
        InMemoryLogging::new(),
        TokenPatternMatcher::new(),
        OWNER.to_string(),
    )
}

pub(crate) fn jan(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, day, 12, 0, 0).unwrap()
}
