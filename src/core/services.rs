use crate::constants::constants::{
    AUTO_SETTLE_RUN, BALANCE_QUERIED, CONTACT_ADDED, EXPENSE_ADDED, EXPENSE_DELETED, MAX_AMOUNT,
    MAX_NAME_LENGTH, MAX_NOTES_LENGTH, MIN_MATCH_BALANCE, SETTLEMENT_AUTO_CREATED,
    SETTLEMENT_CREATED, SETTLEMENT_DELETED, SPLIT_TOLERANCE, TRANSACTIONS_IMPORTED,
};
use crate::core::balance::{compute_net_balances, round_currency};
use crate::core::errors::{FieldError, LedgerError};
use crate::core::matcher::{earliest_involvement, AutoSettleSummary, AutoSettledEntry, NameMatcher};
use crate::core::models::{
    balance::Balance,
    contact::Contact,
    expense::{Expense, Split, SplitSpec, SplitType},
    marker::AutoSettledMarker,
    settlement::Settlement,
    transaction::{BankTransaction, TransactionKind},
};
use crate::infrastructure::logging::LoggingService;
use crate::infrastructure::storage::Storage;
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde_json::json;
use std::collections::HashSet;
use uuid::Uuid;

/// Single-owner expense ledger: contacts, shared expenses, settlements, a
/// read-only bank transaction feed, and the auto-settlement matcher that
/// reconciles the two.
pub struct LedgerService<L: LoggingService, S: Storage, M: NameMatcher> {
    storage: S,
    logging: L,
    name_matcher: M,
    self_name: String,
}

impl<L: LoggingService, S: Storage, M: NameMatcher> LedgerService<L, S, M> {
    pub fn new(storage: S, logging: L, name_matcher: M, self_name: String) -> Self {
        info!("Initializing LedgerService for owner '{}'", self_name);
        LedgerService {
            storage,
            logging,
            name_matcher,
            self_name,
        }
    }

    pub fn self_name(&self) -> &str {
        &self.self_name
    }

    fn validate_string_input(&self, field: &str, value: &str, max_length: usize) -> Result<(), LedgerError> {
        if value.trim().is_empty() {
            return Err(LedgerError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: format!("Invalid {}", field),
                    description: format!("{} cannot be empty", field),
                },
            ));
        }
        if value.len() > max_length {
            return Err(LedgerError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: format!("{} Too Long", field),
                    description: format!("{} cannot exceed {} characters", field, max_length),
                },
            ));
        }
        if value.chars().any(|c| c.is_control()) {
            return Err(LedgerError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: format!("Invalid {}", field),
                    description: format!("{} contains invalid characters", field),
                },
            ));
        }
        Ok(())
    }

    fn validate_amount_input(&self, field: &str, amount: f64) -> Result<(), LedgerError> {
        if !amount.is_finite() {
            return Err(LedgerError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: "Invalid Amount".to_string(),
                    description: "Amount must be a finite number".to_string(),
                },
            ));
        }
        if amount <= 0.0 {
            return Err(LedgerError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: "Invalid Amount".to_string(),
                    description: "Amount must be greater than 0".to_string(),
                },
            ));
        }
        if amount > MAX_AMOUNT {
            return Err(LedgerError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: "Amount Too Large".to_string(),
                    description: format!("Amount cannot exceed {}", MAX_AMOUNT),
                },
            ));
        }
        if ((amount * 100.0).round() - amount * 100.0).abs() > 1e-6 {
            return Err(LedgerError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: "Invalid Amount".to_string(),
                    description: "Amount cannot have more than 2 decimal places".to_string(),
                },
            ));
        }
        Ok(())
    }

    async fn log_action(&self, action: &str, details: serde_json::Value) -> Result<(), LedgerError> {
        self.logging.log_action(action, details).await
    }

    // CONTACTS

    pub async fn add_contact(&self, name: &str) -> Result<Contact, LedgerError> {
        self.validate_string_input("name", name, MAX_NAME_LENGTH)?;

        let existing = self.storage.get_contacts().await?;
        if existing.iter().any(|c| c.name == name) {
            return Err(LedgerError::ContactAlreadyExists(name.to_string()));
        }

        let contact = Contact {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
        };
        self.storage.save_contact(contact.clone()).await?;
        debug!("Contact created with ID: {}", contact.id);

        self.log_action(
            CONTACT_ADDED,
            json!({ "contact_id": contact.id, "name": contact.name }),
        )
        .await?;
        Ok(contact)
    }

    pub async fn get_contacts(&self) -> Result<Vec<Contact>, LedgerError> {
        self.storage.get_contacts().await
    }

    // EXPENSES

    /// Resolve a split specification into per-person amounts. Equal and
    /// percentage remainders are absorbed entirely by the first entry so the
    /// splits always sum back to the expense total.
    fn resolve_splits(&self, amount: f64, spec: &SplitSpec) -> Result<(SplitType, Vec<Split>), LedgerError> {
        match spec {
            SplitSpec::Equal(people) => {
                if people.is_empty() {
                    return Err(LedgerError::InvalidSplit);
                }
                let share = round_currency(amount / people.len() as f64);
                let first = round_currency(amount - share * (people.len() - 1) as f64);
                let splits = people
                    .iter()
                    .enumerate()
                    .map(|(i, person)| Split {
                        person: person.clone(),
                        amount: if i == 0 { first } else { share },
                    })
                    .collect();
                Ok((SplitType::Equal, splits))
            }
            SplitSpec::Exact(pairs) => {
                if pairs.is_empty() {
                    return Err(LedgerError::InvalidSplit);
                }
                let total: f64 = pairs.iter().map(|(_, a)| a).sum();
                if (total - amount).abs() > SPLIT_TOLERANCE {
                    return Err(LedgerError::InvalidSplit);
                }
                let splits = pairs
                    .iter()
                    .map(|(person, share)| Split {
                        person: person.clone(),
                        amount: round_currency(*share),
                    })
                    .collect();
                Ok((SplitType::Exact, splits))
            }
            SplitSpec::Percentage(pairs) => {
                if pairs.is_empty() {
                    return Err(LedgerError::InvalidSplit);
                }
                let total_pct: f64 = pairs.iter().map(|(_, p)| p).sum();
                if (total_pct - 100.0).abs() > SPLIT_TOLERANCE {
                    return Err(LedgerError::InvalidSplitPercentage);
                }
                let mut splits: Vec<Split> = pairs
                    .iter()
                    .map(|(person, pct)| Split {
                        person: person.clone(),
                        amount: round_currency(amount * pct / 100.0),
                    })
                    .collect();
                let rest: f64 = splits.iter().skip(1).map(|s| s.amount).sum();
                splits[0].amount = round_currency(amount - rest);
                Ok((SplitType::Percentage, splits))
            }
        }
    }

    pub async fn add_expense(
        &self,
        amount: f64,
        paid_by: &str,
        spec: SplitSpec,
        date: DateTime<Utc>,
        group_id: Option<String>,
        category: Option<String>,
    ) -> Result<Expense, LedgerError> {
        self.validate_string_input("paid_by", paid_by, MAX_NAME_LENGTH)?;
        self.validate_amount_input("amount", amount)?;

        let (split_type, splits) = self.resolve_splits(amount, &spec)?;

        let expense = Expense {
            id: Uuid::new_v4().to_string(),
            amount,
            paid_by: paid_by.to_string(),
            split_type,
            splits,
            date,
            group_id,
            category,
        };
        self.storage.save_expense(expense.clone()).await?;
        debug!("Expense created with ID: {}", expense.id);

        self.log_action(
            EXPENSE_ADDED,
            json!({
                "expense_id": expense.id,
                "amount": expense.amount,
                "paid_by": expense.paid_by,
                "participants": expense.splits.iter().map(|s| s.person.clone()).collect::<Vec<_>>()
            }),
        )
        .await?;
        Ok(expense)
    }

    /// Deletes the expense only. Auto-settlement markers that the expense may
    /// have influenced are left in place; consumed transactions stay consumed.
    pub async fn delete_expense(&self, expense_id: &str) -> Result<(), LedgerError> {
        self.storage.delete_expense(expense_id).await?;
        self.log_action(EXPENSE_DELETED, json!({ "expense_id": expense_id }))
            .await?;
        Ok(())
    }

    pub async fn get_expenses(&self) -> Result<Vec<Expense>, LedgerError> {
        self.storage.get_expenses().await
    }

    // SETTLEMENTS

    pub async fn add_settlement(
        &self,
        paid_by: &str,
        paid_to: &str,
        amount: f64,
        date: DateTime<Utc>,
        group_id: Option<String>,
        notes: Option<String>,
    ) -> Result<Settlement, LedgerError> {
        self.validate_string_input("paid_by", paid_by, MAX_NAME_LENGTH)?;
        self.validate_string_input("paid_to", paid_to, MAX_NAME_LENGTH)?;
        self.validate_amount_input("amount", amount)?;
        if paid_by == paid_to {
            return Err(LedgerError::SelfSettlement);
        }
        if let Some(ref n) = notes {
            self.validate_string_input("notes", n, MAX_NOTES_LENGTH)?;
        }

        let settlement = Settlement {
            id: Uuid::new_v4().to_string(),
            paid_by: paid_by.to_string(),
            paid_to: paid_to.to_string(),
            amount: round_currency(amount),
            date,
            group_id,
            notes,
        };
        self.storage.save_settlement(settlement.clone()).await?;
        debug!("Settlement created with ID: {}", settlement.id);

        self.log_action(
            SETTLEMENT_CREATED,
            json!({
                "settlement_id": settlement.id,
                "paid_by": settlement.paid_by,
                "paid_to": settlement.paid_to,
                "amount": settlement.amount
            }),
        )
        .await?;
        Ok(settlement)
    }

    /// Deletes the settlement only. If the settlement was auto-created, its
    /// marker survives and the source transaction is not freed for re-matching.
    pub async fn delete_settlement(&self, settlement_id: &str) -> Result<(), LedgerError> {
        self.storage.delete_settlement(settlement_id).await?;
        self.log_action(SETTLEMENT_DELETED, json!({ "settlement_id": settlement_id }))
            .await?;
        Ok(())
    }

    pub async fn get_settlements(&self) -> Result<Vec<Settlement>, LedgerError> {
        self.storage.get_settlements().await
    }

    // TRANSACTION FEED

    /// Ingestion seam for the owner's bank feed. The real import pipeline
    /// lives outside this crate; records arrive here already parsed.
    pub async fn record_transactions(&self, txns: Vec<BankTransaction>) -> Result<usize, LedgerError> {
        let count = txns.len();
        for txn in txns {
            self.storage.save_transaction(txn).await?;
        }
        self.log_action(TRANSACTIONS_IMPORTED, json!({ "count": count }))
            .await?;
        Ok(count)
    }

    // BALANCES

    pub async fn get_balances(&self) -> Result<Vec<Balance>, LedgerError> {
        let expenses = self.storage.get_expenses().await?;
        let settlements = self.storage.get_settlements().await?;
        let balances = compute_net_balances(&expenses, &settlements, &self.self_name);

        self.log_action(BALANCE_QUERIED, json!({ "count": balances.len() }))
            .await?;
        Ok(balances)
    }

    pub async fn get_balances_for_group(&self, group_id: &str) -> Result<Vec<Balance>, LedgerError> {
        let expenses: Vec<_> = self
            .storage
            .get_expenses()
            .await?
            .into_iter()
            .filter(|e| e.group_id.as_deref() == Some(group_id))
            .collect();
        let settlements: Vec<_> = self
            .storage
            .get_settlements()
            .await?
            .into_iter()
            .filter(|s| s.group_id.as_deref() == Some(group_id))
            .collect();
        let balances = compute_net_balances(&expenses, &settlements, &self.self_name);

        self.log_action(
            BALANCE_QUERIED,
            json!({ "group_id": group_id, "count": balances.len() }),
        )
        .await?;
        Ok(balances)
    }

    // AUTO-SETTLEMENT

    /// Scan the owner's transaction feed for probable repayments and record
    /// them as settlements, one marker per consumed transaction. Safe to run
    /// repeatedly: already-consumed transactions are never reconsidered, and
    /// a concurrent claim on the same transaction resolves to a skip.
    pub async fn auto_settle(&self) -> Result<AutoSettleSummary, LedgerError> {
        let expenses = self.storage.get_expenses().await?;
        let settlements = self.storage.get_settlements().await?;
        let contacts = self.storage.get_contacts().await?;
        let balances = compute_net_balances(&expenses, &settlements, &self.self_name);
        let known_names: HashSet<&str> = contacts.iter().map(|c| c.name.as_str()).collect();

        let mut summary = AutoSettleSummary::default();
        for balance in &balances {
            if balance.net_balance.abs() < MIN_MATCH_BALANCE {
                continue;
            }
            if !known_names.contains(balance.person.as_str()) {
                debug!("Skipping '{}': not a known contact", balance.person);
                continue;
            }
            // One counterparty failing must not abort the rest of the batch.
            match self.settle_counterparty(balance, &expenses).await {
                Ok(entries) => summary.settlements.extend(entries),
                Err(e) => warn!("Auto-settle failed for '{}': {}", balance.person, e),
            }
        }

        info!(
            "Auto-settle run created {} settlement(s) totalling {}",
            summary.settlements.len(),
            summary.total_settled()
        );
        self.log_action(
            AUTO_SETTLE_RUN,
            json!({
                "created": summary.settlements.len(),
                "total": summary.total_settled()
            }),
        )
        .await?;
        Ok(summary)
    }

    async fn settle_counterparty(
        &self,
        balance: &Balance,
        expenses: &[Expense],
    ) -> Result<Vec<AutoSettledEntry>, LedgerError> {
        // A repayment cannot predate the debt that created it.
        let Some(window_start) = earliest_involvement(expenses, &balance.person) else {
            return Ok(Vec::new());
        };

        let mut txns = self.storage.get_transactions_since(window_start).await?;
        txns.sort_by_key(|t| t.date);

        let mut remaining = balance.net_balance;
        let mut created = Vec::new();

        for txn in txns {
            if remaining.abs() < MIN_MATCH_BALANCE {
                break;
            }
            if !txn.amount.is_finite() || txn.amount <= 0.0 {
                continue;
            }
            // They owe the owner -> incoming funds; the owner owes -> outgoing.
            let wanted = if remaining > 0.0 {
                TransactionKind::Income
            } else {
                TransactionKind::Expense
            };
            if txn.kind != wanted {
                continue;
            }
            let text_hit = self.name_matcher.matches(&txn.description, &balance.person)
                || txn
                    .merchant
                    .as_deref()
                    .is_some_and(|m| self.name_matcher.matches(m, &balance.person));
            if !text_hit {
                continue;
            }
            if self.storage.has_marker(&txn.txn_id).await? {
                continue;
            }

            let portion = round_currency(txn.amount.min(remaining.abs()));
            let settlement_id = Uuid::new_v4().to_string();

            // Claim the marker first: a crash between the two writes leaves an
            // unconsumed transaction rather than a duplicate settlement.
            let claimed = self
                .storage
                .claim_marker(AutoSettledMarker {
                    txn_id: txn.txn_id.clone(),
                    split_person: balance.person.clone(),
                    settlement_id: settlement_id.clone(),
                    amount: portion,
                    created_at: Utc::now(),
                })
                .await?;
            if !claimed {
                debug!("Transaction {} already claimed, skipping", txn.txn_id);
                continue;
            }

            let (paid_by, paid_to) = if remaining > 0.0 {
                (balance.person.clone(), self.self_name.clone())
            } else {
                (self.self_name.clone(), balance.person.clone())
            };
            let settlement = Settlement {
                id: settlement_id.clone(),
                paid_by,
                paid_to,
                amount: portion,
                date: txn.date,
                group_id: None,
                notes: Some(format!("Auto-settled from transaction: {}", txn.description)),
            };
            self.storage.save_settlement(settlement).await?;

            remaining -= remaining.signum() * portion;
            self.log_action(
                SETTLEMENT_AUTO_CREATED,
                json!({
                    "settlement_id": settlement_id,
                    "person": balance.person,
                    "amount": portion,
                    "txn_id": txn.txn_id
                }),
            )
            .await?;
            created.push(AutoSettledEntry {
                person: balance.person.clone(),
                amount: portion,
                settlement_id,
                txn_id: txn.txn_id,
            });
        }

        Ok(created)
    }

    pub async fn get_markers(&self) -> Result<Vec<AutoSettledMarker>, LedgerError> {
        self.storage.get_markers().await
    }

    pub async fn get_app_logs(&self) -> Result<Vec<crate::core::models::audit::AppLog>, LedgerError> {
        self.logging.get_logs().await
    }
}
