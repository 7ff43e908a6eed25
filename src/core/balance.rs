use crate::core::models::balance::Balance;
use crate::core::models::expense::Expense;
use crate::core::models::settlement::Settlement;
use std::collections::HashMap;

/// Round to two decimal places. Applied only at presentation and record
/// creation boundaries; intermediate sums accumulate at full precision.
pub fn round_currency(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Compute one signed net balance per counterparty relative to `self_name`.
///
/// Positive means the counterparty owes the owner. Only debts that touch the
/// owner are tracked; third-party-to-third-party flows within a shared
/// expense do not affect the output. Malformed records (non-positive or
/// non-finite amounts) are skipped rather than erroring the whole pass, since
/// amount validation belongs to the CRUD boundary.
pub fn compute_net_balances(
    expenses: &[Expense],
    settlements: &[Settlement],
    self_name: &str,
) -> Vec<Balance> {
    let mut signed: HashMap<String, f64> = HashMap::new();

    for expense in expenses {
        if !expense.amount.is_finite() || expense.amount <= 0.0 {
            continue;
        }
        if expense.paid_by != self_name {
            signed.entry(expense.paid_by.clone()).or_insert(0.0);
        }
        for split in &expense.splits {
            if split.person != self_name {
                signed.entry(split.person.clone()).or_insert(0.0);
            }
        }

        if expense.paid_by == self_name {
            // Every other participant owes the owner their share.
            for split in &expense.splits {
                if split.person == self_name || !split.amount.is_finite() {
                    continue;
                }
                *signed.entry(split.person.clone()).or_insert(0.0) += split.amount;
            }
        } else if let Some(own_share) = expense.splits.iter().find(|s| s.person == self_name) {
            // Someone else fronted the money and the owner took a share.
            if own_share.amount.is_finite() {
                *signed.entry(expense.paid_by.clone()).or_insert(0.0) -= own_share.amount;
            }
        }
    }

    for settlement in settlements {
        if !settlement.amount.is_finite() || settlement.amount <= 0.0 {
            continue;
        }
        if settlement.paid_by == self_name && settlement.paid_to != self_name {
            *signed.entry(settlement.paid_to.clone()).or_insert(0.0) += settlement.amount;
        } else if settlement.paid_to == self_name && settlement.paid_by != self_name {
            *signed.entry(settlement.paid_by.clone()).or_insert(0.0) -= settlement.amount;
        }
    }

    signed
        .into_iter()
        .map(|(person, total)| {
            let net = round_currency(total);
            Balance {
                person,
                they_owe: if net > 0.0 { net } else { 0.0 },
                you_owe: if net < 0.0 { -net } else { 0.0 },
                net_balance: net,
            }
        })
        .collect()
}
