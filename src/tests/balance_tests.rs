// src/tests/balance_tests.rs

use super::{jan, ledger, OWNER};
use crate::core::balance::compute_net_balances;
use crate::core::models::balance::Balance;
use crate::core::models::expense::{Expense, Split, SplitSpec, SplitType};
use crate::core::models::settlement::Settlement;

fn find<'a>(balances: &'a [Balance], person: &str) -> &'a Balance {
    balances
        .iter()
        .find(|b| b.person == person)
        .unwrap_or_else(|| panic!("no balance entry for {}", person))
}

#[tokio::test]
async fn test_equal_split_divides_evenly() {
    let ledger = ledger();
    let expense = ledger
        .add_expense(
            100.0,
            OWNER,
            SplitSpec::Equal(vec!["Alice".to_string(), "Bob".to_string()]),
            jan(1),
            None,
            None,
        )
        .await
        .unwrap();

    assert_eq!(expense.split_type, SplitType::Equal);
    assert_eq!(expense.splits[0].amount, 50.0);
    assert_eq!(expense.splits[1].amount, 50.0);
}

#[tokio::test]
async fn test_equal_split_remainder_absorbed_by_first() {
    let ledger = ledger();

    let odd = ledger
        .add_expense(
            101.0,
            OWNER,
            SplitSpec::Equal(vec!["Alice".to_string(), "Bob".to_string()]),
            jan(1),
            None,
            None,
        )
        .await
        .unwrap();
    assert_eq!(odd.splits[0].amount, 50.5);
    assert_eq!(odd.splits[1].amount, 50.5);

    let thirds = ledger
        .add_expense(
            100.0,
            OWNER,
            SplitSpec::Equal(vec![
                "Alice".to_string(),
                "Bob".to_string(),
                "Carol".to_string(),
            ]),
            jan(2),
            None,
            None,
        )
        .await
        .unwrap();
    assert_eq!(thirds.splits[0].amount, 33.34);
    assert_eq!(thirds.splits[1].amount, 33.33);
    assert_eq!(thirds.splits[2].amount, 33.33);

    let sum: f64 = thirds.splits.iter().map(|s| s.amount).sum();
    assert!((sum - thirds.amount).abs() < 0.01);
}

#[tokio::test]
async fn test_percentage_split_resolved_to_amounts() {
    let ledger = ledger();
    let expense = ledger
        .add_expense(
            90.0,
            OWNER,
            SplitSpec::Percentage(vec![
                ("Alice".to_string(), 50.0),
                ("Bob".to_string(), 25.0),
                ("Carol".to_string(), 25.0),
            ]),
            jan(1),
            None,
            None,
        )
        .await
        .unwrap();

    assert_eq!(expense.split_type, SplitType::Percentage);
    assert_eq!(expense.splits[0].amount, 45.0);
    assert_eq!(expense.splits[1].amount, 22.5);
    assert_eq!(expense.splits[2].amount, 22.5);
}

#[tokio::test]
async fn test_simple_balance_counterparty_owes_owner() {
    let ledger = ledger();
    ledger
        .add_expense(
            60.0,
            OWNER,
            SplitSpec::Equal(vec![OWNER.to_string(), "Alice".to_string()]),
            jan(1),
            None,
            None,
        )
        .await
        .unwrap();

    let balances = ledger.get_balances().await.unwrap();
    let alice = find(&balances, "Alice");
    assert_eq!(alice.net_balance, 30.0);
    assert_eq!(alice.they_owe, 30.0);
    assert_eq!(alice.you_owe, 0.0);
}

#[tokio::test]
async fn test_full_settlement_clears_balance() {
    let ledger = ledger();
    ledger
        .add_expense(
            60.0,
            OWNER,
            SplitSpec::Equal(vec![OWNER.to_string(), "Alice".to_string()]),
            jan(1),
            None,
            None,
        )
        .await
        .unwrap();
    ledger
        .add_settlement("Alice", OWNER, 30.0, jan(2), None, None)
        .await
        .unwrap();

    let balances = ledger.get_balances().await.unwrap();
    assert_eq!(find(&balances, "Alice").net_balance, 0.0);
}

#[tokio::test]
async fn test_settlement_symmetry() {
    // paid_to == self: payer's balance shifts by -amount
    let ledger = ledger();
    ledger
        .add_settlement("Alice", OWNER, 25.0, jan(1), None, None)
        .await
        .unwrap();
    let balances = ledger.get_balances().await.unwrap();
    let alice = find(&balances, "Alice");
    assert_eq!(alice.net_balance, -25.0);
    assert_eq!(alice.you_owe, 25.0);

    // paid_by == self: recipient's balance shifts by +amount
    let ledger = super::ledger();
    ledger
        .add_settlement(OWNER, "Alice", 25.0, jan(1), None, None)
        .await
        .unwrap();
    let balances = ledger.get_balances().await.unwrap();
    assert_eq!(find(&balances, "Alice").net_balance, 25.0);
}

#[tokio::test]
async fn test_other_payer_with_owner_share() {
    let ledger = ledger();
    ledger
        .add_expense(
            90.0,
            "Alice",
            SplitSpec::Equal(vec![
                "Alice".to_string(),
                OWNER.to_string(),
                "Bob".to_string(),
            ]),
            jan(1),
            None,
            None,
        )
        .await
        .unwrap();

    let balances = ledger.get_balances().await.unwrap();
    let alice = find(&balances, "Alice");
    assert_eq!(alice.net_balance, -30.0);
    assert_eq!(alice.you_owe, 30.0);
    // Bob's debt is to Alice, not the owner
    assert_eq!(find(&balances, "Bob").net_balance, 0.0);
}

#[tokio::test]
async fn test_third_party_flows_invisible() {
    let ledger = ledger();
    ledger
        .add_expense(
            80.0,
            "Alice",
            SplitSpec::Equal(vec!["Alice".to_string(), "Bob".to_string()]),
            jan(1),
            None,
            None,
        )
        .await
        .unwrap();

    let balances = ledger.get_balances().await.unwrap();
    assert!(balances.iter().all(|b| b.net_balance == 0.0));
}

#[tokio::test]
async fn test_group_filter_scopes_balances() {
    let ledger = ledger();
    ledger
        .add_expense(
            40.0,
            OWNER,
            SplitSpec::Equal(vec![OWNER.to_string(), "Alice".to_string()]),
            jan(1),
            Some("trip".to_string()),
            None,
        )
        .await
        .unwrap();
    ledger
        .add_expense(
            100.0,
            OWNER,
            SplitSpec::Equal(vec![OWNER.to_string(), "Alice".to_string()]),
            jan(2),
            None,
            None,
        )
        .await
        .unwrap();

    let trip = ledger.get_balances_for_group("trip").await.unwrap();
    assert_eq!(find(&trip, "Alice").net_balance, 20.0);

    let all = ledger.get_balances().await.unwrap();
    assert_eq!(find(&all, "Alice").net_balance, 70.0);
}

#[test]
fn test_malformed_records_skipped_defensively() {
    let expenses = vec![
        Expense {
            id: "e1".to_string(),
            amount: f64::NAN,
            paid_by: OWNER.to_string(),
            split_type: SplitType::Exact,
            splits: vec![Split {
                person: "Alice".to_string(),
                amount: 10.0,
            }],
            date: jan(1),
            group_id: None,
            category: None,
        },
        Expense {
            id: "e2".to_string(),
            amount: 20.0,
            paid_by: OWNER.to_string(),
            split_type: SplitType::Exact,
            splits: vec![Split {
                person: "Alice".to_string(),
                amount: 20.0,
            }],
            date: jan(2),
            group_id: None,
            category: None,
        },
    ];
    let settlements = vec![Settlement {
        id: "s1".to_string(),
        paid_by: "Alice".to_string(),
        paid_to: OWNER.to_string(),
        amount: -5.0,
        date: jan(3),
        group_id: None,
        notes: None,
    }];

    let balances = compute_net_balances(&expenses, &settlements, OWNER);
    assert_eq!(find(&balances, "Alice").net_balance, 20.0);
}

#[test]
fn test_rounding_applied_once_at_the_end() {
    // Three 0.1-cent-ish shares accumulate at full precision; only the final
    // signed total is rounded.
    let expenses: Vec<Expense> = (0..3)
        .map(|i| Expense {
            id: format!("e{}", i),
            amount: 0.1,
            paid_by: OWNER.to_string(),
            split_type: SplitType::Exact,
            splits: vec![Split {
                person: "Alice".to_string(),
                amount: 0.1,
            }],
            date: jan(1),
            group_id: None,
            category: None,
        })
        .collect();

    let balances = compute_net_balances(&expenses, &[], OWNER);
    assert_eq!(find(&balances, "Alice").net_balance, 0.3);
}
