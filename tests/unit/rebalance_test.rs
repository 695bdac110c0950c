// Rebalancing engine: editing one installment's amount redistributes the
// delta across unpaid siblings so the plan total is preserved.

use chrono::NaiveDate;
use financeiro::plans::{Installment, Rebalancer};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn plan_installments(amounts_cents: &[i64]) -> Vec<Installment> {
    amounts_cents
        .iter()
        .enumerate()
        .map(|(i, &cents)| {
            Installment::new(
                "plan-1".to_string(),
                (i + 1) as i32,
                Decimal::new(cents, 2),
                date(2025, 6, 10),
            )
            .unwrap()
        })
        .collect()
}

fn total(installments: &[Installment]) -> Decimal {
    installments.iter().map(|i| i.amount).sum()
}

#[test]
fn test_thousand_over_three_edit_first_to_four_hundred() {
    // 333.33 / 333.33 / 333.34, edit installment 1 to 400.00:
    // installments 2 and 3 must end up summing to 600.00
    let mut installments = plan_installments(&[33333, 33333, 33334]);
    let plan_total = Decimal::new(100000, 2);

    let outcome = Rebalancer::redistribute(
        &mut installments,
        1,
        Decimal::new(40000, 2),
        plan_total,
    )
    .expect("Rebalancing failed");

    assert!(!outcome.total_mismatch);
    assert_eq!(installments[0].amount, Decimal::new(40000, 2));

    let siblings: Decimal = installments[1].amount + installments[2].amount;
    assert_eq!(siblings, Decimal::new(60000, 2));
    assert_eq!(total(&installments), plan_total);
}

#[test]
fn test_residual_cent_goes_to_last_adjustable() {
    // 1000.00 over four, edit installment 2 to 300.00: remaining 700.00
    // over 1, 3 and 4 becomes 233.33 / 233.33 / 233.34
    let mut installments = plan_installments(&[25000, 25000, 25000, 25000]);

    Rebalancer::redistribute(
        &mut installments,
        2,
        Decimal::new(30000, 2),
        Decimal::new(100000, 2),
    )
    .expect("Rebalancing failed");

    assert_eq!(installments[0].amount, Decimal::new(23333, 2));
    assert_eq!(installments[1].amount, Decimal::new(30000, 2));
    assert_eq!(installments[2].amount, Decimal::new(23333, 2));
    assert_eq!(installments[3].amount, Decimal::new(23334, 2));
}

#[test]
fn test_paid_installments_never_move() {
    let mut installments = plan_installments(&[25000, 25000, 25000, 25000]);
    installments[0].mark_paid(date(2025, 6, 1));

    Rebalancer::redistribute(
        &mut installments,
        3,
        Decimal::new(40000, 2),
        Decimal::new(100000, 2),
    )
    .expect("Rebalancing failed");

    // Paid first installment untouched; 1000 - 250 - 400 = 350 over 2 and 4
    assert_eq!(installments[0].amount, Decimal::new(25000, 2));
    assert_eq!(installments[1].amount, Decimal::new(17500, 2));
    assert_eq!(installments[2].amount, Decimal::new(40000, 2));
    assert_eq!(installments[3].amount, Decimal::new(17500, 2));
    assert_eq!(total(&installments), Decimal::new(100000, 2));
}

#[test]
fn test_editing_paid_installment_fails_and_changes_nothing() {
    let mut installments = plan_installments(&[50000, 50000]);
    installments[0].mark_paid(date(2025, 6, 1));
    let before: Vec<Decimal> = installments.iter().map(|i| i.amount).collect();

    let result = Rebalancer::redistribute(
        &mut installments,
        1,
        Decimal::new(60000, 2),
        Decimal::new(100000, 2),
    );

    assert!(result.is_err());
    let after: Vec<Decimal> = installments.iter().map(|i| i.amount).collect();
    assert_eq!(before, after, "A locked edit must leave all amounts unchanged");
}

#[test]
fn test_last_unpaid_edit_breaks_total_and_is_flagged() {
    let mut installments = plan_installments(&[50000, 50000]);
    installments[1].mark_paid(date(2025, 6, 1));

    let outcome = Rebalancer::redistribute(
        &mut installments,
        1,
        Decimal::new(60000, 2),
        Decimal::new(100000, 2),
    )
    .expect("Edit without siblings should be accepted");

    assert!(outcome.total_mismatch);
    assert_eq!(total(&installments), Decimal::new(110000, 2));
}

proptest! {
    /// Any accepted rebalance preserves the plan total exactly and keeps
    /// every amount positive.
    #[test]
    fn prop_rebalance_preserves_plan_total(
        count in 2u32..=12,
        edited in 1u32..=12,
        new_amount_cents in 100i64..=40_000,
    ) {
        prop_assume!(edited <= count);

        // Plan of `count` installments at 500.00 each
        let amounts: Vec<i64> = vec![50000; count as usize];
        let mut installments = plan_installments(&amounts);
        let plan_total = Decimal::new(50000 * count as i64, 2);

        let result = Rebalancer::redistribute(
            &mut installments,
            edited as i32,
            Decimal::new(new_amount_cents, 2),
            plan_total,
        );

        if let Ok(outcome) = result {
            prop_assert!(!outcome.total_mismatch);
            prop_assert_eq!(total(&installments), plan_total);
            for inst in &installments {
                prop_assert!(inst.amount > Decimal::ZERO);
            }
        }
    }
}
