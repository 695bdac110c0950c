// Installment plan generation: exact totals, contiguous sequences, and
// calendar-month due-date stepping with month-end clamping.

use chrono::NaiveDate;
use financeiro::plans::{PlanGenerator, MAX_INSTALLMENT_COUNT};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_amounts_sum_to_total_to_the_cent() {
    let total = Decimal::new(100000, 2); // 1000.00
    let installments = PlanGenerator::build("plan-1", total, 3, date(2025, 6, 10), MAX_INSTALLMENT_COUNT)
        .expect("Failed to generate plan");

    let sum: Decimal = installments.iter().map(|i| i.amount).sum();
    assert_eq!(sum, total);
}

#[test]
fn test_sequences_have_no_gaps_or_duplicates() {
    let installments =
        PlanGenerator::build("plan-1", Decimal::new(120000, 2), 12, date(2025, 6, 10), MAX_INSTALLMENT_COUNT)
            .expect("Failed to generate plan");

    let sequences: Vec<i32> = installments.iter().map(|i| i.sequence).collect();
    assert_eq!(sequences, (1..=12).collect::<Vec<i32>>());
}

#[test]
fn test_monthly_due_dates_preserve_day() {
    let installments =
        PlanGenerator::build("plan-1", Decimal::new(30000, 2), 3, date(2025, 11, 15), MAX_INSTALLMENT_COUNT)
            .expect("Failed to generate plan");

    assert_eq!(installments[0].due_date, date(2025, 11, 15));
    assert_eq!(installments[1].due_date, date(2025, 12, 15));
    assert_eq!(installments[2].due_date, date(2026, 1, 15));
}

#[test]
fn test_due_dates_clamp_to_month_end() {
    let installments =
        PlanGenerator::build("plan-1", Decimal::new(40000, 2), 4, date(2025, 1, 31), MAX_INSTALLMENT_COUNT)
            .expect("Failed to generate plan");

    assert_eq!(installments[0].due_date, date(2025, 1, 31));
    assert_eq!(installments[1].due_date, date(2025, 2, 28));
    assert_eq!(installments[2].due_date, date(2025, 3, 31));
    assert_eq!(installments[3].due_date, date(2025, 4, 30));
}

#[test]
fn test_leap_year_february_clamp() {
    let installments =
        PlanGenerator::build("plan-1", Decimal::new(20000, 2), 2, date(2024, 1, 30), MAX_INSTALLMENT_COUNT)
            .expect("Failed to generate plan");

    assert_eq!(installments[1].due_date, date(2024, 2, 29));
}

#[test]
fn test_all_installments_start_open() {
    use financeiro::plans::InstallmentStatus;

    let installments =
        PlanGenerator::build("plan-1", Decimal::new(50000, 2), 5, date(2025, 6, 10), MAX_INSTALLMENT_COUNT)
            .expect("Failed to generate plan");

    assert!(installments
        .iter()
        .all(|i| i.status == InstallmentStatus::Open && i.payment_date.is_none()));
}

proptest! {
    /// For every valid (total, count) pair the generated amounts sum to the
    /// total exactly and sequences run 1..=count.
    #[test]
    fn prop_generated_plans_are_exact(
        total_cents in 1i64..=50_000_000,
        count in 1u32..=120,
    ) {
        let total = Decimal::new(total_cents, 2);

        if let Ok(installments) = PlanGenerator::build("plan-1", total, count, date(2025, 6, 10), MAX_INSTALLMENT_COUNT) {
            let sum: Decimal = installments.iter().map(|i| i.amount).sum();
            prop_assert_eq!(sum, total);

            let sequences: Vec<i32> = installments.iter().map(|i| i.sequence).collect();
            prop_assert_eq!(sequences, (1..=count as i32).collect::<Vec<i32>>());
        } else {
            // Generation only fails when some installment would round to zero
            prop_assert!(total_cents < count as i64);
        }
    }
}
