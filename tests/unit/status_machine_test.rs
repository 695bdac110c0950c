// Installment status lifecycle: deterministic derivation from dates, the
// explicit pay/reverse actions, and sweep idempotence. The reference date is
// always injected so every case is reproducible.

use chrono::NaiveDate;
use financeiro::plans::{Installment, InstallmentStatus};
use rust_decimal::Decimal;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn installment(due: NaiveDate) -> Installment {
    Installment::new("plan-1".to_string(), 1, Decimal::new(10000, 2), due).unwrap()
}

#[test]
fn test_payment_date_always_wins() {
    let status = InstallmentStatus::derive(
        Some(date(2025, 1, 5)),
        date(2024, 12, 1), // long past due
        date(2025, 6, 1),
    );
    assert_eq!(status, InstallmentStatus::Paid);
}

#[test]
fn test_due_before_today_is_overdue() {
    let status = InstallmentStatus::derive(None, date(2025, 5, 31), date(2025, 6, 1));
    assert_eq!(status, InstallmentStatus::Overdue);
}

#[test]
fn test_due_today_or_later_is_open() {
    let today = date(2025, 6, 1);
    assert_eq!(
        InstallmentStatus::derive(None, today, today),
        InstallmentStatus::Open
    );
    assert_eq!(
        InstallmentStatus::derive(None, date(2025, 6, 2), today),
        InstallmentStatus::Open
    );
}

#[test]
fn test_mark_paid_records_the_given_date() {
    let mut inst = installment(date(2025, 6, 1));

    assert!(inst.mark_paid(date(2025, 5, 28)));
    assert_eq!(inst.status, InstallmentStatus::Paid);
    assert_eq!(inst.payment_date, Some(date(2025, 5, 28)));
}

#[test]
fn test_double_pay_is_a_noop() {
    let mut inst = installment(date(2025, 6, 1));
    inst.mark_paid(date(2025, 5, 28));

    assert!(!inst.mark_paid(date(2025, 6, 2)));
    assert_eq!(inst.payment_date, Some(date(2025, 5, 28)));
}

#[test]
fn test_reversal_recomputes_overdue() {
    let mut inst = installment(date(2025, 6, 1));
    inst.mark_paid(date(2025, 5, 28));

    assert!(inst.reverse_payment(date(2025, 6, 15)));
    assert_eq!(inst.status, InstallmentStatus::Overdue);
    assert_eq!(inst.payment_date, None);
}

#[test]
fn test_reversal_recomputes_open() {
    let mut inst = installment(date(2025, 6, 1));
    inst.mark_paid(date(2025, 5, 20));

    assert!(inst.reverse_payment(date(2025, 5, 25)));
    assert_eq!(inst.status, InstallmentStatus::Open);
}

#[test]
fn test_reversal_of_unpaid_is_a_noop() {
    let mut inst = installment(date(2025, 6, 1));

    assert!(!inst.reverse_payment(date(2025, 5, 25)));
    assert_eq!(inst.status, InstallmentStatus::Open);
}

#[test]
fn test_refresh_status_is_idempotent() {
    // Mirrors the overdue sweep: running it twice equals running it once
    let mut installments = vec![
        installment(date(2025, 5, 1)),
        installment(date(2025, 7, 1)),
    ];
    let today = date(2025, 6, 1);

    for inst in installments.iter_mut() {
        inst.refresh_status(today);
    }
    let after_first: Vec<InstallmentStatus> =
        installments.iter().map(|i| i.status).collect();

    for inst in installments.iter_mut() {
        assert!(!inst.refresh_status(today), "Second sweep must change nothing");
    }
    let after_second: Vec<InstallmentStatus> =
        installments.iter().map(|i| i.status).collect();

    assert_eq!(after_first, after_second);
    assert_eq!(after_first[0], InstallmentStatus::Overdue);
    assert_eq!(after_first[1], InstallmentStatus::Open);
}

#[test]
fn test_refresh_never_downgrades_paid() {
    let mut inst = installment(date(2025, 5, 1));
    inst.mark_paid(date(2025, 4, 20));

    assert!(!inst.refresh_status(date(2025, 6, 1)));
    assert_eq!(inst.status, InstallmentStatus::Paid);
}

#[test]
fn test_paid_installment_cannot_be_rescheduled() {
    let mut inst = installment(date(2025, 6, 1));
    inst.mark_paid(date(2025, 5, 20));

    assert!(inst.reschedule(date(2025, 8, 1), date(2025, 5, 21)).is_err());
    assert_eq!(inst.due_date, date(2025, 6, 1));
}
