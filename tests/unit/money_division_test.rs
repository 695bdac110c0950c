// Property-based tests for even currency division:
// the parts always sum to the total exactly and every part stays positive,
// with the rounding residue assigned to the last part.

use financeiro::core::money::divide_evenly;
use proptest::prelude::*;
use rust_decimal::Decimal;

#[test]
fn test_division_sum_is_exact() {
    let total = Decimal::new(100000, 2); // 1000.00
    let parts = divide_evenly(total, 3).expect("Failed to divide");

    let sum: Decimal = parts.iter().sum();
    assert_eq!(sum, total, "Parts must sum to the total exactly");
}

#[test]
fn test_residue_on_last_part_only() {
    let total = Decimal::new(100000, 2); // 1000.00
    let parts = divide_evenly(total, 3).expect("Failed to divide");

    // All parts except the last share the truncated base value
    assert_eq!(parts[0], parts[1]);
    assert_eq!(parts[0], Decimal::new(33333, 2));
    assert_eq!(parts[2], Decimal::new(33334, 2));
}

#[test]
fn test_all_parts_positive() {
    let total = Decimal::new(119, 2); // 1.19 over 120 parts would go sub-cent
    assert!(divide_evenly(total, 120).is_err());

    let total = Decimal::new(120, 2); // 1.20 over 120 parts: 0.01 each
    let parts = divide_evenly(total, 120).expect("Failed to divide");
    assert_eq!(parts.len(), 120);
    assert!(parts.iter().all(|p| *p == Decimal::new(1, 2)));
}

proptest! {
    /// For any representable total and count, a successful division sums to
    /// the total exactly and never yields a non-positive part.
    #[test]
    fn prop_division_preserves_total(
        total_cents in 1i64..=100_000_000,
        count in 1u32..=120,
    ) {
        let total = Decimal::new(total_cents, 2);

        if let Ok(parts) = divide_evenly(total, count) {
            prop_assert_eq!(parts.len(), count as usize);

            let sum: Decimal = parts.iter().sum();
            prop_assert_eq!(sum, total);

            for part in &parts {
                prop_assert!(*part > Decimal::ZERO);
            }
        } else {
            // Division only fails when a part would round to zero or below
            prop_assert!(total_cents < count as i64);
        }
    }

    /// Non-last parts are uniform; only the last one absorbs the residue.
    #[test]
    fn prop_residue_is_bounded_to_last(
        total_cents in 100i64..=10_000_000,
        count in 2u32..=60,
    ) {
        let total = Decimal::new(total_cents, 2);

        if let Ok(parts) = divide_evenly(total, count) {
            let base = parts[0];
            for part in &parts[..parts.len() - 1] {
                prop_assert_eq!(*part, base);
            }
            // The truncated base never exceeds the last part by design
            prop_assert!(*parts.last().unwrap() >= base);
        }
    }
}
