//! Order pricing.
//!
//! Pure arithmetic over (unit price, quantity) pairs. Amounts keep full
//! decimal precision here; rounding to the cent happens only when a value
//! is serialized.

use luxecuffs_core::Money;
use rust_decimal::Decimal;

/// Flat shipping charge applied to every order.
#[must_use]
pub fn flat_shipping() -> Money {
    Money::from_cents(1500)
}

/// Flat 8% tax rate.
#[must_use]
pub fn tax_rate() -> Decimal {
    Decimal::new(8, 2)
}

/// Monetary breakdown of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTotals {
    pub subtotal: Money,
    pub shipping: Money,
    pub tax: Money,
    pub total: Money,
}

/// Price an order from its (unit price, quantity) pairs.
///
/// Quantities must already be validated as positive; this function has no
/// error conditions.
#[must_use]
pub fn price_order(lines: &[(Money, u32)]) -> OrderTotals {
    let subtotal: Money = lines.iter().map(|&(price, quantity)| price * quantity).sum();
    let shipping = flat_shipping();
    let tax = subtotal * tax_rate();
    let total = subtotal + shipping + tax;

    OrderTotals {
        subtotal,
        shipping,
        tax,
        total,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_order() {
        // [(100.00 x 2), (50.00 x 1)] => 250.00 / 15.00 / 20.00 / 285.00
        let totals = price_order(&[
            (Money::from_cents(10000), 2),
            (Money::from_cents(5000), 1),
        ]);

        assert_eq!(totals.subtotal.to_string(), "250.00");
        assert_eq!(totals.shipping.to_string(), "15.00");
        assert_eq!(totals.tax.to_string(), "20.00");
        assert_eq!(totals.total.to_string(), "285.00");
    }

    #[test]
    fn test_empty_order() {
        let totals = price_order(&[]);
        assert_eq!(totals.subtotal, Money::ZERO);
        assert_eq!(totals.shipping, Money::from_cents(1500));
        assert_eq!(totals.total.to_string(), "15.00");
    }

    #[test]
    fn test_shipping_is_always_flat() {
        for cents in [1, 99, 29900, 89900, 1_000_000] {
            let totals = price_order(&[(Money::from_cents(cents), 1)]);
            assert_eq!(totals.shipping.to_string(), "15.00");
        }
    }

    #[test]
    fn test_total_identity_holds_to_the_cent() {
        // total == subtotal + shipping + tax after rounding each to cents
        for cents in 1..=2500_i64 {
            for quantity in 1..=4_u32 {
                let totals = price_order(&[(Money::from_cents(cents), quantity)]);
                let lhs = totals.total.as_cents().unwrap();
                let rhs = totals.subtotal.as_cents().unwrap()
                    + totals.shipping.as_cents().unwrap()
                    + totals.tax.as_cents().unwrap();
                assert_eq!(lhs, rhs, "identity broke at price {cents} qty {quantity}");
            }
        }
    }

    #[test]
    fn test_no_mid_computation_rounding() {
        // 33.33 * 3 = 99.99, tax 7.9992 -> "8.00", total 122.9892 -> "122.99"
        let totals = price_order(&[(Money::from_cents(3333), 3)]);
        assert_eq!(totals.subtotal.to_string(), "99.99");
        assert_eq!(totals.tax.to_string(), "8.00");
        assert_eq!(totals.total.to_string(), "122.99");
    }
}
