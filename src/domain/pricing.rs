//! Price breakdown for a cart: subtotal, shipping, tax and total.

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::domain::aggregates::{Cart, LineItem};
use crate::domain::value_objects::Money;

/// Shipping and tax rules applied at checkout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PricingPolicy {
    free_shipping_threshold: Money,
    standard_shipping_fee: Money,
    tax_rate: Decimal,
}

impl PricingPolicy {
    pub fn new(free_shipping_threshold: Money, standard_shipping_fee: Money, tax_rate: Decimal) -> Result<Self, PricingError> {
        if free_shipping_threshold.is_negative() {
            return Err(PricingError::NegativeAmount("free shipping threshold"));
        }
        if standard_shipping_fee.is_negative() {
            return Err(PricingError::NegativeAmount("standard shipping fee"));
        }
        if tax_rate < Decimal::ZERO || tax_rate > Decimal::ONE {
            return Err(PricingError::TaxRateOutOfRange(tax_rate));
        }
        Ok(Self { free_shipping_threshold, standard_shipping_fee, tax_rate })
    }

    pub fn free_shipping_threshold(&self) -> Money { self.free_shipping_threshold }
    pub fn standard_shipping_fee(&self) -> Money { self.standard_shipping_fee }
    pub fn tax_rate(&self) -> Decimal { self.tax_rate }

    /// Free at or above the threshold, flat fee below it.
    pub fn shipping_for(&self, subtotal: Money) -> Money {
        if subtotal >= self.free_shipping_threshold { Money::ZERO } else { self.standard_shipping_fee }
    }

    /// Tax on the merchandise subtotal only, rounded to cents.
    pub fn tax_for(&self, subtotal: Money) -> Money { subtotal.apply_rate(self.tax_rate) }
}

impl Default for PricingPolicy {
    /// $500 free-shipping threshold, $25 flat shipping, 8% tax.
    fn default() -> Self {
        Self {
            free_shipping_threshold: Money::from_dollars(500),
            standard_shipping_fee: Money::from_dollars(25),
            tax_rate: Decimal::new(8, 2),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    #[error("{0} must not be negative")]
    NegativeAmount(&'static str),
    #[error("tax rate must be between 0 and 1, got {0}")]
    TaxRateOutOfRange(Decimal),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PriceBreakdown {
    pub subtotal: Money,
    pub shipping_fee: Money,
    pub tax: Money,
    pub total: Money,
}

impl PriceBreakdown {
    pub fn has_free_shipping(&self) -> bool { self.shipping_fee.is_zero() }
}

/// Prices a set of line items under `policy`.
///
/// An empty list still prices: zero subtotal, standard shipping (unless the
/// threshold is zero), zero tax.
pub fn price_lines(items: &[LineItem], policy: &PricingPolicy) -> PriceBreakdown {
    let subtotal: Money = items.iter().map(LineItem::line_total).sum();
    let shipping_fee = policy.shipping_for(subtotal);
    let tax = policy.tax_for(subtotal);
    PriceBreakdown { subtotal, shipping_fee, tax, total: subtotal + shipping_fee + tax }
}

pub fn compute_breakdown(cart: &Cart, policy: &PricingPolicy) -> PriceBreakdown {
    price_lines(cart.items(), policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::ProductId;

    fn line(id: i64, cents: i64, quantity: u32) -> LineItem {
        LineItem {
            product_id: ProductId::new(id),
            name: format!("Watch {id}"),
            brand: "Seiko".into(),
            unit_price: Money::from_cents(cents),
            image_url: String::new(),
            quantity,
            available: 100,
        }
    }

    fn dollars(d: i64) -> Money { Money::from_dollars(d) }

    #[test]
    fn test_single_line_below_threshold() {
        let b = price_lines(&[line(1, 10_000, 3)], &PricingPolicy::default());
        assert_eq!(b.subtotal, dollars(300));
        assert_eq!(b.shipping_fee, dollars(25));
        assert_eq!(b.tax, dollars(24));
        assert_eq!(b.total, dollars(349));
        assert!(!b.has_free_shipping());
    }

    #[test]
    fn test_two_lines_still_below_threshold() {
        let b = price_lines(&[line(1, 5_000, 2), line(2, 30_000, 1)], &PricingPolicy::default());
        assert_eq!(b.subtotal, dollars(400));
        assert_eq!(b.shipping_fee, dollars(25));
    }

    #[test]
    fn test_crossing_threshold_ships_free() {
        let b = price_lines(&[line(1, 5_000, 2), line(2, 30_000, 2)], &PricingPolicy::default());
        assert_eq!(b.subtotal, dollars(700));
        assert_eq!(b.shipping_fee, Money::ZERO);
        assert_eq!(b.tax, dollars(56));
        assert_eq!(b.total, dollars(756));
        assert!(b.has_free_shipping());
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let policy = PricingPolicy::default();
        assert_eq!(price_lines(&[line(1, 50_000, 1)], &policy).shipping_fee, Money::ZERO);
        assert_eq!(price_lines(&[line(1, 49_999, 1)], &policy).shipping_fee, dollars(25));
    }

    #[test]
    fn test_empty_cart_pays_standard_shipping() {
        let b = compute_breakdown(&Cart::new(), &PricingPolicy::default());
        assert_eq!(b.subtotal, Money::ZERO);
        assert_eq!(b.shipping_fee, dollars(25));
        assert_eq!(b.tax, Money::ZERO);
        assert_eq!(b.total, dollars(25));
    }

    #[test]
    fn test_zero_threshold_ships_everything_free() {
        let policy = PricingPolicy::new(Money::ZERO, dollars(25), Decimal::new(8, 2)).unwrap();
        assert_eq!(price_lines(&[], &policy).shipping_fee, Money::ZERO);
    }

    #[test]
    fn test_breakdown_is_repeatable() {
        let items = [line(1, 1_999, 3), line(2, 42_500, 1)];
        let policy = PricingPolicy::default();
        assert_eq!(price_lines(&items, &policy), price_lines(&items, &policy));
    }

    #[test]
    fn test_tax_rounds_to_cents() {
        // 59.97 * 0.08 = 4.7976
        let b = price_lines(&[line(1, 1_999, 3)], &PricingPolicy::default());
        assert_eq!(b.tax, Money::from_cents(480));
        assert_eq!(b.total, Money::from_cents(5_997 + 2_500 + 480));
    }

    #[test]
    fn test_policy_validation() {
        assert_eq!(
            PricingPolicy::new(Money::from_cents(-1), dollars(25), Decimal::new(8, 2)),
            Err(PricingError::NegativeAmount("free shipping threshold"))
        );
        assert!(matches!(
            PricingPolicy::new(dollars(500), dollars(25), Decimal::new(15, 1)),
            Err(PricingError::TaxRateOutOfRange(_))
        ));
    }
}
