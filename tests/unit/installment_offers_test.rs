// Offer calculation against the merchant configuration: tax-free windows,
// per-count tax rates, the minimum-offer floor, and sequence compaction.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use faturapay::config::{GatewayConfig, TaxSchedule};
use faturapay::installments::OfferCalculator;

fn base_config() -> GatewayConfig {
    GatewayConfig::default()
}

const TOLERANCE: Decimal = dec!(0.000001);

#[test]
fn divides_amount_evenly_when_no_tax_configured() {
    let mut cfg = base_config();
    cfg.max_installments = 5;
    cfg.installments_without_tax = 5;

    let offers = OfferCalculator::compute_offers(dec!(100), &cfg);

    assert_eq!(offers.len(), 5);
    for (offer, expected_unit) in offers.iter().zip([
        dec!(100),
        dec!(50),
        dec!(100) / dec!(3),
        dec!(25),
        dec!(20),
    ]) {
        assert_eq!(offer.unit_value, expected_unit);
        assert!((offer.total_value - dec!(100)).abs() < TOLERANCE);
        assert!(!offer.tax_applied);
    }
    assert_eq!(
        offers.iter().map(|o| o.count).collect::<Vec<_>>(),
        vec![1, 2, 3, 4, 5]
    );
}

#[test]
fn minimum_offer_value_limits_the_count() {
    let mut cfg = base_config();
    cfg.max_installments = 10;
    cfg.installments_without_tax = 10;
    cfg.minimum_offer_value = dec!(20);

    let offers = OfferCalculator::compute_offers(dec!(50), &cfg);

    assert_eq!(offers.len(), 2);
    assert_eq!(offers[0].unit_value, dec!(50));
    assert_eq!(offers[1].unit_value, dec!(25));
}

#[test]
fn applies_configured_tax_outside_the_free_window() {
    let mut cfg = base_config();
    cfg.max_installments = 6;
    cfg.installments_without_tax = 1;
    cfg.minimum_offer_value = dec!(10);
    cfg.tax_schedule = TaxSchedule::from_rates(vec![
        (1, dec!(0)),
        (2, dec!(1)),
        (3, dec!(1.5)),
        (4, dec!(2)),
        (5, dec!(2.5)),
        (6, dec!(3)),
    ])
    .unwrap();

    let offers = OfferCalculator::compute_offers(dec!(100), &cfg);

    assert_eq!(offers.len(), 6);

    assert_eq!(offers[0].unit_value, dec!(100));
    assert!(!offers[0].tax_applied);

    assert_eq!(offers[1].unit_value, dec!(50.5));
    assert_eq!(offers[1].total_value, dec!(101.0));
    assert!(offers[1].tax_applied);

    assert!((offers[2].unit_value - dec!(101.5) / dec!(3)).abs() < TOLERANCE);
    assert!((offers[2].total_value - dec!(101.5)).abs() < TOLERANCE);
    assert!(offers[2].tax_applied);

    assert_eq!(offers[3].unit_value, dec!(25.5));
    assert_eq!(offers[4].unit_value, dec!(20.5));
    assert!((offers[5].total_value - dec!(103)).abs() < TOLERANCE);
}

#[test]
fn suppressed_counts_compact_the_sequence() {
    // The per-count tax can lift a later offer back over the floor, leaving
    // a gap in the middle of the sequence.
    let mut cfg = base_config();
    cfg.max_installments = 6;
    cfg.installments_without_tax = 2;
    cfg.minimum_offer_value = dec!(40);
    cfg.tax_schedule =
        TaxSchedule::from_rates(vec![(3, dec!(60)), (5, dec!(80)), (6, dec!(200))]).unwrap();

    let offers = OfferCalculator::compute_offers(dec!(100), &cfg);

    assert_eq!(
        offers.iter().map(|o| o.count).collect::<Vec<_>>(),
        vec![1, 2, 3, 6]
    );
    // Offer positions compact over the suppressed counts
    assert_eq!(offers[3].count, 6);
    assert_eq!(offers[3].unit_value, dec!(50));
    assert!(offers[3].tax_applied);
}

#[test]
fn zero_amount_offers_survive_only_a_non_positive_floor() {
    let mut cfg = base_config();
    cfg.max_installments = 3;

    let offers = OfferCalculator::compute_offers(Decimal::ZERO, &cfg);
    assert_eq!(offers.len(), 3);
    assert!(offers.iter().all(|o| o.unit_value == Decimal::ZERO));

    cfg.minimum_offer_value = dec!(0.01);
    assert!(OfferCalculator::compute_offers(Decimal::ZERO, &cfg).is_empty());
}

proptest! {
    /// Counts are strictly increasing and every total is the unit value
    /// times the count.
    #[test]
    fn offers_are_ordered_and_internally_consistent(
        amount_cents in 0u64..100_000_000u64,
        max in 0u32..24u32,
        floor_cents in 0u64..20_000u64,
    ) {
        let amount = Decimal::from(amount_cents) / Decimal::ONE_HUNDRED;
        let config = GatewayConfig {
            max_installments: max,
            minimum_offer_value: Decimal::from(floor_cents) / Decimal::ONE_HUNDRED,
            ..GatewayConfig::default()
        };

        let offers = OfferCalculator::compute_offers(amount, &config);

        let mut previous = 0u32;
        for offer in &offers {
            prop_assert!(offer.count > previous);
            previous = offer.count;
            prop_assert!(offer.unit_value >= config.minimum_offer_value);
            prop_assert_eq!(
                offer.total_value,
                offer.unit_value * Decimal::from(offer.count)
            );
        }
    }

    /// Same inputs, same offers.
    #[test]
    fn calculation_is_deterministic(amount_cents in 0u64..10_000_000u64) {
        let amount = Decimal::from(amount_cents) / Decimal::ONE_HUNDRED;
        let config = GatewayConfig::default();

        prop_assert_eq!(
            OfferCalculator::compute_offers(amount, &config),
            OfferCalculator::compute_offers(amount, &config)
        );
    }
}
