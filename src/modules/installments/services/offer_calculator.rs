use rust_decimal::Decimal;
use tracing::debug;

use crate::config::GatewayConfig;
use crate::modules::installments::models::InstallmentOffer;

/// Calculator for installment offers
///
/// Pure and deterministic: the same amount and configuration always produce
/// the same offer list, and no offer list is ever an error.
pub struct OfferCalculator;

impl OfferCalculator {
    /// Compute the eligible installment offers for an order amount.
    ///
    /// For each count from 1 to `max_installments`:
    /// - the tax schedule rate applies unless the count falls within the
    ///   tax-free window (`count <= installments_without_tax` and
    ///   `amount >= min_value_without_tax`) or the rate is zero;
    /// - offers whose per-installment value falls below
    ///   `minimum_offer_value` are dropped, each count judged on its own;
    /// - surviving offers keep ascending count order and compact over any
    ///   suppressed counts.
    ///
    /// No rounding is applied; values carry Decimal's full precision.
    pub fn compute_offers(amount: Decimal, config: &GatewayConfig) -> Vec<InstallmentOffer> {
        let mut offers = Vec::with_capacity(config.max_installments as usize);

        for count in 1..=config.max_installments {
            let tax = config.tax_schedule.rate_for(count);
            let waived = tax <= Decimal::ZERO
                || (count <= config.installments_without_tax
                    && amount >= config.min_value_without_tax);

            let divisor = Decimal::from(count);
            let unit_value = if waived {
                amount / divisor
            } else {
                (amount + amount * tax / Decimal::ONE_HUNDRED) / divisor
            };

            if unit_value < config.minimum_offer_value {
                continue;
            }

            offers.push(InstallmentOffer {
                count,
                unit_value,
                total_value: unit_value * divisor,
                tax_applied: !waived,
            });
        }

        debug!(
            amount = %amount,
            max_installments = config.max_installments,
            offers = offers.len(),
            "computed installment offers"
        );

        offers
    }
}
