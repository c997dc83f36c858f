use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::config::GatewayConfig;
use crate::core::{messages, GatewayError, Result};
use crate::modules::installments::{InstallmentOffer, OfferCalculator};
use crate::modules::invoices::models::{
    CardDetails, ChargeItem, ChargeRequest, InvoiceStatus, PaymentToken, Payer, PayerAddress,
};
use crate::modules::invoices::services::BillingProvider;
use crate::modules::payments::models::{CheckoutContext, Order, Payment};
use crate::modules::payments::repositories::CheckoutRepository;

/// Normalized result of a gateway operation.
///
/// Every public orchestrator operation answers with one of these; no error
/// type crosses the boundary into the host framework.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentOutcome {
    pub success: bool,
    pub message: String,

    /// Remote invoice id usable for capture/void/cancel/reconciliation
    pub authorization: Option<String>,
}

impl PaymentOutcome {
    pub fn success(message: impl Into<String>, authorization: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            authorization: Some(authorization.into()),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            authorization: None,
        }
    }
}

/// Drives the authorize → capture → void/cancel protocol and reconciles
/// remote invoice status into local payment state.
pub struct PaymentOrchestrator {
    provider: Arc<dyn BillingProvider>,
    checkouts: Arc<dyn CheckoutRepository>,
    config: GatewayConfig,
}

impl PaymentOrchestrator {
    pub fn new(
        provider: Arc<dyn BillingProvider>,
        checkouts: Arc<dyn CheckoutRepository>,
        config: GatewayConfig,
    ) -> Self {
        Self {
            provider,
            checkouts,
            config,
        }
    }

    /// Installment offers to present for an order amount.
    pub fn installments_options(&self, amount: Decimal) -> Vec<InstallmentOffer> {
        OfferCalculator::compute_offers(amount, &self.config)
    }

    /// Tokenize the card and create the remote charge for the selected
    /// installment plan.
    ///
    /// The charge amount always derives from the resolved order's total;
    /// when the selected offer's total exceeds it, an installment-tax
    /// adjustment is staged on the order and only persisted together with
    /// the successful charge.
    pub async fn authorize(
        &self,
        amount: Decimal,
        source: &CardDetails,
        context: &CheckoutContext,
    ) -> PaymentOutcome {
        match self.try_authorize(amount, source, context).await {
            Ok(outcome) => outcome,
            Err(err) => Self::failure_from(err),
        }
    }

    /// Authorize and, on success, capture in one call.
    pub async fn purchase(
        &self,
        amount: Decimal,
        source: &CardDetails,
        context: &CheckoutContext,
    ) -> PaymentOutcome {
        let response = self.authorize(amount, source, context).await;
        if !response.success {
            return response;
        }

        match response.authorization {
            Some(reference) => self.capture(amount, &reference).await,
            None => PaymentOutcome::failure(messages::GATEWAY_FAILURE),
        }
    }

    /// Settle an authorized invoice.
    ///
    /// An invoice the provider already reports as paid short-circuits to
    /// success without a capture call. The settled amount is always the
    /// invoice's own; `amount` is accepted for host-API compatibility.
    pub async fn capture(&self, amount: Decimal, response_code: &str) -> PaymentOutcome {
        match self.try_capture(amount, response_code).await {
            Ok(outcome) => outcome,
            Err(err) => Self::failure_from(err),
        }
    }

    /// Void an authorized or settled invoice.
    pub async fn void(&self, response_code: &str) -> PaymentOutcome {
        match self
            .try_refund_or_cancel(response_code, messages::VOID_SUCCESS)
            .await
        {
            Ok(outcome) => outcome,
            Err(err) => Self::failure_from(err),
        }
    }

    /// Cancel an authorized or settled invoice.
    pub async fn cancel(&self, response_code: &str) -> PaymentOutcome {
        match self
            .try_refund_or_cancel(response_code, messages::CANCEL_SUCCESS)
            .await
        {
            Ok(outcome) => outcome,
            Err(err) => Self::failure_from(err),
        }
    }

    /// Reconcile a payment against its remote invoice status.
    ///
    /// Applies `pending → pend`, `paid → complete`, `refunded → void`;
    /// any other status leaves the payment untouched. Returns whether a
    /// transition rule matched; re-applying an unchanged status is a no-op.
    pub async fn update_payment(&self, payment: &mut Payment) -> Result<bool> {
        let reference = payment
            .response_code
            .clone()
            .ok_or_else(|| GatewayError::precondition(messages::MISSING_AUTHORIZATION))?;

        let invoice = self.provider.fetch_invoice(&reference).await?;

        let applied = match invoice.status {
            InvoiceStatus::Pending => {
                payment.pend();
                true
            }
            InvoiceStatus::Paid => {
                payment.complete();
                true
            }
            InvoiceStatus::Refunded => {
                payment.void_payment();
                true
            }
            _ => false,
        };

        if applied {
            self.checkouts.save_payment(payment).await?;
            info!(
                payment = payment.number.as_str(),
                invoice_status = %invoice.status,
                state = %payment.state,
                "payment reconciled"
            );
        }

        Ok(applied)
    }

    async fn try_authorize(
        &self,
        amount: Decimal,
        source: &CardDetails,
        context: &CheckoutContext,
    ) -> Result<PaymentOutcome> {
        let (mut payment, mut order) = self
            .checkouts
            .find_checkout(context)
            .await?
            .ok_or_else(|| GatewayError::precondition(messages::CHECKOUT_NOT_FOUND))?;

        let months = payment
            .installments
            .filter(|m| *m > 0)
            .ok_or_else(|| GatewayError::precondition(messages::MISSING_INSTALLMENTS))?;

        let token = self.provider.create_token(source).await?;

        let offers = self.installments_options(order.total);
        let selected = offers
            .get(months as usize - 1)
            .cloned()
            .ok_or_else(|| GatewayError::precondition(messages::OFFER_NOT_AVAILABLE))?;

        // Stage the tax adjustment locally; it only reaches the host store
        // together with a successful charge.
        let adjusted = selected.total_value > order.total;
        if adjusted {
            order.add_adjustment(
                messages::INSTALLMENT_TAX_LABEL,
                selected.total_value - order.total,
            );
        }

        let request = self.build_charge_request(&token, &order, context, months)?;
        let receipt = self.provider.create_charge(&request).await?;

        payment.started_processing();
        payment.response_code = Some(receipt.invoice_id.clone());
        if adjusted {
            payment.amount = order.total;
        }

        if let Err(commit_err) = self.checkouts.commit_authorization(&order, &payment).await {
            // The remote charge exists and cannot be rolled back from here.
            error!(
                order = order.number.as_str(),
                payment = payment.number.as_str(),
                invoice_id = receipt.invoice_id.as_str(),
                error = %commit_err,
                "remote charge created but local commit failed"
            );
            return Err(GatewayError::inconsistency(messages::RECONCILIATION_GAP));
        }

        info!(
            order = order.number.as_str(),
            payment = payment.number.as_str(),
            invoice_id = receipt.invoice_id.as_str(),
            requested_amount = %amount,
            charged_total = %order.total,
            months,
            "charge authorized"
        );

        Ok(PaymentOutcome::success(
            messages::CHARGE_SUCCESS,
            receipt.invoice_id,
        ))
    }

    async fn try_capture(&self, amount: Decimal, response_code: &str) -> Result<PaymentOutcome> {
        let invoice = self.provider.fetch_invoice(response_code).await?;

        if invoice.status == InvoiceStatus::Paid {
            return Ok(PaymentOutcome::success(
                messages::CAPTURE_SUCCESS,
                response_code,
            ));
        }

        let invoice = self.provider.capture_invoice(response_code).await?;

        if invoice.status == InvoiceStatus::Paid {
            info!(
                invoice_id = response_code,
                requested_amount = %amount,
                "invoice captured"
            );
            Ok(PaymentOutcome::success(
                messages::CAPTURE_SUCCESS,
                response_code,
            ))
        } else {
            warn!(
                invoice_id = response_code,
                status = %invoice.status,
                "capture left invoice unsettled"
            );
            Ok(PaymentOutcome::failure(
                invoice
                    .error_message()
                    .unwrap_or_else(|| messages::GATEWAY_FAILURE.to_string()),
            ))
        }
    }

    async fn try_refund_or_cancel(
        &self,
        response_code: &str,
        success_message: &str,
    ) -> Result<PaymentOutcome> {
        let invoice = self.provider.fetch_invoice(response_code).await?;

        if invoice.status == InvoiceStatus::Canceled {
            return Ok(PaymentOutcome::success(success_message, response_code));
        }

        if invoice.status == InvoiceStatus::Paid {
            self.provider.refund_invoice(response_code).await?;
        } else {
            self.provider.cancel_invoice(response_code).await?;
        }

        info!(invoice_id = response_code, "invoice written off");
        Ok(PaymentOutcome::success(success_message, response_code))
    }

    fn build_charge_request(
        &self,
        token: &PaymentToken,
        order: &Order,
        context: &CheckoutContext,
        months: u32,
    ) -> Result<ChargeRequest> {
        let mut items = Vec::with_capacity(order.line_items.len() + order.adjustments.len() + 1);

        for line_item in &order.line_items {
            items.push(ChargeItem {
                description: line_item.description.clone(),
                quantity: line_item.quantity,
                price_cents: to_cents(line_item.price)?,
            });
        }

        if order.ship_total > Decimal::ZERO {
            items.push(ChargeItem {
                description: messages::SHIPPING_LABEL.to_string(),
                quantity: 1,
                price_cents: to_cents(order.ship_total)?,
            });
        }

        for adjustment in order.eligible_adjustments() {
            items.push(ChargeItem {
                description: adjustment.label.clone(),
                quantity: 1,
                price_cents: to_cents(adjustment.amount)?,
            });
        }

        let address = &context.billing_address;
        let payer = Payer::new(
            address.name.clone(),
            &address.phone,
            context.customer_email.clone(),
            PayerAddress {
                street: address.address1.clone(),
                city: address.city.clone(),
                state: address.state_name.clone(),
                country: address.country.clone(),
                zip_code: address.zipcode.clone(),
            },
        );

        Ok(ChargeRequest {
            token: token.id.clone(),
            email: context.email.clone(),
            months,
            items,
            notification_url: self.config.webhook_url.clone(),
            payer,
        })
    }

    fn failure_from(err: GatewayError) -> PaymentOutcome {
        match err {
            GatewayError::Token(message)
            | GatewayError::Charge(message)
            | GatewayError::Precondition(message)
            | GatewayError::Inconsistency(message) => PaymentOutcome::failure(message),
            other => {
                error!(error = %other, "unexpected gateway failure");
                PaymentOutcome::failure(messages::GATEWAY_FAILURE)
            }
        }
    }
}

fn to_cents(value: Decimal) -> Result<i64> {
    (value * Decimal::ONE_HUNDRED)
        .round_dp(0)
        .to_i64()
        .ok_or_else(|| GatewayError::internal(format!("amount {value} not representable in cents")))
}
