use actix_web::{post, web, HttpResponse};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::core::Result;
use crate::modules::payments::repositories::CheckoutRepository;
use crate::modules::payments::services::PaymentOrchestrator;

/// Webhook controller for the provider's invoice status notifications
///
/// The provider sends no signature; authenticity follows from the opaque
/// invoice id resolving to a known payment, as on the outbound side.
pub struct WebhookController {
    orchestrator: Arc<PaymentOrchestrator>,
    checkouts: Arc<dyn CheckoutRepository>,
}

impl WebhookController {
    pub fn new(
        orchestrator: Arc<PaymentOrchestrator>,
        checkouts: Arc<dyn CheckoutRepository>,
    ) -> Self {
        Self {
            orchestrator,
            checkouts,
        }
    }

    /// Configure webhook routes
    pub fn configure(
        cfg: &mut web::ServiceConfig,
        orchestrator: Arc<PaymentOrchestrator>,
        checkouts: Arc<dyn CheckoutRepository>,
    ) {
        let controller = web::Data::new(Self::new(orchestrator, checkouts));
        cfg.app_data(controller).service(invoice_status_changed);
    }
}

/// Notification payload: the invoice id is all this integration needs,
/// status is re-fetched from the provider rather than trusted.
#[derive(Debug, Deserialize)]
pub struct WebhookEvent {
    #[serde(default)]
    pub event: Option<String>,
    pub data: WebhookData,
}

#[derive(Debug, Deserialize)]
pub struct WebhookData {
    pub id: String,
}

/// Process an invoice status-change notification.
///
/// POST /iugu_webhook
///
/// Responds 200 when a reconciliation rule matched and was applied, 403
/// when the reference is unknown or no rule matched.
#[post("/iugu_webhook")]
async fn invoice_status_changed(
    body: web::Json<WebhookEvent>,
    controller: web::Data<WebhookController>,
) -> Result<HttpResponse> {
    let reference = body.data.id.as_str();

    let Some(mut payment) = controller
        .checkouts
        .find_payment_by_response_code(reference)
        .await?
    else {
        warn!(reference, "webhook for unknown payment reference");
        return Ok(HttpResponse::Forbidden().finish());
    };

    if controller.orchestrator.update_payment(&mut payment).await? {
        info!(
            reference,
            event = body.event.as_deref().unwrap_or("unspecified"),
            "webhook reconciled payment"
        );
        Ok(HttpResponse::Ok().finish())
    } else {
        Ok(HttpResponse::Forbidden().finish())
    }
}
