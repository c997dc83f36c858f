// Webhook-driven reconciliation: the status → transition mapping, its
// idempotence, and the HTTP callback contract.

#[path = "../helpers/mod.rs"]
mod helpers;

use actix_web::http::StatusCode;
use actix_web::{test, App};
use serde_json::json;
use std::sync::Arc;

use faturapay::core::GatewayError;
use faturapay::invoices::models::InvoiceStatus;
use faturapay::payments::models::{Payment, PaymentState};
use faturapay::payments::services::PaymentOrchestrator;
use faturapay::webhooks::WebhookController;

use helpers::memory_checkouts::MemoryCheckouts;
use helpers::mock_provider::{MockProvider, INVOICE_ID};
use helpers::test_data;

fn authorized_payment() -> Payment {
    let mut payment = test_data::payment(Some(1));
    payment.response_code = Some(INVOICE_ID.to_string());
    payment
}

fn setup(provider: MockProvider) -> (Arc<MemoryCheckouts>, PaymentOrchestrator) {
    let checkouts = Arc::new(MemoryCheckouts::new());
    let orchestrator = PaymentOrchestrator::new(
        Arc::new(provider),
        checkouts.clone(),
        test_data::config(),
    );
    (checkouts, orchestrator)
}

#[tokio::test]
async fn remote_statuses_map_onto_local_transitions() {
    let cases = [
        (InvoiceStatus::Pending, PaymentState::Pending),
        (InvoiceStatus::Paid, PaymentState::Completed),
        (InvoiceStatus::Refunded, PaymentState::Void),
    ];

    for (remote, expected) in cases {
        let (checkouts, orchestrator) =
            setup(MockProvider::new().with_fetch_statuses(&[remote]));
        let mut payment = authorized_payment();

        let applied = orchestrator.update_payment(&mut payment).await.unwrap();

        assert!(applied, "{remote} should drive a transition");
        assert_eq!(payment.state, expected);
        // The reconciled payment was persisted
        assert_eq!(
            checkouts.payment(test_data::PAYMENT_NUMBER).unwrap().state,
            expected
        );
    }
}

#[tokio::test]
async fn untracked_statuses_leave_the_payment_alone() {
    for remote in [
        InvoiceStatus::Canceled,
        InvoiceStatus::InAnalysis,
        InvoiceStatus::PartiallyRefunded,
        InvoiceStatus::Unknown,
    ] {
        let (checkouts, orchestrator) =
            setup(MockProvider::new().with_fetch_statuses(&[remote]));
        let mut payment = authorized_payment();
        payment.started_processing();

        let applied = orchestrator.update_payment(&mut payment).await.unwrap();

        assert!(!applied, "{remote} must not transition");
        assert_eq!(payment.state, PaymentState::Processing);
        assert!(checkouts.payment(test_data::PAYMENT_NUMBER).is_none());
    }
}

#[tokio::test]
async fn repeated_reconciliation_is_a_no_op() {
    let (_, orchestrator) = setup(
        MockProvider::new().with_fetch_statuses(&[InvoiceStatus::Pending, InvoiceStatus::Pending]),
    );
    let mut payment = authorized_payment();

    assert!(orchestrator.update_payment(&mut payment).await.unwrap());
    let state_after_first = payment.state;

    assert!(orchestrator.update_payment(&mut payment).await.unwrap());
    assert_eq!(payment.state, state_after_first);
}

#[tokio::test]
async fn payment_without_reference_is_a_precondition_error() {
    let (_, orchestrator) = setup(MockProvider::new());
    let mut payment = test_data::payment(Some(1));

    let result = orchestrator.update_payment(&mut payment).await;

    assert!(matches!(result, Err(GatewayError::Precondition(_))));
    assert_eq!(payment.state, PaymentState::Checkout);
}

#[actix_web::test]
async fn webhook_answers_ok_after_applying_a_transition() {
    let provider = Arc::new(MockProvider::new().with_fetch_statuses(&[InvoiceStatus::Pending]));
    let checkouts = Arc::new(MemoryCheckouts::new());
    checkouts.insert_payment(authorized_payment());
    let orchestrator = Arc::new(PaymentOrchestrator::new(
        provider,
        checkouts.clone(),
        test_data::config(),
    ));

    let app = test::init_service(App::new().configure(|cfg| {
        WebhookController::configure(cfg, orchestrator.clone(), checkouts.clone())
    }))
    .await;

    let request = test::TestRequest::post()
        .uri("/iugu_webhook")
        .set_json(json!({
            "event": "invoice.status_changed",
            "data": { "id": INVOICE_ID, "status": "pending" }
        }))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        checkouts.payment(test_data::PAYMENT_NUMBER).unwrap().state,
        PaymentState::Pending
    );
}

#[actix_web::test]
async fn webhook_answers_forbidden_for_an_unknown_reference() {
    let provider = Arc::new(MockProvider::new());
    let checkouts = Arc::new(MemoryCheckouts::new());
    let orchestrator = Arc::new(PaymentOrchestrator::new(
        provider,
        checkouts.clone(),
        test_data::config(),
    ));

    let app = test::init_service(App::new().configure(|cfg| {
        WebhookController::configure(cfg, orchestrator.clone(), checkouts.clone())
    }))
    .await;

    let request = test::TestRequest::post()
        .uri("/iugu_webhook")
        .set_json(json!({ "data": { "id": "FFFF0000" } }))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn webhook_answers_forbidden_when_no_rule_matches() {
    let provider = Arc::new(MockProvider::new().with_fetch_statuses(&[InvoiceStatus::InAnalysis]));
    let checkouts = Arc::new(MemoryCheckouts::new());
    checkouts.insert_payment(authorized_payment());
    let orchestrator = Arc::new(PaymentOrchestrator::new(
        provider,
        checkouts.clone(),
        test_data::config(),
    ));

    let app = test::init_service(App::new().configure(|cfg| {
        WebhookController::configure(cfg, orchestrator.clone(), checkouts.clone())
    }))
    .await;

    let request = test::TestRequest::post()
        .uri("/iugu_webhook")
        .set_json(json!({ "data": { "id": INVOICE_ID } }))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
