use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::billing_provider::BillingProvider;
use crate::config::GatewayConfig;
use crate::core::{GatewayError, Result};
use crate::modules::invoices::models::{
    CardDetails, ChargeReceipt, ChargeRequest, PaymentToken, ProviderErrors, RemoteInvoice,
};

const DEFAULT_BASE_URL: &str = "https://api.iugu.com/v1";

/// Iugu HTTP client
///
/// Carries its own credentials; nothing is assigned to ambient provider
/// state before a call. All JSON endpoints authenticate with basic auth
/// (API key as username, empty password); capture is the one form-encoded
/// endpoint.
pub struct IuguClient {
    client: Client,
    base_url: String,
    api_key: String,
    account_id: String,
    test_mode: bool,
}

impl IuguClient {
    pub fn new(config: &GatewayConfig) -> Self {
        Self::with_base_url(config, DEFAULT_BASE_URL)
    }

    /// Point the client at a non-default API host. Sandbox proxies and
    /// record/replay rigs use this; production goes through `new`.
    pub fn with_base_url(config: &GatewayConfig, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key: config.api_key.clone(),
            account_id: config.account_id.clone(),
            test_mode: config.test_mode,
        }
    }

    async fn read_invoice(&self, response: reqwest::Response, action: &str) -> Result<RemoteInvoice> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(action, %status, "provider rejected invoice request");
            return Err(GatewayError::charge(format!(
                "provider returned {status} on {action}: {body}"
            )));
        }

        let invoice: RemoteInvoice = response.json().await?;
        Ok(invoice)
    }
}

#[async_trait]
impl BillingProvider for IuguClient {
    async fn create_token(&self, card: &CardDetails) -> Result<PaymentToken> {
        let url = format!("{}/payment_token", self.base_url);

        #[derive(Serialize)]
        struct TokenData<'a> {
            number: &'a str,
            verification_value: &'a str,
            first_name: &'a str,
            last_name: String,
            month: u8,
            year: u16,
        }

        #[derive(Serialize)]
        struct TokenRequest<'a> {
            account_id: &'a str,
            method: &'static str,
            test: bool,
            data: TokenData<'a>,
        }

        #[derive(Deserialize)]
        struct TokenResponse {
            #[serde(default)]
            id: Option<String>,
            #[serde(default)]
            errors: Option<ProviderErrors>,
        }

        let request = TokenRequest {
            account_id: &self.account_id,
            method: "credit_card",
            test: self.test_mode,
            data: TokenData {
                number: &card.number,
                verification_value: &card.verification_value,
                first_name: card.holder_first_name(),
                last_name: card.holder_last_name(),
                month: card.month,
                year: card.year,
            },
        };

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.api_key, Some(""))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::token(format!(
                "provider returned {status} on tokenization: {body}"
            )));
        }

        let token: TokenResponse = response.json().await?;

        if let Some(errors) = token.errors.filter(|e| !e.is_empty()) {
            warn!("card tokenization rejected");
            return Err(GatewayError::token(errors.to_message()));
        }

        match token.id {
            Some(id) => {
                debug!("card tokenized");
                Ok(PaymentToken { id })
            }
            None => Err(GatewayError::internal(
                "token response carried neither id nor errors",
            )),
        }
    }

    async fn create_charge(&self, request: &ChargeRequest) -> Result<ChargeReceipt> {
        let url = format!("{}/charge", self.base_url);

        #[derive(Deserialize)]
        struct ChargeResponse {
            #[serde(default)]
            invoice_id: Option<String>,
            #[serde(default)]
            errors: Option<ProviderErrors>,
        }

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.api_key, Some(""))
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::charge(format!(
                "provider returned {status} on charge: {body}"
            )));
        }

        let charge: ChargeResponse = response.json().await?;

        if let Some(errors) = charge.errors.filter(|e| !e.is_empty()) {
            warn!(months = request.months, "charge rejected");
            return Err(GatewayError::charge(errors.to_message()));
        }

        match charge.invoice_id {
            Some(invoice_id) => {
                debug!(invoice_id = invoice_id.as_str(), "charge created");
                Ok(ChargeReceipt { invoice_id })
            }
            None => Err(GatewayError::internal(
                "charge response carried neither invoice id nor errors",
            )),
        }
    }

    async fn fetch_invoice(&self, invoice_id: &str) -> Result<RemoteInvoice> {
        let url = format!("{}/invoices/{invoice_id}", self.base_url);

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.api_key, Some(""))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::internal(format!(
                "provider returned {status} fetching invoice {invoice_id}: {body}"
            )));
        }

        let invoice: RemoteInvoice = response.json().await?;
        debug!(invoice_id, status = %invoice.status, "fetched invoice");
        Ok(invoice)
    }

    async fn capture_invoice(&self, invoice_id: &str) -> Result<RemoteInvoice> {
        let url = format!("{}/invoices/{invoice_id}/capture", self.base_url);

        // The capture endpoint takes a form-encoded POST, unlike the JSON
        // API surface. An empty form body is expected.
        let empty: [(&str, &str); 0] = [];
        let response = self
            .client
            .post(&url)
            .basic_auth(&self.api_key, Some(""))
            .form(&empty)
            .send()
            .await?;

        self.read_invoice(response, "capture").await
    }

    async fn refund_invoice(&self, invoice_id: &str) -> Result<RemoteInvoice> {
        let url = format!("{}/invoices/{invoice_id}/refund", self.base_url);

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.api_key, Some(""))
            .send()
            .await?;

        let invoice = self.read_invoice(response, "refund").await?;

        if let Some(message) = invoice.error_message() {
            return Err(GatewayError::charge(message));
        }

        Ok(invoice)
    }

    async fn cancel_invoice(&self, invoice_id: &str) -> Result<RemoteInvoice> {
        let url = format!("{}/invoices/{invoice_id}/cancel", self.base_url);

        let response = self
            .client
            .put(&url)
            .basic_auth(&self.api_key, Some(""))
            .send()
            .await?;

        let invoice = self.read_invoice(response, "cancel").await?;

        if let Some(message) = invoice.error_message() {
            return Err(GatewayError::charge(message));
        }

        Ok(invoice)
    }
}
