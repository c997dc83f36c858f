use crate::core::{GatewayError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;

/// Tax percentage per installment count.
///
/// Keys are installment counts (1-based); values are surcharge percentages.
/// Counts with no configured rate are taxed at zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSchedule {
    rates: BTreeMap<u32, Decimal>,
}

impl TaxSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a schedule from explicit (count, rate) pairs.
    pub fn from_rates<I>(rates: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u32, Decimal)>,
    {
        let mut schedule = BTreeMap::new();
        for (count, rate) in rates {
            if count == 0 {
                return Err(GatewayError::configuration(
                    "tax schedule keys start at installment count 1",
                ));
            }
            if rate < Decimal::ZERO {
                return Err(GatewayError::configuration(format!(
                    "negative tax rate {rate} for {count} installments"
                )));
            }
            schedule.insert(count, rate);
        }
        Ok(Self { rates: schedule })
    }

    /// Build a schedule from the admin form's positional rate list.
    ///
    /// Entry `i` configures count `i + 1`. Rates may use a decimal comma;
    /// blank entries mean zero.
    pub fn from_positional_rates(raw: &[&str]) -> Result<Self> {
        let mut rates = Vec::with_capacity(raw.len());
        for (index, entry) in raw.iter().enumerate() {
            let normalized = entry.trim().replace(',', ".");
            let rate = if normalized.is_empty() {
                Decimal::ZERO
            } else {
                normalized.parse::<Decimal>().map_err(|_| {
                    GatewayError::configuration(format!(
                        "unparseable tax rate {entry:?} for {} installments",
                        index + 1
                    ))
                })?
            };
            rates.push((index as u32 + 1, rate));
        }
        Self::from_rates(rates)
    }

    /// Rate for an installment count, zero when unconfigured.
    pub fn rate_for(&self, count: u32) -> Decimal {
        self.rates.get(&count).copied().unwrap_or(Decimal::ZERO)
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

/// Merchant-configured gateway preferences.
///
/// Created and edited by the merchant admin; read-only during a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Tokenize cards against the provider's test environment
    pub test_mode: bool,

    /// Provider account id used for tokenization
    pub account_id: String,

    /// Provider API key (basic-auth username, empty password)
    pub api_key: String,

    /// Largest installment count offered
    pub max_installments: u32,

    /// Offers with a per-installment value below this floor are suppressed
    pub minimum_offer_value: Decimal,

    /// Counts up to this threshold are tax-free when the order also meets
    /// `min_value_without_tax`
    pub installments_without_tax: u32,

    pub min_value_without_tax: Decimal,

    pub tax_schedule: TaxSchedule,

    /// Callback URL the provider notifies on invoice status changes
    pub webhook_url: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            test_mode: true,
            account_id: String::new(),
            api_key: String::new(),
            max_installments: 12,
            minimum_offer_value: Decimal::ZERO,
            installments_without_tax: 1,
            min_value_without_tax: Decimal::ZERO,
            tax_schedule: TaxSchedule::new(),
            webhook_url: String::new(),
        }
    }
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let tax_schedule = match env::var("IUGU_TAX_SCHEDULE") {
            Ok(raw) => {
                let entries: Vec<&str> = raw.split(',').collect();
                // The env var uses comma-separated positional entries, so the
                // decimal-comma form is only accepted on the admin path.
                TaxSchedule::from_positional_rates(&entries)?
            }
            Err(_) => TaxSchedule::new(),
        };

        let config = Self {
            test_mode: parse_env("IUGU_TEST_MODE", true)?,
            account_id: env::var("IUGU_ACCOUNT_ID")
                .map_err(|_| GatewayError::configuration("IUGU_ACCOUNT_ID not set"))?,
            api_key: env::var("IUGU_API_KEY")
                .map_err(|_| GatewayError::configuration("IUGU_API_KEY not set"))?,
            max_installments: parse_env("IUGU_MAX_INSTALLMENTS", 12)?,
            minimum_offer_value: parse_env("IUGU_MINIMUM_OFFER_VALUE", Decimal::ZERO)?,
            installments_without_tax: parse_env("IUGU_INSTALLMENTS_WITHOUT_TAX", 1)?,
            min_value_without_tax: parse_env("IUGU_MIN_VALUE_WITHOUT_TAX", Decimal::ZERO)?,
            tax_schedule,
            webhook_url: env::var("IUGU_WEBHOOK_URL")
                .map_err(|_| GatewayError::configuration("IUGU_WEBHOOK_URL not set"))?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate merchant configuration at load time.
    ///
    /// `max_installments == 0` stays legal: it yields an empty offer list
    /// rather than a configuration error.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(GatewayError::configuration("api_key must not be empty"));
        }

        if self.account_id.trim().is_empty() {
            return Err(GatewayError::configuration("account_id must not be empty"));
        }

        if self.webhook_url.trim().is_empty() {
            return Err(GatewayError::configuration("webhook_url must not be empty"));
        }

        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| GatewayError::configuration(format!("invalid {name}"))),
        Err(_) => Ok(default),
    }
}
