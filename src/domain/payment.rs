use crate::domain::provider::PaymentProvider;
use crate::error::{PaymentError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Maximum length of a payment description, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 255;

/// Represents a positive monetary amount.
///
/// This is a wrapper around `rust_decimal::Decimal` to enforce domain-specific rules
/// and provide type safety for financial calculations.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(PaymentError::Validation(
                "amount must be greater than zero".to_string(),
            ))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = PaymentError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

/// The fixed set of supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Try,
    Usd,
    Eur,
}

impl FromStr for Currency {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "TRY" => Ok(Currency::Try),
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            other => Err(PaymentError::Validation(format!(
                "unsupported currency: {other}"
            ))),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Currency::Try => "TRY",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    Refunded,
}

impl PaymentStatus {
    /// The transition table of the payment lifecycle.
    ///
    /// COMPLETED is left only through the refund operation; FAILED and
    /// REFUNDED are never left.
    pub fn can_transition_to(self, next: PaymentStatus) -> bool {
        use PaymentStatus::*;
        matches!(
            (self, next),
            (Pending, Processing | Completed | Failed)
                | (Processing, Completed | Failed)
                | (Completed, Refunded)
        )
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Processing => "PROCESSING",
            PaymentStatus::Completed => "COMPLETED",
            PaymentStatus::Failed => "FAILED",
            PaymentStatus::Refunded => "REFUNDED",
        })
    }
}

/// A payment tracked through its lifecycle.
///
/// The status field is private: every status write goes through
/// [`Payment::transition`], which consults the transition table. Amount,
/// currency and description only change through [`Payment::apply_update`];
/// id and provider are immutable once the payment exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    id: String,
    amount: Amount,
    currency: Currency,
    status: PaymentStatus,
    provider: PaymentProvider,
    description: Option<String>,
}

impl Payment {
    fn new(
        amount: Amount,
        currency: Currency,
        provider: PaymentProvider,
        description: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            amount,
            currency,
            status: PaymentStatus::Pending,
            provider,
            description,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn status(&self) -> PaymentStatus {
        self.status
    }

    pub fn provider(&self) -> PaymentProvider {
        self.provider
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Moves the payment to `next` if the transition table allows it.
    ///
    /// This is the single authority for status writes; an illegal move fails
    /// with a validation error naming the current status.
    pub fn transition(&mut self, next: PaymentStatus) -> Result<()> {
        if self.status.can_transition_to(next) {
            self.status = next;
            Ok(())
        } else {
            Err(PaymentError::Validation(format!(
                "illegal status transition from {} to {}",
                self.status, next
            )))
        }
    }

    /// Replaces amount, currency and description after re-validating them.
    /// Status and provider are not touched.
    pub fn apply_update(&mut self, update: PaymentUpdate) -> Result<()> {
        let amount = Amount::new(update.amount)?;
        let currency = update.currency.parse()?;
        let description = validate_description(update.description)?;
        self.amount = amount;
        self.currency = currency;
        self.description = description;
        Ok(())
    }
}

/// The inbound request shape consumed from the API-layer collaborator.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentRequest {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub currency: String,
    pub provider: Option<PaymentProvider>,
    pub description: Option<String>,
}

impl PaymentRequest {
    /// Validates the request and builds a PENDING payment with a fresh id.
    /// The caller has no say in the initial status.
    pub fn into_payment(self) -> Result<Payment> {
        let amount = Amount::new(self.amount)?;
        let currency = self.currency.parse()?;
        let provider = self.provider.ok_or_else(|| {
            PaymentError::Validation("a payment provider must be specified".to_string())
        })?;
        let description = validate_description(self.description)?;
        Ok(Payment::new(amount, currency, provider, description))
    }
}

/// The fields the update operation may touch.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentUpdate {
    pub amount: Decimal,
    pub currency: String,
    pub description: Option<String>,
}

fn validate_description(description: Option<String>) -> Result<Option<String>> {
    if let Some(text) = &description
        && text.chars().count() > MAX_DESCRIPTION_LEN
    {
        return Err(PaymentError::Validation(format!(
            "description must not exceed {MAX_DESCRIPTION_LEN} characters"
        )));
    }
    Ok(description)
}
