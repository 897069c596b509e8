use crate::application::engine::PaymentEngine;
use crate::domain::payment::Payment;
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{info, warn};

/// Status value a provider reports for a successful payment.
pub const SUCCESS_STATUS: &str = "SUCCESS";

/// Result notification pushed by an external provider after it finished a
/// payment on its side.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResultNotice {
    pub payment_id: String,
    pub status: String,
    #[serde(default)]
    pub provider_transaction_id: Option<String>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// Routes a provider notification into the engine: "SUCCESS" completes the
/// payment, anything else fails it.
pub async fn apply_result(engine: &PaymentEngine, notice: PaymentResultNotice) -> Result<Payment> {
    info!(
        payment_id = %notice.payment_id,
        status = %notice.status,
        "payment result notification received"
    );

    if notice.status == SUCCESS_STATUS {
        engine.complete(&notice.payment_id).await
    } else {
        if let Some(code) = &notice.error_code {
            warn!(
                payment_id = %notice.payment_id,
                error_code = %code,
                error_message = notice.error_message.as_deref().unwrap_or(""),
                "provider reported payment failure"
            );
        }
        engine.fail(&notice.payment_id).await
    }
}
