use crate::domain::payment::Payment;
use crate::domain::provider::{PaymentProvider, ProviderAdapter};
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::sleep;
use tracing::info;

/// Simulated latency of one provider API round trip.
const SIMULATED_CALL: Duration = Duration::from_millis(50);

/// Simulated PARAM gateway.
///
/// Stands in for the real API integration: every charge and refund succeeds
/// after a short delay.
#[derive(Debug, Default, Clone, Copy)]
pub struct ParamAdapter;

#[async_trait]
impl ProviderAdapter for ParamAdapter {
    fn provider(&self) -> PaymentProvider {
        PaymentProvider::Param
    }

    async fn charge(&self, payment: &Payment) -> bool {
        info!(payment_id = %payment.id(), "PARAM charge started");
        sleep(SIMULATED_CALL).await;
        true
    }

    async fn refund(&self, payment: &Payment) -> bool {
        info!(payment_id = %payment.id(), "PARAM refund started");
        sleep(SIMULATED_CALL).await;
        true
    }
}

/// Simulated Papara gateway.
#[derive(Debug, Default, Clone, Copy)]
pub struct PaparaAdapter;

#[async_trait]
impl ProviderAdapter for PaparaAdapter {
    fn provider(&self) -> PaymentProvider {
        PaymentProvider::Papara
    }

    async fn charge(&self, payment: &Payment) -> bool {
        info!(payment_id = %payment.id(), "Papara charge started");
        sleep(SIMULATED_CALL).await;
        true
    }

    async fn refund(&self, payment: &Payment) -> bool {
        info!(payment_id = %payment.id(), "Papara refund started");
        sleep(SIMULATED_CALL).await;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::PaymentRequest;
    use rust_decimal_macros::dec;

    fn payment(provider: PaymentProvider) -> Payment {
        PaymentRequest {
            amount: dec!(10.0),
            currency: "TRY".to_string(),
            provider: Some(provider),
            description: None,
        }
        .into_payment()
        .unwrap()
    }

    #[tokio::test]
    async fn test_adapters_declare_their_provider() {
        assert_eq!(ParamAdapter.provider(), PaymentProvider::Param);
        assert_eq!(PaparaAdapter.provider(), PaymentProvider::Papara);
    }

    #[tokio::test]
    async fn test_simulated_calls_succeed() {
        let param_payment = payment(PaymentProvider::Param);
        assert!(ParamAdapter.charge(&param_payment).await);
        assert!(ParamAdapter.refund(&param_payment).await);

        let papara_payment = payment(PaymentProvider::Papara);
        assert!(PaparaAdapter.charge(&papara_payment).await);
        assert!(PaparaAdapter.refund(&papara_payment).await);
    }
}
