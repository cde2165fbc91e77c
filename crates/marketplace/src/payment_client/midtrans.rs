use crate::{
    abstract_trait::payment::PaymentGatewayTrait,
    domain::{requests::payment::CreateTransactionRequest, response::payment::SnapTokenResponse},
};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::{config::PaymentConfig, errors::ServiceError};
use std::time::Duration;
use tracing::{error, info};

const SANDBOX_SNAP_URL: &str = "https://app.sandbox.midtrans.com/snap/v1/transactions";
const PRODUCTION_SNAP_URL: &str = "https://app.midtrans.com/snap/v1/transactions";

#[derive(Debug, Serialize)]
struct SnapRequest<'a> {
    transaction_details: TransactionDetails<'a>,
    customer_details: CustomerDetails<'a>,
}

#[derive(Debug, Serialize)]
struct TransactionDetails<'a> {
    order_id: &'a str,
    gross_amount: i64,
}

#[derive(Debug, Serialize)]
struct CustomerDetails<'a> {
    first_name: &'a str,
    email: &'a str,
}

#[derive(Debug, Deserialize)]
struct SnapResponse {
    token: String,
    redirect_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SnapErrorResponse {
    #[serde(default)]
    error_messages: Vec<String>,
}

/// Snap checkout client. Authenticates with the server key as the basic-auth user.
#[derive(Clone)]
pub struct MidtransSnapClient {
    client: Client,
    server_key: String,
    endpoint: String,
}

impl std::fmt::Debug for MidtransSnapClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MidtransSnapClient")
            .field("endpoint", &self.endpoint)
            .field("server_key", &"<redacted>")
            .finish()
    }
}

impl MidtransSnapClient {
    pub fn new(config: &PaymentConfig) -> Result<Self, ServiceError> {
        let endpoint = if config.is_production {
            PRODUCTION_SNAP_URL
        } else {
            SANDBOX_SNAP_URL
        };

        Self::with_endpoint(&config.server_key, endpoint)
    }

    pub fn with_endpoint(server_key: &str, endpoint: &str) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| ServiceError::Internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            server_key: server_key.to_string(),
            endpoint: endpoint.to_string(),
        })
    }
}

#[async_trait]
impl PaymentGatewayTrait for MidtransSnapClient {
    async fn create_snap_token(
        &self,
        req: &CreateTransactionRequest,
    ) -> Result<SnapTokenResponse, ServiceError> {
        if self.server_key.is_empty() {
            return Err(ServiceError::Gateway(
                "Payment gateway is not configured".into(),
            ));
        }

        let body = SnapRequest {
            transaction_details: TransactionDetails {
                order_id: &req.order_id,
                gross_amount: req.gross_amount,
            },
            customer_details: CustomerDetails {
                first_name: &req.customer_name,
                email: &req.customer_email,
            },
        };

        let response = self
            .client
            .post(&self.endpoint)
            .basic_auth(&self.server_key, Some(""))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("❌ Snap request for {} failed: {e}", req.order_id);
                ServiceError::Gateway(format!("Payment gateway unreachable: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<SnapErrorResponse>()
                .await
                .map(|e| e.error_messages.join("; "))
                .unwrap_or_default();

            error!(
                "❌ Snap rejected transaction {} with {}: {}",
                req.order_id, status, detail
            );
            return Err(ServiceError::Gateway(format!(
                "Payment gateway returned {status}: {detail}"
            )));
        }

        let snap = response.json::<SnapResponse>().await.map_err(|e| {
            ServiceError::Gateway(format!("Unexpected payment gateway response: {e}"))
        })?;

        info!("💳 Snap token issued for transaction {}", req.order_id);

        Ok(SnapTokenResponse {
            token: snap.token,
            redirect_url: snap.redirect_url,
        })
    }
}
