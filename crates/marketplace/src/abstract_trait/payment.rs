use crate::domain::{requests::payment::CreateTransactionRequest, response::payment::SnapTokenResponse};
use async_trait::async_trait;
use shared::{domain::responses::ApiResponse, errors::ServiceError};
use std::sync::Arc;

pub type DynPaymentGateway = Arc<dyn PaymentGatewayTrait + Send + Sync>;
pub type DynPaymentService = Arc<dyn PaymentServiceTrait + Send + Sync>;

/// Remote checkout provider. Failures surface as `ServiceError::Gateway`.
#[async_trait]
pub trait PaymentGatewayTrait {
    async fn create_snap_token(
        &self,
        req: &CreateTransactionRequest,
    ) -> Result<SnapTokenResponse, ServiceError>;
}

#[async_trait]
pub trait PaymentServiceTrait {
    async fn create_transaction(
        &self,
        req: &CreateTransactionRequest,
    ) -> Result<ApiResponse<SnapTokenResponse>, ServiceError>;
}
