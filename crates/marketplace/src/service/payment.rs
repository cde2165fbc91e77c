use crate::{
    abstract_trait::payment::{DynPaymentGateway, PaymentServiceTrait},
    domain::{requests::payment::CreateTransactionRequest, response::payment::SnapTokenResponse},
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use shared::{
    domain::responses::ApiResponse,
    errors::ServiceError,
    utils::{Method, ServiceTracer},
};
use tracing::{Instrument, info};
use validator::Validate;

#[derive(Clone)]
pub struct PaymentService {
    gateway: DynPaymentGateway,
    tracer: ServiceTracer,
}

impl PaymentService {
    pub fn new(gateway: DynPaymentGateway, registry: &mut Registry) -> Self {
        Self {
            gateway,
            tracer: ServiceTracer::new("payment_service", registry),
        }
    }
}

#[async_trait]
impl PaymentServiceTrait for PaymentService {
    async fn create_transaction(
        &self,
        req: &CreateTransactionRequest,
    ) -> Result<ApiResponse<SnapTokenResponse>, ServiceError> {
        let ctx = self.tracer.start("create_transaction");

        let result = async {
            req.validate()?;

            let snap = self.gateway.create_snap_token(req).await?;
            info!(
                "💳 Checkout token ready for {} ({} IDR)",
                req.order_id, req.gross_amount
            );

            Ok::<_, ServiceError>(ApiResponse::success("Snap token created", snap))
        }
        .instrument(ctx.span.clone())
        .await;

        self.tracer
            .finish(&ctx, Method::Post, result, "Snap token created")
    }
}
