use crate::{
    abstract_trait::{
        product::{repository::DynProductQueryRepository, service::ProductQueryServiceTrait},
        user::repository::DynUserQueryRepository,
    },
    domain::{
        requests::product::FindAllProducts,
        response::product::{ProductDetailResponse, ProductResponse},
    },
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use shared::{
    domain::responses::{ApiResponse, ApiResponsePagination, Pagination},
    errors::ServiceError,
    utils::{Method, ServiceTracer},
};
use tracing::Instrument;

pub struct ProductQueryServiceDeps {
    pub query: DynProductQueryRepository,
    pub users: DynUserQueryRepository,
}

#[derive(Clone)]
pub struct ProductQueryService {
    query: DynProductQueryRepository,
    users: DynUserQueryRepository,
    tracer: ServiceTracer,
}

impl ProductQueryService {
    pub fn new(deps: ProductQueryServiceDeps, registry: &mut Registry) -> Self {
        Self {
            query: deps.query,
            users: deps.users,
            tracer: ServiceTracer::new("product_query_service", registry),
        }
    }
}

#[async_trait]
impl ProductQueryServiceTrait for ProductQueryService {
    async fn find_all(
        &self,
        req: &FindAllProducts,
    ) -> Result<ApiResponsePagination<Vec<ProductResponse>>, ServiceError> {
        let ctx = self.tracer.start("find_all_products");

        let result = async {
            let (products, total) = self.query.find_all(req).await?;
            let data = products.into_iter().map(ProductResponse::from).collect();

            Ok::<_, ServiceError>(ApiResponsePagination::success(
                "Products retrieved successfully",
                data,
                Pagination::new(req.page, req.page_size, total),
            ))
        }
        .instrument(ctx.span.clone())
        .await;

        self.tracer
            .finish(&ctx, Method::Get, result, "Products retrieved successfully")
    }

    async fn find_by_id(
        &self,
        id: i32,
    ) -> Result<ApiResponse<ProductDetailResponse>, ServiceError> {
        let ctx = self.tracer.start("find_product_by_id");

        let result = async {
            let product = self
                .query
                .find_by_id(id)
                .await?
                .ok_or_else(|| ServiceError::NotFound("Product not found".into()))?;

            let seller = self.users.find_by_id(product.seller_id).await?;
            let reviews = self.query.find_reviews(product.product_id).await?;

            Ok::<_, ServiceError>(ApiResponse::success(
                "Product retrieved successfully",
                ProductDetailResponse::new(product, seller, reviews),
            ))
        }
        .instrument(ctx.span.clone())
        .await;

        self.tracer
            .finish(&ctx, Method::Get, result, "Product retrieved successfully")
    }
}
