use crate::{
    abstract_trait::user::{repository::DynUserQueryRepository, service::UserQueryServiceTrait},
    domain::{
        requests::user::{FindAllUsers, FindSellers},
        response::user::UserResponse,
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

#[derive(Clone)]
pub struct UserQueryService {
    query: DynUserQueryRepository,
    tracer: ServiceTracer,
}

impl UserQueryService {
    pub fn new(query: DynUserQueryRepository, registry: &mut Registry) -> Self {
        Self {
            query,
            tracer: ServiceTracer::new("user_query_service", registry),
        }
    }
}

#[async_trait]
impl UserQueryServiceTrait for UserQueryService {
    async fn find_all(
        &self,
        req: &FindAllUsers,
    ) -> Result<ApiResponsePagination<Vec<UserResponse>>, ServiceError> {
        let ctx = self.tracer.start("find_all_users");

        let result = async {
            let (users, total) = self.query.find_all(req).await?;
            let data = users.into_iter().map(UserResponse::from).collect();

            Ok::<_, ServiceError>(ApiResponsePagination::success(
                "Users retrieved successfully",
                data,
                Pagination::new(req.page, req.page_size, total),
            ))
        }
        .instrument(ctx.span.clone())
        .await;

        self.tracer
            .finish(&ctx, Method::Get, result, "Users retrieved successfully")
    }

    async fn find_sellers(
        &self,
        req: &FindSellers,
    ) -> Result<ApiResponsePagination<Vec<UserResponse>>, ServiceError> {
        let ctx = self.tracer.start("find_sellers");

        let result = async {
            let (sellers, total) = self.query.find_sellers(req).await?;
            let data = sellers.into_iter().map(UserResponse::from).collect();

            Ok::<_, ServiceError>(ApiResponsePagination::success(
                "Sellers retrieved successfully",
                data,
                Pagination::new(req.page, req.page_size, total),
            ))
        }
        .instrument(ctx.span.clone())
        .await;

        self.tracer
            .finish(&ctx, Method::Get, result, "Sellers retrieved successfully")
    }

    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<UserResponse>, ServiceError> {
        let ctx = self.tracer.start("find_user_by_id");

        let result = async {
            let user = self
                .query
                .find_by_id(id)
                .await?
                .ok_or_else(|| ServiceError::NotFound("User not found".into()))?;

            Ok::<_, ServiceError>(ApiResponse::success(
                "User retrieved successfully",
                UserResponse::from(user),
            ))
        }
        .instrument(ctx.span.clone())
        .await;

        self.tracer
            .finish(&ctx, Method::Get, result, "User retrieved successfully")
    }
}
