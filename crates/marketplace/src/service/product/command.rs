use crate::{
    abstract_trait::{
        product::{
            repository::{DynProductCommandRepository, DynProductQueryRepository},
            service::ProductCommandServiceTrait,
        },
        user::repository::DynUserQueryRepository,
    },
    domain::{
        requests::product::{
            CreateProductRequest, CreateReviewRecord, CreateReviewRequest, UpdateProductRequest,
        },
        response::product::{ProductResponse, ReviewResponse},
    },
    model::{product::Product, user::User},
    service::{load_actor, or_not_found},
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use shared::{
    domain::responses::ApiResponse,
    errors::ServiceError,
    utils::{Method, ServiceTracer},
};
use tracing::{Instrument, info};

pub struct ProductCommandServiceDeps {
    pub query: DynProductQueryRepository,
    pub command: DynProductCommandRepository,
    pub users: DynUserQueryRepository,
}

#[derive(Clone)]
pub struct ProductCommandService {
    query: DynProductQueryRepository,
    command: DynProductCommandRepository,
    users: DynUserQueryRepository,
    tracer: ServiceTracer,
}

fn ensure_owner(actor: &User, product: &Product) -> Result<(), ServiceError> {
    if actor.is_admin() || actor.user_id == product.seller_id {
        Ok(())
    } else {
        Err(ServiceError::Forbidden(
            "Only the product's seller can change it".into(),
        ))
    }
}

impl ProductCommandService {
    pub fn new(deps: ProductCommandServiceDeps, registry: &mut Registry) -> Self {
        let ProductCommandServiceDeps {
            query,
            command,
            users,
        } = deps;

        Self {
            query,
            command,
            users,
            tracer: ServiceTracer::new("product_command_service", registry),
        }
    }

    async fn find_existing(&self, id: i32) -> Result<Product, ServiceError> {
        self.query
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Product not found".into()))
    }
}

#[async_trait]
impl ProductCommandServiceTrait for ProductCommandService {
    async fn create_product(
        &self,
        actor_id: i32,
        req: &CreateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        let ctx = self.tracer.start("create_product");

        let result = async {
            let actor = load_actor(&self.users, actor_id).await?;
            let seller_id = req.seller_id.unwrap_or(actor.user_id);

            if seller_id != actor.user_id && !actor.is_admin() {
                return Err(ServiceError::Forbidden(
                    "Only admins can list products for another seller".into(),
                ));
            }

            let seller = self
                .users
                .find_by_id(seller_id)
                .await?
                .ok_or_else(|| ServiceError::validation("Seller not found"))?;

            if !seller.can_sell() {
                return Err(ServiceError::Forbidden(
                    "Store must be approved before listing products".into(),
                ));
            }

            let record = req
                .clone()
                .into_record(seller.user_id)
                .map_err(ServiceError::validation)?;

            let product = self.command.create_product(&record).await?;
            info!(
                "🍱 Seller {} listed product {} ({} in stock)",
                seller.user_id, product.product_id, product.stock
            );

            Ok::<_, ServiceError>(ApiResponse::success(
                "Product created successfully",
                ProductResponse::from(product),
            ))
        }
        .instrument(ctx.span.clone())
        .await;

        self.tracer
            .finish(&ctx, Method::Post, result, "Product created successfully")
    }

    async fn update_product(
        &self,
        actor_id: i32,
        id: i32,
        req: &UpdateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        let ctx = self.tracer.start("update_product");

        let result = async {
            let actor = load_actor(&self.users, actor_id).await?;
            let existing = self.find_existing(id).await?;
            ensure_owner(&actor, &existing)?;

            let record = req
                .into_patch(&existing)
                .map_err(ServiceError::validation)?;

            let product = self
                .command
                .update_product(&record)
                .await
                .map_err(or_not_found("Product"))?;

            Ok::<_, ServiceError>(ApiResponse::success(
                "Product updated successfully",
                ProductResponse::from(product),
            ))
        }
        .instrument(ctx.span.clone())
        .await;

        self.tracer
            .finish(&ctx, Method::Put, result, "Product updated successfully")
    }

    async fn delete_product(&self, actor_id: i32, id: i32) -> Result<(), ServiceError> {
        let ctx = self.tracer.start("delete_product");

        let result = async {
            let actor = load_actor(&self.users, actor_id).await?;
            let existing = self.find_existing(id).await?;
            ensure_owner(&actor, &existing)?;

            self.command
                .delete_product(id)
                .await
                .map_err(or_not_found("Product"))
        }
        .instrument(ctx.span.clone())
        .await;

        self.tracer
            .finish(&ctx, Method::Delete, result, "Product deleted successfully")
    }

    async fn add_review(
        &self,
        actor_id: i32,
        product_id: i32,
        req: &CreateReviewRequest,
    ) -> Result<ApiResponse<ReviewResponse>, ServiceError> {
        let ctx = self.tracer.start("add_review");

        let result = async {
            let rating = req
                .rating
                .filter(|r| (1..=5).contains(r))
                .ok_or_else(|| ServiceError::validation("Rating must be between 1 and 5"))?;

            let comment = req
                .comment
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .ok_or_else(|| ServiceError::validation("Comment is required"))?;

            load_actor(&self.users, actor_id).await?;
            self.find_existing(product_id).await?;

            let review = self
                .command
                .create_review(&CreateReviewRecord {
                    product_id,
                    user_id: actor_id,
                    rating,
                    comment: comment.to_string(),
                })
                .await
                .map_err(or_not_found("Product"))?;

            Ok::<_, ServiceError>(ApiResponse::success(
                "Review added successfully",
                ReviewResponse::from(review),
            ))
        }
        .instrument(ctx.span.clone())
        .await;

        self.tracer
            .finish(&ctx, Method::Post, result, "Review added successfully")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        abstract_trait::product::repository::ProductCommandRepositoryTrait,
        domain::requests::product::{CreateProductRecord, UpdateProductRecord},
        model::{
            product::{Review, sample_product},
            user::{StoreStatus, UserRole, sample_user},
        },
        testing::InMemory,
    };
    use shared::errors::RepositoryError;
    use std::sync::Arc;

    fn service(mem: &InMemory) -> ProductCommandService {
        let mut registry = Registry::default();
        ProductCommandService::new(
            ProductCommandServiceDeps {
                query: Arc::new(mem.clone()),
                command: Arc::new(mem.clone()),
                users: Arc::new(mem.clone()),
            },
            &mut registry,
        )
    }

    fn listing() -> CreateProductRequest {
        CreateProductRequest {
            name: "Croissant sisa pagi".into(),
            description: None,
            image_url: None,
            price: 20_000,
            discount_price: Some(8_000),
            original_price: None,
            stock: Some(6),
            expired_date: "2030-01-01T18:00:00Z".into(),
            pickup_location: Some("Bandung".into()),
            seller_id: None,
            is_available: None,
            category: Some("roti".into()),
            food_status: None,
            storage: None,
            suggestion: None,
            checklist: Some(vec!["masih segar".into()]),
            halal: Some("Halal MUI".into()),
        }
    }

    #[tokio::test]
    async fn approved_seller_lists_product_for_themselves() {
        let mem =
            InMemory::default().with_user(sample_user(2, UserRole::Seller, StoreStatus::Approved));
        let svc = service(&mem);

        let res = svc.create_product(2, &listing()).await.unwrap();

        assert_eq!(res.data.seller_id, 2);
        assert_eq!(res.data.stock, 6);
        assert_eq!(res.data.halal.as_deref(), Some("Halal MUI"));
    }

    #[tokio::test]
    async fn unapproved_store_cannot_list() {
        let mem =
            InMemory::default().with_user(sample_user(2, UserRole::Seller, StoreStatus::Pending));
        let svc = service(&mem);

        let err = svc.create_product(2, &listing()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));
    }

    #[tokio::test]
    async fn unknown_seller_and_bad_dates_are_validation_errors() {
        let mem =
            InMemory::default().with_user(sample_user(1, UserRole::Admin, StoreStatus::Pending));
        let svc = service(&mem);

        let mut req = listing();
        req.seller_id = Some(404);
        let err = svc.create_product(1, &req).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        let mut req = listing();
        req.expired_date = "besok".into();
        let err = svc.create_product(1, &req).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn other_sellers_cannot_edit_or_delete() {
        let mem = InMemory::default()
            .with_user(sample_user(2, UserRole::Seller, StoreStatus::Approved))
            .with_user(sample_user(3, UserRole::Seller, StoreStatus::Approved))
            .with_product(sample_product(1, 2, 5));
        let svc = service(&mem);

        let req = UpdateProductRequest {
            stock: Some(0),
            ..Default::default()
        };
        let err = svc.update_product(3, 1, &req).await.unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));

        let err = svc.delete_product(3, 1).await.unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));

        let res = svc.update_product(2, 1, &req).await.unwrap();
        assert_eq!(res.data.stock, 0);

        let err = svc.delete_product(2, 42).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    /// Sells two units between the service's read and its write.
    struct CheckoutDuringEdit {
        mem: InMemory,
    }

    #[async_trait]
    impl ProductCommandRepositoryTrait for CheckoutDuringEdit {
        async fn create_product(
            &self,
            req: &CreateProductRecord,
        ) -> Result<Product, RepositoryError> {
            self.mem.create_product(req).await
        }

        async fn update_product(
            &self,
            req: &UpdateProductRecord,
        ) -> Result<Product, RepositoryError> {
            if let Some(product) = self
                .mem
                .lock()
                .products
                .iter_mut()
                .find(|p| p.product_id == req.product_id)
            {
                product.stock -= 2;
            }
            self.mem.update_product(req).await
        }

        async fn delete_product(&self, id: i32) -> Result<(), RepositoryError> {
            self.mem.delete_product(id).await
        }

        async fn create_review(&self, req: &CreateReviewRecord) -> Result<Review, RepositoryError> {
            self.mem.create_review(req).await
        }
    }

    #[tokio::test]
    async fn rename_does_not_undo_concurrent_checkout() {
        let mem = InMemory::default()
            .with_user(sample_user(2, UserRole::Seller, StoreStatus::Approved))
            .with_product(sample_product(1, 2, 5));
        let mut registry = Registry::default();
        let svc = ProductCommandService::new(
            ProductCommandServiceDeps {
                query: Arc::new(mem.clone()),
                command: Arc::new(CheckoutDuringEdit { mem: mem.clone() }),
                users: Arc::new(mem.clone()),
            },
            &mut registry,
        );

        let req = UpdateProductRequest {
            name: Some("Nasi Box Spesial".into()),
            ..Default::default()
        };
        let res = svc.update_product(2, 1, &req).await.unwrap();

        assert_eq!(res.data.name, "Nasi Box Spesial");
        assert_eq!(res.data.stock, 3);
        assert_eq!(mem.stock_of(1), Some(3));
    }

    #[tokio::test]
    async fn review_is_attributed_to_caller() {
        let mem = InMemory::default()
            .with_user(sample_user(2, UserRole::Seller, StoreStatus::Approved))
            .with_user(sample_user(5, UserRole::Buyer, StoreStatus::Pending))
            .with_product(sample_product(1, 2, 5));
        let svc = service(&mem);

        let res = svc
            .add_review(
                5,
                1,
                &CreateReviewRequest {
                    rating: Some(4),
                    comment: Some("Enak".into()),
                },
            )
            .await
            .unwrap();
        assert_eq!(res.data.user_id, 5);
        assert_eq!(res.data.user_name.as_deref(), Some("user-5"));

        let err = svc
            .add_review(
                5,
                1,
                &CreateReviewRequest {
                    rating: Some(4),
                    comment: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        let err = svc
            .add_review(
                5,
                77,
                &CreateReviewRequest {
                    rating: Some(5),
                    comment: Some("?".into()),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
