use crate::{
    abstract_trait::{
        order::{
            repository::{DynOrderCommandRepository, DynOrderQueryRepository},
            service::{DynOrderCommandService, DynOrderQueryService},
        },
        order_detail::{
            repository::{DynOrderDetailCommandRepository, DynOrderDetailQueryRepository},
            service::{DynOrderDetailCommandService, DynOrderDetailQueryService},
        },
        payment::{DynPaymentGateway, DynPaymentService},
        product::{
            repository::{DynProductCommandRepository, DynProductQueryRepository},
            service::{DynProductCommandService, DynProductQueryService},
        },
        upload::DynUploadService,
        user::{
            repository::{DynUserCommandRepository, DynUserQueryRepository},
            service::{DynAuthService, DynUserCommandService, DynUserQueryService},
        },
    },
    repository::{
        order::{OrderCommandRepository, OrderQueryRepository},
        order_detail::{OrderDetailCommandRepository, OrderDetailQueryRepository},
        product::{ProductCommandRepository, ProductQueryRepository},
        user::{UserCommandRepository, UserQueryRepository},
    },
    service::{
        order::{
            OrderCommandService, OrderCommandServiceDeps, OrderQueryService, OrderQueryServiceDeps,
        },
        order_detail::{
            OrderDetailCommandService, OrderDetailCommandServiceDeps, OrderDetailQueryService,
        },
        payment::PaymentService,
        product::{
            ProductCommandService, ProductCommandServiceDeps, ProductQueryService,
            ProductQueryServiceDeps,
        },
        upload::UploadService,
        user::{
            AuthService, AuthServiceDeps, UserCommandService, UserCommandServiceDeps,
            UserQueryService,
        },
    },
};
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::{DynHashing, DynJwtService},
    config::{ConnectionPool, UploadConfig},
};
use std::{fmt, sync::Arc};

/// Storage backends for every entity, injected into the services.
#[derive(Clone)]
pub struct Repositories {
    pub user_query: DynUserQueryRepository,
    pub user_command: DynUserCommandRepository,
    pub product_query: DynProductQueryRepository,
    pub product_command: DynProductCommandRepository,
    pub order_query: DynOrderQueryRepository,
    pub order_command: DynOrderCommandRepository,
    pub order_detail_query: DynOrderDetailQueryRepository,
    pub order_detail_command: DynOrderDetailCommandRepository,
}

impl Repositories {
    pub fn postgres(pool: ConnectionPool) -> Self {
        Self {
            user_query: Arc::new(UserQueryRepository::new(pool.clone())),
            user_command: Arc::new(UserCommandRepository::new(pool.clone())),
            product_query: Arc::new(ProductQueryRepository::new(pool.clone())),
            product_command: Arc::new(ProductCommandRepository::new(pool.clone())),
            order_query: Arc::new(OrderQueryRepository::new(pool.clone())),
            order_command: Arc::new(OrderCommandRepository::new(pool.clone())),
            order_detail_query: Arc::new(OrderDetailQueryRepository::new(pool.clone())),
            order_detail_command: Arc::new(OrderDetailCommandRepository::new(pool)),
        }
    }
}

#[derive(Clone)]
pub struct DependenciesInject {
    pub user_query: DynUserQueryService,
    pub user_command: DynUserCommandService,
    pub auth: DynAuthService,
    pub product_query: DynProductQueryService,
    pub product_command: DynProductCommandService,
    pub order_query: DynOrderQueryService,
    pub order_command: DynOrderCommandService,
    pub order_detail_query: DynOrderDetailQueryService,
    pub order_detail_command: DynOrderDetailCommandService,
    pub payment: DynPaymentService,
    pub upload: DynUploadService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("user_query", &"UserQueryService")
            .field("user_command", &"UserCommandService")
            .field("auth", &"AuthService")
            .field("product_query", &"ProductQueryService")
            .field("product_command", &"ProductCommandService")
            .field("order_query", &"OrderQueryService")
            .field("order_command", &"OrderCommandService")
            .field("order_detail_query", &"OrderDetailQueryService")
            .field("order_detail_command", &"OrderDetailCommandService")
            .field("payment", &"PaymentService")
            .field("upload", &"UploadService")
            .finish()
    }
}

pub struct DependenciesInjectDeps {
    pub repositories: Repositories,
    pub gateway: DynPaymentGateway,
    pub hashing: DynHashing,
    pub jwt_config: DynJwtService,
    pub upload: UploadConfig,
}

impl DependenciesInject {
    pub fn new(deps: DependenciesInjectDeps, registry: &mut Registry) -> Self {
        let DependenciesInjectDeps {
            repositories: repos,
            gateway,
            hashing,
            jwt_config,
            upload,
        } = deps;

        let user_query = Arc::new(UserQueryService::new(repos.user_query.clone(), registry));

        let user_command = Arc::new(UserCommandService::new(
            UserCommandServiceDeps {
                query: repos.user_query.clone(),
                command: repos.user_command.clone(),
                hashing: hashing.clone(),
            },
            registry,
        ));

        let auth = Arc::new(AuthService::new(
            AuthServiceDeps {
                query: repos.user_query.clone(),
                hashing,
                jwt_config,
            },
            registry,
        ));

        let product_query = Arc::new(ProductQueryService::new(
            ProductQueryServiceDeps {
                query: repos.product_query.clone(),
                users: repos.user_query.clone(),
            },
            registry,
        ));

        let product_command = Arc::new(ProductCommandService::new(
            ProductCommandServiceDeps {
                query: repos.product_query.clone(),
                command: repos.product_command.clone(),
                users: repos.user_query.clone(),
            },
            registry,
        ));

        let order_query = Arc::new(OrderQueryService::new(
            OrderQueryServiceDeps {
                query: repos.order_query.clone(),
                details: repos.order_detail_query.clone(),
            },
            registry,
        ));

        let order_command = Arc::new(OrderCommandService::new(
            OrderCommandServiceDeps {
                query: repos.order_query.clone(),
                command: repos.order_command.clone(),
            },
            registry,
        ));

        let order_detail_query = Arc::new(OrderDetailQueryService::new(
            repos.order_detail_query.clone(),
            registry,
        ));

        let order_detail_command = Arc::new(OrderDetailCommandService::new(
            OrderDetailCommandServiceDeps {
                query: repos.order_detail_query.clone(),
                command: repos.order_detail_command.clone(),
            },
            registry,
        ));

        let payment = Arc::new(PaymentService::new(gateway, registry));
        let upload = Arc::new(UploadService::new(&upload, registry));

        Self {
            user_query,
            user_command,
            auth,
            product_query,
            product_command,
            order_query,
            order_command,
            order_detail_query,
            order_detail_command,
            payment,
            upload,
        }
    }
}
