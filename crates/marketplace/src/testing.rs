//! In-memory repositories used by service and router tests.

use crate::{
    abstract_trait::{
        order::repository::{OrderCommandRepositoryTrait, OrderQueryRepositoryTrait},
        order_detail::repository::{
            OrderDetailCommandRepositoryTrait, OrderDetailQueryRepositoryTrait,
        },
        payment::PaymentGatewayTrait,
        product::repository::{ProductCommandRepositoryTrait, ProductQueryRepositoryTrait},
        user::repository::{UserCommandRepositoryTrait, UserQueryRepositoryTrait},
    },
    di::{DependenciesInject, DependenciesInjectDeps, Repositories},
    domain::{
        requests::{
            order::{CreateOrderRecord, FindAllOrders},
            order_detail::UpdateOrderDetailRecord,
            payment::CreateTransactionRequest,
            product::{
                CreateProductRecord, CreateReviewRecord, FindAllProducts, UpdateProductRecord,
            },
            user::{CreateUserRecord, FindAllUsers, FindSellers, UpdateUserRecord},
        },
        response::payment::SnapTokenResponse,
    },
    model::{
        order::{DeliveryStatus, Order, OrderStatus, OrderStatusSummary, OrderTracking},
        order_detail::{OrderDetail, line_total},
        product::{Product, Review, remaining_stock},
        user::{StoreStatus, User},
    },
    state::AppState,
};
use async_trait::async_trait;
use chrono::Utc;
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::DynJwtService,
    config::{Hashing, JwtConfig, UploadConfig},
    domain::responses::Pagination,
    errors::{RepositoryError, ServiceError},
    utils::SystemMetrics,
};
use sqlx::postgres::PgPoolOptions;
use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

#[derive(Default)]
pub struct MemoryStore {
    pub users: Vec<User>,
    pub products: Vec<Product>,
    pub reviews: Vec<Review>,
    pub orders: Vec<Order>,
    pub details: Vec<OrderDetail>,
    pub tracking: Vec<OrderTracking>,
    next_id: i32,
}

impl MemoryStore {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        1000 + self.next_id
    }
}

#[derive(Clone, Default)]
pub struct InMemory {
    store: Arc<Mutex<MemoryStore>>,
}

fn page<T: Clone>(items: Vec<T>, page: i32, page_size: i32) -> (Vec<T>, i64) {
    let total = items.len() as i64;
    let rows = items
        .into_iter()
        .skip(Pagination::offset(page, page_size) as usize)
        .take(page_size as usize)
        .collect();
    (rows, total)
}

impl InMemory {
    pub fn lock(&self) -> MutexGuard<'_, MemoryStore> {
        self.store.lock().expect("memory store poisoned")
    }

    pub fn with_user(self, user: User) -> Self {
        self.lock().users.push(user);
        self
    }

    pub fn with_product(self, product: Product) -> Self {
        self.lock().products.push(product);
        self
    }

    pub fn with_order(self, order: Order) -> Self {
        self.lock().orders.push(order);
        self
    }

    pub fn with_detail(self, detail: OrderDetail) -> Self {
        self.lock().details.push(detail);
        self
    }

    pub fn stock_of(&self, product_id: i32) -> Option<i32> {
        self.lock()
            .products
            .iter()
            .find(|p| p.product_id == product_id)
            .map(|p| p.stock)
    }

    pub fn order(&self, order_id: i32) -> Option<Order> {
        self.lock()
            .orders
            .iter()
            .find(|o| o.order_id == order_id)
            .cloned()
    }

    fn restore_stock(store: &mut MemoryStore, order: &Order) -> i32 {
        let Some(product_id) = order.product_id else {
            return 0;
        };

        match store.products.iter_mut().find(|p| p.product_id == product_id) {
            Some(product) => {
                product.stock += order.quantity;
                order.quantity
            }
            None => 0,
        }
    }
}

#[async_trait]
impl UserQueryRepositoryTrait for InMemory {
    async fn find_all(&self, req: &FindAllUsers) -> Result<(Vec<User>, i64), RepositoryError> {
        let users: Vec<User> = self
            .lock()
            .users
            .iter()
            .filter(|u| {
                req.email
                    .as_deref()
                    .is_none_or(|e| u.email.eq_ignore_ascii_case(e))
            })
            .filter(|u| req.role.as_deref().is_none_or(|r| u.role == r))
            .cloned()
            .collect();
        Ok(page(users, req.page, req.page_size))
    }

    async fn find_sellers(&self, req: &FindSellers) -> Result<(Vec<User>, i64), RepositoryError> {
        let sellers: Vec<User> = self
            .lock()
            .users
            .iter()
            .filter(|u| u.role == "seller")
            .filter(|u| {
                req.search.as_deref().is_none_or(|s| {
                    let s = s.to_lowercase();
                    u.name.to_lowercase().contains(&s)
                        || u.store_name
                            .as_deref()
                            .is_some_and(|n| n.to_lowercase().contains(&s))
                })
            })
            .cloned()
            .collect();
        Ok(page(sellers, req.page, req.page_size))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepositoryError> {
        Ok(self.lock().users.iter().find(|u| u.user_id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }
}

#[async_trait]
impl UserCommandRepositoryTrait for InMemory {
    async fn create_user(&self, req: &CreateUserRecord) -> Result<User, RepositoryError> {
        let mut store = self.lock();
        if store
            .users
            .iter()
            .any(|u| u.email.eq_ignore_ascii_case(&req.email))
        {
            return Err(RepositoryError::AlreadyExists("users_email_key".into()));
        }

        let user = User {
            user_id: store.next_id(),
            name: req.name.clone(),
            email: req.email.clone(),
            password: req.password.clone(),
            phone: req.phone.clone(),
            address: req.address.clone(),
            role: req.role.clone(),
            store_name: req.store_name.clone(),
            store_address: req.store_address.clone(),
            store_category: req.store_category.clone(),
            store_phone: req.store_phone.clone(),
            store_status: StoreStatus::Pending.to_string(),
            profile_image: req.profile_image.clone(),
            category: req.category.clone(),
            created_at: Some(Utc::now().naive_utc()),
            updated_at: Some(Utc::now().naive_utc()),
        };
        store.users.push(user.clone());
        Ok(user)
    }

    async fn update_user(&self, req: &UpdateUserRecord) -> Result<User, RepositoryError> {
        let mut store = self.lock();
        let user = store
            .users
            .iter_mut()
            .find(|u| u.user_id == req.user_id)
            .ok_or(RepositoryError::NotFound)?;

        user.name = req.name.clone();
        user.email = req.email.clone();
        user.password = req.password.clone();
        user.phone = req.phone.clone();
        user.address = req.address.clone();
        user.role = req.role.clone();
        user.store_name = req.store_name.clone();
        user.store_address = req.store_address.clone();
        user.store_category = req.store_category.clone();
        user.store_phone = req.store_phone.clone();
        user.profile_image = req.profile_image.clone();
        user.category = req.category.clone();
        Ok(user.clone())
    }

    async fn update_store_status(
        &self,
        id: i32,
        status: StoreStatus,
    ) -> Result<User, RepositoryError> {
        let mut store = self.lock();
        let user = store
            .users
            .iter_mut()
            .find(|u| u.user_id == id)
            .ok_or(RepositoryError::NotFound)?;
        user.store_status = status.to_string();
        Ok(user.clone())
    }

    async fn delete_user(&self, id: i32) -> Result<(), RepositoryError> {
        let mut store = self.lock();
        let referenced = store.products.iter().any(|p| p.seller_id == id)
            || store
                .orders
                .iter()
                .any(|o| o.buyer_id == id || o.seller_id == id);
        if referenced {
            return Err(RepositoryError::ForeignKey("products_seller_id_fkey".into()));
        }

        let before = store.users.len();
        store.users.retain(|u| u.user_id != id);
        if store.users.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for InMemory {
    async fn find_all(&self, req: &FindAllProducts) -> Result<(Vec<Product>, i64), RepositoryError> {
        let now = Utc::now().naive_utc();
        let products: Vec<Product> = self
            .lock()
            .products
            .iter()
            .filter(|p| {
                req.search
                    .as_deref()
                    .is_none_or(|s| p.name.to_lowercase().contains(&s.to_lowercase()))
            })
            .filter(|p| req.min_price.is_none_or(|min| p.price >= min))
            .filter(|p| req.max_price.is_none_or(|max| p.price <= max))
            .filter(|p| req.seller_id.is_none_or(|id| p.seller_id == id))
            .filter(|p| req.is_available.is_none_or(|a| p.is_purchasable(now) == a))
            .cloned()
            .collect();
        Ok(page(products, req.page, req.page_size))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, RepositoryError> {
        Ok(self
            .lock()
            .products
            .iter()
            .find(|p| p.product_id == id)
            .cloned())
    }

    async fn find_reviews(&self, product_id: i32) -> Result<Vec<Review>, RepositoryError> {
        let mut reviews: Vec<Review> = self
            .lock()
            .reviews
            .iter()
            .filter(|r| r.product_id == product_id)
            .cloned()
            .collect();
        reviews.reverse();
        Ok(reviews)
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for InMemory {
    async fn create_product(&self, req: &CreateProductRecord) -> Result<Product, RepositoryError> {
        let mut store = self.lock();
        if !store.users.iter().any(|u| u.user_id == req.seller_id) {
            return Err(RepositoryError::ForeignKey("products_seller_id_fkey".into()));
        }

        let product = Product {
            product_id: store.next_id(),
            name: req.name.clone(),
            description: req.description.clone(),
            image_url: req.image_url.clone(),
            price: req.price,
            discount_price: req.discount_price,
            original_price: req.original_price,
            stock: req.stock,
            expired_date: req.expired_date,
            pickup_location: req.pickup_location.clone(),
            seller_id: req.seller_id,
            is_available: req.is_available,
            category: req.category.clone(),
            food_status: req.food_status.clone(),
            storage: req.storage.clone(),
            suggestion: req.suggestion.clone(),
            checklist: req.checklist.clone(),
            halal: req.halal.clone(),
            created_at: Some(Utc::now().naive_utc()),
            updated_at: Some(Utc::now().naive_utc()),
        };
        store.products.push(product.clone());
        Ok(product)
    }

    async fn update_product(&self, req: &UpdateProductRecord) -> Result<Product, RepositoryError> {
        let mut store = self.lock();
        let product = store
            .products
            .iter_mut()
            .find(|p| p.product_id == req.product_id)
            .ok_or(RepositoryError::NotFound)?;

        if let Some(name) = &req.name {
            product.name = name.clone();
        }
        if req.description.is_some() {
            product.description = req.description.clone();
        }
        if req.image_url.is_some() {
            product.image_url = req.image_url.clone();
        }
        if let Some(price) = req.price {
            product.price = price;
        }
        if let Some(discount) = req.discount_price {
            product.discount_price = discount;
        }
        if req.original_price.is_some() {
            product.original_price = req.original_price;
        }
        if let Some(stock) = req.stock {
            product.stock = stock;
        }
        if let Some(expired_date) = req.expired_date {
            product.expired_date = expired_date;
        }
        if req.pickup_location.is_some() {
            product.pickup_location = req.pickup_location.clone();
        }
        if let Some(is_available) = req.is_available {
            product.is_available = is_available;
        }
        if req.category.is_some() {
            product.category = req.category.clone();
        }
        if req.food_status.is_some() {
            product.food_status = req.food_status.clone();
        }
        if req.storage.is_some() {
            product.storage = req.storage.clone();
        }
        if req.suggestion.is_some() {
            product.suggestion = req.suggestion.clone();
        }
        if let Some(checklist) = &req.checklist {
            product.checklist = checklist.clone();
        }
        if req.halal.is_some() {
            product.halal = req.halal.clone();
        }
        Ok(product.clone())
    }

    async fn delete_product(&self, id: i32) -> Result<(), RepositoryError> {
        let mut store = self.lock();
        let before = store.products.len();
        store.products.retain(|p| p.product_id != id);
        if store.products.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn create_review(&self, req: &CreateReviewRecord) -> Result<Review, RepositoryError> {
        let mut store = self.lock();
        let user_name = store
            .users
            .iter()
            .find(|u| u.user_id == req.user_id)
            .map(|u| u.name.clone());

        let review = Review {
            review_id: store.next_id(),
            product_id: req.product_id,
            user_id: req.user_id,
            user_name,
            rating: req.rating,
            comment: req.comment.clone(),
            created_at: Some(Utc::now().naive_utc()),
        };
        store.reviews.push(review.clone());
        Ok(review)
    }
}

#[async_trait]
impl OrderQueryRepositoryTrait for InMemory {
    async fn find_all(&self, req: &FindAllOrders) -> Result<(Vec<Order>, i64), RepositoryError> {
        let orders: Vec<Order> = self
            .lock()
            .orders
            .iter()
            .rev()
            .filter(|o| req.buyer_id.is_none_or(|id| o.buyer_id == id))
            .filter(|o| req.seller_id.is_none_or(|id| o.seller_id == id))
            .filter(|o| req.status.as_deref().is_none_or(|s| o.status == s))
            .cloned()
            .collect();
        Ok(page(orders, req.page, req.page_size))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Order>, RepositoryError> {
        Ok(self.order(id))
    }

    async fn find_tracking(&self, order_ids: &[i32]) -> Result<Vec<OrderTracking>, RepositoryError> {
        Ok(self
            .lock()
            .tracking
            .iter()
            .filter(|t| order_ids.contains(&t.order_id))
            .cloned()
            .collect())
    }

    async fn summarize_by_status(
        &self,
        seller_id: Option<i32>,
    ) -> Result<Vec<OrderStatusSummary>, RepositoryError> {
        let store = self.lock();
        let mut summary: Vec<OrderStatusSummary> = Vec::new();

        for order in store
            .orders
            .iter()
            .filter(|o| seller_id.is_none_or(|id| o.seller_id == id))
        {
            let amount: i64 = store
                .details
                .iter()
                .filter(|d| d.order_id == order.order_id)
                .map(|d| d.total_price)
                .sum();

            match summary.iter_mut().find(|s| s.status == order.status) {
                Some(entry) => {
                    entry.count += 1;
                    entry.total_amount += amount;
                }
                None => summary.push(OrderStatusSummary {
                    status: order.status.clone(),
                    count: 1,
                    total_amount: amount,
                }),
            }
        }

        summary.sort_by(|a, b| a.status.cmp(&b.status));
        Ok(summary)
    }
}

#[async_trait]
impl OrderCommandRepositoryTrait for InMemory {
    async fn create_order(
        &self,
        req: &CreateOrderRecord,
    ) -> Result<(Order, OrderDetail), RepositoryError> {
        let mut store = self.lock();

        let product = store
            .products
            .iter()
            .find(|p| p.product_id == req.product_id)
            .cloned()
            .ok_or(RepositoryError::NotFound)?;

        let left = remaining_stock(product.stock, req.quantity).ok_or(
            RepositoryError::InsufficientStock {
                available: product.stock,
                requested: req.quantity,
            },
        )?;

        let seller_name = store
            .users
            .iter()
            .find(|u| u.user_id == product.seller_id)
            .map(|u| u.name.clone());

        if let Some(p) = store
            .products
            .iter_mut()
            .find(|p| p.product_id == product.product_id)
        {
            p.stock = left;
        }

        let order = Order {
            order_id: store.next_id(),
            buyer_id: req.buyer_id,
            product_id: Some(product.product_id),
            seller_id: product.seller_id,
            quantity: req.quantity,
            delivery_method: req.delivery_method.clone(),
            pickup_time: req.pickup_time.clone(),
            delivery_address: req.delivery_address.clone(),
            delivery_fee: req.delivery_fee,
            delivery_status: DeliveryStatus::Pending.to_string(),
            status: req.status.clone(),
            notes: req.notes.clone(),
            payment_method: req.payment_method.clone(),
            created_at: Some(Utc::now().naive_utc()),
            updated_at: Some(Utc::now().naive_utc()),
        };

        let detail = OrderDetail {
            order_detail_id: store.next_id(),
            order_id: order.order_id,
            product_id: Some(product.product_id),
            product_name: product.name.clone(),
            product_image: product.image_url.clone(),
            quantity: req.quantity,
            unit_price: product.price,
            discount_price: product.discount_price,
            total_price: line_total(req.quantity, product.price, product.discount_price),
            seller_id: product.seller_id,
            seller_name,
            created_at: Some(Utc::now().naive_utc()),
        };

        store.orders.push(order.clone());
        store.details.push(detail.clone());
        Ok((order, detail))
    }

    async fn update_status(&self, id: i32, status: OrderStatus) -> Result<Order, RepositoryError> {
        let mut store = self.lock();
        let order = store
            .orders
            .iter_mut()
            .find(|o| o.order_id == id)
            .ok_or(RepositoryError::NotFound)?;

        if order.status == OrderStatus::Cancelled.as_str() {
            return Err(RepositoryError::InvalidState(
                "Order status cannot be changed once cancelled".into(),
            ));
        }

        order.status = status.to_string();
        Ok(order.clone())
    }

    async fn update_delivery_status(
        &self,
        id: i32,
        status: DeliveryStatus,
    ) -> Result<Order, RepositoryError> {
        let mut store = self.lock();
        let order = store
            .orders
            .iter_mut()
            .find(|o| o.order_id == id)
            .ok_or(RepositoryError::NotFound)?;
        order.delivery_status = status.to_string();
        let order = order.clone();

        if status.is_tracked() {
            let tracking_id = store.next_id();
            store.tracking.push(OrderTracking {
                tracking_id,
                order_id: id,
                status: status.to_string(),
                time: Utc::now().naive_utc(),
            });
        }

        Ok(order)
    }

    async fn cancel_order(&self, id: i32) -> Result<(Order, i32), RepositoryError> {
        let mut store = self.lock();
        let order = store
            .orders
            .iter()
            .find(|o| o.order_id == id)
            .cloned()
            .ok_or(RepositoryError::NotFound)?;

        if !order.status().is_ok_and(|s| s.can_cancel()) {
            return Err(RepositoryError::InvalidState(
                "Order cannot be cancelled".into(),
            ));
        }

        let restored = Self::restore_stock(&mut store, &order);

        let cancelled = store
            .orders
            .iter_mut()
            .find(|o| o.order_id == id)
            .ok_or(RepositoryError::NotFound)?;
        cancelled.status = OrderStatus::Cancelled.to_string();

        Ok((cancelled.clone(), restored))
    }

    async fn delete_order(&self, id: i32) -> Result<(), RepositoryError> {
        let mut store = self.lock();
        let order = store
            .orders
            .iter()
            .find(|o| o.order_id == id)
            .cloned()
            .ok_or(RepositoryError::NotFound)?;

        if order.status().is_ok_and(|s| s.can_cancel()) {
            Self::restore_stock(&mut store, &order);
        }

        store.orders.retain(|o| o.order_id != id);
        store.details.retain(|d| d.order_id != id);
        store.tracking.retain(|t| t.order_id != id);
        Ok(())
    }
}

#[async_trait]
impl OrderDetailQueryRepositoryTrait for InMemory {
    async fn find_all(&self, order_id: Option<i32>) -> Result<Vec<OrderDetail>, RepositoryError> {
        Ok(self
            .lock()
            .details
            .iter()
            .filter(|d| order_id.is_none_or(|id| d.order_id == id))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<OrderDetail>, RepositoryError> {
        Ok(self
            .lock()
            .details
            .iter()
            .find(|d| d.order_detail_id == id)
            .cloned())
    }

    async fn find_by_order_ids(
        &self,
        order_ids: &[i32],
    ) -> Result<Vec<OrderDetail>, RepositoryError> {
        Ok(self
            .lock()
            .details
            .iter()
            .filter(|d| order_ids.contains(&d.order_id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl OrderDetailCommandRepositoryTrait for InMemory {
    async fn update_detail(
        &self,
        req: &UpdateOrderDetailRecord,
    ) -> Result<OrderDetail, RepositoryError> {
        let mut store = self.lock();
        let detail = store
            .details
            .iter_mut()
            .find(|d| d.order_detail_id == req.order_detail_id)
            .ok_or(RepositoryError::NotFound)?;

        detail.quantity = req.quantity;
        detail.unit_price = req.unit_price;
        detail.total_price = req.total_price;
        Ok(detail.clone())
    }

    async fn delete_detail(&self, id: i32) -> Result<(), RepositoryError> {
        let mut store = self.lock();
        let before = store.details.len();
        store.details.retain(|d| d.order_detail_id != id);
        if store.details.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

/// Gateway that always issues a token derived from the order id.
pub struct StaticGateway;

#[async_trait]
impl PaymentGatewayTrait for StaticGateway {
    async fn create_snap_token(
        &self,
        req: &CreateTransactionRequest,
    ) -> Result<SnapTokenResponse, ServiceError> {
        Ok(SnapTokenResponse {
            token: format!("snap-{}", req.order_id),
            redirect_url: None,
        })
    }
}

pub const TEST_JWT_SECRET: &str = "test-secret";

/// Full application state over the in-memory store. The pool never connects.
pub fn app_state(mem: &InMemory) -> AppState {
    let repositories = Repositories {
        user_query: Arc::new(mem.clone()),
        user_command: Arc::new(mem.clone()),
        product_query: Arc::new(mem.clone()),
        product_command: Arc::new(mem.clone()),
        order_query: Arc::new(mem.clone()),
        order_command: Arc::new(mem.clone()),
        order_detail_query: Arc::new(mem.clone()),
        order_detail_command: Arc::new(mem.clone()),
    };

    let jwt_config = Arc::new(JwtConfig::new(TEST_JWT_SECRET)) as DynJwtService;
    let upload_dir = std::env::temp_dir()
        .join("marketplace-router-uploads")
        .to_string_lossy()
        .into_owned();

    let mut registry = Registry::default();
    let di_container = DependenciesInject::new(
        DependenciesInjectDeps {
            repositories,
            gateway: Arc::new(StaticGateway),
            hashing: Arc::new(Hashing::with_cost(4)),
            jwt_config: jwt_config.clone(),
            upload: UploadConfig {
                dir: upload_dir.clone(),
                public_base_url: "http://localhost:5000".into(),
                max_bytes: 1024,
            },
        },
        &mut registry,
    );

    let pool = PgPoolOptions::new()
        .acquire_timeout(Duration::from_millis(200))
        .connect_lazy("postgres://marketplace@127.0.0.1:1/marketplace")
        .expect("lazy pool");

    AppState {
        di_container,
        jwt_config,
        registry: Arc::new(registry),
        system_metrics: Arc::new(SystemMetrics::new()),
        pool,
        upload_dir,
    }
}
