//! PostgreSQL repository tests.
//!
//! Run with: DATABASE_URL=postgres://... cargo test -p marketplace --test repository_postgres -- --nocapture
//!
//! Every test seeds its own seller, buyer and product, so they can share one
//! database and run in parallel. Without `DATABASE_URL` the tests are skipped.

use chrono::{Duration, Utc};
use marketplace::{
    abstract_trait::{
        order::repository::{OrderCommandRepositoryTrait, OrderQueryRepositoryTrait},
        product::repository::{ProductCommandRepositoryTrait, ProductQueryRepositoryTrait},
        user::repository::UserCommandRepositoryTrait,
    },
    domain::requests::{
        order::{CreateOrderRecord, FindAllOrders},
        product::{CreateProductRecord, FindAllProducts, UpdateProductRequest},
        user::CreateUserRecord,
    },
    model::{product::Product, user::User},
    repository::{
        order::{OrderCommandRepository, OrderQueryRepository},
        product::{ProductCommandRepository, ProductQueryRepository},
        user::UserCommandRepository,
    },
};
use shared::errors::RepositoryError;
use sqlx::{PgPool, postgres::PgPoolOptions};

/// Connect to PostgreSQL and run migrations, or `None` when no database is configured.
async fn connect_and_migrate() -> Option<PgPool> {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        println!("DATABASE_URL not set, skipping PostgreSQL repository tests");
        return None;
    };

    let pool = PgPoolOptions::new()
        .max_connections(16)
        .connect(&url)
        .await
        .expect("Failed to connect to PostgreSQL");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    Some(pool)
}

async fn seed_user(pool: &PgPool, role: &str) -> User {
    let tag = uuid::Uuid::new_v4().simple().to_string();

    UserCommandRepository::new(pool.clone())
        .create_user(&CreateUserRecord {
            name: format!("{role}-{}", &tag[..8]),
            email: format!("{role}-{tag}@example.com"),
            password: "not-a-real-hash".into(),
            phone: None,
            address: Some("Bandung".into()),
            role: role.into(),
            store_name: None,
            store_address: None,
            store_category: None,
            store_phone: None,
            profile_image: None,
            category: None,
        })
        .await
        .expect("Failed to seed user")
}

async fn seed_product(pool: &PgPool, seller_id: i32, stock: i32) -> Product {
    ProductCommandRepository::new(pool.clone())
        .create_product(&CreateProductRecord {
            name: "Roti Tawar Sisa Etalase".into(),
            description: None,
            image_url: None,
            price: 18_000,
            discount_price: Some(9_000),
            original_price: None,
            stock,
            expired_date: (Utc::now() + Duration::days(1)).naive_utc(),
            pickup_location: Some("Bandung".into()),
            seller_id,
            is_available: true,
            category: Some("roti".into()),
            food_status: None,
            storage: None,
            suggestion: None,
            checklist: vec![],
            halal: None,
        })
        .await
        .expect("Failed to seed product")
}

fn order_of(buyer_id: i32, product_id: i32, quantity: i32) -> CreateOrderRecord {
    CreateOrderRecord {
        buyer_id,
        product_id,
        quantity,
        delivery_method: "pickup".into(),
        pickup_time: None,
        delivery_address: None,
        delivery_fee: 0,
        status: "pending".into(),
        notes: None,
        payment_method: None,
    }
}

async fn stock_of(pool: &PgPool, product_id: i32) -> i32 {
    ProductQueryRepository::new(pool.clone())
        .find_by_id(product_id)
        .await
        .expect("Failed to load product")
        .expect("Product disappeared")
        .stock
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_orders_never_oversell() {
    let Some(pool) = connect_and_migrate().await else {
        return;
    };
    let seller = seed_user(&pool, "seller").await;
    let buyer = seed_user(&pool, "buyer").await;
    let product = seed_product(&pool, seller.user_id, 5).await;

    let repo = OrderCommandRepository::new(pool.clone());
    let attempts: Vec<_> = (0..12)
        .map(|_| {
            let repo = repo.clone();
            let req = order_of(buyer.user_id, product.product_id, 1);
            tokio::spawn(async move { repo.create_order(&req).await })
        })
        .collect();

    let mut placed = 0;
    let mut rejected = 0;
    for attempt in attempts {
        match attempt.await.expect("order task panicked") {
            Ok(_) => placed += 1,
            Err(RepositoryError::InsufficientStock { .. }) => rejected += 1,
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    assert_eq!(placed, 5);
    assert_eq!(rejected, 7);
    assert_eq!(stock_of(&pool, product.product_id).await, 0);
}

#[tokio::test]
async fn cancel_restores_stock_exactly_once() {
    let Some(pool) = connect_and_migrate().await else {
        return;
    };
    let seller = seed_user(&pool, "seller").await;
    let buyer = seed_user(&pool, "buyer").await;
    let product = seed_product(&pool, seller.user_id, 5).await;
    let repo = OrderCommandRepository::new(pool.clone());

    let (order, detail) = repo
        .create_order(&order_of(buyer.user_id, product.product_id, 2))
        .await
        .unwrap();
    assert_eq!(detail.total_price, 18_000);
    assert_eq!(stock_of(&pool, product.product_id).await, 3);

    let (cancelled, restored) = repo.cancel_order(order.order_id).await.unwrap();
    assert_eq!(cancelled.status, "cancelled");
    assert_eq!(restored, 2);
    assert_eq!(stock_of(&pool, product.product_id).await, 5);

    let err = repo.cancel_order(order.order_id).await.unwrap_err();
    assert!(matches!(err, RepositoryError::InvalidState(_)));
    assert_eq!(stock_of(&pool, product.product_id).await, 5);

    // a cancelled order has nothing left to give back
    repo.delete_order(order.order_id).await.unwrap();
    assert_eq!(stock_of(&pool, product.product_id).await, 5);
}

#[tokio::test]
async fn deleting_an_open_order_restores_stock() {
    let Some(pool) = connect_and_migrate().await else {
        return;
    };
    let seller = seed_user(&pool, "seller").await;
    let buyer = seed_user(&pool, "buyer").await;
    let product = seed_product(&pool, seller.user_id, 5).await;
    let repo = OrderCommandRepository::new(pool.clone());

    let (order, _) = repo
        .create_order(&order_of(buyer.user_id, product.product_id, 3))
        .await
        .unwrap();
    assert_eq!(stock_of(&pool, product.product_id).await, 2);

    repo.delete_order(order.order_id).await.unwrap();
    assert_eq!(stock_of(&pool, product.product_id).await, 5);

    let err = repo.delete_order(order.order_id).await.unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound));
}

#[tokio::test]
async fn product_edit_keeps_stock_sold_in_between() {
    let Some(pool) = connect_and_migrate().await else {
        return;
    };
    let seller = seed_user(&pool, "seller").await;
    let buyer = seed_user(&pool, "buyer").await;
    let product = seed_product(&pool, seller.user_id, 5).await;

    // The seller's form was loaded before the buyer checked out.
    let stale = ProductQueryRepository::new(pool.clone())
        .find_by_id(product.product_id)
        .await
        .unwrap()
        .unwrap();
    OrderCommandRepository::new(pool.clone())
        .create_order(&order_of(buyer.user_id, product.product_id, 2))
        .await
        .unwrap();

    let rename = UpdateProductRequest {
        name: Some("Roti Tawar Gandum".into()),
        ..Default::default()
    };
    let patch = rename.into_patch(&stale).unwrap();
    let updated = ProductCommandRepository::new(pool.clone())
        .update_product(&patch)
        .await
        .unwrap();

    assert_eq!(updated.name, "Roti Tawar Gandum");
    assert_eq!(updated.stock, 3);
    assert_eq!(updated.discount_price, Some(9_000));

    let clear: UpdateProductRequest =
        serde_json::from_str(r#"{"discount_price": null}"#).unwrap();
    let updated = ProductCommandRepository::new(pool.clone())
        .update_product(&clear.into_patch(&updated).unwrap())
        .await
        .unwrap();
    assert_eq!(updated.discount_price, None);
    assert_eq!(updated.stock, 3);
}

#[tokio::test]
async fn page_past_the_end_still_reports_total() {
    let Some(pool) = connect_and_migrate().await else {
        return;
    };
    let seller = seed_user(&pool, "seller").await;
    let buyer = seed_user(&pool, "buyer").await;
    let first = seed_product(&pool, seller.user_id, 4).await;
    seed_product(&pool, seller.user_id, 4).await;

    let (rows, total) = ProductQueryRepository::new(pool.clone())
        .find_all(&FindAllProducts {
            page: 9,
            page_size: 10,
            seller_id: Some(seller.user_id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(rows.is_empty());
    assert_eq!(total, 2);

    OrderCommandRepository::new(pool.clone())
        .create_order(&order_of(buyer.user_id, first.product_id, 1))
        .await
        .unwrap();
    let (rows, total) = OrderQueryRepository::new(pool.clone())
        .find_all(&FindAllOrders {
            page: 3,
            page_size: 5,
            buyer_id: Some(buyer.user_id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(rows.is_empty());
    assert_eq!(total, 1);
}

#[tokio::test]
async fn seller_with_products_cannot_be_deleted() {
    let Some(pool) = connect_and_migrate().await else {
        return;
    };
    let seller = seed_user(&pool, "seller").await;
    seed_product(&pool, seller.user_id, 1).await;

    let err = UserCommandRepository::new(pool.clone())
        .delete_user(seller.user_id)
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::ForeignKey(_)));
}
