//! Row builders and raw-SQL helpers for catalog tests.

#![allow(dead_code)]

use sqlx::{Pool, Sqlite};
use stockroom_catalog::models::ProductRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Build a product row owned by `user_id` with a given business code.
pub fn product_row(user_id: Uuid, product_code: &str) -> ProductRow {
    product_row_at(user_id, product_code, OffsetDateTime::now_utc())
}

/// Build a product row with an explicit creation timestamp, for tests that
/// assert ordering.
pub fn product_row_at(user_id: Uuid, product_code: &str, created_at: OffsetDateTime) -> ProductRow {
    ProductRow {
        product_id: Uuid::new_v4(),
        user_id,
        name: format!("Product {}", product_code),
        category: "General".to_string(),
        unit_price: 1999,
        quantity: 25,
        description: "Test product".to_string(),
        image_path: None,
        product_code: product_code.to_string(),
        is_active: true,
        created_at,
        updated_at: created_at,
    }
}

/// Insert `count` order detail rows referencing the product.
pub async fn insert_order_details(pool: &Pool<Sqlite>, product_id: Uuid, count: usize) {
    let now = OffsetDateTime::now_utc();
    for _ in 0..count {
        sqlx::query(
            "INSERT INTO order_details (order_detail_id, order_id, product_id, quantity, unit_price, created_at) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(Uuid::new_v4())
        .bind(Uuid::new_v4())
        .bind(product_id)
        .bind(1_i64)
        .bind(1999_i64)
        .bind(now)
        .execute(pool)
        .await
        .expect("Insert order detail failed");
    }
}

/// Insert `count` cart item rows referencing the product.
pub async fn insert_cart_items(pool: &Pool<Sqlite>, product_id: Uuid, user_id: Uuid, count: usize) {
    let now = OffsetDateTime::now_utc();
    for _ in 0..count {
        sqlx::query(
            "INSERT INTO cart_items (cart_item_id, user_id, product_id, quantity, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(product_id)
        .bind(2_i64)
        .bind(now)
        .execute(pool)
        .await
        .expect("Insert cart item failed");
    }
}

/// Insert `count` inventory log rows referencing the product.
pub async fn insert_inventory_logs(
    pool: &Pool<Sqlite>,
    product_id: Uuid,
    user_id: Uuid,
    count: usize,
) {
    let now = OffsetDateTime::now_utc();
    for _ in 0..count {
        sqlx::query(
            "INSERT INTO inventory_logs (log_id, product_id, user_id, quantity_change, note, created_at) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(Uuid::new_v4())
        .bind(product_id)
        .bind(user_id)
        .bind(-1_i64)
        .bind("restock adjustment")
        .bind(now)
        .execute(pool)
        .await
        .expect("Insert inventory log failed");
    }
}

/// Drop a table to simulate a deployment where it does not exist.
pub async fn drop_table(pool: &Pool<Sqlite>, table: &str) {
    sqlx::query(&format!("DROP TABLE {}", table))
        .execute(pool)
        .await
        .expect("Drop table failed");
}

/// Count rows in a dependent table referencing the product.
pub async fn count_rows(pool: &Pool<Sqlite>, table: &str, product_id: Uuid) -> i64 {
    sqlx::query_scalar(&format!(
        "SELECT COUNT(*) FROM {} WHERE product_id = ?",
        table
    ))
    .bind(product_id)
    .fetch_one(pool)
    .await
    .expect("Count rows failed")
}
