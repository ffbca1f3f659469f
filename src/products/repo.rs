use sqlx::PgPool;

use crate::products::repo_types::{NewProduct, Product, ProductPatch};
use crate::store::StoreResult;

pub async fn insert(db: &PgPool, new: &NewProduct) -> StoreResult<Product> {
    let product = sqlx::query_as::<_, Product>(
        r#"
        INSERT INTO products (name, price)
        VALUES ($1, $2)
        RETURNING id, name, price
        "#,
    )
    .bind(&new.product_name)
    .bind(new.price)
    .fetch_one(db)
    .await?;
    Ok(product)
}

pub async fn list(db: &PgPool) -> StoreResult<Vec<Product>> {
    let rows = sqlx::query_as::<_, Product>(r#"SELECT id, name, price FROM products ORDER BY id"#)
        .fetch_all(db)
        .await?;
    Ok(rows)
}

pub async fn find(db: &PgPool, id: i64) -> StoreResult<Option<Product>> {
    let row = sqlx::query_as::<_, Product>(r#"SELECT id, name, price FROM products WHERE id = $1"#)
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(row)
}

pub async fn update(db: &PgPool, id: i64, patch: ProductPatch) -> StoreResult<Option<Product>> {
    let mut tx = db.begin().await?;

    let Some(mut product) = sqlx::query_as::<_, Product>(
        r#"SELECT id, name, price FROM products WHERE id = $1 FOR UPDATE"#,
    )
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?
    else {
        return Ok(None);
    };

    patch.apply(&mut product);

    let product = sqlx::query_as::<_, Product>(
        r#"
        UPDATE products
           SET name = $2, price = $3
         WHERE id = $1
        RETURNING id, name, price
        "#,
    )
    .bind(id)
    .bind(&product.product_name)
    .bind(product.price)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(Some(product))
}

/// Join rows referencing the product are removed by the cascade.
pub async fn delete(db: &PgPool, id: i64) -> StoreResult<bool> {
    let res = sqlx::query(r#"DELETE FROM products WHERE id = $1"#)
        .bind(id)
        .execute(db)
        .await?;
    Ok(res.rows_affected() > 0)
}
