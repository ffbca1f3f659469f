use sqlx::PgPool;

use crate::store::{StoreError, StoreResult};
use crate::users::repo_types::{NewUser, User, UserPatch};

fn email_taken(email: &str) -> impl FnOnce() -> String + '_ {
    move || format!("email {email} is already registered")
}

fn unexpected_reference() -> String {
    "referenced row not found".into()
}

/// Insert a new user.
pub async fn insert(db: &PgPool, new: &NewUser) -> StoreResult<User> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (name, email, address)
        VALUES ($1, $2, $3)
        RETURNING id, name, email, address
        "#,
    )
    .bind(&new.name)
    .bind(&new.email)
    .bind(&new.address)
    .fetch_one(db)
    .await
    .map_err(|e| StoreError::from_sqlx(e, email_taken(&new.email), unexpected_reference))
}

pub async fn list(db: &PgPool) -> StoreResult<Vec<User>> {
    let rows = sqlx::query_as::<_, User>(
        r#"SELECT id, name, email, address FROM users ORDER BY id"#,
    )
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn find(db: &PgPool, id: i64) -> StoreResult<Option<User>> {
    let row = sqlx::query_as::<_, User>(
        r#"SELECT id, name, email, address FROM users WHERE id = $1"#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

/// Lock the row, merge the patch and write it back in one transaction.
pub async fn update(db: &PgPool, id: i64, patch: UserPatch) -> StoreResult<Option<User>> {
    let mut tx = db.begin().await?;

    let Some(mut user) = sqlx::query_as::<_, User>(
        r#"SELECT id, name, email, address FROM users WHERE id = $1 FOR UPDATE"#,
    )
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?
    else {
        return Ok(None);
    };

    patch.apply(&mut user);

    let user = sqlx::query_as::<_, User>(
        r#"
        UPDATE users
           SET name = $2, email = $3, address = $4
         WHERE id = $1
        RETURNING id, name, email, address
        "#,
    )
    .bind(id)
    .bind(&user.name)
    .bind(&user.email)
    .bind(&user.address)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| StoreError::from_sqlx(e, email_taken(&user.email), unexpected_reference))?;

    tx.commit().await?;
    Ok(Some(user))
}

/// Orders (and their join rows) go with the user via `ON DELETE CASCADE`.
pub async fn delete(db: &PgPool, id: i64) -> StoreResult<bool> {
    let res = sqlx::query(r#"DELETE FROM users WHERE id = $1"#)
        .bind(id)
        .execute(db)
        .await?;
    Ok(res.rows_affected() > 0)
}
