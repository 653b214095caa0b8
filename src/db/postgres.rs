// src/db/postgres.rs

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;
use uuid::Uuid;

use crate::errors::Result;
use crate::models::{Product, User};

use super::{ListFilter, ProductDraft, ProductRepository, UserRepository};

/// Production store backed by PostgreSQL. All queries are runtime-checked
/// (`query_as`), so the crate builds without a live database.
#[derive(Clone)]
pub struct PgStore {
  pool: PgPool,
}

impl PgStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

/// Appends the listing predicate to `builder`. Count and page queries both
/// go through here, which is what guarantees the returned `total` counts
/// exactly what pagination is paging over.
fn push_list_predicate(builder: &mut QueryBuilder<'_, Postgres>, filter: &ListFilter) {
  builder.push(" WHERE is_deleted = FALSE AND stock > 0");
  if let Some(category) = &filter.category {
    builder.push(" AND category = ");
    builder.push_bind(category.clone());
  }
  if let Some(q) = &filter.q {
    builder.push(" AND product_name ILIKE ");
    builder.push_bind(format!("%{}%", escape_like(q)));
  }
}

/// `\`, `%` and `_` are LIKE metacharacters; escaping them makes the search
/// term match as a plain substring.
fn escape_like(raw: &str) -> String {
  let mut escaped = String::with_capacity(raw.len());
  for ch in raw.chars() {
    if matches!(ch, '\\' | '%' | '_') {
      escaped.push('\\');
    }
    escaped.push(ch);
  }
  escaped
}

#[async_trait]
impl ProductRepository for PgStore {
  #[instrument(name = "db::products::count", skip(self))]
  async fn count(&self, filter: &ListFilter) -> Result<i64> {
    let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM products");
    push_list_predicate(&mut builder, filter);
    let total: i64 = builder.build_query_scalar().fetch_one(&self.pool).await?;
    Ok(total)
  }

  #[instrument(name = "db::products::list", skip(self))]
  async fn list(&self, filter: &ListFilter, skip: i64, limit: i64) -> Result<Vec<Product>> {
    let mut builder = QueryBuilder::new(
      "SELECT id, product_name, description, price, stock, image, brand, category, is_deleted, created_at, updated_at FROM products",
    );
    push_list_predicate(&mut builder, filter);
    builder.push(" ORDER BY created_at DESC LIMIT ");
    builder.push_bind(limit);
    builder.push(" OFFSET ");
    builder.push_bind(skip);
    let products = builder.build_query_as::<Product>().fetch_all(&self.pool).await?;
    Ok(products)
  }

  #[instrument(name = "db::products::get", skip(self), fields(product_id = %id))]
  async fn get(&self, id: Uuid) -> Result<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(
      "SELECT id, product_name, description, price, stock, image, brand, category, is_deleted, created_at, updated_at \
       FROM products WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;
    Ok(product)
  }

  #[instrument(name = "db::products::insert", skip(self, draft), fields(product_name = %draft.product_name))]
  async fn insert(&self, draft: &ProductDraft) -> Result<Product> {
    let product = sqlx::query_as::<_, Product>(
      "INSERT INTO products (product_name, description, price, stock, image, brand, category) \
       VALUES ($1, $2, $3, $4, $5, $6, $7) \
       RETURNING id, product_name, description, price, stock, image, brand, category, is_deleted, created_at, updated_at",
    )
    .bind(&draft.product_name)
    .bind(&draft.description)
    .bind(draft.price)
    .bind(draft.stock)
    .bind(&draft.image)
    .bind(&draft.brand)
    .bind(&draft.category)
    .fetch_one(&self.pool)
    .await?;
    Ok(product)
  }

  #[instrument(name = "db::products::replace", skip(self, draft), fields(product_id = %id))]
  async fn replace(&self, id: Uuid, draft: &ProductDraft) -> Result<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(
      "UPDATE products \
       SET product_name = $1, description = $2, price = $3, stock = $4, image = $5, brand = $6, category = $7, updated_at = NOW() \
       WHERE id = $8 \
       RETURNING id, product_name, description, price, stock, image, brand, category, is_deleted, created_at, updated_at",
    )
    .bind(&draft.product_name)
    .bind(&draft.description)
    .bind(draft.price)
    .bind(draft.stock)
    .bind(&draft.image)
    .bind(&draft.brand)
    .bind(&draft.category)
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;
    Ok(product)
  }

  #[instrument(name = "db::products::soft_delete", skip(self), fields(product_id = %id))]
  async fn soft_delete(&self, id: Uuid) -> Result<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(
      "UPDATE products SET is_deleted = TRUE, updated_at = NOW() \
       WHERE id = $1 \
       RETURNING id, product_name, description, price, stock, image, brand, category, is_deleted, created_at, updated_at",
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;
    Ok(product)
  }
}

#[async_trait]
impl UserRepository for PgStore {
  #[instrument(name = "db::users::get", skip(self), fields(user_id = %id))]
  async fn get(&self, id: Uuid) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
      "SELECT id, username, email, role, image, created_at, updated_at FROM users WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;
    Ok(user)
  }

  #[instrument(name = "db::users::set_image", skip(self, image), fields(user_id = %id))]
  async fn set_image(&self, id: Uuid, image: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
      "UPDATE users SET image = $1, updated_at = NOW() \
       WHERE id = $2 \
       RETURNING id, username, email, role, image, created_at, updated_at",
    )
    .bind(image)
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;
    Ok(user)
  }
}
