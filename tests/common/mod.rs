// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use std::path::PathBuf;
use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::{test, web, App};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use parking_lot::Mutex;
use uuid::Uuid;

use storefront::config::AppConfig;
use storefront::db::{ListFilter, ProductDraft, ProductRepository, UserRepository};
use storefront::errors::Result;
use storefront::models::{Product, User};
use storefront::state::AppState;
use storefront::web::auth::{USER_ID_HEADER, USER_ROLE_HEADER};
use storefront::web::configure_app_routes;

// --- In-memory store ---

/// Implements the repository traits over plain vectors, mirroring the
/// documented listing predicate so the HTTP surface can be exercised
/// without a database.
#[derive(Default)]
pub struct MemoryStore {
  pub products: Mutex<Vec<Product>>,
  pub users: Mutex<Vec<User>>,
}

fn matches(product: &Product, filter: &ListFilter) -> bool {
  if product.is_deleted || product.stock <= 0 {
    return false;
  }
  if let Some(category) = &filter.category {
    if product.category.as_deref() != Some(category.as_str()) {
      return false;
    }
  }
  if let Some(q) = &filter.q {
    if !product.product_name.to_lowercase().contains(&q.to_lowercase()) {
      return false;
    }
  }
  true
}

impl MemoryStore {
  pub fn new() -> Arc<Self> {
    Arc::new(Self::default())
  }

  /// Seeds a product directly, bypassing the HTTP surface. `age_seconds`
  /// pushes `created_at` into the past so listing order is deterministic.
  pub fn seed_product(
    &self,
    name: &str,
    category: Option<&str>,
    stock: i32,
    is_deleted: bool,
    age_seconds: i64,
  ) -> Product {
    let now = Utc::now();
    let product = Product {
      id: Uuid::new_v4(),
      product_name: name.to_string(),
      description: Some(format!("{} description", name)),
      price: 9.99,
      stock,
      image: None,
      brand: Some("Acme".to_string()),
      category: category.map(String::from),
      is_deleted,
      created_at: now - Duration::seconds(age_seconds),
      updated_at: now,
    };
    self.products.lock().push(product.clone());
    product
  }

  pub fn seed_user(&self, username: &str, role: &str) -> User {
    let now = Utc::now();
    let user = User {
      id: Uuid::new_v4(),
      username: username.to_string(),
      email: format!("{}@example.com", username),
      role: role.to_string(),
      image: None,
      created_at: now,
      updated_at: now,
    };
    self.users.lock().push(user.clone());
    user
  }

  pub fn product_count(&self) -> usize {
    self.products.lock().len()
  }

  pub fn product_by_id(&self, id: Uuid) -> Option<Product> {
    self.products.lock().iter().find(|p| p.id == id).cloned()
  }
}

#[async_trait]
impl ProductRepository for MemoryStore {
  async fn count(&self, filter: &ListFilter) -> Result<i64> {
    Ok(self.products.lock().iter().filter(|p| matches(p, filter)).count() as i64)
  }

  async fn list(&self, filter: &ListFilter, skip: i64, limit: i64) -> Result<Vec<Product>> {
    let mut items: Vec<Product> = self
      .products
      .lock()
      .iter()
      .filter(|p| matches(p, filter))
      .cloned()
      .collect();
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(
      items
        .into_iter()
        .skip(skip.max(0) as usize)
        .take(limit.max(0) as usize)
        .collect(),
    )
  }

  async fn get(&self, id: Uuid) -> Result<Option<Product>> {
    Ok(self.product_by_id(id))
  }

  async fn insert(&self, draft: &ProductDraft) -> Result<Product> {
    let now = Utc::now();
    let product = Product {
      id: Uuid::new_v4(),
      product_name: draft.product_name.clone(),
      description: draft.description.clone(),
      price: draft.price,
      stock: draft.stock,
      image: draft.image.clone(),
      brand: draft.brand.clone(),
      category: draft.category.clone(),
      is_deleted: false,
      created_at: now,
      updated_at: now,
    };
    self.products.lock().push(product.clone());
    Ok(product)
  }

  async fn replace(&self, id: Uuid, draft: &ProductDraft) -> Result<Option<Product>> {
    let mut products = self.products.lock();
    match products.iter_mut().find(|p| p.id == id) {
      Some(product) => {
        product.product_name = draft.product_name.clone();
        product.description = draft.description.clone();
        product.price = draft.price;
        product.stock = draft.stock;
        product.image = draft.image.clone();
        product.brand = draft.brand.clone();
        product.category = draft.category.clone();
        product.updated_at = Utc::now();
        Ok(Some(product.clone()))
      }
      None => Ok(None),
    }
  }

  async fn soft_delete(&self, id: Uuid) -> Result<Option<Product>> {
    let mut products = self.products.lock();
    match products.iter_mut().find(|p| p.id == id) {
      Some(product) => {
        product.is_deleted = true;
        product.updated_at = Utc::now();
        Ok(Some(product.clone()))
      }
      None => Ok(None),
    }
  }
}

#[async_trait]
impl UserRepository for MemoryStore {
  async fn get(&self, id: Uuid) -> Result<Option<User>> {
    Ok(self.users.lock().iter().find(|u| u.id == id).cloned())
  }

  async fn set_image(&self, id: Uuid, image: &str) -> Result<Option<User>> {
    let mut users = self.users.lock();
    match users.iter_mut().find(|u| u.id == id) {
      Some(user) => {
        user.image = Some(image.to_string());
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
      }
      None => Ok(None),
    }
  }
}

// --- App plumbing ---

pub fn test_state_with_upload_dir(store: Arc<MemoryStore>, upload_dir: PathBuf) -> AppState {
  AppState {
    products: store.clone(),
    users: store,
    config: Arc::new(AppConfig {
      server_host: "127.0.0.1".to_string(),
      server_port: 0,
      database_url: "postgres://unused".to_string(),
      upload_dir,
      run_migrations: false,
    }),
  }
}

pub fn test_state(store: Arc<MemoryStore>) -> AppState {
  let upload_dir = std::env::temp_dir().join(format!("storefront-test-{}", Uuid::new_v4()));
  test_state_with_upload_dir(store, upload_dir)
}

/// Builds the full application and dispatches one request against it.
pub async fn send(state: &AppState, req: test::TestRequest) -> ServiceResponse<impl MessageBody> {
  let app = test::init_service(
    App::new()
      .app_data(web::Data::new(state.clone()))
      .configure(configure_app_routes),
  )
  .await;
  test::call_service(&app, req.to_request()).await
}

pub async fn read_json(resp: ServiceResponse<impl MessageBody>) -> serde_json::Value {
  test::read_body_json(resp).await
}

// --- Identity helpers ---

pub fn as_admin(req: test::TestRequest) -> test::TestRequest {
  req
    .insert_header((USER_ID_HEADER, Uuid::new_v4().to_string()))
    .insert_header((USER_ROLE_HEADER, "admin"))
}

pub fn as_customer(req: test::TestRequest) -> test::TestRequest {
  req
    .insert_header((USER_ID_HEADER, Uuid::new_v4().to_string()))
    .insert_header((USER_ROLE_HEADER, "customer"))
}

pub fn as_user(req: test::TestRequest, user_id: Uuid, role: &str) -> test::TestRequest {
  req
    .insert_header((USER_ID_HEADER, user_id.to_string()))
    .insert_header((USER_ROLE_HEADER, role))
}

// --- Multipart request bodies ---

pub struct MultipartBuilder {
  boundary: String,
  body: Vec<u8>,
}

impl MultipartBuilder {
  pub fn new() -> Self {
    Self {
      boundary: format!("----storefront-test-{}", Uuid::new_v4()),
      body: Vec::new(),
    }
  }

  pub fn text(mut self, name: &str, value: impl ToString) -> Self {
    self.body.extend_from_slice(
      format!(
        "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
        self.boundary,
        name,
        value.to_string()
      )
      .as_bytes(),
    );
    self
  }

  pub fn file(mut self, name: &str, file_name: &str, content_type: &str, bytes: &[u8]) -> Self {
    self.body.extend_from_slice(
      format!(
        "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
        self.boundary, name, file_name, content_type
      )
      .as_bytes(),
    );
    self.body.extend_from_slice(bytes);
    self.body.extend_from_slice(b"\r\n");
    self
  }

  pub fn build(mut self) -> (String, Vec<u8>) {
    self.body.extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
    (
      format!("multipart/form-data; boundary={}", self.boundary),
      self.body,
    )
  }
}

/// A create-product form with the usual required fields.
pub fn product_form(name: &str, price: f64, stock: i32, category: Option<&str>) -> MultipartBuilder {
  let mut form = MultipartBuilder::new()
    .text("product_name", name)
    .text("price", price)
    .text("stock", stock);
  if let Some(category) = category {
    form = form.text("category", category);
  }
  form
}

pub fn multipart_request(uri: &str, method_put: bool, form: MultipartBuilder) -> test::TestRequest {
  let (content_type, body) = form.build();
  let req = if method_put {
    test::TestRequest::put()
  } else {
    test::TestRequest::post()
  };
  req
    .uri(uri)
    .insert_header(("content-type", content_type))
    .set_payload(body)
}
