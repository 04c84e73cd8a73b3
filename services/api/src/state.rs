//! Application state shared across handlers

use sqlx::PgPool;

use crate::{
    auth::AuthService,
    repositories::{DesignRepository, ProductRepository, UserRepository},
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth: AuthService<UserRepository>,
    pub products: ProductRepository,
    pub designs: DesignRepository,
}
