//! Repositories for database operations

pub mod design;
pub mod product;
pub mod user;

// Re-export for convenience
pub use design::DesignRepository;
pub use product::ProductRepository;
pub use user::{StoreError, UserRepository, UserStore};
